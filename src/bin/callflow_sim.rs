use callflow_rs::config::{ConfigError, PlaybackConfig};
use callflow_rs::load::{LoadError, check_subset, load_messages};
use callflow_rs::playback::CallFlowEngine;
use callflow_rs::replay::{ReplayEvent, ReplayEventKind, ReplayLog};
use callflow_rs::sim::SimTime;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Sequential playback driven by the virtual clock
    Play,
    /// Manual stepping, one message per step
    Step,
}

#[derive(Debug, Parser)]
#[command(
    name = "callflow-sim",
    about = "Replay an LTE signalling trace as a UE/eNB/MME call-flow animation"
)]
struct Args {
    /// Path to the messages JSON (array, {"messages": [...]} or {"data": {"messages": [...]}})
    #[arg(long)]
    messages: PathBuf,

    /// Optional filtered subset (same format); becomes the active list
    #[arg(long)]
    filtered: Option<PathBuf>,

    /// Playback config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start index in the active list
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Playback speed (clamped to the configured range)
    #[arg(long)]
    speed: Option<f64>,

    /// Viewport width in px
    #[arg(long)]
    viewport_width: Option<f64>,

    #[arg(long, value_enum, default_value_t = Mode::Play)]
    mode: Mode,

    /// Number of steps in step mode; defaults to the whole queue
    #[arg(long)]
    steps: Option<usize>,

    /// Pause playback at this virtual time (ms); play mode only
    #[arg(long)]
    pause_at_ms: Option<u64>,

    /// Resume this long (ms) after pausing
    #[arg(long, requires = "pause_at_ms")]
    resume_after_ms: Option<u64>,

    /// Jump to the next eNB-MME message this many times before playing
    #[arg(long, default_value_t = 0)]
    jump_enb_mme: usize,

    /// Run until this virtual time (ms); defaults to running until the queue drains
    #[arg(long)]
    until_ms: Option<u64>,

    /// Output replay events JSON
    #[arg(long)]
    events_json: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("serialize replay events: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.mode == Mode::Step && args.pause_at_ms.is_some() {
        Args::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--pause-at-ms cannot be used with --mode step",
            )
            .exit();
    }
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let cfg = match &args.config {
        Some(path) => PlaybackConfig::load(path)?,
        None => PlaybackConfig::default(),
    };
    let full = load_messages(&args.messages)?;
    let filtered = match &args.filtered {
        Some(path) => {
            let subset = load_messages(path)?;
            check_subset(&full, &subset)?;
            Some(subset)
        }
        None => None,
    };

    let log = ReplayLog::default();
    let mut engine = CallFlowEngine::new(cfg, log.clone())?;
    if let Some(w) = args.viewport_width {
        engine.set_viewport_width(w);
    }
    if let Some(speed) = args.speed {
        engine.set_speed(speed);
    }
    let active = filtered.as_ref().map_or(full.len(), Vec::len);
    log.record_meta(
        engine.now(),
        engine.player().topology(),
        active,
        engine.state().speed,
    );
    engine.load_messages(full);
    if filtered.is_some() {
        engine.apply_filter(filtered);
    }
    if args.start != 0 {
        engine.select_start(args.start);
    }

    for _ in 0..args.jump_enb_mme {
        engine.next_enb_mme();
    }

    match args.mode {
        Mode::Step => {
            let steps = args.steps.unwrap_or(engine.state().remaining());
            for _ in 0..steps {
                engine.step();
            }
        }
        Mode::Play => {
            engine.play();
            if let Some(at) = args.pause_at_ms {
                engine.run_until(SimTime::from_millis(at));
                engine.pause();
                if let Some(after) = args.resume_after_ms {
                    engine.run_for(SimTime::from_millis(after));
                    engine.resume();
                }
            }
        }
    }

    match args.until_ms {
        Some(ms) => engine.run_until(SimTime::from_millis(ms)),
        None => {
            engine.run();
        }
    }

    let events = log.snapshot();
    print_events(&events);
    let renders = events
        .iter()
        .filter(|e| matches!(e.kind, ReplayEventKind::Render { .. }))
        .count();
    let warnings = events
        .iter()
        .filter(|e| matches!(e.kind, ReplayEventKind::Warning { .. }))
        .count();
    println!(
        "done phase={} current_index={} absolute_index={} now_ms={} renders={} warnings={} enb_mme={}",
        engine.phase().label(),
        engine.state().current_index,
        engine.state().absolute_index(),
        engine.now().as_millis(),
        renders,
        warnings,
        engine.navigator().len(),
    );

    if let Some(path) = args.events_json {
        let json = serde_json::to_string_pretty(&events)?;
        fs::write(&path, json).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        eprintln!("wrote replay events to {}", path.display());
    }
    Ok(())
}

fn print_events(events: &[ReplayEvent]) {
    for ev in events {
        match &ev.kind {
            ReplayEventKind::Render {
                message_id,
                message_type,
                absolute_index,
                route,
                color,
                ..
            } => {
                let route = route.as_ref().map(ToString::to_string).unwrap_or_default();
                println!(
                    "render t_ms={} index={} id={} type={} route={} color={}",
                    ev.t_ms, absolute_index, message_id.0, message_type, route, color
                );
            }
            ReplayEventKind::Warning { reason, .. } => {
                println!("warning t_ms={} {}", ev.t_ms, reason);
            }
            _ => {}
        }
    }
}
