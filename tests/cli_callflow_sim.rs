use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "callflow-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn lines_with_prefix<'a>(stdout: &'a str, prefix: &str) -> Vec<&'a str> {
    stdout.lines().filter(|line| line.starts_with(prefix)).collect()
}

const MESSAGES: &str = r#"
{
    "data": {
        "messages": [
            { "id": 1, "protocol": "RRC", "messageType": "RRC Connection Request",
              "parameters": { "direction": "UL_CCCH" } },
            { "id": 2, "protocol": "S1AP", "messageType": "Paging",
              "parameters": { "direction": "downlink" } },
            { "id": 3, "protocol": "RRC", "messageType": "Paging",
              "parameters": { "direction": "PCCH" } },
            { "id": 4, "protocol": "NAS", "messageType": "Service Request",
              "parameters": { "direction": "uplink" } },
            { "id": 5, "protocol": "NAS", "messageType": "Attach Request" }
        ]
    }
}
"#;

#[test]
fn callflow_sim_plays_all_messages_and_writes_replay_json() {
    let dir = unique_temp_dir("play");
    let messages = write_file(&dir, "messages.json", MESSAGES);
    let out_json = dir.join("events.json");

    let output = Command::new(env!("CARGO_BIN_EXE_callflow_sim"))
        .args([
            "--messages",
            messages.to_str().unwrap(),
            "--events-json",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run callflow_sim");
    assert!(
        output.status.success(),
        "callflow_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let renders = lines_with_prefix(&stdout, "render ");
    assert_eq!(renders.len(), 4, "stdout={stdout}");
    assert!(renders[0].contains("route=UE->eNB"), "{}", renders[0]);
    assert!(renders[1].contains("route=MME->eNB"), "{}", renders[1]);
    assert!(renders[2].contains("(broadcast)"), "{}", renders[2]);
    assert!(renders[3].contains("route=UE->MME"), "{}", renders[3]);
    assert_eq!(lines_with_prefix(&stdout, "warning ").len(), 1);

    let done = lines_with_prefix(&stdout, "done ");
    assert_eq!(done.len(), 1);
    assert!(done[0].contains("phase=completed"), "{}", done[0]);
    assert!(done[0].contains("enb_mme=2"), "{}", done[0]);

    let raw = fs::read_to_string(&out_json).expect("read events.json");
    let v: Value = serde_json::from_str(&raw).expect("parse events.json");
    let arr = v.as_array().expect("events.json must be a JSON array");
    assert_eq!(
        arr[0].get("kind").and_then(|k| k.as_str()),
        Some("meta"),
        "expected first replay event to be meta"
    );
    assert_eq!(arr[0]["total_messages"], 5);
    assert!(arr.iter().any(|e| e["kind"] == "expire"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn callflow_sim_step_mode_stops_after_requested_steps() {
    let dir = unique_temp_dir("step");
    let messages = write_file(&dir, "messages.json", MESSAGES);

    let output = Command::new(env!("CARGO_BIN_EXE_callflow_sim"))
        .args([
            "--messages",
            messages.to_str().unwrap(),
            "--mode",
            "step",
            "--start",
            "1",
            "--steps",
            "2",
            "--until-ms",
            "0",
        ])
        .output()
        .expect("run callflow_sim");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let renders = lines_with_prefix(&stdout, "render ");
    assert_eq!(renders.len(), 2, "stdout={stdout}");
    assert!(renders[0].contains("index=2"), "{}", renders[0]);
    assert!(renders[1].contains("index=3"), "{}", renders[1]);
    let done = lines_with_prefix(&stdout, "done ");
    assert!(done[0].contains("phase=idle"), "{}", done[0]);
    assert!(done[0].contains("current_index=2"), "{}", done[0]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn callflow_sim_pause_holds_the_cursor() {
    let dir = unique_temp_dir("pause");
    let messages = write_file(&dir, "messages.json", MESSAGES);

    let output = Command::new(env!("CARGO_BIN_EXE_callflow_sim"))
        .args([
            "--messages",
            messages.to_str().unwrap(),
            "--pause-at-ms",
            "1000",
            "--until-ms",
            "60000",
        ])
        .output()
        .expect("run callflow_sim");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(lines_with_prefix(&stdout, "render ").len(), 1, "stdout={stdout}");
    let done = lines_with_prefix(&stdout, "done ");
    assert!(done[0].contains("phase=paused"), "{}", done[0]);
    assert!(done[0].contains("current_index=0"), "{}", done[0]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn callflow_sim_rejects_filtered_ids_missing_from_full_list() {
    let dir = unique_temp_dir("filtered");
    let messages = write_file(&dir, "messages.json", MESSAGES);
    let filtered = write_file(&dir, "filtered.json", r#"[ { "id": 99 } ]"#);

    let output = Command::new(env!("CARGO_BIN_EXE_callflow_sim"))
        .args([
            "--messages",
            messages.to_str().unwrap(),
            "--filtered",
            filtered.to_str().unwrap(),
        ])
        .output()
        .expect("run callflow_sim");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("filtered message #99"), "stderr={stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn callflow_sim_fails_on_missing_messages_file() {
    let dir = unique_temp_dir("missing");
    let output = Command::new(env!("CARGO_BIN_EXE_callflow_sim"))
        .args(["--messages", dir.join("nope.json").to_str().unwrap()])
        .output()
        .expect("run callflow_sim");
    assert!(!output.status.success());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn callflow_sim_rejects_pause_in_step_mode() {
    let dir = unique_temp_dir("step-pause");
    let messages = write_file(&dir, "messages.json", MESSAGES);

    let output = Command::new(env!("CARGO_BIN_EXE_callflow_sim"))
        .args([
            "--messages",
            messages.to_str().unwrap(),
            "--mode",
            "step",
            "--pause-at-ms",
            "1000",
        ])
        .output()
        .expect("run callflow_sim");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--pause-at-ms"), "stderr={stderr}");
    assert!(lines_with_prefix(&String::from_utf8_lossy(&output.stdout), "render ").is_empty());

    let _ = fs::remove_dir_all(&dir);
}
