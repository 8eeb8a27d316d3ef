use crate::config::PlaybackConfig;
use crate::model::{Direction, Message};
use crate::playback::CallFlowEngine;
use crate::replay::{ReplayEventKind, ReplayLog};
use crate::topo::Topology;
use serde_json::Value;

#[test]
fn meta_lists_entities_with_their_positions() {
    let log = ReplayLog::default();
    log.record_meta(Default::default(), &Topology::default(), 4, 5.0);

    let v: Value = serde_json::from_str(&log.to_json_pretty().expect("json")).expect("parse");
    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["kind"], "meta");
    assert_eq!(arr[0]["t_ms"], 0);
    assert_eq!(arr[0]["total_messages"], 4);
    let names: Vec<&str> = arr[0]["entities"]
        .as_array()
        .expect("entities")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(names, vec!["UE", "eNB", "MME"]);
    assert_eq!(arr[0]["entities"][2]["x"], 520.0);
}

#[test]
fn playback_events_serialize_with_kind_tags() {
    let log = ReplayLog::default();
    let mut engine =
        CallFlowEngine::new(PlaybackConfig::default(), log.clone()).expect("valid config");
    engine.load_messages(vec![
        Message::new(1, "S1AP", "Paging").with_direction(Direction::Downlink),
        Message::new(2, "NAS", "Attach Request"),
    ]);
    engine.play();
    engine.run();

    let events = log.snapshot();
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e.kind {
            ReplayEventKind::Meta { .. } => "meta",
            ReplayEventKind::State { .. } => "state",
            ReplayEventKind::Render { .. } => "render",
            ReplayEventKind::Warning { .. } => "warning",
            ReplayEventKind::Expire { .. } => "expire",
        })
        .collect();
    assert_eq!(kinds.first(), Some(&"state"));
    assert!(kinds.contains(&"render"));
    assert!(kinds.contains(&"warning"));
    assert_eq!(kinds.last(), Some(&"expire"));

    let v: Value = serde_json::to_value(&events).expect("serialize");
    let render = v
        .as_array()
        .expect("array")
        .iter()
        .find(|e| e["kind"] == "render")
        .expect("render");
    assert_eq!(render["message_id"], 1);
    assert_eq!(render["rule"], "s1ap-paging");
    assert_eq!(render["route"]["source"], "mme");
    assert_eq!(render["interface"], "s1");
    assert!(render.get("broadcast").is_none());
    assert_eq!(render["highlights"][0]["entity"], "mme");
    assert_eq!(render["highlights"][0]["delay_ms"], 0);

    let warning = v
        .as_array()
        .expect("array")
        .iter()
        .find(|e| e["kind"] == "warning")
        .expect("warning");
    assert_eq!(warning["message_id"], 2);
}

#[test]
fn replay_events_round_trip_through_json() {
    let log = ReplayLog::default();
    let mut engine =
        CallFlowEngine::new(PlaybackConfig::default(), log.clone()).expect("valid config");
    engine.load_messages(vec![
        Message::new(1, "RRC", "Paging").with_direction(Direction::Downlink),
    ]);
    engine.step();

    let events = log.snapshot();
    let raw = serde_json::to_string(&events).expect("serialize");
    let back: Vec<crate::replay::ReplayEvent> = serde_json::from_str(&raw).expect("parse");
    assert_eq!(back, events);
}
