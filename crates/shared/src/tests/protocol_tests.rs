use super::*;

#[test]
fn intents_use_tagged_snake_case_wire_format() {
    let intent = SessionIntent::SelectMood {
        mood: MoodId::Calm,
    };
    let json = serde_json::to_value(&intent).expect("json");
    assert_eq!(
        json,
        serde_json::json!({ "type": "select_mood", "payload": { "mood": "calm" } })
    );

    let parsed: SessionIntent =
        serde_json::from_str(r#"{"type":"toggle_pause"}"#).expect("parse");
    assert_eq!(parsed, SessionIntent::TogglePause);
}

#[test]
fn formats_elapsed_minutes_and_hours() {
    assert_eq!(format_elapsed(0), "00:00");
    assert_eq!(format_elapsed(305), "05:05");
    assert_eq!(format_elapsed(3725), "1:02:05");
}

#[test]
fn snapshot_omits_empty_optionals() {
    let snapshot = SessionSnapshot {
        session_id: None,
        phase: SessionPhase::CheckIn,
        mood: None,
        activity: None,
        running: false,
        paused: false,
        elapsed_secs: 0,
        final_elapsed_secs: None,
        last_milestone_minutes: 0,
    };
    let json = serde_json::to_value(&snapshot).expect("json");
    assert!(json.get("mood").is_none());
    assert_eq!(json["phase"], "check_in");
}
