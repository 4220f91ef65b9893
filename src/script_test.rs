use super::*;

// =============================================================
// Event shapes
// =============================================================

#[test]
fn parses_pointer_events_with_defaults() {
    let events = parse_script(
        r#"{"type":"pointer_down","x":1,"y":2}
{"type":"pointer_move","x":3,"y":4,"modifiers":{"shift":true}}
{"type":"pointer_up","x":3,"y":4,"button":"secondary"}"#,
    )
    .unwrap();
    assert_eq!(
        events,
        vec![
            ScriptEvent::PointerDown { x: 1.0, y: 2.0, button: Button::Primary, modifiers: Modifiers::default() },
            ScriptEvent::PointerMove { x: 3.0, y: 4.0, modifiers: Modifiers { shift: true, ..Default::default() } },
            ScriptEvent::PointerUp { x: 3.0, y: 4.0, button: Button::Secondary, modifiers: Modifiers::default() },
        ]
    );
}

#[test]
fn parses_keyboard_command_and_viewport() {
    let events = parse_script(
        r#"{"type":"key_down","key":"z","modifiers":{"meta":true}}
{"type":"command","name":"delete"}
{"type":"viewport","width":800,"height":600}
{"type":"double_click","x":5,"y":5}"#,
    )
    .unwrap();
    assert_eq!(
        events,
        vec![
            ScriptEvent::KeyDown { key: "z".into(), modifiers: Modifiers { meta: true, ..Default::default() } },
            ScriptEvent::Command { name: Command::Delete },
            ScriptEvent::Viewport { width: 800.0, height: 600.0 },
            ScriptEvent::DoubleClick { x: 5.0, y: 5.0 },
        ]
    );
}

// =============================================================
// Skipped lines
// =============================================================

#[test]
fn skips_blank_and_comment_lines() {
    let text = "\n# setup\n   \n{\"type\":\"command\",\"name\":\"copy\"}\n  # trailing comment\n";
    assert_eq!(parse_script(text).unwrap(), vec![ScriptEvent::Command { name: Command::Copy }]);
}

#[test]
fn empty_script_has_no_events() {
    assert!(parse_script("").unwrap().is_empty());
}

// =============================================================
// Errors
// =============================================================

#[test]
fn parse_error_reports_line_number() {
    let text = "# header\n{\"type\":\"command\",\"name\":\"copy\"}\n{\"type\":\"pointer_down\"}\n";
    match parse_script(text) {
        Err(HostError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn unknown_event_type_is_rejected() {
    let err = parse_script(r#"{"type":"wheel","dx":1}"#).unwrap_err();
    assert!(err.to_string().starts_with("script line 1:"));
}

#[test]
fn unknown_command_is_rejected() {
    assert!(parse_script(r#"{"type":"command","name":"cut"}"#).is_err());
}

#[tokio::test]
async fn read_script_missing_file() {
    let err = read_script("/nonexistent/whiteboard-script.jsonl").await.unwrap_err();
    assert!(matches!(err, HostError::ReadScript { .. }));
}
