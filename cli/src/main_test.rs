use super::*;

fn mapper() -> LinearMapper {
    LinearMapper::new(800.0, 600.0)
}

fn replay(lines: &[&str]) -> (EngineCore, Vec<Action>) {
    let m = mapper();
    let mut engine = EngineCore::new(EngineConfig::default());
    let mut all = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if let Some(event) = parse_script_line(line).unwrap() {
            all.extend(apply_event(&mut engine, &event, &m, i + 1).unwrap());
        }
    }
    (engine, all)
}

#[test]
fn parse_skips_blank_and_comment_lines() {
    assert!(parse_script_line("   ").unwrap().is_none());
    assert!(parse_script_line("# setup").unwrap().is_none());
}

#[test]
fn parse_defaults_button_and_modifiers() {
    let event = parse_script_line(r#"{"event":"down","x":1,"y":2}"#).unwrap();
    assert_eq!(
        event,
        Some(ScriptEvent::Down { x: 1.0, y: 2.0, button: Button::Primary, modifiers: Modifiers::NONE })
    );
}

#[test]
fn parse_rejects_unknown_event() {
    assert!(parse_script_line(r#"{"event":"wheel"}"#).is_err());
}

#[test]
fn parse_kind_accepts_snake_case() {
    assert_eq!(parse_kind("risk_reward"), Ok(ToolKind::RiskReward));
    assert!(parse_kind("RiskReward").is_err());
}

#[test]
fn replay_two_click_trend_line() {
    let (engine, actions) = replay(&[
        r#"{"event":"select","kind":"trend_line"}"#,
        r#"{"event":"down","x":100,"y":500}"#,
        r#"{"event":"up","x":100,"y":500}"#,
        r#"{"event":"down","x":200,"y":400}"#,
        r#"{"event":"up","x":200,"y":400}"#,
    ]);
    assert!(actions.iter().any(|a| matches!(a, Action::ToolFinished { .. })));
    let frame = engine.frame(&mapper());
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].kind, ToolKind::TrendLine);
}

#[test]
fn replay_anchor_drag() {
    let (engine, _) = replay(&[
        r#"{"event":"select","kind":"price_range"}"#,
        r#"{"event":"down","x":100,"y":500}"#,
        r#"{"event":"up","x":100,"y":500}"#,
        r#"{"event":"down","x":200,"y":400}"#,
        r#"{"event":"up","x":200,"y":400}"#,
        r#"{"event":"select","kind":null}"#,
        r#"{"event":"drag_anchor","tool":0,"anchor":4}"#,
        r#"{"event":"move","x":150,"y":550}"#,
        r#"{"event":"up","x":150,"y":550}"#,
    ]);
    let tool = engine.scene.sorted_tools()[0];
    assert_eq!(tool.store().get(0), Some(LogicalPoint::new(100.0, 50.0)));
}

#[test]
fn drag_anchor_on_missing_tool_fails() {
    let m = mapper();
    let mut engine = EngineCore::new(EngineConfig::default());
    let event = ScriptEvent::DragAnchor { tool: 3, anchor: 0 };
    assert!(matches!(apply_event(&mut engine, &event, &m, 7), Err(CliError::NoSuchTool { line: 7, tool: 3 })));
}

#[test]
fn anchors_json_reports_derived_points() {
    let json = anchors_json(
        ToolKind::PriceRange,
        r#"[{"time":0,"price":100},{"time":10,"price":200}]"#,
        "{}",
        EngineConfig::default(),
        &mapper(),
    )
    .unwrap();
    assert_eq!(json["anchors"][2], json!({ "time": 0.0, "price": 200.0 }));
    assert_eq!(json["visibility"], json!("visible"));
    assert_eq!(json["readout"]["type"], json!("range"));
}

#[test]
fn anchors_json_rejects_wrong_point_count() {
    let result = anchors_json(ToolKind::Circle, "[]", "{}", EngineConfig::default(), &mapper());
    assert!(matches!(result, Err(CliError::Tool(_))));
}

#[test]
fn kinds_lists_every_tool() {
    let kinds = kinds_json();
    assert_eq!(kinds.as_array().map(Vec::len), Some(ToolKind::ALL.len()));
    assert_eq!(kinds[0]["kind"], json!(ToolKind::ALL[0]));
}
