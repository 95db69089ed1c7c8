use std::fs::File;
use std::io::{self, BufRead, BufReader};

use chart_drawings::config::EngineConfig;
use chart_drawings::geometry::{LogicalPoint, ScreenPoint};
use chart_drawings::input::{Button, Key, Modifiers};
use chart_drawings::mapper::LinearMapper;
use chart_drawings::{Action, EngineCore, Tool, ToolError, ToolKind};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::{Value, json};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: no tool at draw position {tool}")]
    NoSuchTool { line: usize, tool: usize },
}

#[derive(Parser, Debug)]
#[command(name = "chart-drawings", about = "Drive the chart drawing engine from the command line")]
struct Cli {
    #[arg(long, env = "CHART_DRAWINGS_WIDTH", default_value_t = 800.0)]
    width: f64,

    #[arg(long, env = "CHART_DRAWINGS_HEIGHT", default_value_t = 600.0)]
    height: f64,

    #[arg(long, env = "CHART_DRAWINGS_MIN_MOVE", default_value_t = 0.01)]
    min_move: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tool-types and their capabilities.
    Kinds,
    /// Resolve every anchor of a placed tool.
    Anchors {
        #[arg(long, value_parser = parse_kind)]
        kind: ToolKind,
        /// JSON array of `{"time", "price"}` points.
        #[arg(long)]
        points: String,
        /// JSON object of option overrides.
        #[arg(long, default_value = "{}")]
        options: String,
    },
    /// Replay a JSONL gesture script and print actions per event and the final frame.
    Replay {
        #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
    },
}

/// One line of a gesture script.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ScriptEvent {
    Select {
        kind: Option<ToolKind>,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Grab an anchor of the tool at position `tool` in draw order.
    DragAnchor {
        tool: usize,
        anchor: usize,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mapper = LinearMapper::new(cli.width, cli.height).with_min_move(cli.min_move);
    let config = EngineConfig::from_env()?;
    tracing::debug!(?config, width = cli.width, height = cli.height, "engine configured");

    match cli.command {
        Command::Kinds => print_json(&kinds_json()),
        Command::Anchors { kind, points, options } => {
            let json = anchors_json(kind, &points, &options, config, &mapper)?;
            print_json(&json)
        }
        Command::Replay { input } => run_replay(&input, config, &mapper),
    }
}

fn parse_kind(raw: &str) -> Result<ToolKind, String> {
    serde_json::from_value(Value::String(raw.to_owned())).map_err(|e| e.to_string())
}

fn kinds_json() -> Value {
    let config = EngineConfig::default();
    let kinds: Vec<Value> = ToolKind::ALL
        .iter()
        .map(|&kind| {
            let tool = Tool::new(kind, config);
            json!({
                "kind": kind,
                "points_count": tool.points_count().fixed(),
                "max_anchor_index": kind.geometry().max_anchor_index,
                "click_click": tool.supports_click_click_creation(),
                "click_drag": tool.supports_click_drag_creation(),
                "shift_constraint": tool.supports_shift_constraint(),
            })
        })
        .collect();
    Value::Array(kinds)
}

fn anchors_json(
    kind: ToolKind,
    points: &str,
    options: &str,
    config: EngineConfig,
    mapper: &LinearMapper,
) -> Result<Value, CliError> {
    let points: Vec<LogicalPoint> = serde_json::from_str(points)?;
    let options: Value = serde_json::from_str(options)?;
    let tool = Tool::with_points(kind, points, &options, config)?;
    Ok(json!({
        "kind": kind,
        "anchors": tool.anchors(mapper),
        "visibility": tool.visibility(mapper),
        "readout": tool.readout(mapper),
    }))
}

fn run_replay(input: &str, config: EngineConfig, mapper: &LinearMapper) -> Result<(), CliError> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(input).map_err(|source| CliError::Io { context: "open input", source })?;
        Box::new(BufReader::new(file))
    };

    let mut engine = EngineCore::new(config);
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io { context: "read input", source })?;
        let Some(event) = parse_script_line(&line)? else {
            continue;
        };
        let actions = apply_event(&mut engine, &event, mapper, index + 1)?;
        if !actions.is_empty() {
            print_json(&json!({ "line": index + 1, "actions": actions }))?;
        }
    }
    print_json(&json!({ "frame": engine.frame(mapper) }))
}

/// Parse one script line. Blank lines and `#` comments are skipped.
fn parse_script_line(line: &str) -> Result<Option<ScriptEvent>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

fn apply_event(
    engine: &mut EngineCore,
    event: &ScriptEvent,
    mapper: &LinearMapper,
    line: usize,
) -> Result<Vec<Action>, CliError> {
    let actions = match *event {
        ScriptEvent::Select { kind } => {
            engine.set_active_kind(kind);
            Vec::new()
        }
        ScriptEvent::Down { x, y, button, modifiers } => {
            engine.on_pointer_down(ScreenPoint::new(x, y), button, modifiers, mapper)
        }
        ScriptEvent::Move { x, y, modifiers } => engine.on_pointer_move(ScreenPoint::new(x, y), modifiers, mapper),
        ScriptEvent::Up { x, y, button, modifiers } => {
            engine.on_pointer_up(ScreenPoint::new(x, y), button, modifiers, mapper)
        }
        ScriptEvent::Key { ref key, modifiers } => engine.on_key_down(&Key(key.clone()), modifiers),
        ScriptEvent::DragAnchor { tool, anchor } => {
            let Some(id) = engine.scene.sorted_tools().get(tool).map(|t| t.id()) else {
                return Err(CliError::NoSuchTool { line, tool });
            };
            if !engine.begin_anchor_drag(id, anchor, mapper) {
                tracing::warn!(line, %id, anchor, "anchor drag rejected");
            }
            Vec::new()
        }
    };
    Ok(actions)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string(value)?;
    println!("{rendered}");
    Ok(())
}
