mod clipboard;
mod error;
mod script;
mod session;

use std::time::Duration;

use canvas::config::EngineConfig;
use canvas::consts::{HISTORY_DEPTH, PASTE_OFFSET, RESIZE_MARGIN, SIDE_PANEL_WIDTH};
use canvas::engine::EngineCore;
use clap::Parser;

use crate::clipboard::MemoryClipboard;
use crate::error::HostError;
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "whiteboard", about = "Replay an input script against the whiteboard core and report the result")]
struct Cli {
    /// JSON-lines input script, or `-` for stdin.
    #[arg(env = "WHITEBOARD_SCRIPT", default_value = "-")]
    script: String,

    /// Initial clipboard text, as if copied from another board.
    #[arg(long, env = "WHITEBOARD_CLIPBOARD")]
    clipboard: Option<String>,

    /// Start from the demo board instead of an empty one.
    #[arg(long, env = "WHITEBOARD_SEED")]
    seed: bool,

    #[arg(long, env = "WHITEBOARD_WIDTH", default_value_t = 1280.0)]
    width: f64,

    #[arg(long, env = "WHITEBOARD_HEIGHT", default_value_t = 800.0)]
    height: f64,

    /// Minimum time between rendered frames; 0 renders immediately.
    #[arg(long, env = "WHITEBOARD_FRAME_MS", default_value_t = 0)]
    frame_ms: u64,

    #[arg(long, env = "WHITEBOARD_RESIZE_MARGIN", default_value_t = RESIZE_MARGIN)]
    resize_margin: f64,

    #[arg(long, env = "WHITEBOARD_PASTE_OFFSET", default_value_t = PASTE_OFFSET)]
    paste_offset: f64,

    #[arg(long, env = "WHITEBOARD_SIDE_PANEL_WIDTH", default_value_t = SIDE_PANEL_WIDTH)]
    side_panel_width: f64,

    #[arg(long, env = "WHITEBOARD_HISTORY_DEPTH", default_value_t = HISTORY_DEPTH)]
    history_depth: usize,

    #[arg(long, env = "WHITEBOARD_LOG_LEVEL", default_value = "info")]
    log_level: tracing::Level,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            resize_margin: self.resize_margin,
            paste_offset: self.paste_offset,
            side_panel_width: self.side_panel_width,
            history_depth: self.history_depth,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), HostError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).with_writer(std::io::stderr).init();

    let text = script::read_script(&cli.script).await?;
    let events = script::parse_script(&text)?;

    let mut core = EngineCore::with_config(cli.engine_config());
    if cli.seed {
        core.seed_demo();
    }
    core.set_viewport(cli.width, cli.height);

    tracing::info!(events = events.len(), seed = cli.seed, "replaying script");
    let clipboard = cli.clipboard.map_or_else(MemoryClipboard::default, MemoryClipboard::with_text);
    let mut session = Session::new(core, clipboard, Duration::from_millis(cli.frame_ms));
    let report = session.run(events).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
