use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use ceol::{EngineCommand, EngineHandle, EngineUpdate, Settings, spawn_engine};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

const DEMO_TUNE: &str = "X:1\nT:Demo Reel\nM:4/4\nK:G\nGA Bc|d2 e2|z2 d2|B2 G2|\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let notation = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)?,
        None => DEMO_TUNE.to_string(),
    };

    let settings = Settings::load_or_default(&PathBuf::from("ceol.ron"));
    let engine = spawn_engine(settings);
    engine
        .command_tx
        .send(EngineCommand::SetNotation(notation))?;

    println!("p: play  space: pause  s: stop  e: export  q: quit");

    terminal::enable_raw_mode()?;
    let result = run_ui(&engine);
    terminal::disable_raw_mode()?;

    let _ = engine.command_tx.send(EngineCommand::Shutdown);
    result
}

fn run_ui(engine: &EngineHandle) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();

    loop {
        while let Ok(update) = engine.update_rx.try_recv() {
            match update {
                EngineUpdate::Status(message) => write!(stdout, "{message}\r\n")?,
                EngineUpdate::PlaybackState { playing } => {
                    tracing::debug!(playing, "transport state");
                }
                EngineUpdate::Error { message } => write!(stdout, "error: {message}\r\n")?,
                EngineUpdate::Exported { path } => {
                    write!(stdout, "saved {}\r\n", path.display())?
                }
            }
            stdout.flush()?;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let command = match key.code {
                    KeyCode::Char('p') => Some(EngineCommand::Play),
                    KeyCode::Char(' ') => Some(EngineCommand::Pause),
                    KeyCode::Char('s') => Some(EngineCommand::Stop),
                    KeyCode::Char('e') => Some(EngineCommand::Export(std::env::current_dir()?)),
                    KeyCode::Char('q') => return Ok(()),
                    _ => None,
                };
                if let Some(command) = command {
                    engine.command_tx.send(command)?;
                }
            }
        }
    }
}
