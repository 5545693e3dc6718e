//! Engine thread owning the scheduler and the synth.
//!
//! Transport commands arrive over a crossbeam channel; status and error
//! updates flow back the other way. While a tune plays, the engine drains
//! pending commands between scheduler ticks, which gives pause/stop their
//! deferred, at-most-one-note cancellation latency.

use crossbeam::channel::{Receiver, Sender};
use std::path::PathBuf;

use crate::error::PlayerError;
use crate::export::export_notation;
use crate::playback::{Scheduler, StatusSink, SystemClock};
use crate::settings::Settings;
use crate::synth::SineSynth;

#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Replaces the notation buffer the next play will use.
    SetNotation(String),
    Play,
    Pause,
    Stop,
    /// Writes the notation buffer into the given directory.
    Export(PathBuf),
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum EngineUpdate {
    Status(String),
    PlaybackState { playing: bool },
    Error { message: String },
    Exported { path: PathBuf },
}

pub struct EngineHandle {
    pub command_tx: Sender<EngineCommand>,
    pub update_rx: Receiver<EngineUpdate>,
}

pub fn spawn_engine(settings: Settings) -> EngineHandle {
    let (command_tx, command_rx) = crossbeam::channel::unbounded();
    let (update_tx, update_rx) = crossbeam::channel::unbounded();

    std::thread::spawn(move || {
        engine_thread(settings, command_rx, update_tx);
    });

    EngineHandle {
        command_tx,
        update_rx,
    }
}

/// Forwards scheduler status lines onto the update channel.
struct ChannelSink {
    update_tx: Sender<EngineUpdate>,
}

impl StatusSink for ChannelSink {
    fn report(&mut self, message: &str) {
        let _ = self
            .update_tx
            .send(EngineUpdate::Status(message.to_string()));
    }
}

type EngineScheduler = Scheduler<SineSynth, SystemClock, ChannelSink>;

fn engine_thread(
    settings: Settings,
    command_rx: Receiver<EngineCommand>,
    update_tx: Sender<EngineUpdate>,
) {
    let synth = SineSynth::new(settings.gain);
    let sink = ChannelSink {
        update_tx: update_tx.clone(),
    };
    let mut scheduler = Scheduler::new(synth, SystemClock, sink)
        .with_timing(settings.base_unit_secs, settings.note_gap_secs);
    let mut notation = String::new();

    loop {
        match command_rx.recv() {
            Ok(EngineCommand::SetNotation(text)) => notation = text,

            Ok(EngineCommand::Play) => match scheduler.play(&notation) {
                Ok(()) => {
                    let _ = update_tx.send(EngineUpdate::PlaybackState { playing: true });
                    let keep_running =
                        run_playback(&mut scheduler, &command_rx, &update_tx, &mut notation);
                    let _ = update_tx.send(EngineUpdate::PlaybackState { playing: false });
                    if !keep_running {
                        break;
                    }
                }
                Err(e) => report_error(&update_tx, &e),
            },

            // Outside a run these only matter for a lingering synth note.
            Ok(EngineCommand::Pause) => scheduler.pause(),
            Ok(EngineCommand::Stop) => scheduler.stop(),

            Ok(EngineCommand::Export(dir)) => handle_export(&notation, &dir, &update_tx),

            Ok(EngineCommand::Shutdown) => break,
            Err(crossbeam::channel::RecvError) => break,
        }
    }

    tracing::info!("engine thread exiting");
}

/// Drives the scheduler to pause, stop, completion, or failure.
/// Returns false only when a shutdown arrived mid-run.
fn run_playback(
    scheduler: &mut EngineScheduler,
    command_rx: &Receiver<EngineCommand>,
    update_tx: &Sender<EngineUpdate>,
    notation: &mut String,
) -> bool {
    loop {
        match scheduler.tick() {
            Ok(true) => {}
            Ok(false) => return true,
            Err(e) => {
                scheduler.reset();
                report_error(update_tx, &e);
                return true;
            }
        }

        // Commands that arrived while the note sounded.
        while let Ok(command) = command_rx.try_recv() {
            match command {
                EngineCommand::Pause => scheduler.pause(),
                EngineCommand::Stop => scheduler.stop(),
                // Already playing: a second Play must not start a second
                // trigger stream.
                EngineCommand::Play => {}
                EngineCommand::SetNotation(text) => *notation = text,
                EngineCommand::Export(dir) => handle_export(notation, &dir, update_tx),
                EngineCommand::Shutdown => return false,
            }
        }
    }
}

fn handle_export(notation: &str, dir: &std::path::Path, update_tx: &Sender<EngineUpdate>) {
    match export_notation(notation, dir) {
        Ok(path) => {
            let _ = update_tx.send(EngineUpdate::Exported { path });
        }
        Err(e) => report_error(update_tx, &e),
    }
}

/// Errors restore the safe transport state: play enabled, pause/stop not.
fn report_error(update_tx: &Sender<EngineUpdate>, error: &PlayerError) {
    tracing::warn!("engine error: {error}");
    let _ = update_tx.send(EngineUpdate::Error {
        message: error.to_string(),
    });
    let _ = update_tx.send(EngineUpdate::PlaybackState { playing: false });
}
