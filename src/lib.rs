pub mod engine;
pub mod error;
pub mod export;
pub mod notation;
pub mod playback;
pub mod settings;
pub mod synth;

pub use engine::{EngineCommand, EngineHandle, EngineUpdate, spawn_engine};
pub use error::PlayerError;
pub use notation::{NoteEvent, ParsedSequence, parse};
pub use playback::{PlaybackState, Scheduler, StatusSink};
pub use settings::Settings;
pub use synth::{Synth, pitch_to_freq};

/// Sentinel shown in the notation buffer before anything has been generated.
/// Play and export both refuse it.
pub const PLACEHOLDER_NOTATION: &str = "Your generated music will appear here...";

/// Returns true when there is nothing playable in the buffer.
pub fn is_empty_notation(notation: &str) -> bool {
    notation.trim().is_empty() || notation == PLACEHOLDER_NOTATION
}
