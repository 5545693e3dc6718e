use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The notation buffer is empty or still holds the placeholder text.
    #[error("no music to play yet")]
    NoInput,

    #[error("failed to initialize audio output: {0}")]
    SynthInit(String),

    #[error("playback error: {0}")]
    Playback(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
