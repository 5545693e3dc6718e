/// Transport state, owned by the scheduler.
///
/// Transitions come from the transport calls (`play`, `pause`, `stop`) and
/// from the scheduling loop itself, which moves `Playing` to `Finished`
/// when the cursor reaches the end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Stopped,
    Finished,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}
