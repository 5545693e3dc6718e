mod clock;
mod scheduler;
mod state;

pub use clock::{Clock, SystemClock};
pub use scheduler::{Scheduler, StatusSink};
pub use state::PlaybackState;
