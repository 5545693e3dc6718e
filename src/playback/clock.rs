use std::time::Duration;

/// Sleep primitive injected into the scheduler so tests can advance
/// virtual time instead of waiting on the wall clock.
pub trait Clock {
    fn sleep(&mut self, seconds: f32);
}

/// Wall-clock implementation used by the engine.
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, seconds: f32) {
        if seconds > 0.0 {
            std::thread::sleep(Duration::from_secs_f32(seconds));
        }
    }
}
