mod sine;

pub use sine::SineSynth;

use crate::error::PlayerError;

/// Capability contract the scheduler needs from a synthesizer.
pub trait Synth {
    /// Sounds a note at the given frequency for the given length.
    fn trigger_attack_release(&mut self, freq_hz: f32, secs: f32) -> Result<(), PlayerError>;

    /// Cuts off whatever is still sounding; used by pause and stop.
    fn trigger_release(&mut self);
}

/// Equal-tempered conversion, A4 = 440 Hz at MIDI 69.
pub fn pitch_to_freq(pitch: u8) -> f32 {
    440.0 * 2.0_f32.powf((pitch as f32 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pitches() {
        assert!((pitch_to_freq(69) - 440.0).abs() < 1e-3);
        assert!((pitch_to_freq(81) - 880.0).abs() < 1e-3);
        assert!((pitch_to_freq(57) - 220.0).abs() < 1e-3);
        // Middle C.
        assert!((pitch_to_freq(60) - 261.626).abs() < 1e-2);
    }
}
