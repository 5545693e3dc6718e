//! Cooperative playback scheduler.
//!
//! One `tick` plays one event: trigger the synth, report progress, sleep
//! for the note's length plus a small gap, advance the cursor. The caller
//! drives ticks in a loop and applies transport commands between them, so
//! cancellation is deferred by at most one in-flight note. That bounded
//! latency is the contract, not an accident.

use crate::error::PlayerError;
use crate::is_empty_notation;
use crate::notation::{ParsedSequence, parse};
use crate::synth::{Synth, pitch_to_freq};

use super::clock::Clock;
use super::state::PlaybackState;

/// Real-time length of a duration-1 event, in seconds.
const BASE_UNIT_SECS: f32 = 0.4;
/// Breathing room between consecutive events.
const NOTE_GAP_SECS: f32 = 0.05;

/// Textual progress/state reporter. The engine forwards these to its
/// update channel; tests collect them in a Vec.
pub trait StatusSink {
    fn report(&mut self, message: &str);
}

impl StatusSink for Vec<String> {
    fn report(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

pub struct Scheduler<S: Synth, C: Clock, K: StatusSink> {
    synth: S,
    clock: C,
    sink: K,
    state: PlaybackState,
    cursor: usize,
    sequence: ParsedSequence,
    base_unit_secs: f32,
    note_gap_secs: f32,
}

impl<S: Synth, C: Clock, K: StatusSink> Scheduler<S, C, K> {
    pub fn new(synth: S, clock: C, sink: K) -> Self {
        Self {
            synth,
            clock,
            sink,
            state: PlaybackState::Idle,
            cursor: 0,
            sequence: ParsedSequence::fallback(),
            base_unit_secs: BASE_UNIT_SECS,
            note_gap_secs: NOTE_GAP_SECS,
        }
    }

    pub fn with_timing(mut self, base_unit_secs: f32, note_gap_secs: f32) -> Self {
        self.base_unit_secs = base_unit_secs;
        self.note_gap_secs = note_gap_secs;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Starts playback from the first event of a freshly parsed sequence.
    ///
    /// A `play` while already `Playing` is a no-op, so a second transport
    /// press cannot start a second trigger stream over the same synth.
    /// There is no resume: after a `pause`, `play` restarts from event 0.
    pub fn play(&mut self, notation: &str) -> Result<(), PlayerError> {
        if self.state.is_playing() {
            return Ok(());
        }
        if is_empty_notation(notation) {
            return Err(PlayerError::NoInput);
        }

        self.sequence = parse(notation);
        self.cursor = 0;
        self.state = PlaybackState::Playing;
        self.sink.report("Playing...");
        Ok(())
    }

    /// Silences the synth and freezes the cursor. Meaningful only while
    /// `Playing`; otherwise a no-op.
    pub fn pause(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.state = PlaybackState::Paused;
        self.synth.trigger_release();
        self.sink.report("Paused");
    }

    /// Valid from any state; repeated stops are harmless.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.cursor = 0;
        self.synth.trigger_release();
        self.sink.report("Stopped");
    }

    /// Forces the transport back to a safe idle after a synth failure.
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.cursor = 0;
        self.synth.trigger_release();
    }

    /// Plays the event under the cursor. Returns `Ok(true)` while there is
    /// more to play, `Ok(false)` once the loop should end (completion,
    /// pause, or stop observed). Synth errors propagate to the caller.
    pub fn tick(&mut self) -> Result<bool, PlayerError> {
        if !self.state.is_playing() {
            return Ok(false);
        }

        let len = self.sequence.len();
        let Some(event) = self.sequence.get(self.cursor) else {
            self.state = PlaybackState::Finished;
            self.sink.report("Finished");
            return Ok(false);
        };

        let secs = self.base_unit_secs * event.duration;
        if !event.is_rest && event.pitch > 0 {
            self.synth
                .trigger_attack_release(pitch_to_freq(event.pitch), secs)?;
        }

        let percent = (((self.cursor + 1) as f64 / len as f64) * 100.0).round() as u32;
        self.sink.report(&format!("Playing... {percent}%"));

        self.clock.sleep(secs + self.note_gap_secs);
        self.cursor += 1;

        if self.cursor >= len {
            self.state = PlaybackState::Finished;
            self.sink.report("Finished");
            return Ok(false);
        }
        Ok(true)
    }
}
