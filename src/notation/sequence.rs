use serde::{Deserialize, Serialize};

/// One pitched note or rest. Durations are in quarter-note units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: u8,
    pub duration: f32,
    pub is_rest: bool,
}

impl NoteEvent {
    pub fn note(pitch: u8, duration: f32) -> Self {
        Self {
            pitch,
            duration,
            is_rest: false,
        }
    }

    pub fn rest(duration: f32) -> Self {
        Self {
            pitch: 0,
            duration,
            is_rest: true,
        }
    }
}

/// Ordered, never-empty sequence of events produced by the parser.
///
/// The parser guarantees non-emptiness by substituting [`ParsedSequence::fallback`]
/// whenever the input yields no events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSequence {
    events: Vec<NoteEvent>,
}

/// Pitches of the fallback sequence played when parsing produces nothing.
const FALLBACK_PITCHES: [u8; 8] = [64, 67, 69, 71, 76, 79, 81, 83];

impl ParsedSequence {
    /// Wraps a non-empty event list; substitutes the fallback for an empty one.
    pub fn from_events(events: Vec<NoteEvent>) -> Self {
        if events.is_empty() {
            Self::fallback()
        } else {
            Self { events }
        }
    }

    pub fn fallback() -> Self {
        Self {
            events: FALLBACK_PITCHES
                .iter()
                .map(|&pitch| NoteEvent::note(pitch, 1.0))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always false: construction never yields an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NoteEvent> {
        self.events.get(index).copied()
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_becomes_fallback() {
        let seq = ParsedSequence::from_events(vec![]);
        assert_eq!(seq, ParsedSequence::fallback());
        assert_eq!(seq.len(), 8);
        let pitches: Vec<u8> = seq.events().iter().map(|e| e.pitch).collect();
        assert_eq!(pitches, vec![64, 67, 69, 71, 76, 79, 81, 83]);
        assert!(seq.events().iter().all(|e| !e.is_rest && e.duration == 1.0));
    }

    #[test]
    fn non_empty_input_kept_as_is() {
        let events = vec![NoteEvent::note(60, 0.5), NoteEvent::rest(2.0)];
        let seq = ParsedSequence::from_events(events.clone());
        assert_eq!(seq.events(), &events[..]);
    }
}
