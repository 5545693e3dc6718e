//! Tokenizer for the ABC-style folk notation grammar.
//!
//! The walk is line-oriented, then character-oriented. Header lines (a
//! single uppercase letter followed by `:`) carry tune metadata and are
//! skipped whole; inside a music line the scanner consumes annotations,
//! bar lines, and decorations silently and emits a [`NoteEvent`] for each
//! note or rest token. Anything it does not understand is dropped one
//! character at a time, so `parse` is total: it never fails and never
//! returns an empty sequence.

use super::pitch::to_pitch;
use super::sequence::{NoteEvent, ParsedSequence};

/// Parses notation text into an ordered event sequence.
///
/// Any input that yields no events (empty text, headers only, garbage)
/// produces the fixed fallback sequence instead.
pub fn parse(notation: &str) -> ParsedSequence {
    let mut events = Vec::new();

    for line in notation.lines() {
        if is_header_line(line) || line.trim().is_empty() {
            continue;
        }
        scan_line(line, &mut events);
    }

    ParsedSequence::from_events(events)
}

/// Header lines look like `X:1`, `T:Title`, `K:G`.
fn is_header_line(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_uppercase()
    )
}

fn scan_line(line: &str, events: &mut Vec<NoteEvent>) {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Quoted chord annotation; an unterminated quote swallows the
            // rest of the line.
            '"' => {
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    i += 1;
                }
                i += 1;
            }
            // Bar lines, repeats, bracket groupings.
            '|' | ':' | '[' | ']' => i += 1,
            ' ' => i += 1,
            // Ornaments and decorations.
            '{' | '}' | '~' | '!' | '+' | '.' => i += 1,
            letter @ ('A'..='G' | 'a'..='g') => {
                let mut token = String::from(letter);
                i += 1;

                // Accidentals are recognized to keep the stream position
                // correct but do not adjust the pitch.
                while i < chars.len() && matches!(chars[i], '^' | '_' | '=') {
                    i += 1;
                }

                while i < chars.len() && matches!(chars[i], '\'' | ',') {
                    token.push(chars[i]);
                    i += 1;
                }

                let duration = scan_duration(&chars, &mut i);
                events.push(NoteEvent::note(to_pitch(&token), duration));
            }
            'z' => {
                i += 1;
                let duration = scan_duration(&chars, &mut i);
                events.push(NoteEvent::rest(duration));
            }
            // Unsupported grammar (ties, tuplets, ...) is ignored.
            _ => i += 1,
        }
    }
}

/// Optional duration after a note or rest: `<digits>[/<digits>]`.
///
/// A missing numerator means 1; a bare `/` halves the value. Zero digits
/// would break the positive-duration invariant, so they fall back to the
/// same defaults.
fn scan_duration(chars: &[char], i: &mut usize) -> f32 {
    let numerator = match scan_digits(chars, i) {
        Some(n) if n > 0 => n as f32,
        _ => 1.0,
    };

    if *i < chars.len() && chars[*i] == '/' {
        *i += 1;
        let denominator = match scan_digits(chars, i) {
            Some(d) if d > 0 => d as f32,
            _ => 2.0,
        };
        numerator / denominator
    } else {
        numerator
    }
}

fn scan_digits(chars: &[char], i: &mut usize) -> Option<u32> {
    let start = *i;
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
    if *i == start {
        return None;
    }
    chars[start..*i].iter().collect::<String>().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(seq: &ParsedSequence) -> Vec<u8> {
        seq.events().iter().map(|e| e.pitch).collect()
    }

    #[test]
    fn empty_input_gives_fallback() {
        assert_eq!(parse(""), ParsedSequence::fallback());
    }

    #[test]
    fn headers_only_gives_fallback() {
        let seq = parse("X:1\nT:Foo\n");
        assert_eq!(seq, ParsedSequence::fallback());
        assert_eq!(pitches(&seq), vec![64, 67, 69, 71, 76, 79, 81, 83]);
    }

    #[test]
    fn header_lines_emit_nothing() {
        for header in ["X:1", "T:The Silver Spear", "M:4/4", "L:1/8", "K:G", "R:reel", "V:1"] {
            let input = format!("{header}\nA");
            let seq = parse(&input);
            assert_eq!(seq.len(), 1, "header {header:?} leaked events");
            assert_eq!(pitches(&seq), vec![69]);
        }
    }

    #[test]
    fn totality_on_garbage() {
        let seq = parse("\u{0}\u{1}\u{fffd} @#$%&*()\n\t\r\nwxy");
        assert!(!seq.is_empty());
        assert!(seq.events().iter().all(|e| e.pitch <= 127));
    }

    #[test]
    fn simple_notes() {
        let seq = parse("AB cd");
        assert_eq!(pitches(&seq), vec![69, 71, 72, 74]);
        assert!(seq.events().iter().all(|e| e.duration == 1.0 && !e.is_rest));
    }

    #[test]
    fn rest_identity() {
        let seq = parse("z z2 z/");
        let events = seq.events();
        assert!(events.iter().all(|e| e.is_rest && e.pitch == 0));
        assert_eq!(events[0].duration, 1.0);
        assert_eq!(events[1].duration, 2.0);
        assert_eq!(events[2].duration, 0.5);
    }

    #[test]
    fn duration_defaults() {
        let seq = parse("a a2 a3/2 a/ a/4 a12");
        let durations: Vec<f32> = seq.events().iter().map(|e| e.duration).collect();
        assert_eq!(durations, vec![1.0, 2.0, 1.5, 0.5, 0.25, 12.0]);
    }

    #[test]
    fn octave_marks_reach_the_mapper() {
        let seq = parse("c c' c,,");
        assert_eq!(pitches(&seq), vec![72, 84, 48]);
    }

    #[test]
    fn accidentals_consumed_without_pitch_change() {
        // Sharp/flat/natural marks keep the scan position correct but do
        // not (yet) alter the pitch; the duration after them still counts.
        let seq = parse("^c _B2 =e");
        let events = seq.events();
        assert_eq!(pitches(&seq), vec![72, 71, 76]);
        assert_eq!(events[1].duration, 2.0);
        // After the letter the marks are consumed as part of the token and
        // the duration that follows them still counts.
        let seq = parse("c^^2");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.events()[0].pitch, 72);
        assert_eq!(seq.events()[0].duration, 2.0);
    }

    #[test]
    fn annotations_bars_and_decorations_are_silent() {
        let seq = parse("\"Gmaj\"A|{B}~!+.c]");
        assert_eq!(pitches(&seq), vec![69, 71, 72]);
    }

    #[test]
    fn unterminated_annotation_swallows_line_tail() {
        let seq = parse("A \"unclosed B c d");
        assert_eq!(pitches(&seq), vec![69]);
    }

    #[test]
    fn end_to_end_tune() {
        let seq = parse("X:1\nK:G\nAB cd|z2 e2|");
        let expected = vec![
            NoteEvent::note(69, 1.0),
            NoteEvent::note(71, 1.0),
            NoteEvent::note(72, 1.0),
            NoteEvent::note(74, 1.0),
            NoteEvent::rest(2.0),
            NoteEvent::note(76, 2.0),
        ];
        assert_eq!(seq.events(), &expected[..]);
    }

    #[test]
    fn pitch_range_holds_for_extreme_marks() {
        let seq = parse("b'''''''' D,,,,,,,,");
        assert!(seq.events().iter().all(|e| e.pitch <= 127));
    }
}
