/// Maps a note token (base letter plus octave marks) to a MIDI pitch number.
///
/// The table covers the octave around middle C the way the notation writes
/// it: uppercase `D..B` sit one octave below the lowercase `c..b` set. Any
/// base letter outside the table falls back to the `E` entry (64). Each `'`
/// in the token raises the result an octave, each `,` lowers it one, and the
/// final value is clamped into the MIDI range.
pub fn to_pitch(token: &str) -> u8 {
    let base = token.trim_end_matches(['\'', ',']);

    let mut pitch: i32 = match base {
        "D" => 62,
        "E" => 64,
        "F" => 65,
        "G" => 67,
        "A" => 69,
        "B" => 71,
        "c" => 72,
        "d" => 74,
        "e" => 76,
        "f" => 77,
        "g" => 79,
        "a" => 81,
        "b" => 83,
        _ => 64,
    };

    for mark in token.chars() {
        match mark {
            '\'' => pitch += 12,
            ',' => pitch -= 12,
            _ => {}
        }
    }

    pitch.clamp(0, 127) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values() {
        assert_eq!(to_pitch("D"), 62);
        assert_eq!(to_pitch("E"), 64);
        assert_eq!(to_pitch("F"), 65);
        assert_eq!(to_pitch("G"), 67);
        assert_eq!(to_pitch("A"), 69);
        assert_eq!(to_pitch("B"), 71);
        assert_eq!(to_pitch("c"), 72);
        assert_eq!(to_pitch("d"), 74);
        assert_eq!(to_pitch("e"), 76);
        assert_eq!(to_pitch("f"), 77);
        assert_eq!(to_pitch("g"), 79);
        assert_eq!(to_pitch("a"), 81);
        assert_eq!(to_pitch("b"), 83);
    }

    #[test]
    fn unknown_letter_falls_back_to_e() {
        // Uppercase C is not in the table.
        assert_eq!(to_pitch("C"), 64);
        assert_eq!(to_pitch("Q"), 64);
        assert_eq!(to_pitch(""), 64);
    }

    #[test]
    fn octave_marks() {
        assert_eq!(to_pitch("c"), 72);
        assert_eq!(to_pitch("c'"), 84);
        assert_eq!(to_pitch("c''"), 96);
        assert_eq!(to_pitch("c,"), 60);
        assert_eq!(to_pitch("c,,"), 48);
        // Marks combine in any multiplicity.
        assert_eq!(to_pitch("c',"), 72);
    }

    #[test]
    fn clamped_to_midi_range() {
        assert_eq!(to_pitch("b''''"), 127);
        assert_eq!(to_pitch("D,,,,,,"), 0);
    }
}
