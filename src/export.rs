//! Download/export of the notation buffer.
//!
//! The exported file holds the buffer bytes verbatim, under a name derived
//! from the current instant: ISO-8601 with `:` and `.` swapped for `-` and
//! the fractional-seconds tail dropped, e.g. `music_2026-08-27T09-30-05.abc`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::PlayerError;
use crate::is_empty_notation;

pub fn export_filename(now: DateTime<Utc>) -> String {
    let iso = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut stamp: String = iso
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    // Drop the "-mmmZ" tail.
    stamp.truncate(stamp.len().saturating_sub(5));
    format!("music_{stamp}.abc")
}

/// Writes the notation into `dir` and returns the created path.
///
/// An empty or placeholder buffer is rejected with `NoInput` and nothing
/// is written.
pub fn export_notation(notation: &str, dir: &Path) -> Result<PathBuf, PlayerError> {
    if is_empty_notation(notation) {
        return Err(PlayerError::NoInput);
    }

    let path = dir.join(export_filename(Utc::now()));
    fs::write(&path, notation.as_bytes())?;
    tracing::info!(path = %path.display(), "notation exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_shape() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 9, 30, 5).unwrap();
        assert_eq!(export_filename(now), "music_2026-08-27T09-30-05.abc");
    }

    #[test]
    fn filename_keeps_no_colons_or_dots_before_extension() {
        let now = Utc
            .with_ymd_and_hms(2025, 12, 31, 23, 59, 59)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(123))
            .unwrap();
        let name = export_filename(now);
        assert_eq!(name, "music_2025-12-31T23-59-59.abc");
        assert!(!name.trim_end_matches(".abc").contains(['.', ':']));
    }

    #[test]
    fn rejects_empty_and_placeholder() {
        let dir = std::env::temp_dir();
        assert!(matches!(
            export_notation("", &dir),
            Err(PlayerError::NoInput)
        ));
        assert!(matches!(
            export_notation(crate::PLACEHOLDER_NOTATION, &dir),
            Err(PlayerError::NoInput)
        ));
    }

    #[test]
    fn bytes_are_identical() {
        let dir = std::env::temp_dir().join(format!("ceol-export-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let notation = "X:1\nK:G\nAB cd|z2 e2|\n";
        let path = export_notation(notation, &dir).unwrap();
        assert_eq!(fs::read(&path).unwrap(), notation.as_bytes());

        fs::remove_dir_all(&dir).unwrap();
    }
}
