use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Player settings, stored as RON next to the binary or a user config dir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Real-time seconds for a duration-1 event.
    pub base_unit_secs: f32,
    /// Gap between consecutive events.
    pub note_gap_secs: f32,
    /// Output gain, 0.0 -> 1.0.
    pub gain: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_unit_secs: 0.4,
            note_gap_secs: 0.05,
            gain: 0.8,
        }
    }
}

impl Settings {
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, ron_string)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let ron_string = fs::read_to_string(path)?;
        let settings: Settings = ron::from_str(&ron_string)?;
        Ok(settings)
    }

    /// Defaults when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!("settings not loaded from {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_round_trip() {
        let dir = std::env::temp_dir().join(format!("ceol-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.ron");

        let settings = Settings {
            base_unit_secs: 0.25,
            note_gap_secs: 0.02,
            gain: 0.5,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load_or_default(Path::new("/nonexistent/ceol.ron"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.base_unit_secs, 0.4);
        assert_eq!(settings.note_gap_secs, 0.05);
    }
}
