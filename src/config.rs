use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{audio::Waveform, error::ConfigError, state::UiState};

/// Environment variable naming an optional RON settings file.
pub const CONFIG_ENV: &str = "MUSICPAD_CONFIG";

/// Startup values for the controls. Nothing is ever written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub octave_shift: i32,
    pub timbre: Waveform,
    pub volume: f32,
    /// Tones that may be waiting for the audio thread at once. Also the
    /// ceiling on tones sounding at once.
    pub queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            octave_shift: 0,
            timbre: Waveform::Sine,
            volume: 0.5,
            queue_capacity: 1024,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ron_string = fs::read_to_string(path)?;
        Self::parse(&ron_string)
    }

    pub fn parse(ron_string: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(ron_string)?)
    }

    /// Reads the file named by `MUSICPAD_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        let path = Path::new(&path);
        match Self::load(path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Using default settings");
                Self::default()
            }
        }
    }

    /// Initial view state; out-of-range values are clamped like any other input.
    pub fn initial_state(&self) -> UiState {
        UiState::default()
            .with_octave_shift(self.octave_shift)
            .with_timbre(self.timbre)
            .with_gain(self.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings = Settings::parse("(timbre: triangle)").unwrap();
        assert_eq!(settings.timbre, Waveform::Triangle);
        assert_eq!(settings.octave_shift, 0);
        assert_eq!(settings.volume, 0.5);
        assert_eq!(settings.queue_capacity, 1024);
    }

    #[test]
    fn empty_struct_is_default() {
        assert_eq!(Settings::parse("()").unwrap(), Settings::default());
    }

    #[test]
    fn rejects_unknown_waveform() {
        let err = Settings::parse("(timbre: organ)").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Settings::load(Path::new("/nonexistent/musicpad.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn initial_state_is_clamped() {
        let settings = Settings {
            octave_shift: 7,
            volume: 3.0,
            timbre: Waveform::Square,
            ..Settings::default()
        };
        let state = settings.initial_state();
        assert_eq!(state.octave_shift(), 2);
        assert_eq!(state.gain(), 1.0);
        assert_eq!(state.timbre(), Waveform::Square);
    }
}
