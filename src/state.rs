use crate::audio::Waveform;
use crate::keyboard::{self, DerivedNote, NOTE_COUNT};
use std::collections::HashMap;

pub const MIN_OCTAVE_SHIFT: i32 = -2;
pub const MAX_OCTAVE_SHIFT: i32 = 2;

/// View state shared by both frontends.
///
/// Every setter consumes the state and hands back the new value, so callers
/// always replace the whole thing.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    octave_shift: i32,
    timbre: Waveform,
    gain: f32,
    last_played_note: Option<&'static str>,
    pressed: HashMap<&'static str, bool>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            octave_shift: 0,
            timbre: Waveform::Sine,
            gain: 0.5,
            last_played_note: None,
            pressed: HashMap::new(),
        }
    }
}

impl UiState {
    pub fn octave_shift(&self) -> i32 {
        self.octave_shift
    }

    pub fn timbre(&self) -> Waveform {
        self.timbre
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn last_played_note(&self) -> Option<&'static str> {
        self.last_played_note
    }

    pub fn is_pressed(&self, name: &str) -> bool {
        self.pressed.get(name).copied().unwrap_or(false)
    }

    /// The keyboard as it sounds right now.
    pub fn notes(&self) -> [DerivedNote; NOTE_COUNT] {
        keyboard::derive_notes(self.octave_shift)
    }

    /// Saturates at [-2, 2].
    pub fn with_octave_shift(self, octave_shift: i32) -> Self {
        Self {
            octave_shift: octave_shift.clamp(MIN_OCTAVE_SHIFT, MAX_OCTAVE_SHIFT),
            ..self
        }
    }

    pub fn octave_up(self) -> Self {
        let next = self.octave_shift.saturating_add(1);
        self.with_octave_shift(next)
    }

    pub fn octave_down(self) -> Self {
        let next = self.octave_shift.saturating_sub(1);
        self.with_octave_shift(next)
    }

    pub fn with_timbre(self, timbre: Waveform) -> Self {
        Self { timbre, ..self }
    }

    /// Saturates at [0, 1]; NaN becomes 0.
    pub fn with_gain(self, gain: f32) -> Self {
        let gain = if gain.is_nan() { 0.0 } else { gain.clamp(0.0, 1.0) };
        Self { gain, ..self }
    }

    /// Marks `name` as the last played note and shows it depressed.
    pub fn with_note_played(mut self, name: &'static str) -> Self {
        self.pressed.insert(name, true);
        Self {
            last_played_note: Some(name),
            ..self
        }
    }

    pub fn with_note_released(mut self, name: &'static str) -> Self {
        self.pressed.insert(name, false);
        self
    }
}
