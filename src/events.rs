use crate::audio::Waveform;
use crate::keyboard::DerivedNote;

/// Everything a frontend can ask the keyboard to do.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A physical key went down, named the way the frontend reports it.
    KeyDown(String),
    /// A key on the on-screen keyboard was clicked.
    Click(DerivedNote),
    OctaveUp,
    OctaveDown,
    SelectTimbre(Waveform),
    SetVolume(f32),
}
