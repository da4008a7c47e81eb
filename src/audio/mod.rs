mod mixer;
mod voice;
mod waveform;

pub use mixer::Mixer;
pub use voice::{GAIN_FLOOR, PlaybackRequest, TONE_DURATION, Voice};
pub use waveform::Waveform;
