pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod input;
pub mod keyboard;
pub mod state;
pub mod timing;
pub mod tty;
pub mod ui;

pub use audio::{PlaybackRequest, Waveform};
pub use config::Settings;
pub use engine::{AudioOutput, ToneEngine, start_audio};
pub use error::{AudioError, ConfigError};
pub use events::InputEvent;
pub use input::InputRouter;
pub use keyboard::{DerivedNote, Note, derive_notes};
pub use state::UiState;
pub use ui::MusicPadApp;
