use crate::audio::PlaybackRequest;
use crate::engine::ToneEngine;
use crate::events::InputEvent;
use crate::keyboard::{self, DerivedNote};
use crate::state::UiState;
use crate::timing::ResetQueue;
use std::time::Instant;

/// Turns frontend events into tones and view-state changes.
pub struct InputRouter {
    engine: ToneEngine,
    state: UiState,
    resets: ResetQueue,
}

impl InputRouter {
    pub fn new(engine: ToneEngine, state: UiState) -> Self {
        Self {
            engine,
            state,
            resets: ResetQueue::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Returns the note that was triggered, if any.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Option<DerivedNote> {
        match event {
            InputEvent::KeyDown(key) => self.key_down(&key, now),
            InputEvent::Click(note) => {
                self.trigger(note, now);
                Some(note)
            }
            InputEvent::OctaveUp => {
                self.update(UiState::octave_up);
                None
            }
            InputEvent::OctaveDown => {
                self.update(UiState::octave_down);
                None
            }
            InputEvent::SelectTimbre(timbre) => {
                self.update(|s| s.with_timbre(timbre));
                None
            }
            InputEvent::SetVolume(volume) => {
                self.update(|s| s.with_gain(volume));
                None
            }
        }
    }

    /// Case-insensitive lookup against the current bindings. Repeats are not
    /// filtered; every key-down starts a new tone.
    pub fn key_down(&mut self, key: &str, now: Instant) -> Option<DerivedNote> {
        let key = key.to_lowercase();
        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return None;
        };

        let note = keyboard::find_by_key(&self.state.notes(), ch)?;
        self.trigger(note, now);
        Some(note)
    }

    fn trigger(&mut self, note: DerivedNote, now: Instant) {
        self.engine.play(PlaybackRequest {
            frequency: note.frequency,
            timbre: self.state.timbre(),
            gain: self.state.gain(),
        });
        tracing::debug!(note = note.name, frequency = note.frequency, "Triggered");

        self.update(|s| s.with_note_played(note.name));
        self.resets.schedule(note.name, now);
    }

    /// Releases every key whose flash has run out. Returns how many fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.resets.take_due(now);
        let fired = due.len();
        for name in due {
            self.update(|s| s.with_note_released(name));
        }
        fired
    }

    pub fn next_reset(&self) -> Option<Instant> {
        self.resets.next_due()
    }

    fn update(&mut self, f: impl FnOnce(UiState) -> UiState) {
        self.state = f(std::mem::take(&mut self.state));
    }
}
