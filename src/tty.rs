//! Terminal frontend for machines without a window system.

use crate::audio::Waveform;
use crate::config::Settings;
use crate::engine::{self, AudioOutput};
use crate::events::InputEvent;
use crate::input::InputRouter;
use crate::state::UiState;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(250);
const VOLUME_STEP: f32 = 0.05;

enum Action {
    Input(InputEvent),
    Quit,
}

/// Maps a terminal key to what it does. Letters go to the note bindings
/// unchanged, everything else is a control.
fn action_for(key: &KeyEvent, state: &UiState) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            Some(Action::Input(InputEvent::OctaveUp))
        }
        KeyCode::Char('-') | KeyCode::Down => Some(Action::Input(InputEvent::OctaveDown)),
        KeyCode::Char(']') => Some(Action::Input(InputEvent::SetVolume(
            state.gain() + VOLUME_STEP,
        ))),
        KeyCode::Char('[') => Some(Action::Input(InputEvent::SetVolume(
            state.gain() - VOLUME_STEP,
        ))),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            Some(Action::Input(InputEvent::SelectTimbre(Waveform::ALL[idx])))
        }
        KeyCode::Char(c) => Some(Action::Input(InputEvent::KeyDown(c.to_string()))),
        _ => None,
    }
}

/// One line: the controls, then every key with pressed keys bracketed, then
/// the latest audio error if there is one.
fn status_line(state: &UiState, error: Option<&str>) -> String {
    let keys: Vec<String> = state
        .notes()
        .iter()
        .map(|n| {
            if state.is_pressed(n.name) {
                format!("[{}]", n.name)
            } else {
                format!(" {} ", n.name)
            }
        })
        .collect();

    let mut line = format!(
        "oct {:+} | {} | vol {:.2} | {} | last: {}",
        state.octave_shift(),
        state.timbre(),
        state.gain(),
        keys.join(""),
        state.last_played_note().unwrap_or("-"),
    );
    if let Some(error) = error {
        line.push_str(" | audio error: ");
        line.push_str(error);
    }
    line
}

fn draw(out: &mut impl Write, state: &UiState, error: Option<&str>) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(status_line(state, error))
    )?;
    out.flush()
}

/// Leaves raw mode however the loop exits.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        println!();
    }
}

pub fn run(settings: &Settings) -> io::Result<()> {
    let (audio, engine) = engine::start_audio(settings);
    let mut router = InputRouter::new(engine, settings.initial_state());

    println!("keys: a w s e d f t g y h u j k | +/- octave | 1-4 instrument | [/] volume | Esc quits");

    // Stderr would tear the status line while in raw mode, so stream errors
    // are shown inline and logged once raw mode is off.
    let mut stream_errors: Vec<String> = Vec::new();
    let result = run_raw(&mut router, audio.as_ref(), &mut stream_errors);

    for err in &stream_errors {
        tracing::error!(error = %err, "Audio stream error");
    }
    result
}

fn run_raw(
    router: &mut InputRouter,
    audio: Option<&AudioOutput>,
    stream_errors: &mut Vec<String>,
) -> io::Result<()> {
    let _guard = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    draw(&mut stdout, router.state(), None)?;

    loop {
        let now = Instant::now();
        let timeout = router
            .next_reset()
            .map_or(IDLE_POLL, |due| due.saturating_duration_since(now));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match action_for(&key, router.state()) {
                    Some(Action::Quit) => break,
                    Some(Action::Input(input)) => {
                        router.handle(input, Instant::now());
                    }
                    None => {}
                }
            }
        }

        router.tick(Instant::now());

        if let Some(audio) = audio {
            stream_errors.extend(audio.take_errors().iter().map(|e| e.to_string()));
        }

        draw(&mut stdout, router.state(), stream_errors.last().map(String::as_str))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn input(key: KeyEvent, state: &UiState) -> Option<InputEvent> {
        match action_for(&key, state) {
            Some(Action::Input(event)) => Some(event),
            _ => None,
        }
    }

    #[test]
    fn letters_become_key_downs() {
        let state = UiState::default();
        assert_eq!(
            input(press(KeyCode::Char('H')), &state),
            Some(InputEvent::KeyDown("H".into()))
        );
    }

    #[test]
    fn digits_pick_instrument() {
        let state = UiState::default();
        assert_eq!(
            input(press(KeyCode::Char('3')), &state),
            Some(InputEvent::SelectTimbre(Waveform::Sawtooth))
        );
    }

    #[test]
    fn brackets_step_volume() {
        let state = UiState::default().with_gain(0.5);
        match input(press(KeyCode::Char('[')), &state) {
            Some(InputEvent::SetVolume(v)) => assert!((v - 0.45).abs() < 1e-6, "Got {v}"),
            other => panic!("Expected a volume change, got {other:?}"),
        }
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let state = UiState::default();
        assert!(matches!(
            action_for(&press(KeyCode::Esc), &state),
            Some(Action::Quit)
        ));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(action_for(&ctrl_c, &state), Some(Action::Quit)));
    }

    #[test]
    fn releases_are_ignored() {
        let state = UiState::default();
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert!(action_for(&key, &state).is_none());
    }

    #[test]
    fn status_brackets_pressed_keys() {
        let state = UiState::default().with_note_played("A");
        let line = status_line(&state, None);
        assert!(line.contains("[A]"), "{line}");
        assert!(line.contains("last: A"), "{line}");
        assert!(line.contains(" C "), "{line}");
        assert!(!line.contains("audio error"), "{line}");
    }

    #[test]
    fn status_shows_stream_error_inline() {
        let state = UiState::default();
        let line = status_line(&state, Some("device disconnected"));
        assert!(line.ends_with("| audio error: device disconnected"), "{line}");
        assert!(!line.contains('\n'), "Status must stay on one line: {line:?}");
    }
}
