mod keys;

use crate::audio::Waveform;
use crate::config::Settings;
use crate::engine::{self, AudioOutput};
use crate::events::InputEvent;
use crate::input::InputRouter;
use crate::state::UiState;
use keys::KeyboardView;
use std::time::Instant;

pub struct MusicPadApp {
    router: InputRouter,
    audio: Option<AudioOutput>,
    error_message: Option<String>,
}

impl MusicPadApp {
    pub fn new(settings: &Settings) -> Self {
        let (audio, engine) = engine::start_audio(settings);
        let error_message = (!engine.is_attached())
            .then(|| "No audio output available, keys will be silent".to_string());

        Self {
            router: InputRouter::new(engine, settings.initial_state()),
            audio,
            error_message,
        }
    }

    fn process_audio_errors(&mut self) {
        let Some(audio) = &self.audio else {
            return;
        };
        for err in audio.take_errors() {
            tracing::error!(error = %err, "Audio stream error");
            self.error_message = Some(format!("Audio error: {}", err));
        }
    }

    fn controls(state: &UiState, ui: &mut egui::Ui, events: &mut Vec<InputEvent>) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("Octave Shift");
                ui.horizontal(|ui| {
                    if ui.button("-").clicked() {
                        events.push(InputEvent::OctaveDown);
                    }
                    ui.label(state.octave_shift().to_string());
                    if ui.button("+").clicked() {
                        events.push(InputEvent::OctaveUp);
                    }
                });
            });

            ui.add_space(32.0);

            ui.vertical(|ui| {
                ui.label("Instrument");
                let mut selected = state.timbre();
                egui::ComboBox::from_id_salt("instrument")
                    .selected_text(selected.label())
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for wave in Waveform::ALL {
                            ui.selectable_value(&mut selected, wave, wave.label());
                        }
                    });
                if selected != state.timbre() {
                    events.push(InputEvent::SelectTimbre(selected));
                }
            });

            ui.add_space(32.0);

            ui.vertical(|ui| {
                ui.label("Volume");
                let mut volume = state.gain();
                let slider = egui::Slider::new(&mut volume, 0.0..=1.0).step_by(0.01);
                if ui.add(slider).changed() {
                    events.push(InputEvent::SetVolume(volume));
                }
            });
        });
    }
}

/// Key-downs from the window, auto-repeat included.
fn key_downs(events: &[egui::Event]) -> Vec<InputEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key, pressed: true, ..
            } => Some(InputEvent::KeyDown(key.name().to_owned())),
            _ => None,
        })
        .collect()
}

impl eframe::App for MusicPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_audio_errors();

        let mut events = ctx.input(|i| key_downs(&i.events));

        if let Some(ref error) = self.error_message {
            egui::TopBottomPanel::top("error").show(ctx, |ui| {
                ui.colored_label(egui::Color32::RED, error);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let state = self.router.state();
            ui.vertical_centered(|ui| {
                ui.add_space(32.0);
                ui.heading("Music Pad");
                ui.add_space(32.0);

                Self::controls(state, ui, &mut events);

                ui.add_space(32.0);

                if let Some(note) = KeyboardView::new(state).show(ui) {
                    events.push(InputEvent::Click(note));
                }

                if let Some(name) = state.last_played_note() {
                    ui.add_space(16.0);
                    ui.label(format!("Last played note: {}", name));
                }
            });
        });

        let changed = !events.is_empty();
        for event in events {
            self.router.handle(event, now);
        }

        let released = self.router.tick(now);
        if changed || released > 0 {
            ctx.request_repaint();
        }
        if let Some(due) = self.router.next_reset() {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        }
    }
}

pub fn run(settings: Settings) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 560.0])
            .with_title("Music Pad"),
        ..Default::default()
    };

    eframe::run_native(
        "Music Pad",
        options,
        Box::new(move |_cc| Ok(Box::new(MusicPadApp::new(&settings)))),
    )
}
