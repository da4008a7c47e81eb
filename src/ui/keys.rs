use crate::keyboard::DerivedNote;
use crate::state::UiState;

const WHITE_KEY_SIZE: egui::Vec2 = egui::Vec2::new(56.0, 192.0);
const BLACK_KEY_SIZE: egui::Vec2 = egui::Vec2::new(40.0, 128.0);
const PRESSED_OFFSET: f32 = 4.0;
const FRAME: f32 = 8.0;

/// Where each key sits, relative to the keyboard's top-left corner.
///
/// White keys sit side by side; each black key straddles the seam between
/// its neighbours and takes up no width of its own.
pub fn layout(notes: &[DerivedNote], origin: egui::Pos2) -> Vec<(DerivedNote, egui::Rect)> {
    let mut x = origin.x;
    let mut keys = Vec::with_capacity(notes.len());

    for note in notes {
        if note.is_sharp() {
            let min = egui::Pos2::new(x - BLACK_KEY_SIZE.x / 2.0, origin.y);
            keys.push((*note, egui::Rect::from_min_size(min, BLACK_KEY_SIZE)));
        } else {
            let min = egui::Pos2::new(x, origin.y);
            keys.push((*note, egui::Rect::from_min_size(min, WHITE_KEY_SIZE)));
            x += WHITE_KEY_SIZE.x;
        }
    }

    keys
}

/// Black keys are drawn on top, so they win.
pub fn hit_test(keys: &[(DerivedNote, egui::Rect)], pos: egui::Pos2) -> Option<DerivedNote> {
    keys.iter()
        .filter(|(note, _)| note.is_sharp())
        .chain(keys.iter().filter(|(note, _)| !note.is_sharp()))
        .find(|(_, rect)| rect.contains(pos))
        .map(|(note, _)| *note)
}

pub struct KeyboardView<'a> {
    state: &'a UiState,
}

impl<'a> KeyboardView<'a> {
    pub fn new(state: &'a UiState) -> Self {
        Self { state }
    }

    /// Draws the keyboard and reports a clicked key.
    pub fn show(self, ui: &mut egui::Ui) -> Option<DerivedNote> {
        let notes = self.state.notes();
        let white_count = notes.iter().filter(|n| !n.is_sharp()).count() as f32;
        let size = egui::Vec2::new(
            white_count * WHITE_KEY_SIZE.x + 2.0 * FRAME,
            WHITE_KEY_SIZE.y + PRESSED_OFFSET + 2.0 * FRAME,
        );

        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let rect = response.rect;
        painter.rect_filled(rect, 6.0, egui::Color32::from_rgb(168, 162, 158));

        let keys = layout(&notes, rect.min + egui::Vec2::splat(FRAME));

        for (note, key_rect) in keys.iter().filter(|(n, _)| !n.is_sharp()) {
            self.draw_key(&painter, note, *key_rect);
        }
        for (note, key_rect) in keys.iter().filter(|(n, _)| n.is_sharp()) {
            self.draw_key(&painter, note, *key_rect);
        }

        if response.clicked() {
            if let Some(click_pos) = response.interact_pointer_pos() {
                return hit_test(&keys, click_pos);
            }
        }

        None
    }

    fn draw_key(&self, painter: &egui::Painter, note: &DerivedNote, key_rect: egui::Rect) {
        let key_rect = if self.state.is_pressed(note.name) {
            key_rect.translate(egui::Vec2::new(0.0, PRESSED_OFFSET))
        } else {
            key_rect
        };

        let (fill, text) = if note.is_sharp() {
            (
                egui::Color32::from_rgb(12, 10, 9),
                egui::Color32::from_rgb(250, 250, 249),
            )
        } else {
            (
                egui::Color32::from_rgb(250, 250, 249),
                egui::Color32::from_rgb(12, 10, 9),
            )
        };

        painter.rect_filled(key_rect, 2.0, fill);
        painter.rect_stroke(
            key_rect,
            2.0,
            egui::Stroke::new(1.0, egui::Color32::from_rgb(214, 211, 209)),
            egui::StrokeKind::Inside,
        );

        painter.text(
            key_rect.center_top() + egui::Vec2::new(0.0, 12.0),
            egui::Align2::CENTER_CENTER,
            note.input_key,
            egui::FontId::monospace(11.0),
            text,
        );
        painter.text(
            key_rect.center_bottom() - egui::Vec2::new(0.0, 14.0),
            egui::Align2::CENTER_CENTER,
            note.name,
            egui::FontId::proportional(14.0),
            text,
        );
    }
}
