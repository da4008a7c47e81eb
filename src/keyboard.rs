//! The fixed 13-key layout, one chromatic octave from C to C5.

pub const NOTE_COUNT: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub name: &'static str,
    /// Hz at octave shift 0
    pub base_frequency: f32,
    pub input_key: char,
}

/// A [`Note`] seen through an octave shift. Never stored, always re-derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedNote {
    pub name: &'static str,
    pub frequency: f32,
    pub input_key: char,
}

impl DerivedNote {
    /// Sharps are drawn as the narrow black keys.
    pub fn is_sharp(&self) -> bool {
        self.name.contains('#')
    }
}

const fn note(name: &'static str, base_frequency: f32, input_key: char) -> Note {
    Note {
        name,
        base_frequency,
        input_key,
    }
}

static BASE_NOTES: [Note; NOTE_COUNT] = [
    note("C", 261.63, 'a'),
    note("C#", 277.18, 'w'),
    note("D", 293.66, 's'),
    note("D#", 311.13, 'e'),
    note("E", 329.63, 'd'),
    note("F", 349.23, 'f'),
    note("F#", 369.99, 't'),
    note("G", 392.0, 'g'),
    note("G#", 415.3, 'y'),
    note("A", 440.0, 'h'),
    note("A#", 466.16, 'u'),
    note("B", 493.88, 'j'),
    note("C5", 523.25, 'k'),
];

/// Every note with `frequency = base_frequency * 2^octave_shift`, left to right.
pub fn derive_notes(octave_shift: i32) -> [DerivedNote; NOTE_COUNT] {
    let factor = 2.0_f32.powi(octave_shift);
    BASE_NOTES.map(|n| DerivedNote {
        name: n.name,
        frequency: n.base_frequency * factor,
        input_key: n.input_key,
    })
}

pub fn find_by_key(notes: &[DerivedNote], key: char) -> Option<DerivedNote> {
    notes.iter().find(|n| n.input_key == key).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_keys_are_unique() {
        let names: HashSet<_> = BASE_NOTES.iter().map(|n| n.name).collect();
        let keys: HashSet<_> = BASE_NOTES.iter().map(|n| n.input_key).collect();
        assert_eq!(names.len(), NOTE_COUNT);
        assert_eq!(keys.len(), NOTE_COUNT);
    }

    #[test]
    fn bindings_follow_home_row_layout() {
        let keys: String = BASE_NOTES.iter().map(|n| n.input_key).collect();
        assert_eq!(keys, "awsedftgyhujk");
    }

    #[test]
    fn derived_frequency_is_base_times_power_of_two() {
        for shift in -2..=2 {
            let derived = derive_notes(shift);
            for (base, note) in BASE_NOTES.iter().zip(derived.iter()) {
                let expected = base.base_frequency * 2.0_f32.powi(shift);
                assert!(
                    (note.frequency - expected).abs() < 1e-3,
                    "{} at shift {shift}: expected {expected}, got {}",
                    note.name,
                    note.frequency
                );
                assert!(note.frequency > 0.0);
            }
        }
    }

    #[test]
    fn a_one_octave_up_is_880() {
        let notes = derive_notes(1);
        let a = find_by_key(&notes, 'h').unwrap();
        assert_eq!(a.name, "A");
        assert!((a.frequency - 880.0).abs() < 1e-3);
    }

    #[test]
    fn order_is_chromatic() {
        let notes = derive_notes(0);
        assert_eq!(notes[0].name, "C");
        assert_eq!(notes[NOTE_COUNT - 1].name, "C5");
        for pair in notes.windows(2) {
            assert!(pair[0].frequency < pair[1].frequency);
        }
    }

    #[test]
    fn unbound_key_is_not_found() {
        assert!(find_by_key(&derive_notes(0), 'x').is_none());
    }

    #[test]
    fn sharps_are_flagged() {
        let sharps: Vec<_> = derive_notes(0)
            .iter()
            .filter(|n| n.is_sharp())
            .map(|n| n.name)
            .collect();
        assert_eq!(sharps, vec!["C#", "D#", "F#", "G#", "A#"]);
    }
}
