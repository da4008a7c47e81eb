use super::Waveform;

/// Seconds from trigger until a tone stops.
pub const TONE_DURATION: f32 = 0.5;

/// Gain the envelope ramps down to. Exponential ramps cannot reach zero.
pub const GAIN_FLOOR: f32 = 0.01;

/// Everything the audio thread needs to render one tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRequest {
    /// Hz
    pub frequency: f32,
    pub timbre: Waveform,
    /// 0.0 -> 1.0
    pub gain: f32,
}

/// A single sounding tone: one oscillator feeding one decaying gain stage.
#[derive(Debug, Clone)]
pub struct Voice {
    waveform: Waveform,
    phase: f32,
    phase_inc: f32,
    level: f32,
    decay: f32,
    remaining: usize,
}

impl Voice {
    pub fn new(request: PlaybackRequest, sample_rate: f32) -> Self {
        let total = (TONE_DURATION * sample_rate).round().max(1.0) as usize;
        let (level, decay) = if request.gain > 0.0 {
            let step = (GAIN_FLOOR / request.gain).powf(1.0 / total as f32);
            (request.gain, step)
        } else {
            (0.0, 1.0)
        };

        Self {
            waveform: request.timbre,
            phase: 0.0,
            phase_inc: request.frequency / sample_rate,
            level,
            decay,
            remaining: total,
        }
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.remaining == 0 {
            return 0.0;
        }

        let sample = self.waveform.sample(self.phase) * self.level;

        self.phase = (self.phase + self.phase_inc).fract();
        self.level *= self.decay;
        self.remaining -= 1;

        sample
    }

    #[cfg(test)]
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    /// Closed form of the envelope: `g0 * (floor / g0)^(t / duration)`.
    fn gain_at(start: f32, t: f32) -> f32 {
        if start <= 0.0 {
            return 0.0;
        }
        let progress = (t / TONE_DURATION).clamp(0.0, 1.0);
        start * (GAIN_FLOOR / start).powf(progress)
    }

    fn request(gain: f32) -> PlaybackRequest {
        PlaybackRequest {
            frequency: 440.0,
            timbre: Waveform::Square,
            gain,
        }
    }

    #[test]
    fn envelope_starts_at_requested_gain() {
        assert!((gain_at(0.8, 0.0) - 0.8).abs() < 1e-6);
        let voice = Voice::new(request(0.8), SR);
        assert!((voice.level() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn envelope_reaches_floor_at_end() {
        assert!((gain_at(0.8, TONE_DURATION) - GAIN_FLOOR).abs() < 1e-6);

        let mut voice = Voice::new(request(0.8), SR);
        for _ in 0..(TONE_DURATION * SR) as usize {
            voice.next_sample();
        }
        assert!(
            (voice.level() - GAIN_FLOOR).abs() < 1e-3,
            "Level should approach the floor, got {}",
            voice.level()
        );
    }

    #[test]
    fn envelope_halfway_is_geometric_mean() {
        let mid = gain_at(1.0, TONE_DURATION / 2.0);
        assert!((mid - 0.1).abs() < 1e-5, "Expected 0.1 at halfway, got {mid}");
    }

    #[test]
    fn zero_gain_is_silent_not_rejected() {
        let mut voice = Voice::new(request(0.0), SR);
        assert_eq!(voice.level(), 0.0);
        for _ in 0..1000 {
            assert_eq!(voice.next_sample(), 0.0);
        }
        assert_eq!(gain_at(0.0, 0.25), 0.0);
    }

    #[test]
    fn stops_after_fixed_duration() {
        let mut voice = Voice::new(request(0.5), SR);
        let total = (TONE_DURATION * SR) as usize;
        for _ in 0..total - 1 {
            voice.next_sample();
        }
        assert!(!voice.is_finished());
        voice.next_sample();
        assert!(voice.is_finished(), "Voice should stop after {total} samples");
        assert_eq!(voice.next_sample(), 0.0);
    }

    #[test]
    fn frequency_is_fixed_for_lifetime() {
        let mut voice = Voice::new(
            PlaybackRequest {
                frequency: SR / 4.0,
                timbre: Waveform::Square,
                gain: 1.0,
            },
            SR,
        );
        // Quarter-rate square: two samples high, two samples low.
        let signs: Vec<bool> = (0..8).map(|_| voice.next_sample() > 0.0).collect();
        assert_eq!(
            signs,
            vec![true, true, false, false, true, true, false, false]
        );
    }
}
