use super::{PlaybackRequest, Voice};
use ringbuf::{HeapCons, traits::Consumer};

/// Audio-thread side of the tone pipeline.
///
/// Pulls new requests off the ring buffer at the start of every block, then
/// sums every live voice into each frame. Voice storage is reserved up front
/// and never grows on the audio thread: once `max_voices` tones are sounding,
/// further requests are discarded until one finishes.
pub struct Mixer {
    requests: HeapCons<PlaybackRequest>,
    voices: Vec<Voice>,
    max_voices: usize,
    sample_rate: f32,
    num_channels: usize,
}

impl Mixer {
    pub fn new(
        requests: HeapCons<PlaybackRequest>,
        sample_rate: f32,
        num_channels: usize,
        max_voices: usize,
    ) -> Self {
        let max_voices = max_voices.max(1);
        Self {
            requests,
            voices: Vec::with_capacity(max_voices),
            max_voices,
            sample_rate,
            num_channels: num_channels.max(1),
        }
    }

    #[cfg(test)]
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Fill an interleaved output buffer.
    pub fn render(&mut self, data: &mut [f32]) {
        while let Some(request) = self.requests.try_pop() {
            if self.voices.len() < self.max_voices {
                self.voices.push(Voice::new(request, self.sample_rate));
            }
        }

        data.fill(0.0);

        for frame in data.chunks_mut(self.num_channels) {
            let mut sample = 0.0;
            for voice in &mut self.voices {
                sample += voice.next_sample();
            }
            frame.fill(sample);
        }

        self.voices.retain(|voice| !voice.is_finished());
    }
}
