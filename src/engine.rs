use crate::audio::{Mixer, PlaybackRequest};
use crate::config::Settings;
use crate::error::AudioError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam::channel::Receiver;
use ringbuf::{
    HeapCons, HeapProd, HeapRb,
    traits::{Producer, Split},
};

/// UI-side handle for starting tones.
///
/// Holds the producer end of the request queue; the matching consumer lives
/// in the audio callback. Without an output attached every `play` is a no-op.
pub struct ToneEngine {
    producer: Option<HeapProd<PlaybackRequest>>,
}

impl ToneEngine {
    /// An engine with nowhere to send audio.
    pub fn detached() -> Self {
        Self { producer: None }
    }

    /// An engine plus the consumer end its requests arrive on.
    pub fn with_queue(capacity: usize) -> (Self, HeapCons<PlaybackRequest>) {
        let (producer, consumer) = HeapRb::<PlaybackRequest>::new(capacity.max(1)).split();
        (
            Self {
                producer: Some(producer),
            },
            consumer,
        )
    }

    pub fn is_attached(&self) -> bool {
        self.producer.is_some()
    }

    /// Starts one independent tone: fixed pitch, exponential decay, 0.5s long.
    pub fn play(&mut self, request: PlaybackRequest) {
        let Some(producer) = self.producer.as_mut() else {
            tracing::debug!(?request, "No audio output, dropping tone");
            return;
        };

        if producer.try_push(request).is_err() {
            tracing::warn!(?request, "Tone queue full, dropping tone");
        } else {
            tracing::trace!(?request, "Queued tone");
        }
    }
}

/// The running output stream on the default device.
pub struct AudioOutput {
    _stream: cpal::Stream,
    errors: Receiver<cpal::StreamError>,
}

impl AudioOutput {
    pub fn open(queue_capacity: usize) -> Result<(Self, ToneEngine), AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let config = device.default_output_config()?;
        let stream_config: cpal::StreamConfig = config.into();

        let sample_rate = stream_config.sample_rate;
        let num_channels = stream_config.channels as usize;
        tracing::info!(num_channels, sample_rate, "Audio output");

        let (engine, consumer) = ToneEngine::with_queue(queue_capacity);
        let mut mixer = Mixer::new(consumer, sample_rate as f32, num_channels, queue_capacity);
        let (error_tx, errors) = crossbeam::channel::unbounded();

        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                mixer.render(data);
            },
            move |err| {
                let _ = error_tx.send(err);
            },
            None,
        )?;

        stream.play()?;

        Ok((
            Self {
                _stream: stream,
                errors,
            },
            engine,
        ))
    }

    /// Stream errors reported by the audio thread since the last call.
    pub fn take_errors(&self) -> Vec<cpal::StreamError> {
        self.errors.try_iter().collect()
    }
}

/// Opens the output once for the whole process. Failure leaves the engine
/// detached so the keyboard keeps working silently.
pub fn start_audio(settings: &Settings) -> (Option<AudioOutput>, ToneEngine) {
    match AudioOutput::open(settings.queue_capacity) {
        Ok((output, engine)) => (Some(output), engine),
        Err(e) => {
            tracing::warn!(error = %e, "Audio unavailable, running silent");
            (None, ToneEngine::detached())
        }
    }
}
