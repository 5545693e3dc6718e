//! cpal-backed monophonic sine synth.
//!
//! The output stream is built lazily on the first trigger so that opening
//! the audio device happens on a user action, and so a missing device
//! surfaces as a reportable error instead of failing construction. Trigger
//! commands travel to the audio callback over a lock-free SPSC queue; the
//! callback owns the single active voice.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    HeapProd, HeapRb,
    traits::{Consumer, Producer, Split},
};

use super::Synth;
use crate::error::PlayerError;

const ATTACK_SECS: f32 = 0.01;
const RELEASE_SECS: f32 = 0.05;
const COMMAND_QUEUE_CAPACITY: usize = 256;

enum VoiceCommand {
    Attack { freq: f32, duration_samples: u64 },
    Release,
}

/// The one sounding note, owned by the audio callback.
struct Voice {
    freq: f32,
    phase: f32,
    total_samples: u64,
    remaining_samples: u64,
}

impl Voice {
    fn envelope(&self, attack_samples: f32, release_samples: f32) -> f32 {
        let played = (self.total_samples - self.remaining_samples) as f32;
        let attack = if attack_samples > 0.0 {
            (played / attack_samples).min(1.0)
        } else {
            1.0
        };
        let release = if release_samples > 0.0 {
            (self.remaining_samples as f32 / release_samples).min(1.0)
        } else {
            1.0
        };
        attack.min(release)
    }
}

pub struct SineSynth {
    gain: f32,
    sample_rate: f32,
    stream: Option<cpal::Stream>,
    producer: Option<HeapProd<VoiceCommand>>,
}

impl SineSynth {
    pub fn new(gain: f32) -> Self {
        Self {
            gain,
            sample_rate: 0.0,
            stream: None,
            producer: None,
        }
    }

    fn ensure_stream(&mut self) -> Result<(), PlayerError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PlayerError::SynthInit("no output device".into()))?;
        let config = device
            .default_output_config()
            .map_err(|e| PlayerError::SynthInit(e.to_string()))?;
        let stream_config: cpal::StreamConfig = config.into();

        let sample_rate = stream_config.sample_rate as f32;
        let num_channels = stream_config.channels as usize;
        tracing::info!(sample_rate, num_channels, "audio output opened");

        let ring_buffer = HeapRb::<VoiceCommand>::new(COMMAND_QUEUE_CAPACITY);
        let (producer, mut consumer) = ring_buffer.split();

        let gain = self.gain;
        let attack_samples = ATTACK_SECS * sample_rate;
        let release_samples = RELEASE_SECS * sample_rate;
        let mut voice: Option<Voice> = None;

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    while let Some(command) = consumer.try_pop() {
                        match command {
                            VoiceCommand::Attack {
                                freq,
                                duration_samples,
                            } => {
                                voice = Some(Voice {
                                    freq,
                                    phase: 0.0,
                                    total_samples: duration_samples,
                                    remaining_samples: duration_samples,
                                });
                            }
                            VoiceCommand::Release => voice = None,
                        }
                    }

                    for frame in data.chunks_mut(num_channels) {
                        let sample = match voice.as_mut() {
                            Some(v) if v.remaining_samples > 0 => {
                                let s = (v.phase * 2.0 * std::f32::consts::PI).sin()
                                    * v.envelope(attack_samples, release_samples)
                                    * gain;
                                v.phase += v.freq / sample_rate;
                                if v.phase >= 1.0 {
                                    v.phase -= 1.0;
                                }
                                v.remaining_samples -= 1;
                                s
                            }
                            _ => 0.0,
                        };
                        for out in frame.iter_mut() {
                            *out = sample;
                        }
                    }
                },
                |err| tracing::error!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| PlayerError::SynthInit(e.to_string()))?;

        stream
            .play()
            .map_err(|e| PlayerError::SynthInit(e.to_string()))?;

        self.sample_rate = sample_rate;
        self.stream = Some(stream);
        self.producer = Some(producer);
        Ok(())
    }
}

impl Synth for SineSynth {
    fn trigger_attack_release(&mut self, freq_hz: f32, secs: f32) -> Result<(), PlayerError> {
        self.ensure_stream()?;

        let duration_samples = (secs * self.sample_rate) as u64;
        let producer = self
            .producer
            .as_mut()
            .ok_or_else(|| PlayerError::Playback("audio stream not running".into()))?;
        producer
            .try_push(VoiceCommand::Attack {
                freq: freq_hz,
                duration_samples,
            })
            .map_err(|_| PlayerError::Playback("voice command queue full".into()))
    }

    fn trigger_release(&mut self) {
        if let Some(producer) = self.producer.as_mut() {
            let _ = producer.try_push(VoiceCommand::Release);
        }
    }
}
