use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Stream;

use crate::audio::AudioBackend;
use crate::config::SynthConfig;
use crate::engine::Engine;

/// Output backend over cpal. The engine is moved into the stream callback,
/// so all render-thread state (delay lines, filters) lives on the audio
/// thread and is never shared.
pub struct CpalBackend {
    config: SynthConfig,
    engine: Option<Engine>,
    stream: Option<Stream>,
}

impl CpalBackend {
    pub fn new(engine: Engine, config: SynthConfig) -> Self {
        Self {
            config,
            engine: Some(engine),
            stream: None,
        }
    }

    fn build_stream(&mut self) -> Result<Stream> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .context("no output device available")?;
        log::info!("output device: {}", device.name().unwrap_or_default());

        // Request the configured stream shape outright; an unsupported
        // combination is an initialization failure, not a negotiation.
        let stream_config = cpal::StreamConfig {
            channels: self.config.channels,
            sample_rate: cpal::SampleRate(self.config.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(self.config.block_size),
        };

        let mut engine = self
            .engine
            .take()
            .context("audio stream already running")?;

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    engine.render(data);
                },
                |err| log::error!("stream error: {err}"),
                None,
            )
            .context("failed to build output stream")?;

        Ok(stream)
    }
}

impl AudioBackend for CpalBackend {
    fn start(&mut self) -> Result<()> {
        let stream = self.build_stream()?;
        stream.play().context("failed to start stream")?;
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(stream) = &self.stream {
            stream.pause().context("failed to stop stream")?;
        }
        Ok(())
    }
}
