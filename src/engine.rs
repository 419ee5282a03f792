use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::analysis::{SpectralAnalyzer, VisMode};
use crate::config::SynthConfig;
use crate::sfx::{EffectsChain, SfxParams};
use crate::synth::NoteRegistry;

/// Monotonic render clock: a shared sample counter advanced by the render
/// thread and read as seconds by the control thread for note timestamps.
#[derive(Clone)]
pub struct RenderClock {
    samples: Arc<AtomicU64>,
    sample_rate: f64,
}

impl RenderClock {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Arc::new(AtomicU64::new(0)),
            sample_rate: sample_rate as f64,
        }
    }

    /// Seconds of audio rendered so far.
    pub fn now(&self) -> f64 {
        self.samples.load(Ordering::Relaxed) as f64 / self.sample_rate
    }

    fn advance(&self) {
        self.samples.fetch_add(1, Ordering::Relaxed);
    }
}

/// Everything the control thread may edit while audio runs, other than the
/// instrument itself (which lives under the note registry lock).
#[derive(Clone, Copy, Debug)]
pub struct EngineParams {
    pub sfx: SfxParams,
    pub vis_enabled: bool,
    pub vis_mode: VisMode,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            sfx: SfxParams::with_filters(),
            vis_enabled: true,
            vis_mode: VisMode::Scope,
        }
    }
}

/// Shared handle for live parameters: the control thread edits, the render
/// thread takes one snapshot per block.
#[derive(Default)]
pub struct LiveParams {
    inner: Mutex<EngineParams>,
}

impl LiveParams {
    pub fn snapshot(&self) -> EngineParams {
        *self.inner.lock().unwrap()
    }

    pub fn edit<R>(&self, f: impl FnOnce(&mut EngineParams) -> R) -> R {
        let mut params = self.inner.lock().unwrap();
        f(&mut params)
    }
}

/// The audio-callback orchestrator. Owns the effect state outright; holds
/// shared handles to the note registry, the capture buffers, and the live
/// parameters. `render` runs on the audio thread once per output block and
/// performs no allocation.
pub struct Engine {
    registry: Arc<NoteRegistry>,
    analyzer: Arc<SpectralAnalyzer>,
    params: Arc<LiveParams>,
    clock: RenderClock,
    effects: EffectsChain,
    frame: Vec<f64>,
    channels: usize,
}

impl Engine {
    pub fn new(
        config: &SynthConfig,
        registry: Arc<NoteRegistry>,
        analyzer: Arc<SpectralAnalyzer>,
        params: Arc<LiveParams>,
        clock: RenderClock,
    ) -> Self {
        let channels = config.channels as usize;
        Self {
            registry,
            analyzer,
            params,
            clock,
            effects: EffectsChain::new(config),
            frame: vec![0.0; channels],
            channels,
        }
    }

    /// Fill one interleaved output block: per frame, mix the active notes,
    /// broadcast the mono mix to every channel, run the effects chain, feed
    /// the capture buffers, and advance the clock.
    pub fn render(&mut self, data: &mut [f32]) {
        let params = self.params.snapshot();
        for out_frame in data.chunks_mut(self.channels) {
            let now = self.clock.now();
            let mixed = self.registry.render_mix(now);
            self.frame.fill(mixed);

            self.effects.process(&mut self.frame, &params.sfx);

            if params.vis_enabled {
                self.analyzer.capture(&self.frame, params.vis_mode);
            }

            for (out, &sample) in out_frame.iter_mut().zip(self.frame.iter()) {
                *out = sample as f32;
            }
            self.clock.advance();
        }
    }
}
