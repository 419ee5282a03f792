use anyhow::{ensure, Result};

/// Cutoff/Q pair for one of the fixed output filters.
#[derive(Clone, Copy, Debug)]
pub struct FilterSpec {
    pub cutoff: f64,
    pub q: f64,
}

/// Startup configuration for the whole pipeline.
///
/// The stream parameters are requested from the device as-is, not
/// negotiated; an unsupported combination fails `AudioBackend::start`.
#[derive(Clone, Copy, Debug)]
pub struct SynthConfig {
    pub sample_rate: u32,
    pub channels: u16,
    /// Frames per output block requested from the audio backend.
    pub block_size: u32,
    /// Capacity of each delay ring, in seconds.
    pub max_delay_secs: f64,
    /// Spectrum capture window. Must be a power of two.
    pub fft_len: usize,
    /// Oscilloscope capture window, in frames.
    pub scope_len: usize,
    pub hpf: FilterSpec,
    pub lpf: FilterSpec,
}

impl SynthConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.fft_len.is_power_of_two(),
            "fft_len must be a power of two, got {}",
            self.fft_len
        );
        ensure!(self.channels > 0, "at least one output channel required");
        ensure!(self.scope_len > 0, "scope_len must be nonzero");
        ensure!(
            self.max_delay_secs > 0.0,
            "max_delay_secs must be positive"
        );
        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            block_size: 1024,
            max_delay_secs: 4.0,
            fft_len: 2048,
            scope_len: 1280,
            hpf: FilterSpec {
                cutoff: 100.0,
                q: 0.3,
            },
            lpf: FilterSpec {
                cutoff: 1500.0,
                q: 0.7,
            },
        }
    }
}
