use crate::config::SynthConfig;

use super::delay::{MonoDelay, PingPongDelay};
use super::filter::RbjFilter;

#[derive(Clone, Copy, Debug)]
pub struct MonoDelayParams {
    pub enabled: bool,
    pub time: f64,
    pub feedback: f64,
    pub mix: f64,
}

impl Default for MonoDelayParams {
    fn default() -> Self {
        Self {
            enabled: false,
            time: 1.0,
            feedback: 0.6,
            mix: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PingPongParams {
    pub enabled: bool,
    pub time_l: f64,
    pub time_r: f64,
    pub feedback_l: f64,
    pub feedback_r: f64,
    pub mix: f64,
}

impl Default for PingPongParams {
    fn default() -> Self {
        Self {
            enabled: false,
            time_l: 0.3,
            time_r: 0.5,
            feedback_l: 0.75,
            feedback_r: 0.75,
            mix: 0.5,
        }
    }
}

/// Live effect parameters, snapshotted by the render thread once per block.
#[derive(Clone, Copy, Debug, Default)]
pub struct SfxParams {
    pub mono_delay: MonoDelayParams,
    pub ping_pong: PingPongParams,
    pub hpf_enabled: bool,
    pub lpf_enabled: bool,
}

impl SfxParams {
    /// The original patch ships with both filters engaged.
    pub fn with_filters() -> Self {
        Self {
            hpf_enabled: true,
            lpf_enabled: true,
            ..Default::default()
        }
    }
}

/// The fixed effect topology: mono delay folded over all channels, then the
/// ping-pong stereo delay, then a high-pass/low-pass pair per channel.
/// All state in here belongs to the render thread alone.
pub struct EffectsChain {
    mono_delay: MonoDelay,
    ping_pong: PingPongDelay,
    high_pass: Vec<RbjFilter>,
    low_pass: Vec<RbjFilter>,
}

impl EffectsChain {
    pub fn new(config: &SynthConfig) -> Self {
        let channels = config.channels as usize;
        let sample_rate = config.sample_rate as f64;
        Self {
            mono_delay: MonoDelay::new(config.sample_rate, config.max_delay_secs),
            ping_pong: PingPongDelay::new(config.sample_rate, config.max_delay_secs),
            high_pass: (0..channels)
                .map(|_| RbjFilter::high_pass(sample_rate, config.hpf.cutoff, config.hpf.q))
                .collect(),
            low_pass: (0..channels)
                .map(|_| RbjFilter::low_pass(sample_rate, config.lpf.cutoff, config.lpf.q))
                .collect(),
        }
    }

    /// Process one frame in place, in the fixed order.
    pub fn process(&mut self, samples: &mut [f64], params: &SfxParams) {
        if params.mono_delay.enabled {
            let folded = samples.iter().sum::<f64>() / samples.len() as f64;
            let wet = self.mono_delay.process(
                folded,
                params.mono_delay.time,
                params.mono_delay.feedback,
                params.mono_delay.mix,
            );
            samples.fill(wet);
        }

        // Always run the stereo delay so its lines keep their state; with
        // the effect toggled off the mix is forced to zero and the call is
        // inert on the output.
        let pp = &params.ping_pong;
        let mix = if pp.enabled { pp.mix } else { 0.0 };
        self.ping_pong.process(
            samples,
            pp.time_l,
            pp.time_r,
            pp.feedback_l,
            pp.feedback_r,
            mix,
        );

        if params.hpf_enabled || params.lpf_enabled {
            for (channel, sample) in samples.iter_mut().enumerate() {
                if params.hpf_enabled {
                    *sample = self.high_pass[channel].process(*sample);
                }
                if params.lpf_enabled {
                    *sample = self.low_pass[channel].process(*sample);
                }
            }
        }
    }
}
