/// Mono delay ring. Delay time, feedback and mix arrive fresh on every call
/// so the control thread can modulate them live; only the ring memory and
/// the phase cursor persist.
///
/// The cursor resets to zero whenever it reaches either the index implied by
/// the requested delay time or the ring capacity, which keeps reads inside
/// the configured delay window and off stale memory.
pub struct MonoDelay {
    memory: Vec<f64>,
    sample_rate: f64,
    phase: usize,
}

impl MonoDelay {
    pub fn new(sample_rate: u32, max_delay_secs: f64) -> Self {
        let capacity = (max_delay_secs * sample_rate as f64).ceil() as usize;
        Self {
            memory: vec![0.0; capacity.max(1)],
            sample_rate: sample_rate as f64,
            phase: 0,
        }
    }

    pub fn process(&mut self, sample: f64, delay_secs: f64, feedback: f64, mix: f64) -> f64 {
        let span = (delay_secs * self.sample_rate) as usize;
        if self.phase >= span || self.phase >= self.memory.len() {
            self.phase = 0;
        }
        let delayed = self.memory[self.phase];
        self.memory[self.phase] = delayed * feedback + sample;
        self.phase += 1;
        mix * delayed + (1.0 - mix) * sample
    }

    pub fn reset(&mut self) {
        self.memory.fill(0.0);
        self.phase = 0;
    }
}

/// Stereo delay with swapped feedback paths: what comes out of the left
/// line is fed (scaled) into the right line and vice versa, so echoes
/// bounce between channels.
pub struct PingPongDelay {
    memory_l: Vec<f64>,
    memory_r: Vec<f64>,
    sample_rate: f64,
    phase_l: usize,
    phase_r: usize,
}

impl PingPongDelay {
    pub fn new(sample_rate: u32, max_delay_secs: f64) -> Self {
        let capacity = (max_delay_secs * sample_rate as f64).ceil() as usize;
        Self {
            memory_l: vec![0.0; capacity.max(1)],
            memory_r: vec![0.0; capacity.max(1)],
            sample_rate: sample_rate as f64,
            phase_l: 0,
            phase_r: 0,
        }
    }

    /// Process one frame in place. Needs at least two channels; fewer is a
    /// no-op. A `mix` of zero leaves the input untouched while the lines
    /// keep running, so the call stays uniform whether the effect is
    /// audible or not.
    pub fn process(
        &mut self,
        samples: &mut [f64],
        delay_l: f64,
        delay_r: f64,
        feedback_l: f64,
        feedback_r: f64,
        mix: f64,
    ) {
        if samples.len() < 2 {
            return;
        }
        let in_l = samples[0];
        let in_r = samples[1];

        let span_l = (delay_l * self.sample_rate) as usize;
        let span_r = (delay_r * self.sample_rate) as usize;
        if self.phase_l >= span_l || self.phase_l >= self.memory_l.len() {
            self.phase_l = 0;
        }
        if self.phase_r >= span_r || self.phase_r >= self.memory_r.len() {
            self.phase_r = 0;
        }

        let out_l = self.memory_l[self.phase_l];
        let out_r = self.memory_r[self.phase_r];
        // Cross-feed: each line is refilled from the opposite line's output.
        self.memory_l[self.phase_l] = out_r * feedback_l + in_l;
        self.memory_r[self.phase_r] = out_l * feedback_r + in_r;
        self.phase_l += 1;
        self.phase_r += 1;

        samples[0] = mix * out_l + (1.0 - mix) * in_l;
        samples[1] = mix * out_r + (1.0 - mix) * in_r;
    }

    pub fn reset(&mut self) {
        self.memory_l.fill(0.0);
        self.memory_r.fill(0.0);
        self.phase_l = 0;
        self.phase_r = 0;
    }
}
