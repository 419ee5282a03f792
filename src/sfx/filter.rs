use std::f64::consts::PI;

#[derive(Clone, Copy, Debug)]
enum RbjKind {
    LowPass,
    HighPass,
}

/// Second-order IIR filter with coefficients from the RBJ Audio EQ
/// Cookbook, Direct Form I. State persists across calls; one instance per
/// channel.
#[derive(Clone, Debug, Default)]
pub struct RbjFilter {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl RbjFilter {
    pub fn low_pass(sample_rate: f64, cutoff: f64, q: f64) -> Self {
        Self::new(RbjKind::LowPass, sample_rate, cutoff, q)
    }

    pub fn high_pass(sample_rate: f64, cutoff: f64, q: f64) -> Self {
        Self::new(RbjKind::HighPass, sample_rate, cutoff, q)
    }

    fn new(kind: RbjKind, sample_rate: f64, cutoff: f64, q: f64) -> Self {
        // Keep cutoff below Nyquist and Q away from zero.
        let sample_rate = sample_rate.max(1.0);
        let cutoff = cutoff.max(1.0).min(sample_rate * 0.49);
        let q = q.max(1e-3);

        let omega = 2.0 * PI * cutoff / sample_rate;
        let cos_omega = omega.cos();
        let sin_omega = omega.sin();
        let alpha = sin_omega / (2.0 * q);

        let (b0, b1, b2) = match kind {
            RbjKind::LowPass => {
                let b1 = 1.0 - cos_omega;
                (b1 / 2.0, b1, b1 / 2.0)
            }
            RbjKind::HighPass => {
                let b1 = -(1.0 + cos_omega);
                (-b1 / 2.0, b1, -b1 / 2.0)
            }
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
            ..Default::default()
        }
    }

    /// Biquad difference equation:
    /// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
