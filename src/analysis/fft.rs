use anyhow::{ensure, Result};
use num_complex::Complex;
use std::f64::consts::PI;

/// Floor on bin power before the dB transform, so silent bins come out as a
/// large negative number instead of -inf.
const POWER_FLOOR: f64 = 1e-12;

/// Radix-2 FFT over a fixed, power-of-two window.
///
/// The complex working buffer and recursion scratch are allocated once at
/// construction; `forward` and the magnitude transforms are allocation-free
/// and safe to run from the render thread.
pub struct Fft {
    size: usize,
    buf: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl Fft {
    pub fn new(size: usize) -> Result<Self> {
        ensure!(
            size.is_power_of_two(),
            "FFT size must be a power of two, got {size}"
        );
        Ok(Self {
            size,
            buf: vec![Complex::new(0.0, 0.0); size],
            scratch: vec![Complex::new(0.0, 0.0); size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform `input` (treated as purely real) and return the complex
    /// spectrum. `input` must match the configured size.
    pub fn forward(&mut self, input: &[f64]) -> &[Complex<f64>] {
        assert_eq!(input.len(), self.size, "input length must match FFT size");
        for (slot, &x) in self.buf.iter_mut().zip(input) {
            *slot = Complex::new(x, 0.0);
        }
        fft_recursive(&mut self.buf, &mut self.scratch);
        &self.buf
    }

    /// Magnitudes sqrt(re^2 + im^2) of the first `size/2` bins (up to
    /// Nyquist; the upper half mirrors them for real input).
    pub fn magnitude(&mut self, input: &[f64], out: &mut [f64]) {
        assert_eq!(out.len(), self.size / 2, "output must hold size/2 bins");
        self.forward(input);
        for (k, slot) in out.iter_mut().enumerate() {
            let bin = self.buf[k];
            *slot = (bin.re * bin.re + bin.im * bin.im).sqrt();
        }
    }

    /// Bin power in decibels: 10 * log10(re^2 + im^2).
    pub fn magnitude_db(&mut self, input: &[f64], out: &mut [f64]) {
        assert_eq!(out.len(), self.size / 2, "output must hold size/2 bins");
        self.forward(input);
        for (k, slot) in out.iter_mut().enumerate() {
            let bin = self.buf[k];
            let power = (bin.re * bin.re + bin.im * bin.im).max(POWER_FLOOR);
            *slot = 10.0 * power.log10();
        }
    }
}

/// Recursive Cooley-Tukey: split into even/odd index subsequences, recurse,
/// then combine with the twiddle factor exp(-2*pi*i*k/n). `scratch` must be
/// the same length as `buf`; each level reuses the caller's buffer as the
/// sublevel's scratch, so no allocation happens anywhere in the recursion.
fn fft_recursive(buf: &mut [Complex<f64>], scratch: &mut [Complex<f64>]) {
    let n = buf.len();
    if n <= 1 {
        return;
    }
    let half = n / 2;

    let (even, odd) = scratch.split_at_mut(half);
    for i in 0..half {
        even[i] = buf[2 * i];
        odd[i] = buf[2 * i + 1];
    }
    {
        let (lo, hi) = buf.split_at_mut(half);
        fft_recursive(even, lo);
        fft_recursive(odd, hi);
    }
    for k in 0..half {
        let twiddle = Complex::new(0.0, -2.0 * PI * k as f64 / n as f64).exp();
        let t = twiddle * odd[k];
        buf[k] = even[k] + t;
        buf[k + half] = even[k] - t;
    }
}
