use std::sync::Mutex;

use anyhow::Result;

use super::fft::Fft;

/// Which capture buffer the render thread feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VisMode {
    #[default]
    Scope,
    Spectrum,
}

impl VisMode {
    pub fn toggled(self) -> Self {
        match self {
            VisMode::Scope => VisMode::Spectrum,
            VisMode::Spectrum => VisMode::Scope,
        }
    }
}

struct ScopeState {
    rings: Vec<Vec<f64>>,
    phase: usize,
}

struct SpectrumState {
    rings: Vec<Vec<f64>>,
    magnitudes: Vec<Vec<f64>>,
    phase: usize,
    fft: Fft,
}

/// Rolling capture buffers for the visualization collaborator.
///
/// The render thread writes one post-effects frame per call; readers copy
/// snapshots out under the same locks. Scope and spectrum state sit behind
/// independent locks so a UI reading the spectrum never stalls a scope
/// write, and neither contends with the note registry.
pub struct SpectralAnalyzer {
    scope: Mutex<ScopeState>,
    spectrum: Mutex<SpectrumState>,
    channels: usize,
}

impl SpectralAnalyzer {
    /// Fails if `fft_len` is not a power of two; all buffers are allocated
    /// here, never on the render path.
    pub fn new(channels: usize, scope_len: usize, fft_len: usize) -> Result<Self> {
        let fft = Fft::new(fft_len)?;
        Ok(Self {
            scope: Mutex::new(ScopeState {
                rings: vec![vec![0.0; scope_len]; channels],
                phase: 0,
            }),
            spectrum: Mutex::new(SpectrumState {
                rings: vec![vec![0.0; fft_len]; channels],
                magnitudes: vec![vec![0.0; fft_len / 2]; channels],
                phase: 0,
                fft,
            }),
            channels,
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Capture one frame into the buffer selected by `mode`.
    pub fn capture(&self, frame: &[f64], mode: VisMode) {
        match mode {
            VisMode::Scope => self.capture_scope(frame),
            VisMode::Spectrum => self.capture_spectrum(frame),
        }
    }

    fn capture_scope(&self, frame: &[f64]) {
        let mut scope = self.scope.lock().unwrap();
        let phase = scope.phase;
        for (ring, &sample) in scope.rings.iter_mut().zip(frame) {
            ring[phase] = sample;
        }
        scope.phase = (phase + 1) % scope.rings[0].len();
    }

    fn capture_spectrum(&self, frame: &[f64]) {
        let mut spectrum = self.spectrum.lock().unwrap();
        let SpectrumState {
            rings,
            magnitudes,
            phase,
            fft,
        } = &mut *spectrum;

        for (ring, &sample) in rings.iter_mut().zip(frame) {
            ring[*phase] = sample;
        }
        *phase += 1;
        if *phase == fft.size() {
            // One full pass captured: recompute the magnitude spectrum.
            *phase = 0;
            for (ring, magnitudes) in rings.iter().zip(magnitudes.iter_mut()) {
                fft.magnitude(ring, magnitudes);
            }
        }
    }

    /// Copy of a channel's scope ring, oldest sample first.
    pub fn scope(&self, channel: usize) -> Option<Vec<f64>> {
        let scope = self.scope.lock().unwrap();
        let ring = scope.rings.get(channel)?;
        let mut out = Vec::with_capacity(ring.len());
        out.extend_from_slice(&ring[scope.phase..]);
        out.extend_from_slice(&ring[..scope.phase]);
        Some(out)
    }

    /// Copy of a channel's magnitude spectrum (bins up to Nyquist).
    pub fn magnitudes(&self, channel: usize) -> Option<Vec<f64>> {
        let spectrum = self.spectrum.lock().unwrap();
        spectrum.magnitudes.get(channel).cloned()
    }

    /// The magnitude spectrum in decibels.
    pub fn magnitudes_db(&self, channel: usize) -> Option<Vec<f64>> {
        let spectrum = self.spectrum.lock().unwrap();
        let magnitudes = spectrum.magnitudes.get(channel)?;
        Some(
            magnitudes
                .iter()
                .map(|&m| 10.0 * (m * m).max(1e-12).log10())
                .collect(),
        )
    }
}
