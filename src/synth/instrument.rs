use std::collections::HashMap;

use super::envelope::AdsrEnvelope;
use super::note::Note;
use super::wavegen::{note_frequency, WaveGenerator, Waveform};

/// Master volume bounds exposed to the control thread.
const VOLUME_MIN: f64 = 0.1;
const VOLUME_MAX: f64 = 1.0;

/// Pre-reserved capacity for the per-note amplitude map; far above the
/// number of notes the keymap can sound at once, so the render thread
/// never grows it.
const AMPLITUDE_MEMORY_CAPACITY: usize = 64;

/// Closed set of instrument kinds. New kinds are new variants here, not
/// new trait implementations.
#[derive(Debug, Clone)]
pub enum InstrumentKind {
    SingleOsc { wavegen: WaveGenerator },
}

/// One logical voice-channel: an envelope template, an oscillator
/// configuration, and the per-note amplitude memory that keeps a re-struck
/// note from dipping while its previous cycle is still releasing.
#[derive(Debug, Clone)]
pub struct Instrument {
    pub name: &'static str,
    volume: f64,
    pub envelope: AdsrEnvelope,
    pub kind: InstrumentKind,
    amplitude_memory: HashMap<i32, f64>,
}

impl Instrument {
    pub fn single_osc() -> Self {
        Self {
            name: "single oscillator",
            volume: 1.0,
            envelope: AdsrEnvelope {
                attack_time: 0.15,
                decay_time: 0.4,
                sustain_amplitude: 0.9,
                release_time: 0.3,
                start_amplitude: 1.0,
            },
            kind: InstrumentKind::SingleOsc {
                wavegen: WaveGenerator::new(Waveform::Sine, 8),
            },
            amplitude_memory: HashMap::with_capacity(AMPLITUDE_MEMORY_CAPACITY),
        }
    }

    /// Render one sample for `note` at time `now`. Returns the sample and
    /// whether the note's envelope has decayed to silence.
    pub fn render(&mut self, now: f64, note: &Note) -> (f64, bool) {
        let previous = self
            .amplitude_memory
            .get(&note.id)
            .copied()
            .unwrap_or(0.0);
        let (amplitude, _state) = self
            .envelope
            .amplitude(now, note.on, note.off, previous);
        self.amplitude_memory.insert(note.id, amplitude);
        let finished = amplitude == 0.0;

        let sound = match &self.kind {
            InstrumentKind::SingleOsc { wavegen } => {
                wavegen.sample(note_frequency(note.id), now)
            }
        };
        (sound * amplitude * note.velocity * self.volume, finished)
    }

    /// Drop the amplitude memory for a pruned note id.
    pub fn clear_note(&mut self, id: i32) {
        self.amplitude_memory.remove(&id);
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Scale the master volume by a signed fraction of itself, clamped to
    /// the configured bounds. Driven by the held volume keys.
    pub fn scale_volume(&mut self, fraction: f64) {
        self.volume = (self.volume + self.volume * fraction).clamp(VOLUME_MIN, VOLUME_MAX);
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        match &mut self.kind {
            InstrumentKind::SingleOsc { wavegen } => wavegen.set_waveform(waveform),
        }
    }

    pub fn waveform(&self) -> Waveform {
        match &self.kind {
            InstrumentKind::SingleOsc { wavegen } => wavegen.waveform(),
        }
    }

    pub fn adjust_harmonics(&mut self, delta: i32) {
        match &mut self.kind {
            InstrumentKind::SingleOsc { wavegen } => wavegen.adjust_harmonics(delta),
        }
    }

    pub fn harmonics(&self) -> u32 {
        match &self.kind {
            InstrumentKind::SingleOsc { wavegen } => wavegen.harmonics(),
        }
    }
}
