/// Amplitudes at or below this are clamped to exactly zero, which is the
/// signal that a voice has finished and may be pruned.
pub const AMPLITUDE_EPSILON: f64 = 1e-3;

/// Small positive floor added to the attack ramp so a fresh note starts
/// audible instead of at zero.
const ATTACK_FLOOR: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdsrState {
    Inactive,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Linear ADSR amplitude law.
///
/// This is a pure function of the note timestamps: no state is kept between
/// calls except the caller-supplied previous amplitude, which only matters
/// when a note is re-struck while its last cycle is still releasing.
#[derive(Clone, Copy, Debug)]
pub struct AdsrEnvelope {
    pub attack_time: f64,
    pub decay_time: f64,
    pub sustain_amplitude: f64,
    pub release_time: f64,
    pub start_amplitude: f64,
}

impl AdsrEnvelope {
    /// Amplitude of the held-note law at `lifetime` seconds after note-on.
    /// Zero-length attack/decay phases are skipped rather than divided by.
    fn held_amplitude(&self, lifetime: f64) -> (f64, AdsrState) {
        if self.attack_time > 0.0 && lifetime <= self.attack_time {
            let amplitude = (lifetime / self.attack_time) * self.start_amplitude;
            return (amplitude, AdsrState::Attack);
        }
        if self.decay_time > 0.0 && lifetime <= self.attack_time + self.decay_time {
            let progress = (lifetime - self.attack_time).max(0.0) / self.decay_time;
            let amplitude =
                self.start_amplitude + progress * (self.sustain_amplitude - self.start_amplitude);
            return (amplitude, AdsrState::Decay);
        }
        (self.sustain_amplitude, AdsrState::Sustain)
    }

    /// Evaluate the envelope at `now` for a note struck at `on` and released
    /// at `off` (`on > off` while held). `previous` is the last amplitude
    /// rendered for this note id; on retrigger the attack never dips below it.
    pub fn amplitude(&self, now: f64, on: f64, off: f64, previous: f64) -> (f64, AdsrState) {
        let (mut amplitude, state) = if on > off {
            let lifetime = now - on;
            let (mut amplitude, state) = self.held_amplitude(lifetime);
            if state == AdsrState::Attack {
                amplitude += ATTACK_FLOOR;
                if previous > 0.0 {
                    amplitude = amplitude.max(previous);
                }
            }
            (amplitude, state)
        } else {
            // Ramp from wherever the held law stood at release down to zero.
            let (release_from, _) = self.held_amplitude(off - on);
            let amplitude = if self.release_time > 0.0 {
                release_from * (1.0 - (now - off) / self.release_time)
            } else {
                0.0
            };
            (amplitude, AdsrState::Release)
        };

        if amplitude <= AMPLITUDE_EPSILON {
            amplitude = 0.0;
        }
        if amplitude == 0.0 {
            return (amplitude, AdsrState::Inactive);
        }
        (amplitude, state)
    }
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self {
            attack_time: 0.1,
            decay_time: 0.1,
            sustain_amplitude: 1.0,
            release_time: 0.2,
            start_amplitude: 1.0,
        }
    }
}
