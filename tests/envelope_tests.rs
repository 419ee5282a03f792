use synthscope::synth::{AdsrEnvelope, AdsrState};

fn reference_envelope() -> AdsrEnvelope {
    AdsrEnvelope {
        attack_time: 0.1,
        decay_time: 0.1,
        sustain_amplitude: 1.0,
        release_time: 0.2,
        start_amplitude: 1.0,
    }
}

#[test]
fn attack_ramps_linearly_to_start_amplitude() {
    let env = reference_envelope();
    let on = 1.0;

    let (mid, state) = env.amplitude(on + 0.05, on, 0.0, 0.0);
    assert_eq!(state, AdsrState::Attack);
    assert!((mid - 0.5).abs() < 0.02, "expected ~0.5, got {mid}");

    let (peak, _) = env.amplitude(on + 0.1, on, 0.0, 0.0);
    assert!((peak - 1.0).abs() < 0.02, "expected ~1.0, got {peak}");
}

#[test]
fn sustain_holds_after_attack_and_decay() {
    let env = reference_envelope();
    let on = 1.0;
    let (amplitude, state) = env.amplitude(on + 0.25, on, 0.0, 0.0);
    assert_eq!(state, AdsrState::Sustain);
    assert_eq!(amplitude, 1.0);
}

#[test]
fn decay_interpolates_between_start_and_sustain() {
    let env = AdsrEnvelope {
        attack_time: 0.1,
        decay_time: 0.2,
        sustain_amplitude: 0.5,
        release_time: 0.2,
        start_amplitude: 1.0,
    };
    let on = 2.0;
    // Halfway through decay: halfway between start and sustain.
    let (amplitude, state) = env.amplitude(on + 0.2, on, 0.0, 0.0);
    assert_eq!(state, AdsrState::Decay);
    assert!((amplitude - 0.75).abs() < 1e-9);
}

#[test]
fn envelope_is_nondecreasing_during_attack() {
    let env = reference_envelope();
    let on = 1.0;
    let mut previous = 0.0;
    for step in 0..20 {
        let now = on + step as f64 * 0.005;
        let (amplitude, _) = env.amplitude(now, on, 0.0, 0.0);
        assert!(amplitude >= previous, "attack dipped at step {step}");
        previous = amplitude;
    }
}

#[test]
fn release_ramps_to_zero_over_release_time() {
    let env = reference_envelope();
    let on = 1.0;
    let off = 2.0; // released from sustain = 1.0

    let mut previous = f64::MAX;
    for step in 1..10 {
        let now = off + step as f64 * 0.02;
        let (amplitude, state) = env.amplitude(now, on, off, 0.0);
        assert!(amplitude < previous, "release must decrease monotonically");
        assert!(state == AdsrState::Release || state == AdsrState::Inactive);
        previous = amplitude;
    }

    // At and past the end of the ramp: clamped to exactly zero.
    let (end, state) = env.amplitude(off + 0.2, on, off, 0.0);
    assert_eq!(end, 0.0);
    assert_eq!(state, AdsrState::Inactive);
    let (past, _) = env.amplitude(off + 5.0, on, off, 0.0);
    assert_eq!(past, 0.0, "amplitude must never go negative");
}

#[test]
fn release_starts_from_the_interrupted_phase() {
    let env = reference_envelope();
    let on = 1.0;
    let off = on + 0.05; // released mid-attack at ~0.5
    let (amplitude, _) = env.amplitude(off + 0.1, on, off, 0.0);
    // Half the release ramp from 0.5 down.
    assert!((amplitude - 0.25).abs() < 0.02, "got {amplitude}");
}

#[test]
fn retrigger_never_dips_below_previous_amplitude() {
    let env = reference_envelope();
    let on = 5.0;
    // Re-struck while the old cycle still carried 0.6 of amplitude.
    let (amplitude, state) = env.amplitude(on + 0.01, on, 1.0, 0.6);
    assert_eq!(state, AdsrState::Attack);
    assert!(amplitude >= 0.6, "retrigger dipped to {amplitude}");

    // Once the ramp overtakes the memory, the ramp wins.
    let (late, _) = env.amplitude(on + 0.09, on, 1.0, 0.6);
    assert!(late > 0.6);
}

#[test]
fn zero_length_phases_are_instantaneous() {
    let env = AdsrEnvelope {
        attack_time: 0.0,
        decay_time: 0.0,
        sustain_amplitude: 0.8,
        release_time: 0.0,
        start_amplitude: 1.0,
    };
    let on = 1.0;
    let (held, state) = env.amplitude(on + 1e-6, on, 0.0, 0.0);
    assert!(held.is_finite());
    assert_eq!(state, AdsrState::Sustain);
    assert!((held - 0.8).abs() < 1e-9);

    let (released, state) = env.amplitude(on + 2.0, on, on + 1.0, 0.0);
    assert_eq!(released, 0.0);
    assert_eq!(state, AdsrState::Inactive);
}

#[test]
fn amplitudes_below_epsilon_clamp_to_zero() {
    let env = AdsrEnvelope {
        attack_time: 0.1,
        decay_time: 0.1,
        sustain_amplitude: 0.0005,
        release_time: 0.2,
        start_amplitude: 1.0,
    };
    let on = 1.0;
    let (amplitude, state) = env.amplitude(on + 1.0, on, 0.0, 0.0);
    assert_eq!(amplitude, 0.0);
    assert_eq!(state, AdsrState::Inactive);
}
