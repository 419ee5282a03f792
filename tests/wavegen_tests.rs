use std::f64::consts::PI;

use synthscope::synth::{note_frequency, WaveGenerator, Waveform};

#[test]
fn semitone_scale_doubles_every_octave() {
    assert!((note_frequency(0) - 8.0).abs() < 1e-12);
    assert!((note_frequency(12) - 16.0).abs() < 1e-9);
    assert!((note_frequency(24) - 32.0).abs() < 1e-9);
    // Adjacent ids are one equal-temperament semitone apart.
    let ratio = note_frequency(65) / note_frequency(64);
    assert!((ratio - 2f64.powf(1.0 / 12.0)).abs() < 1e-12);
}

#[test]
fn harmonic_count_never_drops_below_one() {
    let mut gen = WaveGenerator::new(Waveform::Square, 4);
    gen.adjust_harmonics(-100);
    assert_eq!(gen.harmonics(), 1);
    gen.adjust_harmonics(2);
    assert_eq!(gen.harmonics(), 3);

    // Constructing with zero harmonics clamps too.
    assert_eq!(WaveGenerator::new(Waveform::Sine, 0).harmonics(), 1);
}

#[test]
fn sine_is_a_single_term() {
    let gen = WaveGenerator::new(Waveform::Sine, 32);
    // Harmonic count is irrelevant for a sine: value is sin(2*pi*f*t).
    let value = gen.sample(1.0, 0.25);
    assert!((value - 1.0).abs() < 1e-12);
    assert!(gen.sample(1.0, 0.5).abs() < 1e-12);
}

#[test]
fn single_harmonic_sums_reduce_to_scaled_fundamentals() {
    let t = 0.1;
    let fundamental = (2.0 * PI * t).sin();

    let square = WaveGenerator::new(Waveform::Square, 1).sample(1.0, t);
    assert!((square - (4.0 / PI) * fundamental).abs() < 1e-12);

    let saw = WaveGenerator::new(Waveform::Sawtooth, 1).sample(1.0, t);
    assert!((saw - (2.0 / PI) * fundamental).abs() < 1e-12);

    let triangle = WaveGenerator::new(Waveform::Triangle, 1).sample(1.0, t);
    assert!((triangle - (8.0 / (PI * PI)) * fundamental).abs() < 1e-12);
}

#[test]
fn square_contains_only_odd_harmonics() {
    // With two terms the square adds the third harmonic at 1/3 weight.
    let t = 0.07;
    let gen = WaveGenerator::new(Waveform::Square, 2);
    let expected =
        (4.0 / PI) * ((2.0 * PI * t).sin() + (3.0 * 2.0 * PI * t).sin() / 3.0);
    assert!((gen.sample(1.0, t) - expected).abs() < 1e-12);
}

#[test]
fn more_harmonics_change_the_output_level() {
    // No renormalization across harmonic counts: the partial sums differ.
    let t = 0.013;
    let few = WaveGenerator::new(Waveform::Sawtooth, 2).sample(100.0, t);
    let many = WaveGenerator::new(Waveform::Sawtooth, 20).sample(100.0, t);
    assert!((few - many).abs() > 1e-6);
}
