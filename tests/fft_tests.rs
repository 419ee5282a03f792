use std::f64::consts::PI;

use synthscope::analysis::Fft;

#[test]
fn rejects_non_power_of_two_sizes() {
    assert!(Fft::new(100).is_err());
    assert!(Fft::new(0).is_err());
    assert!(Fft::new(1024).is_ok());
}

#[test]
fn pure_tone_peaks_at_its_bin() {
    let n = 64;
    let k = 5;
    let mut fft = Fft::new(n).unwrap();
    let input: Vec<f64> = (0..n)
        .map(|i| (2.0 * PI * k as f64 * i as f64 / n as f64).sin())
        .collect();

    let mut magnitudes = vec![0.0; n / 2];
    fft.magnitude(&input, &mut magnitudes);

    // A unit sinusoid at bin k concentrates N/2 of magnitude there.
    assert!(
        (magnitudes[k] - n as f64 / 2.0).abs() < 1e-6,
        "bin {k} magnitude was {}",
        magnitudes[k]
    );
    for (bin, &magnitude) in magnitudes.iter().enumerate() {
        if bin != k {
            assert!(
                magnitude < 1e-6,
                "unexpected energy {magnitude} in bin {bin}"
            );
        }
    }
}

#[test]
fn dc_input_concentrates_in_bin_zero() {
    let n = 32;
    let mut fft = Fft::new(n).unwrap();
    let input = vec![1.0; n];

    let mut magnitudes = vec![0.0; n / 2];
    fft.magnitude(&input, &mut magnitudes);

    assert!((magnitudes[0] - n as f64).abs() < 1e-9);
    for &magnitude in &magnitudes[1..] {
        assert!(magnitude < 1e-9);
    }
}

#[test]
fn forward_matches_the_analytic_transform() {
    let n = 8;
    let mut fft = Fft::new(n).unwrap();
    let input = vec![1.0; n];
    let spectrum = fft.forward(&input);

    assert!((spectrum[0].re - n as f64).abs() < 1e-12);
    assert!(spectrum[0].im.abs() < 1e-12);
    for bin in &spectrum[1..] {
        assert!(bin.re.abs() < 1e-12 && bin.im.abs() < 1e-12);
    }
}

#[test]
fn db_transform_is_ten_log_ten_of_power() {
    let n = 32;
    let mut fft = Fft::new(n).unwrap();
    let input = vec![1.0; n];

    let mut db = vec![0.0; n / 2];
    fft.magnitude_db(&input, &mut db);

    let expected = 10.0 * ((n * n) as f64).log10();
    assert!((db[0] - expected).abs() < 1e-9);
    // Silent bins sit on the power floor, far below any signal.
    for &bin in &db[1..] {
        assert!(bin <= -100.0);
    }
}

#[test]
fn length_one_transform_is_identity() {
    let mut fft = Fft::new(1).unwrap();
    let spectrum = fft.forward(&[0.75]);
    assert_eq!(spectrum.len(), 1);
    assert!((spectrum[0].re - 0.75).abs() < 1e-15);
    assert_eq!(spectrum[0].im, 0.0);
}
