use approx::assert_abs_diff_eq;
use rwmsd_core::{fit_log_log, Analysis, GaussianWalk, MsdCurve, WalkSpec};

#[test]
fn exact_einstein_curve() {
    // MSD(τ) = 2d·D·τ with d = 2, D = 0.5
    let d_true = 0.5;
    let curve = MsdCurve::from_pairs((1..=10).map(|lag| (lag, 4.0 * d_true * lag as f64)));
    let fit = fit_log_log(&curve).unwrap();

    assert_abs_diff_eq!(fit.slope, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(fit.diffusion_coefficient, 0.25, epsilon = 1e-9);
    assert_abs_diff_eq!(fit.intercept, 2.0_f64.ln(), epsilon = 1e-9);
    assert_abs_diff_eq!(fit.prefactor_diffusion(), d_true, epsilon = 1e-9);
}

#[test]
fn single_long_walk() {
    let spec = WalkSpec::new(10_000).with_max_lag(50);
    let analysis = Analysis::run(&spec, 42).unwrap();
    let d_expected = 1.0 / 4.0;

    println!(
        "slope = {:.4}, D = {:.4}",
        analysis.fit.slope, analysis.fit.diffusion_coefficient
    );
    let rel = (analysis.fit.diffusion_coefficient - d_expected).abs() / d_expected;
    assert!(rel < 0.2, "D off by {:.1}%", rel * 100.0);
}

#[test]
fn ensemble_average() {
    let step_scale = 2.0;
    let walk = GaussianWalk::new(step_scale).unwrap();
    let spec = WalkSpec::new(10_000)
        .with_step_scale(step_scale)
        .with_max_lag(100)
        .with_walks(16);
    let analysis = Analysis::run(&spec, 7).unwrap();

    // Normal diffusion: slope ≈ 1 regardless of σ, the amplitude carries σ².
    assert!((analysis.fit.slope - 1.0).abs() < 0.1, "slope {}", analysis.fit.slope);
    let prefactor = analysis.fit.prefactor_diffusion();
    let expected = walk.expected_prefactor_diffusion();
    let rel = (prefactor - expected).abs() / expected;
    assert!(rel < 0.2, "prefactor D {} vs {}", prefactor, expected);
}
