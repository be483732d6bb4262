use rwmsd_core::{compute_msd, generate_random_walk, msd_at_lag, Analysis, Position, WalkSpec};

#[test]
fn same_seed_same_trajectory() {
    let a = generate_random_walk(1000, 1.0, 42).unwrap();
    let b = generate_random_walk(1000, 1.0, 42).unwrap();
    assert_eq!(a, b);

    let c = generate_random_walk(1000, 1.0, 43).unwrap();
    assert_ne!(a, c);
}

#[test]
fn same_seed_same_analysis() {
    let spec = WalkSpec::new(2000).with_max_lag(50).with_walks(4);
    let first = Analysis::run(&spec, 7).unwrap();
    let second = Analysis::run(&spec, 7).unwrap();

    assert_eq!(first.trajectory, second.trajectory);
    assert_eq!(first.msd, second.msd);
    assert_eq!(first.fit, second.fit);
}

#[test]
fn trajectory_shape() {
    for n in [1usize, 2, 3, 10, 257, 5000] {
        let traj = generate_random_walk(n, 1.0, n as u64).unwrap();
        assert_eq!(traj.len(), n + 1, "steps = {n}");
        assert_eq!(*traj.start(), Position::zeros());
    }
}

#[test]
fn seed_42_five_steps() {
    let traj = generate_random_walk(5, 1.0, 42).unwrap();
    assert_eq!(traj.len(), 6);
    assert_eq!(*traj.start(), Position::zeros());
    assert_eq!(traj, generate_random_walk(5, 1.0, 42).unwrap());

    // ChaCha20 stream, StandardNormal, x drawn before y.
    let pinned = [
        (0.0, 0.0),
        (0.04467619490873713, -0.24563295091587464),
        (-0.70154843026615721, -1.92855486138714327),
        (-1.94522817092260447, -2.31613258791968013),
        (-1.25212084902618281, -2.44032256627910149),
        (-2.39470457466532460, -2.85684944833570142),
    ];
    for (i, (pos, (x, y))) in traj.positions().iter().zip(pinned).enumerate() {
        assert!(
            (pos.x - x).abs() < 1e-12 && (pos.y - y).abs() < 1e-12,
            "position {i}: ({}, {}) != ({x}, {y})",
            pos.x,
            pos.y
        );
    }

    // Lag 1 averages every single-step displacement.
    let squared: Vec<f64> = traj.steps().map(|s| s.norm_squared()).collect();
    assert_eq!(squared.len(), 5);
    let expected = squared.iter().sum::<f64>() / squared.len() as f64;

    let lag1 = msd_at_lag(&traj, 1).unwrap();
    assert_eq!(lag1.samples, 5);
    assert!((lag1.msd - expected).abs() < 1e-12);

    let curve = compute_msd(&traj, None).unwrap();
    assert_eq!(curve.points[0], lag1);
}

#[test]
fn step_scale_rescales_the_same_noise() {
    let unit = generate_random_walk(100, 1.0, 5).unwrap();
    let wide = generate_random_walk(100, 3.0, 5).unwrap();
    for (u, w) in unit.positions().iter().zip(wide.positions()) {
        assert!((w - u * 3.0).norm() < 1e-9);
    }
}
