use super::*;

fn sample_moments(xs: &[f64]) -> (f64, f64) {
    population_moments(xs).expect("non-empty samples")
}

// ========== Construction ==========

#[test]
fn test_gaussian_rejects_non_positive_variance() {
    for variance in [0.0, -4.0, f64::NAN, f64::INFINITY] {
        let err = Gaussian::new(1.0, variance).expect_err("variance must be > 0");
        assert!(matches!(err, BayesFuseError::InvalidParameter { .. }));
    }
}

#[test]
fn test_beta_rejects_non_positive_shapes() {
    assert!(matches!(
        Beta::new(0.0, 1.0),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
    assert!(matches!(
        Beta::new(2.0, -1.0),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
}

#[test]
fn test_dirichlet_rejects_non_positive_alpha() {
    assert!(matches!(
        Dirichlet::new(vec![1.0, 0.0, 2.0]),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
    assert!(matches!(
        Dirichlet::new(vec![]),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
}

#[test]
fn test_non_parametric_is_not_implemented() {
    let err = Distribution::non_parametric(|x: f64| (-x * x).exp()).expect_err("unsupported");
    assert!(matches!(err, BayesFuseError::NotImplemented(_)));
}

#[test]
fn test_family_names() {
    assert_eq!(Distribution::gaussian(0.0, 1.0).unwrap().family(), "gaussian");
    assert_eq!(Distribution::beta(1.0, 1.0).unwrap().family(), "beta");
    assert_eq!(Distribution::dirichlet(vec![1.0, 1.0]).unwrap().family(), "dirichlet");
}

// ========== Densities ==========

#[test]
fn test_gaussian_density_known_values() {
    let g = Gaussian::new(5.0, 4.0).unwrap();
    // 1 / (2 * sqrt(2π))
    assert!((g.pdf(5.0) - 0.199_471_140_200_716_35).abs() < 1e-12);
    // φ(-2.5) / 2
    assert!((g.pdf(0.0) - 0.008_764_150_246_784_27).abs() < 1e-12);
}

#[test]
fn test_log_density_matches_log_of_density() {
    let dists = [
        (Distribution::gaussian(1.0, 2.5).unwrap(), Observation::Scalar(0.3)),
        (Distribution::beta(2.0, 5.0).unwrap(), Observation::Scalar(0.1)),
        (
            Distribution::dirichlet(vec![2.0, 3.0, 4.0]).unwrap(),
            Observation::Vector(vec![0.2, 0.3, 0.5]),
        ),
    ];
    for (dist, x) in &dists {
        let p = dist.density(x).unwrap();
        let lp = dist.log_density(x).unwrap();
        assert!((lp - p.ln()).abs() < 1e-12, "{}: {lp} vs {}", dist.family(), p.ln());
    }
}

#[test]
fn test_beta_density_known_values() {
    let beta = Beta::new(2.0, 5.0).unwrap();
    assert!((beta.pdf(0.5) - 0.9375).abs() < 1e-10);
    // 30 * 0.1 * 0.9^4
    assert!((beta.pdf(0.1) - 1.968_3).abs() < 1e-10);
}

#[test]
fn test_beta_density_outside_support_is_zero() {
    let beta = Beta::new(2.0, 2.0).unwrap();
    assert_eq!(beta.pdf(-0.1), 0.0);
    assert_eq!(beta.pdf(1.5), 0.0);
}

#[test]
fn test_beta_density_at_boundary() {
    // Beta(1, 3) at 0: 3 * (1-0)^2 = 3
    let beta = Beta::new(1.0, 3.0).unwrap();
    assert!((beta.pdf(0.0) - 3.0).abs() < 1e-10);
    // Beta(2, 2) vanishes at both ends
    let beta = Beta::new(2.0, 2.0).unwrap();
    assert_eq!(beta.pdf(0.0), 0.0);
    assert_eq!(beta.pdf(1.0), 0.0);
}

#[test]
fn test_dirichlet_density_known_value() {
    // Γ(9)/(Γ(2)Γ(3)Γ(4)) * 0.2 * 0.3^2 * 0.5^3 = 3360 * 0.00225
    let d = Dirichlet::new(vec![2.0, 3.0, 4.0]).unwrap();
    let p = d.pdf(&[0.2, 0.3, 0.5]).unwrap();
    assert!((p - 7.56).abs() < 1e-9, "p = {p}");
}

#[test]
fn test_dirichlet_outside_unit_interval_is_zero() {
    let d = Dirichlet::new(vec![2.0, 2.0]).unwrap();
    assert_eq!(d.pdf(&[-0.1, 1.1]).unwrap(), 0.0);
    assert_eq!(d.ln_pdf(&[1.5, 0.2]).unwrap(), f64::NEG_INFINITY);
}

#[test]
fn test_dirichlet_dimension_mismatch() {
    let d = Dirichlet::new(vec![1.0, 2.0, 3.0]).unwrap();
    let err = d.pdf(&[0.5, 0.5]).expect_err("wrong dimension");
    assert_eq!(
        err,
        BayesFuseError::DimensionMismatch {
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn test_observation_shape_mismatch() {
    let g = Distribution::gaussian(0.0, 1.0).unwrap();
    let err = g.density(&Observation::from(vec![0.5, 0.5])).expect_err("vector into gaussian");
    assert!(matches!(err, BayesFuseError::ShapeMismatch { expected: "scalar", .. }));

    let d = Distribution::dirichlet(vec![1.0, 1.0]).unwrap();
    let err = d.density(&Observation::from(0.5)).expect_err("scalar into dirichlet");
    assert!(matches!(err, BayesFuseError::ShapeMismatch { expected: "vector", .. }));
}

// ========== Sampling ==========

#[test]
fn test_gaussian_sampling_moments() {
    let g = Gaussian::new(5.0, 4.0).unwrap();
    let mut rng = sampling::seeded_rng(Some(42));
    let xs = g.sample_n(10_000, &mut rng);
    let (mean, var) = sample_moments(&xs);
    assert!((mean - 5.0).abs() < 0.1, "mean = {mean}");
    assert!((var - 4.0).abs() < 0.25, "var = {var}");
}

#[test]
fn test_beta_sampling_moments() {
    let beta = Beta::new(2.0, 5.0).unwrap();
    let mut rng = sampling::seeded_rng(Some(7));
    let xs = beta.sample_n(5_000, &mut rng);
    assert!(xs.iter().all(|x| (0.0..=1.0).contains(x)));
    let (mean, var) = sample_moments(&xs);
    assert!((mean - beta.mean()).abs() < 0.01, "mean = {mean}");
    assert!((var - beta.variance()).abs() < 0.005, "var = {var}");
}

#[test]
fn test_dirichlet_samples_lie_on_simplex() {
    let d = Dirichlet::new(vec![2.0, 3.0, 4.0]).unwrap();
    let mut rng = sampling::seeded_rng(Some(11));
    let draws = d.sample_n(5_000, &mut rng);
    for v in &draws {
        assert_eq!(v.len(), 3);
        assert!((v.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(v.iter().all(|&x| x >= 0.0));
    }
    let expected = d.mean();
    for (j, &m) in expected.iter().enumerate() {
        let column: Vec<f64> = draws.iter().map(|v| v[j]).collect();
        let (mean, _) = sample_moments(&column);
        assert!((mean - m).abs() < 0.02, "component {j}: {mean} vs {m}");
    }
}

#[test]
fn test_enum_sample_shapes() {
    let mut rng = sampling::seeded_rng(Some(1));
    let g = Distribution::gaussian(0.0, 1.0).unwrap();
    assert!(g
        .sample_with(4, &mut rng)
        .iter()
        .all(|o| matches!(o, Observation::Scalar(_))));
    let d = Distribution::dirichlet(vec![1.0, 1.0]).unwrap();
    let draws = d.sample(3);
    assert_eq!(draws.len(), 3);
    assert!(draws.iter().all(|o| matches!(o, Observation::Vector(v) if v.len() == 2)));
}

// ========== Fitting ==========

#[test]
fn test_gaussian_fit_uses_population_variance() {
    let g = Gaussian::fit(&[1.0, 2.0, 3.0, 4.0], 0.0).unwrap();
    assert!((g.mean() - 2.5).abs() < 1e-12);
    assert!((g.variance() - 1.25).abs() < 1e-12);
}

#[test]
fn test_gaussian_fit_regularizes_constant_samples() {
    let g = Gaussian::fit(&[3.0, 3.0, 3.0], 1e-6).unwrap();
    assert!((g.variance() - 1e-6).abs() < 1e-18);
    assert!(matches!(
        Gaussian::fit(&[3.0, 3.0], 0.0),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
}

#[test]
fn test_gaussian_fit_empty() {
    assert!(matches!(
        Gaussian::fit(&[], 1e-6),
        Err(BayesFuseError::EmptyInput(_))
    ));
}

#[test]
fn test_beta_fit_recovers_parameters() {
    let truth = Beta::new(3.0, 6.0).unwrap();
    let mut rng = sampling::seeded_rng(Some(5));
    let xs = truth.sample_n(20_000, &mut rng);
    let fitted = Beta::fit_moments(&xs, 0.0).unwrap();
    assert!((fitted.a() - 3.0).abs() < 0.3, "a = {}", fitted.a());
    assert!((fitted.b() - 6.0).abs() < 0.6, "b = {}", fitted.b());
}

#[test]
fn test_dirichlet_fit_recovers_direction() {
    let truth = Dirichlet::new(vec![3.0, 1.0, 1.0]).unwrap();
    let mut rng = sampling::seeded_rng(Some(9));
    let draws = truth.sample_n(10_000, &mut rng);
    let fitted = Dirichlet::fit_moments(&draws, 0.0).unwrap();
    for (m, t) in fitted.mean().iter().zip(truth.mean()) {
        assert!((m - t).abs() < 0.02);
    }
    assert!((fitted.concentration() - 5.0).abs() < 0.75, "α₀ = {}", fitted.concentration());
}

#[test]
fn test_dirichlet_fit_ragged_input() {
    let err = Dirichlet::fit_moments(&[vec![0.5, 0.5], vec![0.2, 0.3, 0.5]], 1e-6)
        .expect_err("ragged vectors");
    assert!(matches!(err, BayesFuseError::DimensionMismatch { expected: 2, actual: 3 }));
}

// ========== Likelihood adapter ==========

#[test]
fn test_into_likelihood_ignores_hypothesis() {
    let g = Distribution::gaussian(0.0, 1.0).unwrap();
    let expected = g.density(&Observation::Scalar(0.5)).unwrap();
    let f = g.into_likelihood();
    assert_eq!(f(&Observation::Scalar(0.5), "UP"), expected);
    assert_eq!(f(&Observation::Scalar(0.5), "DOWN"), expected);
    assert_eq!(f(&Observation::Vector(vec![0.5]), "UP"), 0.0);
}
