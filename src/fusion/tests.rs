use super::*;
use crate::distribution::{Beta, Density, Distribution, Observation};

fn gaussian(mean: f64, variance: f64) -> Gaussian {
    Gaussian::new(mean, variance).expect("valid gaussian")
}

fn dirichlet(alpha: &[f64]) -> Dirichlet {
    Dirichlet::new(alpha.to_vec()).expect("valid dirichlet")
}

// ========== Gaussian fusion ==========

#[test]
fn test_fuse_two_gaussians() {
    let fused = fuse_gaussians(&[gaussian(10.0, 4.0), gaussian(14.0, 9.0)]).expect("non-empty");

    // 1/(1/4 + 1/9) = 36/13, 36/13 * (10/4 + 14/9) = 146/13
    assert!((fused.variance() - 36.0 / 13.0).abs() < 1e-12);
    assert!((fused.mean() - 146.0 / 13.0).abs() < 1e-12);
    assert!((fused.variance() - 2.769).abs() < 1e-3);
}

#[test]
fn test_fuse_single_gaussian_is_identity() {
    let g = gaussian(-3.5, 0.25);
    let fused = fuse_gaussians(std::slice::from_ref(&g)).expect("non-empty");
    assert!((fused.mean() - g.mean()).abs() < 1e-12);
    assert!((fused.variance() - g.variance()).abs() < 1e-12);
}

#[test]
fn test_fused_variance_below_every_input() {
    let inputs = [gaussian(1.0, 2.0), gaussian(2.0, 0.5), gaussian(0.0, 8.0)];
    let fused = fuse_gaussians(&inputs).expect("non-empty");
    for g in &inputs {
        assert!(fused.variance() < g.variance());
    }
}

#[test]
fn test_identical_gaussians_halve_variance() {
    let fused = fuse_gaussians(&[gaussian(7.0, 6.0), gaussian(7.0, 6.0)]).expect("non-empty");
    assert!((fused.mean() - 7.0).abs() < 1e-12);
    assert!((fused.variance() - 3.0).abs() < 1e-12);
}

#[test]
fn test_fuse_gaussians_order_invariant() {
    let a = [gaussian(1.0, 2.0), gaussian(4.0, 0.5), gaussian(-2.0, 3.0)];
    let b = [a[2].clone(), a[0].clone(), a[1].clone()];
    let fa = fuse_gaussians(&a).expect("non-empty");
    let fb = fuse_gaussians(&b).expect("non-empty");
    assert!((fa.mean() - fb.mean()).abs() < 1e-12);
    assert!((fa.variance() - fb.variance()).abs() < 1e-12);
}

#[test]
fn test_fuse_gaussians_empty() {
    assert!(matches!(
        fuse_gaussians(&[]),
        Err(BayesFuseError::EmptyInput(_))
    ));
}

// ========== Dirichlet fusion ==========

#[test]
fn test_fuse_concentrations_with_zero_pseudo_count() {
    let fused = fuse_concentrations(&[vec![1.0, 2.0, 3.0], vec![4.0, 1.0, 0.0]])
        .expect("same dimension");
    assert_eq!(fused.alpha(), &[5.0, 3.0, 3.0]);
}

#[test]
fn test_fuse_dirichlet_sums_alpha() {
    let fused = fuse_dirichlet(&[dirichlet(&[1.0, 2.0]), dirichlet(&[0.5, 0.5]), dirichlet(&[2.0, 1.0])])
        .expect("same dimension");
    assert_eq!(fused.alpha(), &[3.5, 3.5]);
}

#[test]
fn test_fuse_dirichlet_dimension_mismatch() {
    let err = fuse_dirichlet(&[dirichlet(&[1.0, 2.0, 3.0]), dirichlet(&[1.0, 1.0])])
        .expect_err("dimensions differ");
    assert_eq!(
        err,
        BayesFuseError::DimensionMismatch {
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn test_fuse_dirichlet_empty() {
    assert!(matches!(
        fuse_dirichlet(&[]),
        Err(BayesFuseError::EmptyInput(_))
    ));
}

#[test]
fn test_fuse_concentrations_rejects_negative_entry() {
    assert!(matches!(
        fuse_concentrations(&[[1.0, 2.0], [-0.5, 1.0]]),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
}

#[test]
fn test_fuse_concentrations_all_zero_component() {
    // Component 1 receives no mass from any input
    assert!(matches!(
        fuse_concentrations(&[[1.0, 0.0], [2.0, 0.0]]),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
}

// ========== Log-linear pool ==========

#[test]
fn test_pool_equal_weights_is_geometric_mean() {
    let a = gaussian(0.0, 1.0);
    let b = gaussian(5.0, 4.0);
    let expected = (a.pdf(1.0) * b.pdf(1.0)).sqrt();

    let pool = multimodal_fusion([
        ("A", ModalityBelief::new(a, 1.0)),
        ("B", ModalityBelief::new(b, 1.0)),
    ])
    .expect("valid weights");

    let value = pool.density(&Observation::Scalar(1.0)).expect("scalar");
    assert!((value - expected).abs() < 1e-12);
    assert_eq!(pool.weight("A"), Some(0.5));
    assert_eq!(pool.weight("B"), Some(0.5));
}

#[test]
fn test_pool_normalizes_weights() {
    let pool = multimodal_fusion([
        ("volatility", ModalityBelief::new(gaussian(0.0, 1.0), 3.0)),
        ("sentiment", ModalityBelief::new(gaussian(1.0, 1.0), 1.0)),
    ])
    .expect("valid weights");

    let weights: Vec<(&str, f64)> = pool.weights().collect();
    assert_eq!(weights, vec![("sentiment", 0.25), ("volatility", 0.75)]);
}

#[test]
fn test_pool_single_modality_reproduces_density() {
    let beta = Beta::new(2.0, 5.0).expect("valid beta");
    let pool = multimodal_fusion([("sentiment", ModalityBelief::new(beta.clone(), 0.3))])
        .expect("valid weights");
    let value = pool.density(&Observation::Scalar(0.5)).expect("scalar");
    assert!((value - beta.pdf(0.5)).abs() < 1e-12);
}

#[test]
fn test_pool_log_density_is_weighted_sum() {
    let a = Distribution::gaussian(0.0, 1.0).expect("valid");
    let b = Distribution::gaussian(2.0, 0.5).expect("valid");
    let x = Observation::Scalar(0.7);
    let expected = 0.2 * a.log_density(&x).expect("scalar") + 0.8 * b.log_density(&x).expect("scalar");

    let pool = multimodal_fusion([
        ("a", ModalityBelief::new(a, 1.0)),
        ("b", ModalityBelief::new(b, 4.0)),
    ])
    .expect("valid weights");
    assert!((pool.log_density(&x).expect("scalar") - expected).abs() < 1e-12);
}

#[test]
fn test_pool_order_invariant() {
    let beliefs = vec![
        ("a", ModalityBelief::new(gaussian(0.0, 1.0), 1.0)),
        ("b", ModalityBelief::new(gaussian(1.0, 2.0), 2.0)),
        ("c", ModalityBelief::new(gaussian(-1.0, 0.5), 0.5)),
    ];
    let mut reversed = beliefs.clone();
    reversed.reverse();

    let forward = multimodal_fusion(beliefs).expect("valid weights");
    let backward = multimodal_fusion(reversed).expect("valid weights");
    let x = Observation::Scalar(0.25);
    assert_eq!(
        forward.density(&x).expect("scalar"),
        backward.density(&x).expect("scalar")
    );
}

#[test]
fn test_pool_zero_weight_component_ignored() {
    // The Beta has no support at 3.0 but carries no weight
    let pool = multimodal_fusion([
        ("trajectory", ModalityBelief::new(gaussian(3.0, 1.0), 1.0)),
        ("sentiment", ModalityBelief::new(Beta::new(2.0, 2.0).expect("valid"), 0.0)),
    ])
    .expect("valid weights");
    let value = pool.density(&Observation::Scalar(3.0)).expect("scalar");
    assert!((value - gaussian(3.0, 1.0).pdf(3.0)).abs() < 1e-12);
}

#[test]
fn test_pool_outside_support_is_zero() {
    let pool = multimodal_fusion([
        ("trajectory", ModalityBelief::new(gaussian(0.5, 1.0), 1.0)),
        ("sentiment", ModalityBelief::new(Beta::new(2.0, 2.0).expect("valid"), 1.0)),
    ])
    .expect("valid weights");
    assert_eq!(pool.density(&Observation::Scalar(1.5)).expect("scalar"), 0.0);
}

#[test]
fn test_pool_shape_mismatch_propagates() {
    let pool = multimodal_fusion([("m", ModalityBelief::new(gaussian(0.0, 1.0), 1.0))])
        .expect("valid weights");
    assert!(matches!(
        pool.density(&Observation::Vector(vec![0.5, 0.5])),
        Err(BayesFuseError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_pool_into_fn() {
    let g = gaussian(0.0, 1.0);
    let f = multimodal_fusion([("m", ModalityBelief::new(g.clone(), 2.0))])
        .expect("valid weights")
        .into_fn();
    assert!((f(&Observation::Scalar(0.3)).expect("scalar") - g.pdf(0.3)).abs() < 1e-12);
}

#[test]
fn test_pool_invalid_weights() {
    assert!(matches!(
        multimodal_fusion(Vec::<(String, ModalityBelief)>::new()),
        Err(BayesFuseError::EmptyInput(_))
    ));
    assert!(matches!(
        multimodal_fusion([("m", ModalityBelief::new(gaussian(0.0, 1.0), 0.0))]),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
    assert!(matches!(
        multimodal_fusion([
            ("a", ModalityBelief::new(gaussian(0.0, 1.0), 1.0)),
            ("b", ModalityBelief::new(gaussian(0.0, 1.0), -1.0)),
        ]),
        Err(BayesFuseError::InvalidParameter { .. })
    ));
}
