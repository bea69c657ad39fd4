use std::f32::consts::PI;
use sph_core::kernels::{spiky_pow2, KernelFactors, KernelSet};

fn assert_close(actual: f32, expected: f32, what: &str) {
    let tol = expected.abs().max(1e-12) * 1e-5;
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: got {actual}, expected {expected}"
    );
}

#[test]
fn test_factors_match_closed_form() {
    let r = 20.0_f32;
    let f = KernelFactors::for_radius(r);
    assert_close(f.poly6, 4.0 / (PI * r.powi(8)), "poly6");
    assert_close(f.spiky_pow2, 6.0 / (PI * r.powi(4)), "spiky_pow2");
    assert_close(f.spiky_pow3, 10.0 / (PI * r.powi(5)), "spiky_pow3");
    assert_close(f.spiky_pow2_derivative, 12.0 / (PI * r.powi(4)), "spiky_pow2'");
    assert_close(f.spiky_pow3_derivative, 30.0 / (PI * r.powi(5)), "spiky_pow3'");
}

#[test]
fn test_peak_values_at_zero_distance() {
    let r = 2.0_f32;
    let k = KernelSet::new(r);
    assert_close(k.density(0.0), r * r * 6.0 / (PI * r.powi(4)), "density(0)");
    assert_close(k.near_density(0.0), r.powi(3) * 10.0 / (PI * r.powi(5)), "near_density(0)");
    assert_close(k.viscosity(0.0), r.powi(6) * 4.0 / (PI * r.powi(8)), "viscosity(0)");
}

#[test]
fn test_value_kernels_zero_at_and_beyond_radius() {
    let k = KernelSet::new(20.0);
    for d in [20.0, 20.001, 25.0, 1000.0] {
        assert_eq!(k.density(d), 0.0, "density({d})");
        assert_eq!(k.near_density(d), 0.0, "near_density({d})");
        assert_eq!(k.viscosity(d), 0.0, "viscosity({d})");
    }
}

#[test]
fn test_derivatives_support_is_inclusive() {
    let k = KernelSet::new(20.0);

    // At d == r the slope formula evaluates to (negative) zero.
    assert_eq!(k.density_derivative(20.0), 0.0);
    assert_eq!(k.near_density_derivative(20.0), 0.0);

    assert_eq!(k.density_derivative(20.5), 0.0);
    assert_eq!(k.near_density_derivative(20.5), 0.0);

    assert!(k.density_derivative(19.0) < 0.0);
    assert!(k.near_density_derivative(19.0) < 0.0);
    assert!(k.density_derivative(0.0) < 0.0);
}

#[test]
fn test_density_kernel_monotonic() {
    let k = KernelSet::new(20.0);
    let mut prev = k.density(0.0);
    for step in 1..200 {
        let d = step as f32 * 0.1;
        let v = k.density(d);
        assert!(v <= prev, "density kernel increased at d={d}: {prev} -> {v}");
        assert!(v >= 0.0);
        prev = v;
    }
}

#[test]
fn test_kernel_set_is_replaced_whole() {
    let small = KernelSet::new(10.0);
    let large = KernelSet::new(30.0);
    assert_eq!(small.radius(), 10.0);
    assert_eq!(*small.factors(), KernelFactors::for_radius(10.0));
    assert_ne!(small.factors(), large.factors());

    // Free function and method agree when given the matching pair.
    assert_eq!(
        small.density(4.0),
        spiky_pow2(4.0, small.radius(), small.factors())
    );
}

#[test]
fn test_density_kernel_normalized_in_2d() {
    // Integral of the pow2 spiky kernel over the disc of radius r is 1.
    let r = 5.0_f32;
    let k = KernelSet::new(r);
    let steps = 2000;
    let dr = r / steps as f32;
    let integral: f32 = (0..steps)
        .map(|s| {
            let d = (s as f32 + 0.5) * dr;
            k.density(d) * 2.0 * PI * d * dr
        })
        .sum();
    assert!((integral - 1.0).abs() < 1e-3, "integral = {integral}");
}
