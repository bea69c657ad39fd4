use std::f32::consts::PI;

/// Scaling factors for every smoothing kernel at one smoothing radius.
///
/// Only meaningful together with the radius they were computed for; see
/// [`KernelSet`] for the pairing that the solver actually stores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelFactors {
    pub poly6: f32,
    pub spiky_pow2: f32,
    pub spiky_pow3: f32,
    pub spiky_pow2_derivative: f32,
    pub spiky_pow3_derivative: f32,
}

impl KernelFactors {
    pub fn for_radius(radius: f32) -> Self {
        let r4 = radius.powi(4);
        let r5 = radius.powi(5);
        let r8 = radius.powi(8);
        Self {
            poly6: 4.0 / (PI * r8),
            spiky_pow2: 6.0 / (PI * r4),
            spiky_pow3: 10.0 / (PI * r5),
            spiky_pow2_derivative: 12.0 / (PI * r4),
            spiky_pow3_derivative: 30.0 / (PI * r5),
        }
    }
}

/// Poly6 kernel: `(r^2 - d^2)^3 * 4 / (PI * r^8)` for `d < r`, else `0.0`.
#[inline]
pub fn poly6(dst: f32, radius: f32, factors: &KernelFactors) -> f32 {
    if dst < radius {
        let v = radius * radius - dst * dst;
        v * v * v * factors.poly6
    } else {
        0.0
    }
}

/// Quadratic spiky kernel: `(r - d)^2 * 6 / (PI * r^4)` for `d < r`, else `0.0`.
#[inline]
pub fn spiky_pow2(dst: f32, radius: f32, factors: &KernelFactors) -> f32 {
    if dst < radius {
        let v = radius - dst;
        v * v * factors.spiky_pow2
    } else {
        0.0
    }
}

/// Cubic spiky kernel: `(r - d)^3 * 10 / (PI * r^5)` for `d < r`, else `0.0`.
#[inline]
pub fn spiky_pow3(dst: f32, radius: f32, factors: &KernelFactors) -> f32 {
    if dst < radius {
        let v = radius - dst;
        v * v * v * factors.spiky_pow3
    } else {
        0.0
    }
}

/// Slope of [`spiky_pow2`]. Support is `d <= r` (inclusive).
#[inline]
pub fn spiky_pow2_derivative(dst: f32, radius: f32, factors: &KernelFactors) -> f32 {
    if dst <= radius {
        let v = radius - dst;
        -v * factors.spiky_pow2_derivative
    } else {
        0.0
    }
}

/// Slope of [`spiky_pow3`]. Support is `d <= r` (inclusive).
#[inline]
pub fn spiky_pow3_derivative(dst: f32, radius: f32, factors: &KernelFactors) -> f32 {
    if dst <= radius {
        let v = radius - dst;
        -v * v * factors.spiky_pow3_derivative
    } else {
        0.0
    }
}

/// A smoothing radius bundled with the factors computed for it.
///
/// The fields are private so the pair can only change together: a new radius
/// means a new `KernelSet`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelSet {
    radius: f32,
    factors: KernelFactors,
}

impl KernelSet {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            factors: KernelFactors::for_radius(radius),
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn factors(&self) -> &KernelFactors {
        &self.factors
    }

    /// Density contribution (quadratic spiky).
    #[inline]
    pub fn density(&self, dst: f32) -> f32 {
        spiky_pow2(dst, self.radius, &self.factors)
    }

    /// Near-density contribution (cubic spiky).
    #[inline]
    pub fn near_density(&self, dst: f32) -> f32 {
        spiky_pow3(dst, self.radius, &self.factors)
    }

    /// Viscosity weight (poly6).
    #[inline]
    pub fn viscosity(&self, dst: f32) -> f32 {
        poly6(dst, self.radius, &self.factors)
    }

    #[inline]
    pub fn density_derivative(&self, dst: f32) -> f32 {
        spiky_pow2_derivative(dst, self.radius, &self.factors)
    }

    #[inline]
    pub fn near_density_derivative(&self, dst: f32) -> f32 {
        spiky_pow3_derivative(dst, self.radius, &self.factors)
    }
}
