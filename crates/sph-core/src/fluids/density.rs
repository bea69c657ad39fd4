use crate::config::FluidConfig;
use crate::grid::SpatialHashGrid;
use crate::kernels::KernelSet;
use crate::particle::ParticleSet;
use glam::Vec2;

/// Density pair for one particle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Densities {
    pub density: f32,
    pub near_density: f32,
}

/// Density and near-density at `predicted[index]`.
///
/// The particle itself is one of the candidates, so a live particle always
/// ends up with `density > 0`. Neighbors exactly on the smoothing radius pass
/// the distance test but contribute zero.
pub fn compute_density(
    index: usize,
    predicted: &[Vec2],
    grid: &SpatialHashGrid,
    kernels: &KernelSet,
) -> Densities {
    let pos_i = predicted[index];
    let sqr_radius = kernels.radius() * kernels.radius();
    let mut out = Densities::default();

    for j in grid.neighbors(pos_i) {
        let sqr_dst = predicted[j].distance_squared(pos_i);
        if sqr_dst > sqr_radius {
            continue;
        }
        let dst = sqr_dst.sqrt();
        out.density += kernels.density(dst);
        out.near_density += kernels.near_density(dst);
    }

    out
}

/// Recompute both density arrays from the current predicted positions.
pub fn update_densities(particles: &mut ParticleSet, grid: &SpatialHashGrid, kernels: &KernelSet) {
    for i in 0..particles.count {
        let d = compute_density(i, &particles.predicted, grid, kernels);
        particles.density[i] = d.density;
        particles.near_density[i] = d.near_density;
    }
}

/// Pressure from density. Clamped to `<= 0`: only over-dense regions push.
#[inline]
pub fn density_to_pressure(density: f32, config: &FluidConfig) -> f32 {
    (density - config.target_density).min(0.0) * config.pressure_multiplier
}

#[inline]
pub fn near_density_to_pressure(near_density: f32, config: &FluidConfig) -> f32 {
    near_density * config.near_pressure_multiplier
}
