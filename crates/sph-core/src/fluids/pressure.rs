use crate::config::FluidConfig;
use crate::fluids::density::{density_to_pressure, near_density_to_pressure};
use crate::grid::SpatialHashGrid;
use crate::kernels::KernelSet;
use crate::particle::ParticleSet;
use crate::random::DirectionSource;
use glam::Vec2;

/// Pressure force on particle `index` (not yet divided by its own density).
///
/// Symmetric SPH gradient: each pair uses the mean of both pressures, and the
/// density term is normalized by the neighbor's density while the
/// near-density term is normalized by the neighbor's near-density.
///
/// Coincident pairs take their direction from `directions`.
pub fn compute_pressure_force(
    index: usize,
    particles: &ParticleSet,
    grid: &SpatialHashGrid,
    kernels: &KernelSet,
    config: &FluidConfig,
    directions: &mut dyn DirectionSource,
) -> Vec2 {
    let pos_i = particles.predicted[index];
    let sqr_radius = kernels.radius() * kernels.radius();
    let pressure = density_to_pressure(particles.density[index], config);
    let near_pressure = near_density_to_pressure(particles.near_density[index], config);

    let mut force = Vec2::ZERO;

    for j in grid.neighbors(pos_i) {
        if j == index {
            continue;
        }

        let offset = pos_i - particles.predicted[j];
        let sqr_dst = offset.length_squared();
        if sqr_dst > sqr_radius {
            continue;
        }

        let dst = sqr_dst.sqrt();
        let dir = if dst > 0.0 {
            offset / dst
        } else {
            directions.next_direction()
        };

        let density_j = particles.density[j];
        let near_density_j = particles.near_density[j];
        let shared_pressure = (pressure + density_to_pressure(density_j, config)) * 0.5;
        let shared_near_pressure =
            (near_pressure + near_density_to_pressure(near_density_j, config)) * 0.5;

        force += dir * shared_pressure * kernels.density_derivative(dst) / density_j;
        force += dir * shared_near_pressure * kernels.near_density_derivative(dst) / near_density_j;
    }

    force
}
