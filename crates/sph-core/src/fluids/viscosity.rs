use crate::grid::SpatialHashGrid;
use crate::kernels::KernelSet;
use crate::particle::ParticleSet;
use glam::Vec2;

/// Viscosity force on particle `index`: velocity differences to every
/// neighbor weighted by the poly6 kernel, times `viscosity`.
///
/// Reads `particles.velocity` as it is at call time, so neighbors already
/// updated earlier in the same pass contribute their new velocity.
pub fn compute_viscosity_force(
    index: usize,
    particles: &ParticleSet,
    grid: &SpatialHashGrid,
    kernels: &KernelSet,
    viscosity: f32,
) -> Vec2 {
    let pos_i = particles.predicted[index];
    let vel_i = particles.velocity[index];
    let sqr_radius = kernels.radius() * kernels.radius();
    let mut force = Vec2::ZERO;

    for j in grid.neighbors(pos_i) {
        let sqr_dst = particles.predicted[j].distance_squared(pos_i);
        if sqr_dst > sqr_radius {
            continue;
        }
        let dst = sqr_dst.sqrt();
        force += (particles.velocity[j] - vel_i) * kernels.viscosity(dst);
    }

    force * viscosity
}
