use crate::config::{Bounds, FluidConfig};
use crate::fluids::{compute_pressure_force, compute_viscosity_force, update_densities};
use crate::forces::pointer::{compute_external_force, InteractionForce};
use crate::grid::SpatialHashGrid;
use crate::kernels::KernelSet;
use crate::particle::ParticleSet;
use crate::random::{DirectionSource, RandomDirections};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Lifecycle of the particle store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    /// No particles yet; the next substep populates the store.
    Uninitialized,
    Running,
}

/// Get-or-set accessor for a plain `f32` config field.
macro_rules! config_accessor {
    ($name:ident) => {
        pub fn $name(&mut self, value: Option<f32>) -> f32 {
            if let Some(v) = value {
                self.config.$name = v;
            }
            self.config.$name
        }
    };
}

/// The SPH engine. Owns the particles, the grid, and the kernel set.
pub struct Solver {
    particles: ParticleSet,
    config: FluidConfig,
    bounds: Bounds,
    interaction: InteractionForce,
    kernels: KernelSet,
    grid: SpatialHashGrid,
    state: SimState,
    /// Population size used when the store is (re)seeded
    particle_count: usize,
    spawn_rng: ChaCha8Rng,
    directions: Box<dyn DirectionSource>,
}

impl Solver {
    /// Engine for `particle_count` particles, seeded from OS entropy.
    pub fn new(particle_count: usize, bounds: Bounds) -> Self {
        Self::build(
            particle_count,
            bounds,
            ChaCha8Rng::from_entropy(),
            Box::new(RandomDirections::from_entropy()),
        )
    }

    /// Engine whose population and tie-break directions derive from `seed`.
    pub fn with_seed(particle_count: usize, bounds: Bounds, seed: u64) -> Self {
        Self::build(
            particle_count,
            bounds,
            ChaCha8Rng::seed_from_u64(seed),
            Box::new(RandomDirections::from_seed(seed.wrapping_add(1))),
        )
    }

    /// Engine that starts from an existing particle layout instead of a
    /// random population.
    pub fn from_particles(particles: ParticleSet, bounds: Bounds) -> Self {
        let mut solver = Self::with_seed(particles.count, bounds, 0);
        solver.state = if particles.is_empty() {
            SimState::Uninitialized
        } else {
            SimState::Running
        };
        solver.particles = particles;
        solver
    }

    fn build(
        particle_count: usize,
        bounds: Bounds,
        spawn_rng: ChaCha8Rng,
        directions: Box<dyn DirectionSource>,
    ) -> Self {
        let config = FluidConfig::default();
        Self {
            particles: ParticleSet::default(),
            config,
            bounds,
            interaction: InteractionForce::default(),
            kernels: KernelSet::new(config.smoothing_radius),
            grid: SpatialHashGrid::new(config.smoothing_radius),
            state: SimState::Uninitialized,
            particle_count,
            spawn_rng,
            directions,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: FluidConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Replace the tie-break source for coincident particle pairs.
    pub fn with_direction_source<D: DirectionSource + 'static>(mut self, source: D) -> Self {
        self.directions = Box::new(source);
        self
    }

    /// Advance one host frame of `delta_time` seconds.
    pub fn run_frame(&mut self, delta_time: f32) {
        let substeps = self.config.substeps_per_frame.max(1);
        let sub_dt = delta_time / substeps as f32;
        for _ in 0..substeps {
            self.step(sub_dt);
        }
    }

    /// One substep: predict, rebuild grid, densities, forces, integrate, bound.
    ///
    /// A zero `dt` stops after the density pass, so nothing moves.
    fn step(&mut self, dt: f32) {
        if self.particles.is_empty() {
            self.populate();
        }

        let prediction_factor = 1.0 / self.config.substeps_per_frame.max(1) as f32;
        self.predict(prediction_factor);

        self.grid.build(&self.particles.predicted);
        update_densities(&mut self.particles, &self.grid, &self.kernels);

        if dt == 0.0 {
            return;
        }

        self.apply_forces(dt);
        self.integrate();
    }

    fn populate(&mut self) {
        let (min, max) = self.bounds.spawn_region();
        self.particles = ParticleSet::seeded(self.particle_count, min, max, &mut self.spawn_rng);
        self.state = SimState::Running;
    }

    fn predict(&mut self, factor: f32) {
        for i in 0..self.particles.count {
            self.particles.predicted[i] =
                self.particles.position[i] + self.particles.velocity[i] * factor;
        }
    }

    /// External, pressure and viscosity accelerations, applied to velocities
    /// in index order. Later particles see the updated velocities of earlier
    /// ones during the viscosity pass.
    fn apply_forces(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        let viscosity = self.config.viscosity;

        for i in 0..self.particles.count {
            let external = compute_external_force(
                self.particles.position[i],
                self.particles.velocity[i],
                gravity,
                &self.interaction,
            );
            self.particles.velocity[i] += external * dt;

            let density = self.particles.density[i];

            let pressure = compute_pressure_force(
                i,
                &self.particles,
                &self.grid,
                &self.kernels,
                &self.config,
                &mut *self.directions,
            );
            self.particles.velocity[i] += pressure / density * dt;

            let viscous =
                compute_viscosity_force(i, &self.particles, &self.grid, &self.kernels, viscosity);
            self.particles.velocity[i] += viscous / density * dt;
        }
    }

    fn integrate(&mut self) {
        let radius = self.config.particle_radius;
        let damping = self.config.collision_damping;
        for i in 0..self.particles.count {
            self.particles.position[i] += self.particles.velocity[i];
            enforce_bounds(
                &mut self.particles.position[i],
                &mut self.particles.velocity[i],
                self.bounds,
                radius,
                damping,
            );
        }
    }

    /// Drop the population; the next frame re-seeds it from `seed`. The
    /// tie-break stream restarts the same way `with_seed` starts it.
    pub fn reset(&mut self, seed: u64) {
        self.particles = ParticleSet::default();
        self.spawn_rng = ChaCha8Rng::seed_from_u64(seed);
        self.directions.reseed(seed.wrapping_add(1));
        self.state = SimState::Uninitialized;
    }

    // ---------- configuration ----------

    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Replace the whole configuration, swapping in the kernel set for its
    /// smoothing radius.
    pub fn set_config(&mut self, config: FluidConfig) {
        self.config = config;
        self.apply_smoothing_radius();
    }

    config_accessor!(gravity);
    config_accessor!(collision_damping);
    config_accessor!(target_density);
    config_accessor!(pressure_multiplier);
    config_accessor!(near_pressure_multiplier);
    config_accessor!(viscosity);
    config_accessor!(particle_radius);

    /// Get or set the smoothing radius. Setting it also replaces the kernel
    /// set and the grid cell size before anything else can run.
    pub fn smoothing_radius(&mut self, value: Option<f32>) -> f32 {
        if let Some(v) = value {
            self.config.smoothing_radius = v;
            self.apply_smoothing_radius();
        }
        self.config.smoothing_radius
    }

    pub fn substeps_per_frame(&mut self, value: Option<u32>) -> u32 {
        if let Some(v) = value {
            self.config.substeps_per_frame = v;
        }
        self.config.substeps_per_frame
    }

    fn apply_smoothing_radius(&mut self) {
        let radius = self.config.smoothing_radius;
        self.kernels = KernelSet::new(radius);
        self.grid.set_cell_size(radius);
    }

    /// Get or set the pointer interaction.
    pub fn interaction_force(&mut self, value: Option<InteractionForce>) -> InteractionForce {
        if let Some(v) = value {
            self.interaction = v;
        }
        self.interaction
    }

    pub fn set_interaction_force(&mut self, strength: f32, center: Vec2) {
        self.interaction = InteractionForce::new(strength, center);
    }

    // ---------- read access ----------

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.particles.position
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.particles.velocity
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn kernels(&self) -> &KernelSet {
        &self.kernels
    }

    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }
}

/// Clamp `position` into `[radius, extent - radius]` on both axes. A clamped
/// axis has its velocity component reversed and scaled by `damping`.
pub fn enforce_bounds(
    position: &mut Vec2,
    velocity: &mut Vec2,
    bounds: Bounds,
    radius: f32,
    damping: f32,
) {
    if position.x < radius {
        position.x = radius;
        velocity.x *= -damping;
    } else if position.x > bounds.width - radius {
        position.x = bounds.width - radius;
        velocity.x *= -damping;
    }

    if position.y < radius {
        position.y = radius;
        velocity.y *= -damping;
    } else if position.y > bounds.height - radius {
        position.y = bounds.height - radius;
        velocity.y *= -damping;
    }
}
