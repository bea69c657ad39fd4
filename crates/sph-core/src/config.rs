use glam::Vec2;

/// Tunable simulation constants. Owned by the solver; change them through the
/// solver's accessors so the kernel set stays in step with `smoothing_radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidConfig {
    /// Downward acceleration (screen space, +y is down)
    pub gravity: f32,
    /// Fraction of velocity kept (and reversed) on a wall hit
    pub collision_damping: f32,
    pub smoothing_radius: f32,
    pub target_density: f32,
    pub pressure_multiplier: f32,
    pub near_pressure_multiplier: f32,
    pub viscosity: f32,
    /// Distance kept between particle centers and the walls
    pub particle_radius: f32,
    pub substeps_per_frame: u32,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            gravity: 9.0,
            collision_damping: 0.1,
            smoothing_radius: 20.0,
            target_density: 2.0,
            pressure_multiplier: 25.0,
            near_pressure_multiplier: 1.0,
            viscosity: 0.1,
            particle_radius: 2.0,
            substeps_per_frame: 3,
        }
    }
}

/// Axis-aligned simulation box anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Region used for the initial population: the left quarter of the box.
    pub fn spawn_region(&self) -> (Vec2, Vec2) {
        (Vec2::ZERO, Vec2::new(self.width * 0.25, self.height))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(400.0, 400.0)
    }
}
