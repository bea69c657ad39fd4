use glam::Vec2;

/// Pointer interaction supplied by the host.
///
/// `strength` doubles as the radius of influence (`|strength|`). Positive
/// strength pulls particles toward `center`, negative pushes them away, zero
/// turns the interaction off.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionForce {
    pub strength: f32,
    pub center: Vec2,
}

impl InteractionForce {
    pub fn new(strength: f32, center: Vec2) -> Self {
        Self { strength, center }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.strength != 0.0
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.strength.abs()
    }
}

/// External acceleration for one particle: gravity, blended with the pointer
/// interaction when the particle is inside its radius.
///
/// Inside the radius gravity fades toward the center, a radial pull of
/// `centre_t * strength` is added, and `velocity * centre_t` is removed as
/// local damping (`centre_t` is 1 at the center, 0 at the edge).
pub fn compute_external_force(
    position: Vec2,
    velocity: Vec2,
    gravity: f32,
    interaction: &InteractionForce,
) -> Vec2 {
    let gravity_acc = Vec2::new(0.0, gravity);

    if !interaction.is_active() {
        return gravity_acc;
    }

    let radius = interaction.radius();
    let offset = interaction.center - position;
    let sqr_dst = offset.length_squared();
    if sqr_dst >= radius * radius {
        return gravity_acc;
    }

    let dst = sqr_dst.sqrt();
    let edge_t = dst / radius;
    let centre_t = 1.0 - edge_t;
    let dir_to_centre = if dst > 0.0 { offset / dst } else { Vec2::ZERO };

    let gravity_weight = 1.0 - centre_t * (radius / 10.0).min(1.0);
    let mut acc = gravity_acc * gravity_weight + dir_to_centre * centre_t * interaction.strength;
    acc -= velocity * centre_t;
    acc
}
