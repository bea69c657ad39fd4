use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;

/// Supplies a push direction for two particles at exactly the same spot.
pub trait DirectionSource {
    fn next_direction(&mut self) -> Vec2;

    /// Restart the stream from `seed`. Sources without a stream ignore it.
    fn reseed(&mut self, _seed: u64) {}
}

/// Unit vectors at uniformly random angles.
#[derive(Clone, Debug)]
pub struct RandomDirections {
    rng: ChaCha8Rng,
}

impl RandomDirections {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl DirectionSource for RandomDirections {
    fn next_direction(&mut self) -> Vec2 {
        let angle = self.rng.gen::<f32>() * TAU;
        Vec2::new(angle.cos(), angle.sin())
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

/// Always the same direction.
#[derive(Clone, Copy, Debug)]
pub struct FixedDirection(pub Vec2);

impl DirectionSource for FixedDirection {
    fn next_direction(&mut self) -> Vec2 {
        self.0
    }
}
