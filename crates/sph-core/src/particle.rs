use glam::Vec2;
use rand::Rng;

/// SoA particle storage. Every array has length `count`.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<Vec2>,
    /// One substep ahead of `position`; used for neighbor search and density
    pub predicted: Vec<Vec2>,
    pub velocity: Vec<Vec2>,
    pub density: Vec<f32>,
    pub near_density: Vec<f32>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec2::ZERO; count],
            predicted: vec![Vec2::ZERO; count],
            velocity: vec![Vec2::ZERO; count],
            density: vec![0.0; count],
            near_density: vec![0.0; count],
        }
    }

    /// `count` particles spread uniformly over `[min, max)`, at rest.
    pub fn seeded<R: Rng + ?Sized>(count: usize, min: Vec2, max: Vec2, rng: &mut R) -> Self {
        let mut particles = Self::new(count);
        let extent = max - min;
        for i in 0..count {
            let pos = min + Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()) * extent;
            particles.position[i] = pos;
            particles.predicted[i] = pos;
        }
        particles
    }

    /// Build a set from explicit positions, at rest.
    pub fn from_positions(positions: &[Vec2]) -> Self {
        let mut particles = Self::new(positions.len());
        particles.position.copy_from_slice(positions);
        particles.predicted.copy_from_slice(positions);
        particles
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
