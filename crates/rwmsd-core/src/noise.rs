//! Seeded Gaussian noise for walk steps.

use crate::Position;
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, StandardNormal};

/// Owned, explicitly seeded source of Gaussian step noise.
pub struct NoiseGenerator {
    rng: ChaCha20Rng,
    seed: u64,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed for walk `walk_id` of an ensemble. Walk 0 reuses the global seed,
    /// so a one-walk ensemble reproduces the plain single-walk run.
    pub fn from_walk_id(global_seed: u64, walk_id: u64) -> Self {
        Self::new(derive_seed(global_seed, walk_id))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One 2D displacement, each component ~ N(0, scale²). x is drawn before y.
    pub fn generate_step(&mut self, scale: f64) -> Position {
        let dx: f64 = StandardNormal.sample(&mut self.rng);
        let dy: f64 = StandardNormal.sample(&mut self.rng);
        Position::new(dx * scale, dy * scale)
    }
}

pub fn derive_seed(global_seed: u64, walk_id: u64) -> u64 {
    global_seed.wrapping_add(walk_id.wrapping_mul(0x9e3779b97f4a7c15))
}

/// Fresh seed from OS entropy, for runs where the caller did not pick one.
pub fn entropy_seed() -> u64 {
    OsRng.next_u64()
}
