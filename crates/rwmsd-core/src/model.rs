//! Gaussian step model and its closed-form MSD.

use crate::error::{Result, WalkError};
use crate::noise::NoiseGenerator;
use crate::trajectory::Trajectory;
use crate::DIMENSION;
use serde::{Deserialize, Serialize};

/// Gaussian random walk: every step is (dx, dy) with dx, dy ~ N(0, σ²).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianWalk {
    step_scale: f64,
}

impl GaussianWalk {
    pub fn new(step_scale: f64) -> Result<Self> {
        if !step_scale.is_finite() || step_scale <= 0.0 {
            return Err(WalkError::invalid(format!(
                "step scale must be a positive finite number, got {step_scale}"
            )));
        }
        Ok(Self { step_scale })
    }

    /// Unit-variance walk (σ = 1)
    pub fn standard() -> Self {
        Self { step_scale: 1.0 }
    }

    pub fn step_scale(&self) -> f64 {
        self.step_scale
    }

    pub fn walk(&self, num_steps: usize, noise: &mut NoiseGenerator) -> Result<Trajectory> {
        Trajectory::generate(num_steps, self, noise)
    }

    /// E[|X(t+τ) - X(t)|²] = d·σ²·τ
    pub fn expected_msd(&self, lag: usize) -> f64 {
        DIMENSION as f64 * self.step_scale * self.step_scale * lag as f64
    }

    /// Coefficient implied by MSD(τ) = 2d·D·τ, i.e. σ²/2 in two dimensions.
    pub fn expected_prefactor_diffusion(&self) -> f64 {
        self.expected_msd(1) / (2.0 * DIMENSION as f64)
    }
}

impl Default for GaussianWalk {
    fn default() -> Self {
        Self::standard()
    }
}
