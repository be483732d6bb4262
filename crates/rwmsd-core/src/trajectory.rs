//! Walk generation by cumulative sum of Gaussian steps.

use crate::error::{Result, WalkError};
use crate::model::GaussianWalk;
use crate::noise::NoiseGenerator;
use crate::state::{origin, Position};
use serde::{Deserialize, Serialize};

/// Ordered positions of a single walk. Never empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrajectory")]
pub struct Trajectory {
    positions: Vec<Position>,
}

#[derive(Deserialize)]
struct RawTrajectory {
    positions: Vec<Position>,
}

impl TryFrom<RawTrajectory> for Trajectory {
    type Error = WalkError;

    fn try_from(raw: RawTrajectory) -> Result<Self> {
        Self::from_positions(raw.positions)
    }
}

impl Trajectory {
    /// Accumulate `num_steps` Gaussian steps starting from the origin.
    pub fn generate(
        num_steps: usize,
        walk: &GaussianWalk,
        noise: &mut NoiseGenerator,
    ) -> Result<Self> {
        if num_steps == 0 {
            return Err(WalkError::invalid("number of steps must be a positive integer"));
        }

        let scale = walk.step_scale();
        let mut positions = Vec::with_capacity(num_steps + 1);
        let mut current = origin();
        positions.push(current);

        for _ in 0..num_steps {
            current += noise.generate_step(scale);
            positions.push(current);
        }

        Ok(Self { positions })
    }

    /// Wrap externally produced positions (e.g. a recorded track).
    pub fn from_positions(positions: Vec<Position>) -> Result<Self> {
        if positions.is_empty() {
            return Err(WalkError::InsufficientData { needed: 1, got: 0 });
        }
        Ok(Self { positions })
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn num_steps(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    pub fn start(&self) -> &Position {
        &self.positions[0]
    }

    pub fn end(&self) -> &Position {
        &self.positions[self.positions.len() - 1]
    }

    /// Per-step displacements, `positions[i+1] - positions[i]`.
    pub fn steps(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.windows(2).map(|w| w[1] - w[0])
    }
}

/// Convenience wrapper: fresh generator from `seed`, walk of `num_steps`.
pub fn generate_random_walk(num_steps: usize, step_scale: f64, seed: u64) -> Result<Trajectory> {
    let walk = GaussianWalk::new(step_scale)?;
    let mut noise = NoiseGenerator::new(seed);
    Trajectory::generate(num_steps, &walk, &mut noise)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_steps_is_invalid() {
        let err = generate_random_walk(0, 1.0, 1).unwrap_err();
        assert!(matches!(err, WalkError::InvalidArgument(_)));
    }

    #[test]
    fn positions_are_cumulative() {
        let traj = generate_random_walk(50, 1.0, 11).unwrap();
        let mut sum = origin();
        for (step, pos) in traj.steps().zip(traj.positions().iter().skip(1)) {
            sum += step;
            assert!((sum - pos).norm() < 1e-9);
        }
        assert_eq!(traj.num_steps(), 50);
    }

    #[test]
    fn from_positions_rejects_empty() {
        assert!(Trajectory::from_positions(Vec::new()).is_err());
        let t = Trajectory::from_positions(vec![Position::new(1.0, 2.0)]).unwrap();
        assert_eq!(t.start(), t.end());
    }

    #[test]
    fn deserializing_keeps_non_empty() {
        assert!(serde_json::from_str::<Trajectory>(r#"{"positions":[]}"#).is_err());

        let traj = generate_random_walk(4, 1.0, 8).unwrap();
        let json = serde_json::to_string(&traj).unwrap();
        let back: Trajectory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 5);
        assert_eq!(back.start(), traj.start());
    }
}
