use crate::error::{Result, WalkError};
use crate::model::GaussianWalk;
use crate::msd::{compute_msd, MsdCurve, MsdPoint};
use crate::noise::NoiseGenerator;
use crate::trajectory::Trajectory;
use tracing::debug;

/// Independent walks of equal length, seeded from one global seed.
#[derive(Clone, Debug)]
pub struct Ensemble {
    pub trajectories: Vec<Trajectory>,
}

impl Ensemble {
    pub fn generate(
        num_steps: usize,
        walk: &GaussianWalk,
        walks: usize,
        global_seed: u64,
    ) -> Result<Self> {
        if walks == 0 {
            return Err(WalkError::invalid("ensemble needs at least one walk"));
        }

        let trajectories = (0..walks)
            .map(|walk_id| {
                let mut noise = NoiseGenerator::from_walk_id(global_seed, walk_id as u64);
                walk.walk(num_steps, &mut noise)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { trajectories })
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn first(&self) -> Option<&Trajectory> {
        self.trajectories.first()
    }

    /// Point-wise mean of the per-walk time-averaged MSD curves.
    ///
    /// With a single walk this is exactly [`compute_msd`] of that walk.
    pub fn msd(&self, max_lag: Option<usize>) -> Result<MsdCurve> {
        if self.is_empty() {
            return Ok(MsdCurve::default());
        }

        let mut curves = self
            .trajectories
            .iter()
            .map(|t| compute_msd(t, max_lag));

        let mut acc = match curves.next() {
            Some(curve) => curve?,
            None => return Ok(MsdCurve::default()),
        };

        for curve in curves {
            let curve = curve?;
            if curve.len() != acc.len() {
                return Err(WalkError::invalid(
                    "ensemble trajectories must all have the same length",
                ));
            }
            for (total, point) in acc.points.iter_mut().zip(&curve.points) {
                total.msd += point.msd;
                total.samples += point.samples;
            }
        }

        let n = self.len() as f64;
        if self.len() > 1 {
            acc.points = acc
                .points
                .into_iter()
                .map(|p| MsdPoint { msd: p.msd / n, ..p })
                .collect();
        }

        debug!(walks = self.len(), lags = acc.len(), "ensemble MSD");
        Ok(acc)
    }
}
