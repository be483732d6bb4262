//! Time-averaged mean squared displacement of a single trajectory.

use crate::error::{Result, WalkError};
use crate::state::squared_displacement;
use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// MSD at one time lag, with the number of displacement samples averaged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MsdPoint {
    pub lag: usize,
    pub msd: f64,
    pub samples: usize,
}

/// MSD values ordered by ascending lag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MsdCurve {
    pub points: Vec<MsdPoint>,
}

impl MsdCurve {
    pub fn new(points: Vec<MsdPoint>) -> Self {
        Self { points }
    }

    /// Build a curve from bare (lag, msd) pairs; sample counts are unknown and set to 1.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        Self {
            points: pairs
                .into_iter()
                .map(|(lag, msd)| MsdPoint { lag, msd, samples: 1 })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MsdPoint> {
        self.points.iter()
    }

    pub fn max_lag(&self) -> Option<usize> {
        self.points.last().map(|p| p.lag)
    }
}

/// Largest lag that still leaves two displacement samples.
pub fn max_valid_lag(len: usize) -> usize {
    len.saturating_sub(2)
}

/// Half the trajectory length, capped at [`max_valid_lag`].
pub fn default_max_lag(len: usize) -> usize {
    (len / 2).min(max_valid_lag(len))
}

/// MSD at a single lag. A lag of `len - 1` is allowed and averages one sample.
pub fn msd_at_lag(trajectory: &Trajectory, lag: usize) -> Result<MsdPoint> {
    if lag == 0 {
        return Err(WalkError::invalid("time lag must be at least 1"));
    }
    let positions = trajectory.positions();
    if lag >= positions.len() {
        return Err(WalkError::InsufficientData {
            needed: lag + 1,
            got: positions.len(),
        });
    }

    let samples = positions.len() - lag;
    let sum: f64 = positions
        .iter()
        .zip(&positions[lag..])
        .map(|(a, b)| squared_displacement(a, b))
        .sum();

    Ok(MsdPoint {
        lag,
        msd: sum / samples as f64,
        samples,
    })
}

/// MSD for lags `1..=max_lag`.
///
/// `None` picks [`default_max_lag`]. Requests beyond [`max_valid_lag`] are
/// clamped. Trajectories shorter than three points yield an empty curve.
pub fn compute_msd(trajectory: &Trajectory, max_lag: Option<usize>) -> Result<MsdCurve> {
    let len = trajectory.len();
    let cap = max_valid_lag(len);

    let max_lag = match max_lag {
        Some(0) => return Err(WalkError::invalid("maximum lag must be at least 1")),
        Some(requested) if requested > cap => {
            debug!(requested, cap, "clamping maximum lag to trajectory length");
            cap
        }
        Some(requested) => requested,
        None => default_max_lag(len),
    };

    let points = (1..=max_lag)
        .map(|lag| msd_at_lag(trajectory, lag))
        .collect::<Result<Vec<_>>>()?;

    debug!(len, lags = points.len(), "computed MSD curve");
    Ok(MsdCurve::new(points))
}
