pub mod state;
pub mod error;
pub mod noise;
pub mod model;
pub mod trajectory;
pub mod msd;
pub mod fit;
pub mod ensemble;
pub mod analysis;

// Core types
pub use state::{Position, DIMENSION};
pub use error::{Result, WalkError};
pub use noise::NoiseGenerator;
pub use model::GaussianWalk;

// Pipeline stages
pub use trajectory::{generate_random_walk, Trajectory};
pub use msd::{compute_msd, msd_at_lag, MsdCurve, MsdPoint};
pub use fit::{fit_log_log, FitResult};
pub use ensemble::Ensemble;
pub use analysis::{Analysis, WalkSpec};
