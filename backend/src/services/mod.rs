//! Service layer for business logic and orchestration.
//!
//! Pure rule evaluation lives in [`realism`] and [`feedback`]; [`predictor`]
//! combines them with model inference. Nothing here knows about HTTP.

pub mod feedback;
pub mod predictor;
pub mod realism;

pub use predictor::{PredictionError, PredictionService};
pub use realism::{RealismRejection, RealismRule};
