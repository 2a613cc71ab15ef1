pub mod features;
pub mod input;
pub mod prediction;

pub use features::{FeatureError, FeatureVector, FEATURE_NAMES};
pub use input::{PredictionInput, SchemaErrors};
pub use prediction::PredictionResult;
