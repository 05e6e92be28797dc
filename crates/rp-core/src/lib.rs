pub mod color;
pub mod error;
pub mod prediction;
pub mod prompt;

pub use color::{ColorPreset, PaintColor, PRESET_COLORS};
pub use error::GenerateError;
pub use prediction::{Prediction, PredictionInput, PredictionRequest, PredictionStatus};
