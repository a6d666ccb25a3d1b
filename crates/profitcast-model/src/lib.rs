//! Feature encoding and regression inference for the startup profit model.

mod artifact;
mod predict;
pub mod states;

pub use artifact::{ENCODER_FILE, EncoderSpec, MODEL_FILE, ModelError, OneHotSpec, RegressorSpec};
pub use predict::{PredictError, Predictor, ProfitInput};
