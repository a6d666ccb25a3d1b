//! Serialized model artifacts: the fitted feature encoder and regressor.
//!
//! Both are JSON files exported by the training pipeline. The encoder file
//! records the fit-time column contract (input order, one-hot categories,
//! output column names) alongside the state mapping it was fitted with; the
//! model file holds the regression coefficients and the exact feature names
//! the regressor was fitted on.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Encoder artifact file name within the artifact directory.
pub const ENCODER_FILE: &str = "encoder.json";
/// Regressor artifact file name within the artifact directory.
pub const MODEL_FILE: &str = "startup_model.json";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed artifact {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("artifact mismatch: {0}")]
    Mismatch(String),
}

/// The fitted column transformer: one-hot over the state code, passthrough
/// for the numeric spend columns.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderSpec {
    /// Input column names in fit order.
    pub input_columns: Vec<String>,
    pub one_hot: OneHotSpec,
    /// Post-transform column names in fit order: one-hot columns first,
    /// then the passthrough numerics.
    pub output_columns: Vec<String>,
    /// The state mapping the encoder was fitted with. Must agree with
    /// [`crate::states::STATE_CODES`].
    pub state_mapping: BTreeMap<String, i64>,
}

/// The fitted one-hot step within the encoder.
#[derive(Debug, Clone, Deserialize)]
pub struct OneHotSpec {
    /// Name of the categorical input column.
    pub column: String,
    /// Fitted category codes, in the order their one-hot columns appear.
    pub categories: Vec<i64>,
}

/// The fitted linear regressor.
#[derive(Debug, Clone, Deserialize)]
pub struct RegressorSpec {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    /// The feature columns the regressor was fitted on: the encoder's
    /// output columns minus the dropped leading dummy.
    pub feature_names: Vec<String>,
}

impl EncoderSpec {
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        load_json(&dir.join(ENCODER_FILE))
    }
}

impl RegressorSpec {
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        load_json(&dir.join(MODEL_FILE))
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ModelError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODER_JSON: &str = r#"{
        "input_columns": ["R&D Spend", "Administration", "Marketing Spend", "State"],
        "one_hot": { "column": "State", "categories": [0, 1, 2] },
        "output_columns": [
            "encoder__State_0", "encoder__State_1", "encoder__State_2",
            "remainder__R&D Spend", "remainder__Administration", "remainder__Marketing Spend"
        ],
        "state_mapping": { "New York": 0, "California": 1, "Florida": 2 }
    }"#;

    const MODEL_JSON: &str = r#"{
        "intercept": 50122.19,
        "coefficients": [-696.97, -394.42, 0.8057, -0.0268, 0.0272],
        "feature_names": [
            "encoder__State_1", "encoder__State_2",
            "remainder__R&D Spend", "remainder__Administration", "remainder__Marketing Spend"
        ]
    }"#;

    #[test]
    fn load_encoder_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ENCODER_FILE), ENCODER_JSON).unwrap();

        let spec = EncoderSpec::load(dir.path()).unwrap();
        assert_eq!(spec.input_columns.len(), 4);
        assert_eq!(spec.one_hot.column, "State");
        assert_eq!(spec.one_hot.categories, vec![0, 1, 2]);
        assert_eq!(spec.output_columns.len(), 6);
        assert_eq!(spec.state_mapping["Florida"], 2);
    }

    #[test]
    fn load_regressor_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), MODEL_JSON).unwrap();

        let spec = RegressorSpec::load(dir.path()).unwrap();
        assert_eq!(spec.coefficients.len(), 5);
        assert_eq!(spec.feature_names.len(), 5);
        assert!((spec.intercept - 50122.19).abs() < 1e-9);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = EncoderSpec::load(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn corrupt_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), b"\x80\x02not json").unwrap();
        let err = RegressorSpec::load(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::Malformed { .. }), "got {err:?}");
    }

    #[test]
    fn truncated_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ENCODER_FILE), &ENCODER_JSON[..40]).unwrap();
        let err = EncoderSpec::load(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::Malformed { .. }), "got {err:?}");
    }
}
