//! The request-to-prediction pipeline.
//!
//! A prediction runs four steps against the fitted artifacts: build a single
//! named row in fit order, one-hot/passthrough transform it into the
//! encoder's output columns, drop the leading dummy column by position
//! (exactly as the training run did), then apply the linear regressor to the
//! remaining columns.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::artifact::{EncoderSpec, ModelError, RegressorSpec};
use crate::states;

// Fit-time input column names. The encoder artifact records the same names;
// any drift between the two fails the transform step.
const COL_RD_SPEND: &str = "R&D Spend";
const COL_ADMINISTRATION: &str = "Administration";
const COL_MARKETING_SPEND: &str = "Marketing Spend";
const COL_STATE: &str = "State";

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid state {given:?}; choose one of: {valid}")]
    UnknownState { given: String, valid: String },

    #[error("feature mismatch: {0}")]
    FeatureMismatch(String),
}

/// A profit prediction request: three spend figures and a state label.
///
/// Spend values are not range-checked; negative figures pass straight
/// through to the regressor, as they did at fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitInput {
    pub rd_spend: f64,
    pub administration: f64,
    pub marketing_spend: f64,
    pub state: String,
}

/// One named input cell: a raw numeric field or an encoded category.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Num(f64),
    Code(i64),
}

/// A single named row in fit-time column order.
struct InputRow {
    columns: Vec<(&'static str, Cell)>,
}

impl InputRow {
    fn get(&self, name: &str) -> Option<Cell> {
        self.columns
            .iter()
            .find(|(col, _)| *col == name)
            .map(|&(_, cell)| cell)
    }
}

/// A transformed feature row: numeric values with the encoder's output
/// column names attached.
#[derive(Debug, Clone, PartialEq)]
struct FeatureRow {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    /// Drop the leading column by position. The fit-time pipeline dropped
    /// the first one-hot dummy the same way; which column is "first" is a
    /// contract with the artifact, not a choice made here.
    fn drop_first(mut self) -> Self {
        self.names.remove(0);
        self.values.remove(0);
        self
    }
}

/// The loaded encoder/regressor pair. Built once at startup, immutable and
/// shared read-only for the process lifetime.
#[derive(Debug)]
pub struct Predictor {
    encoder: EncoderSpec,
    regressor: RegressorSpec,
}

impl Predictor {
    /// Load both artifacts from a directory containing `encoder.json` and
    /// `startup_model.json`, then cross-check them.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let encoder = EncoderSpec::load(dir)?;
        let regressor = RegressorSpec::load(dir)?;
        let predictor = Self::from_specs(encoder, regressor)?;
        info!(
            dir = %dir.display(),
            features = predictor.regressor.feature_names.len(),
            "loaded model artifacts"
        );
        Ok(predictor)
    }

    /// Build a predictor from already-deserialized specs, validating that
    /// the two artifacts agree with each other and with the built-in state
    /// mapping. A mismatch here would otherwise mispredict silently.
    pub fn from_specs(
        encoder: EncoderSpec,
        regressor: RegressorSpec,
    ) -> Result<Self, ModelError> {
        validate_encoder(&encoder)?;
        validate_regressor(&encoder, &regressor)?;
        Ok(Self { encoder, regressor })
    }

    /// Predict profit for one request.
    pub fn predict(&self, input: &ProfitInput) -> Result<f64, PredictError> {
        let code = states::state_code(&input.state).ok_or_else(|| PredictError::UnknownState {
            given: input.state.clone(),
            valid: states::valid_states().join(", "),
        })?;

        let row = InputRow {
            columns: vec![
                (COL_RD_SPEND, Cell::Num(input.rd_spend)),
                (COL_ADMINISTRATION, Cell::Num(input.administration)),
                (COL_MARKETING_SPEND, Cell::Num(input.marketing_spend)),
                (COL_STATE, Cell::Code(code)),
            ],
        };

        let features = transform(&self.encoder, &row)?.drop_first();
        infer(&self.regressor, &features)
    }
}

/// Apply the fitted transform: one-hot columns for the categorical field in
/// fitted category order, then the passthrough numerics in input order.
fn transform(spec: &EncoderSpec, row: &InputRow) -> Result<FeatureRow, PredictError> {
    let mut values = Vec::with_capacity(spec.output_columns.len());

    let code = match row.get(&spec.one_hot.column) {
        Some(Cell::Code(code)) => code,
        Some(Cell::Num(_)) => {
            return Err(PredictError::FeatureMismatch(format!(
                "column {:?} is not categorical",
                spec.one_hot.column
            )));
        }
        None => {
            return Err(PredictError::FeatureMismatch(format!(
                "row is missing column {:?}",
                spec.one_hot.column
            )));
        }
    };
    if !spec.one_hot.categories.contains(&code) {
        return Err(PredictError::FeatureMismatch(format!(
            "category code {code} was not seen at fit time"
        )));
    }
    for &category in &spec.one_hot.categories {
        values.push(if category == code { 1.0 } else { 0.0 });
    }

    for name in &spec.input_columns {
        if *name == spec.one_hot.column {
            continue;
        }
        match row.get(name) {
            Some(Cell::Num(value)) => values.push(value),
            Some(Cell::Code(_)) => {
                return Err(PredictError::FeatureMismatch(format!(
                    "column {name:?} is not numeric"
                )));
            }
            None => {
                return Err(PredictError::FeatureMismatch(format!(
                    "row is missing column {name:?}"
                )));
            }
        }
    }

    if values.len() != spec.output_columns.len() {
        return Err(PredictError::FeatureMismatch(format!(
            "transform produced {} columns, encoder was fitted with {}",
            values.len(),
            spec.output_columns.len()
        )));
    }

    Ok(FeatureRow {
        names: spec.output_columns.clone(),
        values,
    })
}

/// Apply the linear regressor to a transformed row.
fn infer(spec: &RegressorSpec, features: &FeatureRow) -> Result<f64, PredictError> {
    if features.names != spec.feature_names {
        return Err(PredictError::FeatureMismatch(format!(
            "regressor was fitted on {:?}, got {:?}",
            spec.feature_names, features.names
        )));
    }

    let dot: f64 = spec
        .coefficients
        .iter()
        .zip(&features.values)
        .map(|(c, v)| c * v)
        .sum();
    Ok(spec.intercept + dot)
}

fn validate_encoder(spec: &EncoderSpec) -> Result<(), ModelError> {
    if !spec.input_columns.iter().any(|c| *c == spec.one_hot.column) {
        return Err(ModelError::Mismatch(format!(
            "one-hot column {:?} is not an input column",
            spec.one_hot.column
        )));
    }

    // The artifact carries the mapping it was fitted with; it must agree
    // with the mapping this service hands out codes from.
    let built_in: Vec<(String, i64)> = states::STATE_CODES
        .iter()
        .map(|&(name, code)| (name.to_string(), code))
        .collect();
    let mut from_artifact: Vec<(String, i64)> = spec
        .state_mapping
        .iter()
        .map(|(name, &code)| (name.clone(), code))
        .collect();
    from_artifact.sort_by_key(|&(_, code)| code);
    if from_artifact != built_in {
        return Err(ModelError::Mismatch(format!(
            "artifact state mapping {:?} disagrees with the service mapping {:?}",
            from_artifact, built_in
        )));
    }

    let mut codes: Vec<i64> = spec.state_mapping.values().copied().collect();
    codes.sort_unstable();
    let mut categories = spec.one_hot.categories.clone();
    categories.sort_unstable();
    if categories != codes {
        return Err(ModelError::Mismatch(format!(
            "one-hot categories {:?} do not cover the state codes {:?}",
            spec.one_hot.categories, codes
        )));
    }

    let expected = spec.one_hot.categories.len() + spec.input_columns.len() - 1;
    if spec.output_columns.len() != expected {
        return Err(ModelError::Mismatch(format!(
            "encoder declares {} output columns, expected {expected}",
            spec.output_columns.len()
        )));
    }
    Ok(())
}

fn validate_regressor(encoder: &EncoderSpec, spec: &RegressorSpec) -> Result<(), ModelError> {
    if spec.feature_names != encoder.output_columns[1..] {
        return Err(ModelError::Mismatch(format!(
            "regressor features {:?} do not match encoder output minus the dropped column {:?}",
            spec.feature_names,
            &encoder.output_columns[1..]
        )));
    }
    if spec.coefficients.len() != spec.feature_names.len() {
        return Err(ModelError::Mismatch(format!(
            "{} coefficients for {} features",
            spec.coefficients.len(),
            spec.feature_names.len()
        )));
    }
    Ok(())
}
