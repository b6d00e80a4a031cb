//! Inference service: scores new records against a caller-owned model.
//!
//! There is no process-wide "current model"; the caller holds the
//! [`TrainedModel`] handle and reloads it from the store when the artifact
//! changes. Batch and single-record calls share one code path, and no
//! retraining happens as a side effect of inference.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::TrainedModel;
use crate::schema::{self, ExoplanetRecord};
use crate::{Error, Result};

/// Binary triage decision for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The candidate is worth exploring
    Explore,
    /// The candidate is not worth exploring
    NotExplore,
}

impl Decision {
    /// Numeric label: 1 for Explore, 0 for Not Explore.
    #[must_use]
    pub const fn as_label(self) -> u8 {
        match self {
            Self::Explore => 1,
            Self::NotExplore => 0,
        }
    }

    const fn from_vote(explore: bool) -> Self {
        if explore {
            Self::Explore
        } else {
            Self::NotExplore
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Explore => "Explore",
            Self::NotExplore => "Not Explore",
        };
        f.write_str(status)
    }
}

/// Score a batch of records, one decision per record in input order.
///
/// Missing features impute from the model's stored means (never freshly
/// computed ones); extra fields were already dropped at the record
/// boundary.
///
/// # Errors
///
/// Returns [`Error::Schema`] if the model's stored feature list does not
/// match the schema in effect, or [`Error::IncompatibleSchema`] if its
/// imputation vector is malformed.
pub fn predict(model: &TrainedModel, records: &[ExoplanetRecord]) -> Result<Vec<Decision>> {
    if !schema::matches_schema(model.feature_names()) {
        return Err(Error::Schema(format!(
            "model was trained on feature list {:?}, current schema is {:?}",
            model.feature_names(),
            schema::FEATURE_NAMES
        )));
    }
    let fill = model.imputation_array()?;

    let decisions: Vec<Decision> = records
        .iter()
        .map(|record| {
            let x = record.to_vector_imputed(&fill);
            Decision::from_vote(model.forest().predict(&x))
        })
        .collect();
    debug!(
        scored = decisions.len(),
        explore = decisions
            .iter()
            .filter(|d| **d == Decision::Explore)
            .count(),
        "batch scored"
    );
    Ok(decisions)
}

/// Score one record. Delegates to the batch path; single records are not a
/// special case.
///
/// # Errors
///
/// Same conditions as [`predict`].
pub fn predict_one(model: &TrainedModel, record: &ExoplanetRecord) -> Result<Decision> {
    let mut decisions = predict(model, std::slice::from_ref(record))?;
    Ok(decisions.remove(0))
}
