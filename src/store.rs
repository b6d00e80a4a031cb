//! Model store: persists a trained model as a versioned binary artifact.
//!
//! The artifact is an opaque MessagePack blob carrying the fitted forest,
//! the stored feature-name list, the per-feature imputation means, and the
//! importance vector. Writes replace the whole file; concurrent writers to
//! one path are not supported and must be serialized by the caller
//! (single writer, multiple readers).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::TrainedModel;
use crate::schema::{self, FEATURE_NAMES};
use crate::{Error, Result};

/// Artifact format version; bumped on any layout change.
const ARTIFACT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Artifact {
    version: u32,
    model: TrainedModel,
}

/// Serialize a trained model to `path`, replacing any existing artifact.
///
/// # Errors
///
/// Returns [`Error::Storage`] if encoding fails and [`Error::Io`] if the
/// file cannot be written.
pub fn save<P: AsRef<Path>>(model: &TrainedModel, path: P) -> Result<()> {
    let artifact = Artifact {
        version: ARTIFACT_VERSION,
        model: model.clone(),
    };
    let bytes = rmp_serde::to_vec_named(&artifact)
        .map_err(|e| Error::Storage(format!("failed to encode model artifact: {e}")))?;
    fs::write(path.as_ref(), bytes)?;
    info!(path = %path.as_ref().display(), "model artifact written");
    Ok(())
}

/// Load a trained model from `path`.
///
/// The loaded model is an independent value copy; `load(save(m))` predicts
/// identically to `m` on any input.
///
/// # Errors
///
/// - [`Error::Io`] if the file cannot be read
/// - [`Error::CorruptArtifact`] if the blob cannot be deserialized
/// - [`Error::IncompatibleSchema`] if the artifact version or the stored
///   feature list does not match the schema currently in effect
pub fn load<P: AsRef<Path>>(path: P) -> Result<TrainedModel> {
    let bytes = fs::read(path.as_ref())?;
    let artifact: Artifact = rmp_serde::from_slice(&bytes)
        .map_err(|e| Error::CorruptArtifact(e.to_string()))?;

    if artifact.version != ARTIFACT_VERSION {
        return Err(Error::IncompatibleSchema(format!(
            "artifact version {} is not the supported version {ARTIFACT_VERSION}",
            artifact.version
        )));
    }
    if !schema::matches_schema(artifact.model.feature_names()) {
        return Err(Error::IncompatibleSchema(format!(
            "stored feature list {:?} does not match the current schema {FEATURE_NAMES:?}",
            artifact.model.feature_names()
        )));
    }
    artifact.model.imputation_array()?;

    info!(path = %path.as_ref().display(), "model artifact loaded");
    Ok(artifact.model)
}
