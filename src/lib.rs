//! # Exotriage: Exoplanet Exploration Triage Pipeline
//!
//! Exotriage ingests per-object astrophysical feature records (similarity
//! index, mass, radius, magnitude, distance, orbital inclination) and
//! produces a binary "worth exploring" decision — both as a deterministic
//! rule-based ground truth and as a learned classifier trained against that
//! ground truth.
//!
//! ## Pipeline
//!
//! ```text
//! raw records ─> TrainingDataset (labels + imputation + split)
//!             ─> TrainedModel    (fit + evaluate)
//!             ─> store           (persist / reload)
//!             ─> infer           (batch predictions)
//! ```
//!
//! The ordered feature set used for training is the same one inference
//! validates against; a drifted schema is an error, never silently
//! tolerated. Imputation means are computed once at dataset build and
//! travel inside the persisted model, so inference reuses them instead of
//! recomputing from new data.
//!
//! ## Example
//!
//! ```rust
//! use exotriage::{infer, ExoplanetRecord, PipelineConfig, TrainedModel, TrainingDataset};
//!
//! # fn main() -> exotriage::Result<()> {
//! let records: Vec<ExoplanetRecord> = (0..100)
//!     .map(|i| {
//!         ExoplanetRecord::builder()
//!             .esi(f64::from(i) / 100.0)
//!             .mass(0.3)
//!             .radius(0.6)
//!             .magnitude(12.0)
//!             .distance(50.0)
//!             .incline_angle(88.0)
//!             .build()
//!     })
//!     .collect();
//!
//! let config = PipelineConfig::default();
//! let dataset = TrainingDataset::build(&records, &config)?;
//! let model = TrainedModel::train(&dataset, &config.forest)?;
//! let accuracy = model.evaluate(&dataset)?;
//! assert!(accuracy >= 0.0 && accuracy <= 1.0);
//!
//! let candidate = ExoplanetRecord::builder().esi(0.97).build();
//! let decision = infer::predict_one(&model, &candidate)?;
//! println!("{decision}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod infer;
pub mod label;
pub mod model;
pub mod schema;
pub mod source;
pub mod store;

pub use config::{ForestConfig, ImputationStrategy, PipelineConfig, SplitConfig};
pub use dataset::TrainingDataset;
pub use error::{Error, Result};
pub use infer::Decision;
pub use label::LabelPolicy;
pub use model::TrainedModel;
pub use schema::{ExoplanetRecord, Feature, FEATURE_COUNT, FEATURE_NAMES};
