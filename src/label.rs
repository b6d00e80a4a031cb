//! Label rule engine: manufactures the binary ground-truth label from raw
//! feature values.
//!
//! The rule is pure, deterministic, and side-effect-free. It is never
//! learned and never replaced by classifier predictions; regenerating labels
//! reruns the same function. Threshold boundaries are inclusive, interval
//! bounds are closed, and the magnitude bound is a strict upper limit.

use serde::{Deserialize, Serialize};

use crate::schema::{ExoplanetRecord, Feature};
use crate::{Error, Result};

/// Policy producing the binary `Explore` ground truth.
///
/// Both shapes are configuration, not hard-coded alternates; the bounds
/// travel with [`PipelineConfig`](crate::config::PipelineConfig).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LabelPolicy {
    /// Label 1 iff `ESI >= threshold` (boundary inclusive).
    EsiThreshold {
        /// Minimum Earth Similarity Index worth exploring
        threshold: f64,
    },
    /// Label 1 iff all four criteria hold: `ESI >= esi_min`, mass within the
    /// closed mass interval, radius within the closed radius interval, and
    /// magnitude strictly below `magnitude_max`.
    MultiCriterion {
        /// Minimum Earth Similarity Index
        esi_min: f64,
        /// Closed `(low, high)` interval for relative mass
        mass_range: (f64, f64),
        /// Closed `(low, high)` interval for relative radius
        radius_range: (f64, f64),
        /// Strict upper bound on apparent magnitude
        magnitude_max: f64,
    },
}

impl Default for LabelPolicy {
    /// Single-threshold policy at ESI 0.9.
    fn default() -> Self {
        Self::EsiThreshold { threshold: 0.9 }
    }
}

impl LabelPolicy {
    /// Multi-criterion policy with the stock bounds: ESI >= 0.93, mass in
    /// [0.1, 0.5], radius in [0.5, 0.8], magnitude < 15.
    #[must_use]
    pub const fn default_multi_criterion() -> Self {
        Self::MultiCriterion {
            esi_min: 0.93,
            mass_range: (0.1, 0.5),
            radius_range: (0.5, 0.8),
            magnitude_max: 15.0,
        }
    }

    /// Evaluate the rule for one record.
    ///
    /// A criterion whose feature is missing evaluates false, so a record
    /// with no ESI labels 0 rather than erroring: labels are manufactured
    /// before imputation runs.
    #[must_use]
    pub fn decide(&self, record: &ExoplanetRecord) -> bool {
        match *self {
            Self::EsiThreshold { threshold } => record
                .value(Feature::Esi)
                .is_some_and(|esi| esi >= threshold),
            Self::MultiCriterion {
                esi_min,
                mass_range,
                radius_range,
                magnitude_max,
            } => {
                record.value(Feature::Esi).is_some_and(|esi| esi >= esi_min)
                    && record
                        .value(Feature::Mass)
                        .is_some_and(|mass| within(mass_range, mass))
                    && record
                        .value(Feature::Radius)
                        .is_some_and(|radius| within(radius_range, radius))
                    && record
                        .value(Feature::Magnitude)
                        .is_some_and(|mag| mag < magnitude_max)
            }
        }
    }

    /// Validate policy bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for non-finite bounds or inverted
    /// intervals.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::EsiThreshold { threshold } => {
                if !threshold.is_finite() {
                    return Err(Error::InvalidConfig(
                        "ESI threshold must be finite".to_string(),
                    ));
                }
            }
            Self::MultiCriterion {
                esi_min,
                mass_range,
                radius_range,
                magnitude_max,
            } => {
                let bounds = [
                    esi_min,
                    mass_range.0,
                    mass_range.1,
                    radius_range.0,
                    radius_range.1,
                    magnitude_max,
                ];
                if bounds.iter().any(|b| !b.is_finite()) {
                    return Err(Error::InvalidConfig(
                        "multi-criterion bounds must be finite".to_string(),
                    ));
                }
                if mass_range.0 > mass_range.1 {
                    return Err(Error::InvalidConfig(format!(
                        "mass interval is inverted: [{}, {}]",
                        mass_range.0, mass_range.1
                    )));
                }
                if radius_range.0 > radius_range.1 {
                    return Err(Error::InvalidConfig(format!(
                        "radius interval is inverted: [{}, {}]",
                        radius_range.0, radius_range.1
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Closed-interval membership.
fn within(range: (f64, f64), value: f64) -> bool {
    value >= range.0 && value <= range.1
}
