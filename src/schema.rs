//! Record schema: the fixed ordered feature set every other component
//! depends on.
//!
//! The ordered feature list used to build the training matrix MUST be
//! identical, in name and order, to the feature list supplied at inference
//! time. A mismatch is a schema error, never silently tolerated.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of features in the fixed schema
pub const FEATURE_COUNT: usize = 6;

/// Canonical ordered feature names (case-sensitive column headers)
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "ESI",
    "Mass",
    "Radius",
    "Magnitude",
    "Distance",
    "InclineAngle",
];

/// One feature of the fixed schema, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Earth Similarity Index, a normalized [0, 1] habitability proxy
    Esi,
    /// Mass relative to a reference giant planet (> 0)
    Mass,
    /// Radius relative to a reference giant planet (> 0)
    Radius,
    /// Apparent brightness (can be negative)
    Magnitude,
    /// Distance in light-years (>= 0)
    Distance,
    /// Orbital inclination in degrees ([0, 90] nominal)
    InclineAngle,
}

impl Feature {
    /// All features in canonical order
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::Esi,
        Self::Mass,
        Self::Radius,
        Self::Magnitude,
        Self::Distance,
        Self::InclineAngle,
    ];

    /// Exact column name for this feature (case-sensitive)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Esi => "ESI",
            Self::Mass => "Mass",
            Self::Radius => "Radius",
            Self::Magnitude => "Magnitude",
            Self::Distance => "Distance",
            Self::InclineAngle => "InclineAngle",
        }
    }

    /// Position of this feature in the canonical order
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Esi => 0,
            Self::Mass => 1,
            Self::Radius => 2,
            Self::Magnitude => 3,
            Self::Distance => 4,
            Self::InclineAngle => 5,
        }
    }

    /// Recommended `(low, high)` display range for this feature.
    ///
    /// Consumed by presentation layers for input hints; never enforced by
    /// the pipeline itself.
    #[must_use]
    pub const fn recommended_range(self) -> (f64, f64) {
        match self {
            Self::Esi => (0.9, 1.0),
            Self::Mass => (0.1, 1.0),
            Self::Radius => (0.1, 1.5),
            Self::Magnitude => (10.0, 16.0),
            Self::Distance => (0.0, 200.0),
            Self::InclineAngle => (85.0, 90.0),
        }
    }
}

/// The ordered feature-name list as owned strings.
///
/// This is the list a trained model stores and the model store checks
/// artifacts against.
#[must_use]
pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|name| (*name).to_string()).collect()
}

/// Check a stored feature-name list against the schema currently in effect.
#[must_use]
pub fn matches_schema(names: &[String]) -> bool {
    names.len() == FEATURE_COUNT
        && names
            .iter()
            .zip(FEATURE_NAMES)
            .all(|(stored, expected)| stored == expected)
}

/// One candidate object.
///
/// Every field is optional: a missing value is `None`, and the pipeline
/// imputes it from per-feature means. Non-finite values are treated as
/// missing. The ground-truth label is NOT a record field; it exists only
/// inside a [`TrainingDataset`](crate::dataset::TrainingDataset) after the
/// label rule runs.
///
/// Unknown fields in serialized input are ignored on deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExoplanetRecord {
    /// Earth Similarity Index
    #[serde(rename = "ESI", default, skip_serializing_if = "Option::is_none")]
    pub esi: Option<f64>,
    /// Mass relative to the reference giant planet
    #[serde(rename = "Mass", default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    /// Radius relative to the reference giant planet
    #[serde(rename = "Radius", default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Apparent brightness
    #[serde(rename = "Magnitude", default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    /// Distance in light-years
    #[serde(rename = "Distance", default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Orbital inclination in degrees
    #[serde(rename = "InclineAngle", default, skip_serializing_if = "Option::is_none")]
    pub incline_angle: Option<f64>,
}

impl ExoplanetRecord {
    /// Create a builder for constructing a record field by field.
    #[must_use]
    pub fn builder() -> ExoplanetRecordBuilder {
        ExoplanetRecordBuilder::default()
    }

    /// Observed value for a feature.
    ///
    /// Returns `None` when the field is absent or non-finite; both count as
    /// missing for labeling, imputation, and inference.
    #[must_use]
    pub fn value(&self, feature: Feature) -> Option<f64> {
        let raw = match feature {
            Feature::Esi => self.esi,
            Feature::Mass => self.mass,
            Feature::Radius => self.radius,
            Feature::Magnitude => self.magnitude,
            Feature::Distance => self.distance,
            Feature::InclineAngle => self.incline_angle,
        };
        raw.filter(|v| v.is_finite())
    }

    /// Set a feature value (`None` clears it).
    pub fn set(&mut self, feature: Feature, value: Option<f64>) {
        let slot = match feature {
            Feature::Esi => &mut self.esi,
            Feature::Mass => &mut self.mass,
            Feature::Radius => &mut self.radius,
            Feature::Magnitude => &mut self.magnitude,
            Feature::Distance => &mut self.distance,
            Feature::InclineAngle => &mut self.incline_angle,
        };
        *slot = value;
    }

    /// Convert to the ordered feature vector without imputation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if any feature is missing; use
    /// [`to_vector_imputed`](Self::to_vector_imputed) once imputation values
    /// are defined.
    pub fn to_vector(&self) -> Result<[f64; FEATURE_COUNT]> {
        let mut out = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            out[feature.index()] = self.value(feature).ok_or_else(|| {
                Error::Schema(format!(
                    "feature '{}' is missing and no imputation value is defined for it",
                    feature.name()
                ))
            })?;
        }
        Ok(out)
    }

    /// Convert to the ordered feature vector, substituting `fill` for
    /// missing values.
    ///
    /// `fill` must be the per-feature imputation means in canonical order.
    #[must_use]
    pub fn to_vector_imputed(&self, fill: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            let i = feature.index();
            out[i] = self.value(feature).unwrap_or(fill[i]);
        }
        out
    }
}

/// Builder for [`ExoplanetRecord`].
#[derive(Debug, Default)]
pub struct ExoplanetRecordBuilder {
    record: ExoplanetRecord,
}

impl ExoplanetRecordBuilder {
    /// Set the Earth Similarity Index.
    #[must_use]
    pub const fn esi(mut self, value: f64) -> Self {
        self.record.esi = Some(value);
        self
    }

    /// Set the relative mass.
    #[must_use]
    pub const fn mass(mut self, value: f64) -> Self {
        self.record.mass = Some(value);
        self
    }

    /// Set the relative radius.
    #[must_use]
    pub const fn radius(mut self, value: f64) -> Self {
        self.record.radius = Some(value);
        self
    }

    /// Set the apparent magnitude.
    #[must_use]
    pub const fn magnitude(mut self, value: f64) -> Self {
        self.record.magnitude = Some(value);
        self
    }

    /// Set the distance in light-years.
    #[must_use]
    pub const fn distance(mut self, value: f64) -> Self {
        self.record.distance = Some(value);
        self
    }

    /// Set the orbital inclination in degrees.
    #[must_use]
    pub const fn incline_angle(mut self, value: f64) -> Self {
        self.record.incline_angle = Some(value);
        self
    }

    /// Build the record.
    #[must_use]
    pub fn build(self) -> ExoplanetRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_matches_names() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
            assert_eq!(feature.name(), FEATURE_NAMES[i]);
        }
    }

    #[test]
    fn test_to_vector_requires_all_features() {
        let record = ExoplanetRecord::builder().esi(0.9).mass(0.3).build();
        let err = record.to_vector().unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert!(err.to_string().contains("Radius"));
    }

    #[test]
    fn test_to_vector_complete_record() {
        let record = ExoplanetRecord::builder()
            .esi(0.95)
            .mass(0.1)
            .radius(0.6)
            .magnitude(10.0)
            .distance(25.0)
            .incline_angle(88.0)
            .build();
        let vector = record.to_vector().unwrap();
        assert_eq!(vector, [0.95, 0.1, 0.6, 10.0, 25.0, 88.0]);
    }

    #[test]
    fn test_non_finite_values_count_as_missing() {
        let mut record = ExoplanetRecord::default();
        record.set(Feature::Esi, Some(f64::NAN));
        record.set(Feature::Mass, Some(f64::INFINITY));
        assert_eq!(record.value(Feature::Esi), None);
        assert_eq!(record.value(Feature::Mass), None);
    }

    #[test]
    fn test_imputed_vector_fills_missing_only() {
        let record = ExoplanetRecord::builder().esi(0.5).build();
        let fill = [0.9, 1.0, 2.0, 3.0, 4.0, 5.0];
        let vector = record.to_vector_imputed(&fill);
        assert_eq!(vector[0], 0.5);
        assert_eq!(&vector[1..], &fill[1..]);
    }

    #[test]
    fn test_serde_uses_exact_column_names() {
        let record = ExoplanetRecord::builder().esi(0.91).distance(42.0).build();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["ESI"], 0.91);
        assert_eq!(json["Distance"], 42.0);
        assert!(json.get("esi").is_none());
    }

    #[test]
    fn test_unknown_fields_ignored_on_deserialize() {
        let json = serde_json::json!({
            "ESI": 0.95,
            "Mass": 0.1,
            "DiscoveryTelescope": "HWO",
        });
        let record: ExoplanetRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.esi, Some(0.95));
        assert_eq!(record.mass, Some(0.1));
        assert_eq!(record.radius, None);
    }

    #[test]
    fn test_recommended_ranges_are_ordered() {
        for feature in Feature::ALL {
            let (low, high) = feature.recommended_range();
            assert!(low < high, "{} range inverted", feature.name());
        }
    }

    #[test]
    fn test_matches_schema() {
        assert!(matches_schema(&feature_names()));
        let mut wrong = feature_names();
        wrong.swap(0, 1);
        assert!(!matches_schema(&wrong));
        assert!(!matches_schema(&wrong[..4].to_vec()));
    }
}
