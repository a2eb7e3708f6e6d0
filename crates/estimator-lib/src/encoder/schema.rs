//! Feature schema validation
//!
//! The model reads its input positionally and has no schema awareness: a
//! vector with the wrong columns would be silently misinterpreted rather
//! than rejected. This gate compares a vector's column set against the
//! training schema before any prediction runs.

use crate::models::FeatureVector;
use thiserror::Error;

/// Column names in training order
pub const FEATURE_COLUMNS: [&str; 10] = [
    "Education",
    "YearsCoding",
    "Java",
    "Python",
    "SQL",
    "Go",
    "SkillCount",
    "Country_Germany",
    "Country_United Kingdom",
    "Country_United States",
];

/// Schema validation failures, all user-visible
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("feature vector is missing expected columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("feature vector has unexpected columns: {}", .0.join(", "))]
    ExtraColumns(Vec<String>),
    #[error("feature vector has {actual} columns, expected {expected}")]
    ColumnCountMismatch { expected: usize, actual: usize },
}

/// Validates feature vectors against the model's training schema
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    expected: Vec<&'static str>,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureSchema {
    pub fn new() -> Self {
        Self {
            expected: FEATURE_COLUMNS.to_vec(),
        }
    }

    /// Check that the vector carries exactly the expected columns
    ///
    /// Missing columns are reported before extra ones; the count check
    /// catches duplicated names that the set comparisons would miss. On
    /// any failure the vector must not reach the model.
    pub fn validate(&self, vector: &FeatureVector) -> Result<(), SchemaError> {
        let actual: Vec<&str> = vector.names().collect();

        let missing: Vec<String> = self
            .expected
            .iter()
            .filter(|name| !actual.iter().any(|a| a == *name))
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }

        let extra: Vec<String> = actual
            .iter()
            .filter(|a| !self.expected.iter().any(|name| name == *a))
            .map(|a| (*a).to_string())
            .collect();
        if !extra.is_empty() {
            return Err(SchemaError::ExtraColumns(extra));
        }

        if actual.len() != self.expected.len() {
            return Err(SchemaError::ColumnCountMismatch {
                expected: self.expected.len(),
                actual: actual.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::models::{Country, Education, ProfileInput};

    fn encoded() -> FeatureVector {
        encode(&ProfileInput {
            education: Education::Masters,
            years_coding: 12,
            country: Country::Germany,
            knows_java: false,
            knows_python: true,
            knows_sql: true,
            knows_go: false,
        })
    }

    #[test]
    fn test_encoded_vector_always_validates() {
        let schema = FeatureSchema::new();
        for country in Country::ALL {
            let vector = encode(&ProfileInput {
                education: Education::PhD,
                years_coding: 0,
                country,
                knows_java: false,
                knows_python: false,
                knows_sql: false,
                knows_go: false,
            });
            assert_eq!(schema.validate(&vector), Ok(()));
        }
    }

    #[test]
    fn test_missing_column_is_named() {
        let schema = FeatureSchema::new();
        let mut vector = encoded();
        vector.remove("SkillCount");

        assert_eq!(
            schema.validate(&vector),
            Err(SchemaError::MissingColumns(vec!["SkillCount".to_string()]))
        );
    }

    #[test]
    fn test_extra_column_is_named() {
        let schema = FeatureSchema::new();
        let mut vector = encoded();
        vector.push("Rust", 1.0);

        assert_eq!(
            schema.validate(&vector),
            Err(SchemaError::ExtraColumns(vec!["Rust".to_string()]))
        );
    }

    #[test]
    fn test_duplicate_column_trips_count_check() {
        let schema = FeatureSchema::new();
        let mut vector = encoded();
        vector.push("Education", 1.0);

        assert_eq!(
            schema.validate(&vector),
            Err(SchemaError::ColumnCountMismatch {
                expected: 10,
                actual: 11,
            })
        );
    }

    #[test]
    fn test_error_messages_name_offenders() {
        let schema = FeatureSchema::new();
        let mut vector = encoded();
        vector.remove("Country_United Kingdom");
        let message = schema.validate(&vector).unwrap_err().to_string();
        assert!(message.contains("Country_United Kingdom"), "{message}");

        let mut vector = encoded();
        vector.push("Rust", 1.0);
        let message = schema.validate(&vector).unwrap_err().to_string();
        assert!(message.contains("Rust"), "{message}");
    }
}
