//! Core data models for the salary estimator

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading a profile from the input surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The education control is a closed select, so this only fires when a
    /// caller bypasses the form and posts a label we have never seen.
    #[error("unknown education level: {0:?}")]
    UnknownEducationLevel(String),
}

/// Highest education level, scored 0-3 for the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    HighSchool,
    Bachelors,
    Masters,
    PhD,
}

impl Education {
    pub const ALL: [Education; 4] = [
        Education::HighSchool,
        Education::Bachelors,
        Education::Masters,
        Education::PhD,
    ];

    /// Numeric score the model was trained on
    pub fn score(&self) -> f32 {
        match self {
            Education::HighSchool => 0.0,
            Education::Bachelors => 1.0,
            Education::Masters => 2.0,
            Education::PhD => 3.0,
        }
    }

    /// Display label used by the form control
    pub fn label(&self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Bachelors => "Bachelor's Degree",
            Education::Masters => "Master's Degree",
            Education::PhD => "PhD",
        }
    }
}

impl FromStr for Education {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High School" => Ok(Education::HighSchool),
            "Bachelor's Degree" => Ok(Education::Bachelors),
            "Master's Degree" => Ok(Education::Masters),
            "PhD" => Ok(Education::PhD),
            other => Err(ProfileError::UnknownEducationLevel(other.to_string())),
        }
    }
}

/// Country of residence
///
/// Parsing is total: any label outside the three encoded countries folds
/// into `Other`, the one-hot baseline. The model has no indicator column
/// for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    UnitedStates,
    UnitedKingdom,
    Germany,
    Other,
}

impl Country {
    pub const ALL: [Country; 4] = [
        Country::UnitedStates,
        Country::UnitedKingdom,
        Country::Germany,
        Country::Other,
    ];

    /// Display label used by the form control
    pub fn label(&self) -> &'static str {
        match self {
            Country::UnitedStates => "United States",
            Country::UnitedKingdom => "United Kingdom",
            Country::Germany => "Germany",
            Country::Other => "Other",
        }
    }

    /// Map a form label to a country, folding unrecognized values into
    /// `Other`
    pub fn from_label(s: &str) -> Self {
        match s {
            "United States" => Country::UnitedStates,
            "United Kingdom" => Country::UnitedKingdom,
            "Germany" => Country::Germany,
            _ => Country::Other,
        }
    }
}

/// A single user profile as read from the input surface
///
/// Built fresh per request and immutable once read for a prediction. The
/// years value is bounded by the input surface; the encoder does not
/// re-validate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInput {
    pub education: Education,
    pub years_coding: u8,
    pub country: Country,
    pub knows_java: bool,
    pub knows_python: bool,
    pub knows_sql: bool,
    pub knows_go: bool,
}

/// Ordered, named numeric columns handed to the model
///
/// The model has no schema awareness and reads positionally, so column
/// order and count must exactly match the order it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    columns: Vec<(String, f32)>,
}

impl FeatureVector {
    pub fn from_columns(columns: Vec<(String, f32)>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Column values in order, ready for the input tensor
    pub fn values(&self) -> Vec<f32> {
        self.columns.iter().map(|(_, value)| *value).collect()
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    /// Append a column at the end
    pub fn push(&mut self, name: impl Into<String>, value: f32) {
        self.columns.push((name.into(), value));
    }

    /// Remove a column by name, returning its value if it was present
    pub fn remove(&mut self, name: &str) -> Option<f32> {
        let idx = self.columns.iter().position(|(n, _)| n == name)?;
        Some(self.columns.remove(idx).1)
    }
}

/// Prediction output with the heuristic low/high band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryEstimate {
    pub predicted_usd: f32,
    pub low_usd: f32,
    pub high_usd: f32,
    pub model_version: String,
    pub generated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_scores_are_ordered() {
        let scores: Vec<f32> = Education::ALL.iter().map(|e| e.score()).collect();
        assert_eq!(scores, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_education_labels_round_trip() {
        for education in Education::ALL {
            assert_eq!(education.label().parse::<Education>(), Ok(education));
        }
    }

    #[test]
    fn test_unknown_education_is_rejected() {
        let err = "Bootcamp".parse::<Education>().unwrap_err();
        assert_eq!(
            err,
            ProfileError::UnknownEducationLevel("Bootcamp".to_string())
        );
    }

    #[test]
    fn test_unrecognized_country_folds_into_other() {
        assert_eq!(Country::from_label("Germany"), Country::Germany);
        assert_eq!(Country::from_label("Atlantis"), Country::Other);
        assert_eq!(Country::from_label(""), Country::Other);
    }

    #[test]
    fn test_feature_vector_serializes_in_column_order() {
        let vector =
            FeatureVector::from_columns(vec![("A".to_string(), 1.0), ("B".to_string(), 0.0)]);
        let json = serde_json::to_string(&vector).unwrap();
        assert_eq!(json, r#"{"columns":[["A",1.0],["B",0.0]]}"#);
    }

    #[test]
    fn test_feature_vector_column_access() {
        let mut vector =
            FeatureVector::from_columns(vec![("A".to_string(), 1.0), ("B".to_string(), 2.0)]);
        assert_eq!(vector.len(), 2);
        assert_eq!(vector.get("B"), Some(2.0));
        assert_eq!(vector.remove("A"), Some(1.0));
        assert_eq!(vector.get("A"), None);
        assert_eq!(vector.values(), vec![2.0]);
    }
}
