//! Feature encoding for salary inference
//!
//! Maps a raw profile into the fixed-order numeric columns the salary
//! model was trained on: an education score, the raw experience years,
//! four language flags, a derived skill count, and a one-hot country
//! encoding with "Other" as the implicit baseline.

use crate::models::{Country, FeatureVector, ProfileInput};

/// Number of input features expected by the model
pub const NUM_FEATURES: usize = 10;

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Encode a profile into the model's feature columns
///
/// Pure and deterministic. Years of experience pass through unchanged;
/// the input surface is responsible for bounding them to the slider
/// range. Exactly one country indicator is set, or none when the country
/// is the baseline.
pub fn encode(input: &ProfileInput) -> FeatureVector {
    let java = flag(input.knows_java);
    let python = flag(input.knows_python);
    let sql = flag(input.knows_sql);
    let go = flag(input.knows_go);
    let skill_count = java + python + sql + go;

    FeatureVector::from_columns(vec![
        ("Education".to_string(), input.education.score()),
        ("YearsCoding".to_string(), f32::from(input.years_coding)),
        ("Java".to_string(), java),
        ("Python".to_string(), python),
        ("SQL".to_string(), sql),
        ("Go".to_string(), go),
        ("SkillCount".to_string(), skill_count),
        (
            "Country_Germany".to_string(),
            flag(input.country == Country::Germany),
        ),
        (
            "Country_United Kingdom".to_string(),
            flag(input.country == Country::UnitedKingdom),
        ),
        (
            "Country_United States".to_string(),
            flag(input.country == Country::UnitedStates),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::FEATURE_COLUMNS;
    use crate::models::Education;

    fn profile() -> ProfileInput {
        ProfileInput {
            education: Education::Bachelors,
            years_coding: 5,
            country: Country::UnitedStates,
            knows_java: true,
            knows_python: true,
            knows_sql: false,
            knows_go: false,
        }
    }

    #[test]
    fn test_encode_produces_all_columns_in_order() {
        let vector = encode(&profile());
        let names: Vec<&str> = vector.names().collect();
        assert_eq!(names, FEATURE_COLUMNS);
        assert_eq!(vector.len(), NUM_FEATURES);
    }

    #[test]
    fn test_bachelor_us_scenario() {
        let vector = encode(&profile());
        assert_eq!(
            vector.values(),
            vec![1.0, 5.0, 1.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_skill_count_sums_language_flags() {
        let mut input = profile();
        assert_eq!(encode(&input).get("SkillCount"), Some(2.0));

        input.knows_sql = true;
        input.knows_go = true;
        assert_eq!(encode(&input).get("SkillCount"), Some(4.0));

        input.knows_java = false;
        input.knows_python = false;
        input.knows_sql = false;
        input.knows_go = false;
        assert_eq!(encode(&input).get("SkillCount"), Some(0.0));
    }

    #[test]
    fn test_country_one_hot_is_exclusive() {
        for (country, expected) in [
            (Country::Germany, [1.0, 0.0, 0.0]),
            (Country::UnitedKingdom, [0.0, 1.0, 0.0]),
            (Country::UnitedStates, [0.0, 0.0, 1.0]),
            (Country::Other, [0.0, 0.0, 0.0]),
        ] {
            let input = ProfileInput { country, ..profile() };
            let vector = encode(&input);
            assert_eq!(vector.get("Country_Germany"), Some(expected[0]));
            assert_eq!(vector.get("Country_United Kingdom"), Some(expected[1]));
            assert_eq!(vector.get("Country_United States"), Some(expected[2]));
        }
    }

    #[test]
    fn test_columns_stay_in_documented_ranges() {
        for education in Education::ALL {
            for country in Country::ALL {
                let input = ProfileInput {
                    education,
                    years_coding: 40,
                    country,
                    knows_java: true,
                    knows_python: false,
                    knows_sql: true,
                    knows_go: false,
                };
                let vector = encode(&input);
                let education_score = vector.get("Education").unwrap();
                assert!((0.0..=3.0).contains(&education_score));
                let years = vector.get("YearsCoding").unwrap();
                assert!((0.0..=40.0).contains(&years));
                let skills = vector.get("SkillCount").unwrap();
                assert!((0.0..=4.0).contains(&skills));
                for name in ["Java", "Python", "SQL", "Go"] {
                    let value = vector.get(name).unwrap();
                    assert!(value == 0.0 || value == 1.0);
                }
            }
        }
    }
}
