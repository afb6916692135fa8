use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Female")]
    Female,
    #[serde(alias = "Other")]
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Wire value used in forms and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One set of measurements submitted by a user.
///
/// Range checks belong to whoever collects the values; the classifier accepts
/// anything that fits the field types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HealthReading {
    pub age: u16,
    pub gender: Gender,
    /// Systolic blood pressure, mmHg.
    pub systolic: u16,
    /// Diastolic blood pressure, mmHg.
    pub diastolic: u16,
    /// Fasting blood sugar, mg/dL.
    pub sugar: u16,
    pub bmi: f64,
    /// Total cholesterol, mg/dL.
    pub cholesterol: u16,
    /// Resting heart rate, bpm.
    pub heart_rate: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_accepts_lowercase_and_capitalized() {
        let lower: Gender = serde_json::from_str("\"female\"").expect("lowercase");
        let upper: Gender = serde_json::from_str("\"Female\"").expect("capitalized");
        assert_eq!(lower, Gender::Female);
        assert_eq!(upper, Gender::Female);
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn reading_requires_every_field() {
        let input = r#"{"age":30,"gender":"male","systolic":110,"diastolic":70,"sugar":90,"bmi":22.5,"cholesterol":180}"#;
        let parsed: Result<HealthReading, _> = serde_json::from_str(input);
        assert!(parsed.is_err());
    }

    #[test]
    fn reading_parses_full_record() {
        let input = r#"{"age":30,"gender":"male","systolic":110,"diastolic":70,"sugar":90,"bmi":22.5,"cholesterol":180,"heart_rate":72}"#;
        let parsed: HealthReading = serde_json::from_str(input).expect("reading");
        assert_eq!(parsed.age, 30);
        assert_eq!(parsed.gender, Gender::Male);
        assert_eq!(parsed.heart_rate, 72);
        assert!((parsed.bmi - 22.5).abs() < f64::EPSILON);
    }
}
