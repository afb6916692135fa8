use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk label. Variant order is the severity order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    /// 1 for Low, 2 for Moderate, 3 for High.
    pub fn score(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Moderate => 2,
            RiskLevel::High => 3,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disease {
    Diabetes,
    Hypertension,
    HeartDisease,
}

impl Disease {
    pub const ALL: [Disease; 3] = [Disease::Diabetes, Disease::Hypertension, Disease::HeartDisease];

    pub fn name(self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes",
            Disease::Hypertension => "Hypertension",
            Disease::HeartDisease => "Heart Disease",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Risk label for each of the three tracked diseases.
///
/// Serializes as `{"Diabetes": .., "Hypertension": .., "Heart Disease": ..}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(deny_unknown_fields)]
pub struct RiskAssessment {
    #[serde(rename = "Diabetes")]
    pub diabetes: RiskLevel,
    #[serde(rename = "Hypertension")]
    pub hypertension: RiskLevel,
    #[serde(rename = "Heart Disease")]
    pub heart_disease: RiskLevel,
}

impl RiskAssessment {
    pub fn get(&self, disease: Disease) -> RiskLevel {
        match disease {
            Disease::Diabetes => self.diabetes,
            Disease::Hypertension => self.hypertension,
            Disease::HeartDisease => self.heart_disease,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Disease, RiskLevel)> + '_ {
        Disease::ALL.into_iter().map(|disease| (disease, self.get(disease)))
    }

    pub fn all_low(&self) -> bool {
        self.iter().all(|(_, level)| level == RiskLevel::Low)
    }
}
