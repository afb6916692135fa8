//! Health readings and the threshold classifier that turns them into a
//! per-disease risk assessment.

mod assessment;
mod classifier;
mod reading;

pub use assessment::{Disease, RiskAssessment, RiskLevel};
pub use classifier::{classify, diabetes_risk, heart_disease_risk, hypertension_risk};
pub use reading::{Gender, HealthReading};
