use crate::assessment::{RiskAssessment, RiskLevel};
use crate::reading::HealthReading;

const SUGAR_HIGH: u16 = 126;
const SUGAR_MODERATE: u16 = 100;
const SYSTOLIC_HIGH: u16 = 140;
const SYSTOLIC_MODERATE: u16 = 120;
const DIASTOLIC_HIGH: u16 = 90;
const DIASTOLIC_MODERATE: u16 = 80;
const CHOLESTEROL_HIGH: u16 = 240;
const CHOLESTEROL_MODERATE: u16 = 200;
const CARDIAC_AGE: u16 = 45;

/// Classifies a reading into the three disease risks.
///
/// Gender, BMI and heart rate are carried on the reading but do not take part
/// in any rule.
pub fn classify(reading: &HealthReading) -> RiskAssessment {
    RiskAssessment {
        diabetes: diabetes_risk(reading.sugar),
        hypertension: hypertension_risk(reading.systolic, reading.diastolic),
        heart_disease: heart_disease_risk(reading.cholesterol, reading.systolic, reading.age),
    }
}

pub fn diabetes_risk(sugar: u16) -> RiskLevel {
    if sugar > SUGAR_HIGH {
        RiskLevel::High
    } else if sugar > SUGAR_MODERATE {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn hypertension_risk(systolic: u16, diastolic: u16) -> RiskLevel {
    if systolic >= SYSTOLIC_HIGH || diastolic >= DIASTOLIC_HIGH {
        RiskLevel::High
    } else if systolic >= SYSTOLIC_MODERATE || diastolic >= DIASTOLIC_MODERATE {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

// Systolic is strictly above 140 here, unlike the >= used for hypertension.
pub fn heart_disease_risk(cholesterol: u16, systolic: u16, age: u16) -> RiskLevel {
    if cholesterol > CHOLESTEROL_HIGH || (systolic > SYSTOLIC_HIGH && age > CARDIAC_AGE) {
        RiskLevel::High
    } else if cholesterol > CHOLESTEROL_MODERATE {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}
