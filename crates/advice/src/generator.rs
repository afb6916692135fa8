use async_trait::async_trait;
use risk_model::{HealthReading, RiskAssessment};

use crate::error::AdviceError;

#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    async fn generate(
        &self,
        reading: &HealthReading,
        assessment: &RiskAssessment,
    ) -> Result<String, AdviceError>;
}

/// Stands in for the real client when no credential could be resolved.
/// Every call fails with the configuration error captured at startup.
#[derive(Debug, Clone)]
pub struct UnconfiguredAdvice {
    reason: String,
}

impl UnconfiguredAdvice {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn from_error(err: &AdviceError) -> Self {
        match err {
            AdviceError::Configuration(reason) => Self::new(reason.clone()),
            other => Self::new(other.to_string()),
        }
    }
}

#[async_trait]
impl AdviceGenerator for UnconfiguredAdvice {
    async fn generate(
        &self,
        _reading: &HealthReading,
        _assessment: &RiskAssessment,
    ) -> Result<String, AdviceError> {
        Err(AdviceError::Configuration(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_model::{classify, Gender};

    fn sample_reading() -> HealthReading {
        HealthReading {
            age: 30,
            gender: Gender::Female,
            systolic: 110,
            diastolic: 70,
            sugar: 90,
            bmi: 21.0,
            cholesterol: 180,
            heart_rate: 64,
        }
    }

    #[tokio::test]
    async fn unconfigured_always_reports_configuration() {
        let reading = sample_reading();
        let generator = UnconfiguredAdvice::new("GEMINI_API_KEY not set");
        let err = generator
            .generate(&reading, &classify(&reading))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AdviceError::Configuration("GEMINI_API_KEY not set".to_string())
        );
    }

    #[tokio::test]
    async fn keeps_reason_from_configuration_error() {
        let reading = sample_reading();
        let source = AdviceError::Configuration("no key".to_string());
        let err = UnconfiguredAdvice::from_error(&source)
            .generate(&reading, &classify(&reading))
            .await
            .unwrap_err();
        assert_eq!(err, source);
    }

    #[tokio::test]
    async fn other_errors_become_configuration_reason() {
        let reading = sample_reading();
        let source = AdviceError::service(Some(500), "boom");
        let err = UnconfiguredAdvice::from_error(&source)
            .generate(&reading, &classify(&reading))
            .await
            .unwrap_err();
        assert_eq!(err, AdviceError::Configuration(source.to_string()));
    }
}
