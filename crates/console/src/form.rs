//! Input collection boundary: the field table that drives the form widgets,
//! and the range checks applied before anything reaches the classifier.

use risk_model::{Gender, HealthReading};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Accepts a fractional value; every other field is a whole number.
    pub decimal: bool,
}

pub const NUMERIC_FIELDS: [FieldSpec; 7] = [
    integer_field("age", "Age", 1.0, 120.0),
    integer_field("systolic", "Systolic BP (mmHg)", 50.0, 250.0),
    integer_field("diastolic", "Diastolic BP (mmHg)", 30.0, 150.0),
    integer_field("sugar", "Fasting Blood Sugar (mg/dL)", 50.0, 300.0),
    FieldSpec {
        name: "bmi",
        label: "BMI",
        min: 10.0,
        max: 50.0,
        step: 0.1,
        decimal: true,
    },
    integer_field("cholesterol", "Cholesterol (mg/dL)", 100.0, 400.0),
    integer_field("heart_rate", "Heart Rate (bpm)", 40.0, 200.0),
];

const fn integer_field(name: &'static str, label: &'static str, min: f64, max: f64) -> FieldSpec {
    FieldSpec {
        name,
        label,
        min,
        max,
        step: 1.0,
        decimal: false,
    }
}

impl FieldSpec {
    pub fn format_bound(&self, value: f64) -> String {
        if self.decimal {
            format!("{value:.1}")
        } else {
            format!("{value:.0}")
        }
    }

    fn check_range(&self, value: f64) -> Result<f64, FieldError> {
        if value < self.min || value > self.max {
            return Err(FieldError::new(
                self.name,
                format!(
                    "{} must be between {} and {}",
                    self.label,
                    self.format_bound(self.min),
                    self.format_bound(self.max)
                ),
            ));
        }
        Ok(value)
    }

    fn required(&self) -> FieldError {
        FieldError::new(self.name, format!("{} is required", self.label))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw form submission. Values stay as text so a bad number turns into a
/// field message instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingForm {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub systolic: String,
    #[serde(default)]
    pub diastolic: String,
    #[serde(default)]
    pub sugar: String,
    #[serde(default)]
    pub bmi: String,
    #[serde(default)]
    pub cholesterol: String,
    #[serde(default)]
    pub heart_rate: String,
}

impl ReadingForm {
    /// What the page shows before the first submission: every field at its
    /// lower bound.
    pub fn initial() -> Self {
        let mut form = Self {
            gender: Gender::Male.as_str().to_string(),
            ..Self::default()
        };
        for spec in &NUMERIC_FIELDS {
            *form.slot_mut(spec.name) = spec.format_bound(spec.min);
        }
        form
    }

    pub fn value(&self, name: &str) -> &str {
        match name {
            "age" => &self.age,
            "gender" => &self.gender,
            "systolic" => &self.systolic,
            "diastolic" => &self.diastolic,
            "sugar" => &self.sugar,
            "bmi" => &self.bmi,
            "cholesterol" => &self.cholesterol,
            "heart_rate" => &self.heart_rate,
            _ => "",
        }
    }

    fn slot_mut(&mut self, name: &str) -> &mut String {
        match name {
            "age" => &mut self.age,
            "systolic" => &mut self.systolic,
            "diastolic" => &mut self.diastolic,
            "sugar" => &mut self.sugar,
            "bmi" => &mut self.bmi,
            "cholesterol" => &mut self.cholesterol,
            "heart_rate" => &mut self.heart_rate,
            _ => &mut self.gender,
        }
    }

    /// Parses and range-checks every field, collecting one message per bad field.
    pub fn parse(&self) -> Result<HealthReading, Vec<FieldError>> {
        collect_reading(
            |spec| parse_number(spec, self.value(spec.name)),
            parse_gender(&self.gender),
        )
    }
}

/// JSON body of the assess endpoint. Numbers are taken as plain JSON numbers
/// so a negative or oversized value reaches the range check instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingPayload {
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub systolic: Option<f64>,
    #[serde(default)]
    pub diastolic: Option<f64>,
    #[serde(default)]
    pub sugar: Option<f64>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub cholesterol: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
}

impl ReadingPayload {
    fn value(&self, name: &str) -> Option<f64> {
        match name {
            "age" => self.age,
            "systolic" => self.systolic,
            "diastolic" => self.diastolic,
            "sugar" => self.sugar,
            "bmi" => self.bmi,
            "cholesterol" => self.cholesterol,
            "heart_rate" => self.heart_rate,
            _ => None,
        }
    }

    /// Same checks and messages as the HTML form.
    pub fn parse(&self) -> Result<HealthReading, Vec<FieldError>> {
        let gender = match self.gender.as_deref() {
            Some(raw) => parse_gender(raw),
            None => Err(FieldError::new("gender", "Gender is required")),
        };
        collect_reading(
            |spec| {
                let value = self.value(spec.name).ok_or_else(|| spec.required())?;
                if !spec.decimal && value.fract() != 0.0 {
                    return Err(FieldError::new(
                        spec.name,
                        format!("{} must be a whole number", spec.label),
                    ));
                }
                spec.check_range(value)
            },
            gender,
        )
    }
}

fn collect_reading(
    mut number: impl FnMut(&FieldSpec) -> Result<f64, FieldError>,
    gender: Result<Gender, FieldError>,
) -> Result<HealthReading, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut numbers = [0.0f64; NUMERIC_FIELDS.len()];
    for (slot, spec) in numbers.iter_mut().zip(NUMERIC_FIELDS.iter()) {
        match number(spec) {
            Ok(value) => *slot = value,
            Err(err) => errors.push(err),
        }
    }
    let gender = gender.unwrap_or_else(|err| {
        errors.push(err);
        Gender::Other
    });
    if !errors.is_empty() {
        return Err(errors);
    }

    // Range checks above keep every integer field inside u16.
    let [age, systolic, diastolic, sugar, bmi, cholesterol, heart_rate] = numbers;
    Ok(HealthReading {
        age: age as u16,
        gender,
        systolic: systolic as u16,
        diastolic: diastolic as u16,
        sugar: sugar as u16,
        bmi,
        cholesterol: cholesterol as u16,
        heart_rate: heart_rate as u16,
    })
}

fn parse_number(spec: &FieldSpec, raw: &str) -> Result<f64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(spec.required());
    }
    let value = if spec.decimal {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| FieldError::new(spec.name, format!("{} must be a number", spec.label)))?
    } else {
        let whole = raw.parse::<i64>().map_err(|_| {
            FieldError::new(spec.name, format!("{} must be a whole number", spec.label))
        })?;
        whole as f64
    };
    spec.check_range(value)
}

fn parse_gender(raw: &str) -> Result<Gender, FieldError> {
    let normalized = raw.trim().to_lowercase();
    Gender::ALL
        .into_iter()
        .find(|gender| gender.as_str() == normalized)
        .ok_or_else(|| FieldError::new("gender", "Gender must be one of Male, Female, Other"))
}
