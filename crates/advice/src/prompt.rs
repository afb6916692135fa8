use risk_model::{HealthReading, RiskAssessment};

/// Builds the instruction sent to the text model: the robot-assistant
/// persona, the raw reading, the computed risks, and what to write back.
pub fn build_prompt(reading: &HealthReading, assessment: &RiskAssessment) -> String {
    let risks = assessment
        .iter()
        .map(|(disease, level)| format!("{disease}: {level}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are a futuristic AI medical assistant robot.\n\
         User Health Data: {}\n\
         Calculated Risk Results: {risks}\n\
         Task: Predict the user's health risks in friendly robot style.\n\
         Add motivational tips and a disclaimer.",
        describe_reading(reading)
    )
}

fn describe_reading(reading: &HealthReading) -> String {
    format!(
        "Age: {}, Gender: {}, Systolic BP: {} mmHg, Diastolic BP: {} mmHg, \
         Sugar: {} mg/dL, BMI: {:.1}, Cholesterol: {} mg/dL, Heart Rate: {} bpm",
        reading.age,
        reading.gender,
        reading.systolic,
        reading.diastolic,
        reading.sugar,
        reading.bmi,
        reading.cholesterol,
        reading.heart_rate
    )
}
