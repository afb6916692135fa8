use risk_model::{RiskAssessment, RiskLevel};
use std::fmt::Write;

pub fn level_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "green",
        RiskLevel::Moderate => "orange",
        RiskLevel::High => "red",
    }
}

/// One colored card per disease, in assessment order.
pub fn risk_cards(assessment: &RiskAssessment) -> String {
    let mut html = String::from("<div class=\"risk-cards\">\n");
    for (disease, level) in assessment.iter() {
        let _ = writeln!(
            html,
            "  <div class=\"risk-card\" data-level=\"{level}\" style=\"background-color:{}\">{disease}: {level}</div>",
            level_color(level)
        );
    }
    html.push_str("</div>\n");
    html
}
