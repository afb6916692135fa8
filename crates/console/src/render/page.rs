use advice::AdviceError;
use risk_model::{Gender, RiskAssessment};
use serde::Serialize;
use std::fmt::Write;

use super::{escape_html, risk_cards, risk_chart_svg};
use crate::config::AssetConfig;
use crate::form::{FieldError, FieldSpec, ReadingForm, NUMERIC_FIELDS};

const STYLE: &str = r#"
body { font-family: "Segoe UI", Helvetica, Arial, sans-serif; background: #0e1117; color: #fafafa; margin: 0; }
main { max-width: 960px; margin: 0 auto; padding: 0 24px 48px; }
.neon-title {
    font-size: 48px; font-weight: bold;
    background: linear-gradient(90deg, #ff6ec4, #7873f5, #42d392, #ffcc70);
    -webkit-background-clip: text; -webkit-text-fill-color: transparent;
    animation: gradient 5s ease infinite; background-size: 300% 300%;
}
@keyframes gradient { 0% {background-position: 0% 50%;} 50% {background-position: 100% 50%;} 100% {background-position: 0% 50%;} }
.title { text-align: center; margin-top: 30px; margin-bottom: 20px; }
.greeting-text {
    font-size: 26px; font-weight: bold; text-align: center; color: #ffffff; padding: 15px;
    background: linear-gradient(135deg, #00c6ff, #0072ff); border-radius: 12px;
    box-shadow: 0px 4px 15px rgba(0,0,0,0.3); animation: bounce 2s infinite;
    text-shadow: 2px 2px 4px #000000, 4px 4px 8px #333333;
}
@keyframes bounce { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-10px); } }
.config-warning, .advice-error { background: #5c1f1f; border: 1px solid #ff4b4b; border-radius: 8px; padding: 12px; margin: 16px 0; }
form.reading { display: grid; grid-template-columns: 1fr 1fr; gap: 12px 24px; margin: 32px 0; }
form.reading label { display: flex; flex-direction: column; gap: 4px; }
form.reading input, form.reading select { padding: 8px; border-radius: 6px; border: 1px solid #444; background: #262730; color: #fafafa; }
form.reading .field-error { color: #ff4b4b; font-size: 13px; }
form.reading button { grid-column: span 2; padding: 12px; font-size: 18px; border-radius: 8px; border: none; background: #ff4b4b; color: white; cursor: pointer; }
.advice { white-space: pre-wrap; line-height: 1.5; }
.animations { display: grid; grid-template-columns: 1fr 1fr 1fr; align-items: center; gap: 16px; }
.secure-banner {
    text-align: center; padding: 20px; background: linear-gradient(135deg, #1e9600, #fff200, #ff0000);
    color: white; font-size: 32px; font-weight: bold; border-radius: 15px; box-shadow: 0 5px 15px rgba(0,0,0,0.4);
    text-shadow: 2px 2px 0px #000000, 4px 4px 0px #333333; letter-spacing: 1px;
}
.risk-card { padding: 10px; border-radius: 10px; color: white; font-weight: bold; margin: 8px 0; }
"#;

pub struct PageContext<'a> {
    pub assets: &'a AssetConfig,
    /// Shown on every page while the advice credential is missing.
    pub config_warning: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceView {
    Text(String),
    Error { kind: &'static str, message: String },
}

impl From<Result<String, AdviceError>> for AdviceView {
    fn from(result: Result<String, AdviceError>) -> Self {
        match result {
            Ok(text) => AdviceView::Text(text),
            Err(err) => AdviceView::Error {
                kind: err.kind().as_str(),
                message: err.to_string(),
            },
        }
    }
}

pub fn form_page(ctx: &PageContext<'_>, form: &ReadingForm, errors: &[FieldError]) -> String {
    layout(ctx, &reading_form(form, errors))
}

pub fn results_page(
    ctx: &PageContext<'_>,
    form: &ReadingForm,
    assessment: &RiskAssessment,
    advice: &AdviceView,
) -> String {
    let mut body = reading_form(form, &[]);

    body.push_str("<section class=\"advice-section\">\n<h2>🤖 Robot's Health Advice</h2>\n");
    match advice {
        AdviceView::Text(text) => {
            let _ = writeln!(body, "<div class=\"advice\">{}</div>", escape_html(text));
        }
        AdviceView::Error { message, .. } => {
            let _ = writeln!(
                body,
                "<div class=\"advice-error\">⚠️ Error fetching AI advice: {}</div>",
                escape_html(message)
            );
        }
    }
    body.push_str("</section>\n");

    let _ = writeln!(
        body,
        "<section class=\"animations\">\n  {}\n  <div class=\"secure-banner\">🎉 YOU ARE SECURE 🎉</div>\n  {}\n</section>",
        animation(&ctx.assets.robot_animation, "robot"),
        animation(&ctx.assets.heart_animation, "heart")
    );
    if assessment.all_low() {
        let _ = writeln!(
            body,
            "<section class=\"celebration\">{}</section>",
            animation(&ctx.assets.celebrate_animation, "celebration")
        );
    }

    body.push_str("<section>\n<h2>📊 Risk Prediction</h2>\n");
    body.push_str(&risk_cards(assessment));
    body.push_str("</section>\n<section>\n<h2>📊 Health Risk Chart</h2>\n");
    body.push_str(&risk_chart_svg(assessment));
    body.push_str("</section>\n");

    layout(ctx, &body)
}

fn layout(ctx: &PageContext<'_>, body: &str) -> String {
    let warning = ctx
        .config_warning
        .map(|message| {
            format!(
                "<div class=\"config-warning\">⚠️ {}</div>\n",
                escape_html(message)
            )
        })
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>AI Health Risk Predictor</title>\n<style>{STYLE}</style>\n\
         <script src=\"{}\"></script>\n</head>\n<body>\n<main>\n\
         <div class=\"title\"><h1 class=\"neon-title\">🤖 AI Health Risk Predictor</h1></div>\n\
         {warning}\
         <div class=\"greeting-text\">🤖 Hello! I am your AI health assistant robot. <br> Enter your details below 👇</div>\n\
         {body}</main>\n</body>\n</html>\n",
        escape_html(&ctx.assets.lottie_player_url)
    )
}

fn reading_form(form: &ReadingForm, errors: &[FieldError]) -> String {
    let mut html = String::from("<form class=\"reading\" method=\"post\" action=\"/predict\">\n");
    let fields = NUMERIC_FIELDS;
    let (first, rest) = fields.split_at(1);
    for spec in first {
        push_number_input(&mut html, form, errors, spec);
    }

    let selected = form.value("gender").trim().to_lowercase();
    html.push_str("  <label>Gender\n    <select name=\"gender\">\n");
    for gender in Gender::ALL {
        let marker = if gender.as_str() == selected {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "      <option value=\"{}\"{marker}>{}</option>",
            gender.as_str(),
            gender.label()
        );
    }
    html.push_str("    </select>\n");
    push_field_errors(&mut html, errors, "gender");
    html.push_str("  </label>\n");

    for spec in rest {
        push_number_input(&mut html, form, errors, spec);
    }
    html.push_str("  <button type=\"submit\">🔍 Predict Risk</button>\n</form>\n");
    html
}

fn push_number_input(
    html: &mut String,
    form: &ReadingForm,
    errors: &[FieldError],
    spec: &FieldSpec,
) {
    let _ = writeln!(
        html,
        "  <label>{label}\n    <input type=\"number\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" required>",
        label = escape_html(spec.label),
        name = spec.name,
        min = spec.format_bound(spec.min),
        max = spec.format_bound(spec.max),
        step = spec.step,
        value = escape_html(form.value(spec.name)),
    );
    push_field_errors(html, errors, spec.name);
    html.push_str("  </label>\n");
}

fn push_field_errors(html: &mut String, errors: &[FieldError], field: &str) {
    for error in errors.iter().filter(|error| error.field == field) {
        let _ = writeln!(
            html,
            "    <span class=\"field-error\">{}</span>",
            escape_html(&error.message)
        );
    }
}

fn animation(url: &str, key: &str) -> String {
    format!(
        "<lottie-player id=\"{key}\" src=\"{}\" background=\"transparent\" speed=\"1\" style=\"height:200px\" loop autoplay></lottie-player>",
        escape_html(url)
    )
}
