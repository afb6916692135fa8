use risk_model::RiskAssessment;
use std::fmt::Write;

use super::escape_html;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 440.0;
const BASE_Y: f64 = 340.0;
const FIRST_BAR_X: f64 = 150.0;
const BAR_SPACING: f64 = 150.0;
const BAR_WIDTH: f64 = 70.0;
const UNIT_HEIGHT: f64 = 80.0;
// Oblique projection offset for the depth faces.
const DEPTH_X: f64 = 28.0;
const DEPTH_Y: f64 = -18.0;
const Z_LABEL: &str = "Risk Level (1=Low, 2=Moderate, 3=High)";

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgb(f64, f64, f64);

impl Rgb {
    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb(
            self.0 + (other.0 - self.0) * t,
            self.1 + (other.1 - self.1) * t,
            self.2 + (other.2 - self.2) * t,
        )
    }

    fn shade(self, factor: f64) -> Rgb {
        Rgb(
            (self.0 * factor).min(255.0),
            (self.1 * factor).min(255.0),
            (self.2 * factor).min(255.0),
        )
    }

    fn hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            self.0.round() as u8,
            self.1.round() as u8,
            self.2.round() as u8
        )
    }
}

const COOL: Rgb = Rgb(59.0, 76.0, 192.0);
const NEUTRAL: Rgb = Rgb(221.0, 221.0, 221.0);
const WARM: Rgb = Rgb(180.0, 4.0, 38.0);

/// Cool-to-warm diverging colormap, `t` in 0..=1.
fn coolwarm(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        COOL.lerp(NEUTRAL, t * 2.0)
    } else {
        NEUTRAL.lerp(WARM, (t - 0.5) * 2.0)
    }
}

/// Scales scores to 0..=1 over their own min..max; a flat set maps to 0.
fn normalize(scores: &[u8]) -> Vec<f64> {
    let min = scores.iter().copied().min().unwrap_or(0);
    let max = scores.iter().copied().max().unwrap_or(0);
    if max == min {
        return vec![0.0; scores.len()];
    }
    let span = f64::from(max - min);
    scores
        .iter()
        .map(|score| f64::from(score - min) / span)
        .collect()
}

fn points(corners: &[(f64, f64)]) -> String {
    corners
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pseudo-3D bar chart of the assessment, one bar per disease.
pub fn risk_chart_svg(assessment: &RiskAssessment) -> String {
    let bars: Vec<_> = assessment.iter().collect();
    let scores: Vec<u8> = bars.iter().map(|(_, level)| level.score()).collect();
    let colors: Vec<Rgb> = normalize(&scores).into_iter().map(coolwarm).collect();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg class=\"risk-chart\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" width=\"{WIDTH}\" height=\"{HEIGHT}\" role=\"img\" aria-label=\"Health Risk Levels\">"
    );
    let _ = writeln!(
        svg,
        "  <rect x=\"0\" y=\"0\" width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"#f5f5f5\"/>"
    );
    let _ = writeln!(
        svg,
        "  <text x=\"{}\" y=\"34\" text-anchor=\"middle\" font-size=\"16\" font-weight=\"bold\" fill=\"purple\">Health Risk Levels</text>",
        WIDTH / 2.0
    );

    let axis_x = FIRST_BAR_X - 40.0;
    let right_x = FIRST_BAR_X + BAR_SPACING * 2.0 + BAR_WIDTH + DEPTH_X + 20.0;
    for level in 0..=3u8 {
        let y = BASE_Y - f64::from(level) * UNIT_HEIGHT;
        let _ = writeln!(
            svg,
            "  <line x1=\"{axis_x:.1}\" y1=\"{y:.1}\" x2=\"{right_x:.1}\" y2=\"{y:.1}\" stroke=\"#cccccc\" stroke-dasharray=\"4 3\"/>"
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\" fill=\"#333333\">{level}</text>",
            axis_x - 6.0,
            y + 4.0
        );
    }
    let label_y = (BASE_Y - UNIT_HEIGHT * 1.5).round();
    let _ = writeln!(
        svg,
        "  <text x=\"40\" y=\"{label_y}\" transform=\"rotate(-90 40 {label_y})\" text-anchor=\"middle\" font-size=\"12\" fill=\"#333333\">{}</text>",
        escape_html(Z_LABEL)
    );

    for (index, ((disease, level), color)) in bars.iter().zip(colors).enumerate() {
        let x = FIRST_BAR_X + BAR_SPACING * index as f64;
        let height = f64::from(level.score()) * UNIT_HEIGHT;
        let top = BASE_Y - height;
        let _ = writeln!(
            svg,
            "  <g class=\"bar\" data-disease=\"{}\" data-level=\"{}\">",
            escape_html(disease.name()),
            level.as_str()
        );
        let _ = writeln!(
            svg,
            "    <polygon points=\"{}\" fill=\"{}\"/>",
            points(&[
                (x + BAR_WIDTH, top),
                (x + BAR_WIDTH + DEPTH_X, top + DEPTH_Y),
                (x + BAR_WIDTH + DEPTH_X, BASE_Y + DEPTH_Y),
                (x + BAR_WIDTH, BASE_Y),
            ]),
            color.shade(0.75).hex()
        );
        let _ = writeln!(
            svg,
            "    <polygon points=\"{}\" fill=\"{}\"/>",
            points(&[
                (x, top),
                (x + DEPTH_X, top + DEPTH_Y),
                (x + BAR_WIDTH + DEPTH_X, top + DEPTH_Y),
                (x + BAR_WIDTH, top),
            ]),
            color.shade(1.15).hex()
        );
        let _ = writeln!(
            svg,
            "    <rect x=\"{x:.1}\" y=\"{top:.1}\" width=\"{BAR_WIDTH:.1}\" height=\"{height:.1}\" fill=\"{}\"/>",
            color.hex()
        );
        let label_x = x + BAR_WIDTH / 2.0;
        let label_y = BASE_Y + 24.0;
        let _ = writeln!(
            svg,
            "    <text x=\"{label_x:.1}\" y=\"{label_y:.1}\" transform=\"rotate(-20 {label_x:.1} {label_y:.1})\" text-anchor=\"end\" font-size=\"13\" fill=\"#333333\">{}</text>",
            escape_html(disease.name())
        );
        svg.push_str("  </g>\n");
    }
    svg.push_str("</svg>\n");
    svg
}
