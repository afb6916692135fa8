//! HTML rendering. Everything here consumes an already computed assessment;
//! no risk logic lives in this module.

mod cards;
mod chart;
mod page;

pub use cards::{level_color, risk_cards};
pub use chart::risk_chart_svg;
pub use page::{form_page, results_page, AdviceView, PageContext};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
