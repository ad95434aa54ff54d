//! HTML bodies written back to the blog.
//!
//! Each body starts with a `<!-- MARKER -->` comment naming the template it was
//! produced with, so later runs can tell which posts are already up to date.

use std::{borrow::Cow, fmt::Display};

use lazy_format::lazy_format;
use match_posts_utils::regex;

pub mod live_report;
pub mod rich_report;

pub use live_report::live_report;
pub use rich_report::rich_report;

use crate::post::title::REPORT_TITLE_PREFIX;

pub const LIVE_TEMPLATE_VERSION: &str = "SPORTLIVE_V2_2025";
pub const RICH_TEMPLATE_VERSION: &str = "SPORTLIVE_REPORT_V1_2025";

/// Placeholder shown when a value is unknown.
pub const UNKNOWN: &str = "غير محدد";

/// `تقرير المباراة: {home} ضد {away}[ - {league}]`. Titles are plain text.
pub fn report_title(home: &str, away: &str, league: Option<&str>) -> String {
    let league = league.filter(|league| !league.is_empty());
    let tail = lazy_format!(if let Some(league) = league => " - {league}" else => "");
    format!("{REPORT_TITLE_PREFIX}: {home} ضد {away}{tail}")
}

/// The template marker a body was rendered with, if any.
pub fn template_version(content: &str) -> Option<&str> {
    regex!(r"<!--\s*(SPORTLIVE_[A-Z0-9_]+)\s*-->")
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Whether the body was produced by one of the current templates.
pub fn is_current_template(content: &str) -> bool {
    matches!(
        template_version(content),
        Some(LIVE_TEMPLATE_VERSION | RICH_TEMPLATE_VERSION)
    )
}

fn text(s: &str) -> Cow<str> {
    html_escape::encode_text(s)
}

fn attr(s: &str) -> Cow<str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// Round logo, or a glyph in the accent colour when there is none.
fn team_logo<'a>(
    src: Option<&'a str>,
    alt: &'a str,
    size_px: u32,
    accent: &'a str,
    placeholder: &'a str,
) -> impl Display + 'a {
    lazy_format!(match (src) {
        Some(src) => (
            r#"<img src="{}" alt="{}" style="width: {size_px}px; height: {size_px}px; object-fit: contain; border-radius: 50%;">"#,
            attr(src),
            attr(alt),
        ),
        None => r#"<span style="color: {accent}; font-size: 28px; font-weight: bold;">{placeholder}</span>"#,
    })
}

#[cfg(test)]
mod tests {
    use super::{is_current_template, report_title, team_logo, template_version};

    #[test]
    fn titles() {
        assert_eq!(
            report_title("الأهلي", "الزمالك", Some("الدوري المصري")),
            "تقرير المباراة: الأهلي ضد الزمالك - الدوري المصري"
        );
        assert_eq!(
            report_title("Arsenal", "Chelsea", Some("")),
            "تقرير المباراة: Arsenal ضد Chelsea"
        );
    }

    #[test]
    fn template_markers() {
        assert_eq!(
            template_version("<!-- SPORTLIVE_V2_2025 -->\n<div>"),
            Some("SPORTLIVE_V2_2025")
        );
        assert!(is_current_template("<!-- SPORTLIVE_REPORT_V1_2025 --><div>"));
        assert!(!is_current_template("<!-- SPORTLIVE_V1_2024 --><div class=\"match-report\">"));
        assert!(!is_current_template("<p>live</p>"));
    }

    #[test]
    fn logo_escapes_attributes() {
        let html = team_logo(Some("https://x/a.png?a=1&b=2"), "A \"B\"", 70, "#fff", "⚽").to_string();
        assert!(html.contains(r#"src="https://x/a.png?a=1&amp;b=2""#));
        assert!(html.contains(r#"alt="A &quot;B&quot;""#));
        let placeholder = team_logo(None, "A", 70, "#e74c3c", "⚽").to_string();
        assert!(placeholder.contains("color: #e74c3c"));
        assert!(placeholder.contains('⚽'));
    }
}
