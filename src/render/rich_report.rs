use chrono::{DateTime, FixedOffset};
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use super::{report_title, team_logo, text, RICH_TEMPLATE_VERSION, UNKNOWN};
use crate::{
    blogger::schema::PostUpdate,
    chrono_util::{arabic_long_date, arabic_short_date, arabic_time},
    scrape::{ListedTeams, ScrapedReport},
};

const ACCENT: &str = "#f39c12";
const MAX_EVENTS: usize = 8;
const NOT_AVAILABLE: &str = "غير متوفر";
const BOX: &str = "background: white; padding: 3%; border-radius: 12px; margin-bottom: 3%; box-shadow: 0 5px 15px rgba(0,0,0,0.08);";

/// Final-result report for a scraped match. `None` means the match page could
/// not be read, which yields a one-line body.
pub fn rich_report(
    scraped: Option<&ScrapedReport>,
    listed: &ListedTeams,
    now: &DateTime<FixedOffset>,
) -> PostUpdate {
    let Some(report) = scraped else {
        return PostUpdate {
            title: report_title(&listed.home, &listed.away, None),
            content: "<p>تعذر الحصول على تفاصيل المباراة</p>".to_owned(),
        };
    };

    let home = or_listed(&report.home_team, &listed.home);
    let away = or_listed(&report.away_team, &listed.away);
    let competition = report.competition.as_deref().filter(|c| !c.is_empty());
    let score = report
        .score
        .map(|s| format!("{} - {}", s.home, s.away))
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    let date = arabic_long_date(now.date_naive());

    let home_text = text(&home);
    let away_text = text(&away);
    let competition_text = text(competition.unwrap_or(UNKNOWN));

    let side = |name: &str, logo: Option<&String>, placeholder: &str| {
        format!(
            r#"
      <div style="text-align: center; flex: 1; min-width: 120px;">
        <div style="width: 60px; height: 60px; border-radius: 50%; margin: 0 auto 2%; display: flex; align-items: center; justify-content: center; background: rgba(255,255,255,0.2);">{}</div>
        <h3 style="margin: 0; font-size: clamp(14px, 3vw, 18px);">{}</h3>
      </div>"#,
            team_logo(logo.map(|s| s.as_str()), name, 50, "white", placeholder),
            text(name),
        )
    };
    let score_section = format!(
        r#"
  <div class="score-section" style="background: linear-gradient(135deg, {ACCENT} 0%, #34495e 100%); color: white; padding: 3%; border-radius: 12px; margin-bottom: 3%; text-align: center;">
    <h2 style="margin: 0 0 2% 0; font-size: clamp(18px, 4vw, 24px);">النتيجة النهائية</h2>
    <div style="display: flex; justify-content: center; align-items: center; gap: 3%; flex-wrap: wrap;">{}
      <div style="background: rgba(255,255,255,0.2); padding: 2% 4%; border-radius: 12px; min-width: 120px;"><span style="font-size: clamp(24px, 8vw, 48px); font-weight: bold;">{score}</span></div>{}
    </div>
  </div>"#,
        side(&home, report.home_logo.as_ref(), "🏠"),
        side(&away, report.away_logo.as_ref(), "🏃"),
    );

    let events_section = if report.events.is_empty() {
        String::new()
    } else {
        let rows = report
            .events
            .iter()
            .take(MAX_EVENTS)
            .map(|event| {
                lazy_format!(
                    r#"
    <div style="display: flex; align-items: center; gap: 3%; padding: 2%; margin-bottom: 2%; background: #f8f9fa; border-radius: 8px; border-left: 4px solid {ACCENT};">
      <div style="background: {ACCENT}; color: white; width: 40px; height: 40px; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-weight: bold;">{}'</div>
      <span style="font-size: 20px;">{}</span>
      <div style="flex: 1;"><p style="margin: 0; color: #2c3e50; font-weight: bold;">{}</p><p style="margin: 0; color: #7f8c8d; font-size: 14px;">{}</p></div>
    </div>"#,
                    event.minute,
                    event.kind.icon(),
                    text(&event.text),
                    event.kind,
                )
            })
            .join_concat();
        format!(
            r#"
  <div style="{BOX}">
    <h3 style="color: #2c3e50; margin: 0 0 2% 0; font-size: clamp(18px, 4vw, 22px);">⚽ أحداث المباراة</h3>{rows}
  </div>"#
        )
    };

    let lineups_section = if report.has_lineups() {
        let column = |name: &str, players: &[String]| {
            let items = players
                .iter()
                .map(|p| lazy_format!("<li>{}</li>", text(p)))
                .join_concat();
            format!(
                r#"
      <div style="flex: 1; min-width: 200px;"><h4 style="margin: 0 0 2% 0; color: {ACCENT};">{}</h4><ul style="margin: 0; padding-right: 20px; color: #34495e;">{items}</ul></div>"#,
                text(name),
            )
        };
        format!(
            r#"
  <div style="{BOX}">
    <h3 style="color: #2c3e50; margin: 0 0 2% 0; font-size: clamp(18px, 4vw, 22px);">👥 التشكيلة</h3>
    <div style="display: flex; gap: 3%; flex-wrap: wrap;">{}{}
    </div>
  </div>"#,
            column(&home, &report.home_lineup),
            column(&away, &report.away_lineup),
        )
    } else {
        String::new()
    };

    let updated = format!(
        "{}، {}",
        arabic_short_date(now.date_naive()),
        arabic_time(&now.time())
    );
    let events_count = report.events.len();
    let cards = [
        ("🏆 البطولة", competition_text.to_string()),
        ("📅 التاريخ", date),
        ("🎯 النتيجة", score.clone()),
        ("📊 أحداث المباراة", format!("{events_count} حدث")),
        ("🔄 آخر تحديث", updated),
    ]
    .iter()
    .map(|(label, value)| {
        lazy_format!(
            r#"
      <div style="padding: 3%; background: #f8f9fa; border-radius: 10px; border-left: 4px solid {ACCENT}; margin-bottom: 2%; width: 100%;"><p style="margin: 0; color: #34495e;"><strong>{label}:</strong> {value}</p></div>"#
        )
    })
    .join_concat()
    .to_string();
    let info_section = format!(
        r#"
  <div style="{BOX} width: 100%;">
    <h3 style="color: #2c3e50; margin: 0 0 2% 0; font-size: clamp(18px, 4vw, 22px);">📋 معلومات المباراة</h3>
    <div style="display: block; width: 100%;">{cards}
    </div>
  </div>"#
    );

    let in_competition = match competition {
        Some(_) => format!(" في إطار منافسات <strong>{competition_text}</strong>"),
        None => String::new(),
    };
    let with_score = match report.score {
        Some(_) => format!(" بنتيجة <strong>{score}</strong>"),
        None => String::new(),
    };
    let notes = format!(
        r#"
  <div style="background: #fff3cd; padding: 3%; border-radius: 12px; margin-bottom: 3%; border-left: 4px solid #ffc107;">
    <h3 style="color: #856404; margin: 0 0 2% 0;">🎯 معلومات عامة</h3>
    <p style="margin: 0 0 2% 0; color: #856404;"><strong>انتهت المباراة</strong> بين فريق <strong>{home_text}</strong> وفريق <strong>{away_text}</strong>{in_competition}{with_score}.</p>
    <p style="margin: 0; font-weight: 600; color: #856404;">للحصول على النتائج التفصيلية والملخص الكامل، يرجى متابعة القنوات الرياضية المختصة.</p>
  </div>
  <div style="background: #d4edda; padding: 3%; border-radius: 12px; border-left: 4px solid #28a745;">
    <h3 style="color: #155724; margin: 0 0 2% 0;">🔔 ملاحظة مهمة</h3>
    <p style="margin: 0; color: #155724;">هذا تقرير تلقائي يتم إنشاؤه لأرشفة معلومات المباراة. للحصول على النتائج الدقيقة والتفاصيل الكاملة، يرجى متابعة القنوات الرياضية الرسمية أو المواقع المتخصصة.</p>
  </div>"#
    );

    let content = format!(
        r#"<!-- {RICH_TEMPLATE_VERSION} -->
<div class="match-report" style="max-width: 95%; margin: 2% auto; padding: 2%; background: linear-gradient(135deg, #f8f9fa 0%, #ffffff 100%); border-radius: 15px; box-shadow: 0 10px 30px rgba(0,0,0,0.1); font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;">
  <div class="header" style="text-align: center; margin-bottom: 3%; padding-bottom: 2%; border-bottom: 3px solid {ACCENT};">
    <h1 style="color: #2c3e50; margin: 0; font-size: clamp(20px, 5vw, 28px); font-weight: 700;">📊 تقرير المباراة الشامل</h1>
    <p style="color: #7f8c8d; margin: 1% 0 0 0; font-size: clamp(14px, 3vw, 16px);">{competition_text}</p>
  </div>{score_section}{events_section}{lineups_section}{info_section}{notes}
</div>"#
    );
    PostUpdate {
        title: report_title(&home, &away, competition),
        content,
    }
}

fn or_listed(scraped: &str, listed: &str) -> String {
    let name = if scraped.is_empty() { listed } else { scraped };
    name.to_owned()
}
