use std::fmt::Display;

use chrono::NaiveDate;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use super::{report_title, team_logo, text, LIVE_TEMPLATE_VERSION, UNKNOWN};
use crate::{
    blogger::schema::PostUpdate,
    chrono_util::arabic_long_date,
    post::{date_category::DateCategory, extract::LivePostData},
};

const CARD_BACKGROUND: &str = "linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%)";
const PANEL: &str = "background: white; padding: 25px; border-radius: 12px; margin-bottom: 25px; box-shadow: 0 5px 15px rgba(0,0,0,0.08);";
const AWAY_ACCENT: &str = "#e74c3c";

struct Look {
    color: &'static str,
    icon: &'static str,
    status: &'static str,
}

fn look(category: DateCategory) -> Look {
    use DateCategory::*;
    match category {
        Today => Look {
            color: "#27ae60",
            icon: "🔴",
            status: "مباراة اليوم",
        },
        Yesterday => Look {
            color: "#f39c12",
            icon: "✅",
            status: "انتهت المباراة",
        },
        Older | Future => Look {
            color: "#95a5a6",
            icon: "📋",
            status: "مباراة منتهية",
        },
    }
}

/// Static report replacing a live match post.
pub fn live_report(data: &LivePostData, category: DateCategory, published: NaiveDate) -> PostUpdate {
    let teams = data.teams();
    let league = teams.league.as_deref();
    let Look {
        color,
        icon,
        status,
    } = look(category);
    let date = arabic_long_date(published);
    let home = text(&teams.home);
    let away = text(&teams.away);
    let league_text = league.map(text);

    let header = format!(
        r#"
  <div class="header" style="text-align: center; margin-bottom: 30px; padding-bottom: 20px; border-bottom: 3px solid {color};">
    <h1 style="color: #2c3e50; margin: 0; font-size: 28px; font-weight: 700;">📊 تقرير المباراة</h1>
    <p style="color: #7f8c8d; margin: 10px 0 0 0; font-size: 16px;">{}</p>
  </div>"#,
        league_text.as_deref().unwrap_or("مباراة كرة قدم"),
    );

    let team_block = |class: &str, name: &str, logo: Option<&String>, accent: &str, role: &str| {
        format!(
            r#"
      <div class="team {class}" style="text-align: center; flex: 1; min-width: 200px;">
        <div class="team-logo" style="width: 80px; height: 80px; border-radius: 50%; margin: 0 auto 15px; display: flex; align-items: center; justify-content: center; background: white; border: 3px solid {accent}; overflow: hidden;">
          {}
        </div>
        <h3 style="color: #2c3e50; margin: 0; font-size: 20px; font-weight: 600; word-wrap: break-word;">{}</h3>
        <p style="color: #7f8c8d; margin: 5px 0 0 0; font-size: 14px;">{role}</p>
      </div>"#,
            team_logo(logo.map(|s| s.as_str()), name, 70, accent, "⚽"),
            text(name),
        )
    };
    let teams_section = format!(
        r#"
  <div class="teams-container" style="{PANEL} padding: 30px;">
    <div class="teams-display" style="display: flex; justify-content: space-between; align-items: center; gap: 20px; flex-wrap: wrap;">{}
      <div class="vs-section" style="text-align: center; margin: 0 20px;">
        <div style="background: {color}; color: white; width: 60px; height: 60px; border-radius: 50%; display: flex; align-items: center; justify-content: center; margin: 0 auto 10px; font-weight: bold; font-size: 18px;">VS</div>
        <p style="color: #95a5a6; margin: 0; font-size: 12px;">{date}</p>
      </div>{}
    </div>
  </div>"#,
        team_block("home-team", &teams.home, data.home_logo().as_ref(), color, "الفريق المضيف"),
        team_block("away-team", &teams.away, data.away_logo().as_ref(), AWAY_ACCENT, "الفريق الضيف"),
    );

    let status_section = format!(
        r#"
  <div class="status-section" style="text-align: center; margin-bottom: 30px;">
    <div style="display: inline-block; padding: 15px 30px; background: {color}; color: white; border-radius: 50px; font-weight: 600; font-size: 16px;">{icon} {status}</div>
  </div>"#
    );

    let match_time = data.match_time().as_deref().map(text);
    let broadcaster = data.broadcaster().as_deref().map(text);
    let cards = [
        Some(info_card(color, "🏆", "البطولة", league_text.as_deref().unwrap_or(UNKNOWN))),
        Some(info_card(color, "📅", "التاريخ", &date)),
        match_time.as_deref().map(|t| info_card(color, "⏰", "التوقيت", t)),
        broadcaster.as_deref().map(|b| info_card(color, "📺", "القناة الناقلة", b)),
    ]
    .into_iter()
    .flatten()
    .collect::<String>();
    let info_section = format!(
        r#"
  <div class="match-info" style="{PANEL}">
    {}
    <div class="info-grid" style="display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 15px;">{cards}
    </div>
  </div>"#,
        heading(color, "📋", "معلومات المباراة"),
    );

    let competition = league_text.as_deref().unwrap_or("البطولة");
    let strong = |value: &str| format!(r#"<strong style="color: {color};">{value}</strong>"#);
    let line = |body: String| format!(r#"<p style="margin: 0 0 15px 0;">{body}</p>"#);
    let optional = |value: Option<&str>, prefix: &str| {
        value
            .map(|v| line(format!("{prefix} {}", strong(v))))
            .unwrap_or_default()
    };
    let note = |background: &str, border: &str, extra: &str, body: &str| {
        format!(
            r#"<p style="margin: 0; padding: 15px; background: {background}; border-radius: 8px; border-left: 4px solid {border};{extra}">{body}</p>"#
        )
    };
    let opening = |lead: &str| {
        line(format!(
            "{} بين فريق <strong>{home}</strong> وفريق <strong>{away}</strong> في إطار منافسات <strong>{competition}</strong>.",
            strong(lead)
        ))
    };
    let summary = match category {
        DateCategory::Today => [
            opening("مباراة اليوم"),
            optional(match_time.as_deref(), "⏰ موعد انطلاق المباراة:"),
            optional(broadcaster.as_deref(), "📺 يمكن متابعة المباراة عبر قناة:"),
            note("#e8f5e8", "#27ae60", "", "سيتم تحديث النتائج والأحداث تلقائياً بعد انتهاء المباراة."),
        ],
        DateCategory::Yesterday => [
            opening("انتهت مباراة الأمس"),
            optional(match_time.as_deref(), "⏰ أقيمت المباراة في تمام الساعة:"),
            optional(broadcaster.as_deref(), "📺 نقلت المباراة عبر قناة:"),
            note("#fff3cd", "#f39c12", "", "للحصول على النتائج التفصيلية والملخص الكامل، يرجى متابعة القنوات الرياضية المختصة."),
        ],
        DateCategory::Older | DateCategory::Future => [
            opening("مباراة منتهية"),
            optional(Some(date.as_str()), "📅 أقيمت هذه المباراة بتاريخ:"),
            optional(match_time.as_deref(), "⏰ في تمام الساعة:"),
            note("#f8f9fa", "#95a5a6", " color: #7f8c8d; font-style: italic;", "هذه مباراة من الأرشيف وقد انتهت منذ فترة."),
        ],
    }
    .into_iter()
    .filter(|s| !s.is_empty())
    .join_with("\n      ")
    .to_string();
    let summary_section = format!(
        r#"
  <div class="summary-section" style="background: linear-gradient(135deg, #ffffff 0%, #f8f9fa 100%); padding: 25px; border-radius: 12px; margin-bottom: 25px; border: 1px solid #e9ecef;">
    {}
    <div style="color: #2c3e50; line-height: 1.8; font-size: 16px;">
      {summary}
    </div>
  </div>"#,
        heading(color, "🎯", "ملخص المباراة"),
    );

    let link = |background: &str, icon: &str, label: &str| {
        format!(
            r#"
      <a href="/" style="display: flex; align-items: center; gap: 10px; padding: 15px; background: {background}; color: white; text-decoration: none; border-radius: 8px; font-weight: 600;"><span style="font-size: 18px;">{icon}</span> {label}</a>"#
        )
    };
    let links_section = format!(
        r#"
  <div class="links-section" style="{PANEL} margin-bottom: 0;">
    {}
    <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px;">{}{}{}
    </div>
  </div>"#,
        heading(color, "🔗", "روابط سريعة"),
        link(color, "🏠", "الصفحة الرئيسية"),
        link("#34495e", "⚽", "مباريات أخرى"),
        link(AWAY_ACCENT, "📺", "البث المباشر"),
    );

    let content = format!(
        r#"<!-- {LIVE_TEMPLATE_VERSION} -->
<div class="match-report" style="max-width: 800px; margin: 20px auto; padding: 20px; background: linear-gradient(135deg, #f8f9fa 0%, #ffffff 100%); border-radius: 15px; box-shadow: 0 10px 30px rgba(0,0,0,0.1); font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; border: 1px solid #e9ecef;">{header}{teams_section}{status_section}{info_section}{summary_section}{links_section}
</div>
{STYLE}"#
    );
    PostUpdate {
        title: report_title(&teams.home, &teams.away, league),
        content,
    }
}

fn heading<'a>(color: &'a str, icon: &'a str, label: &'a str) -> impl Display + 'a {
    lazy_format!(
        r#"<h3 style="color: #2c3e50; margin: 0 0 20px 0; font-size: 20px; display: flex; align-items: center; gap: 10px;"><span style="background: {color}; color: white; width: 35px; height: 35px; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-size: 16px;">{icon}</span> {label}</h3>"#
    )
}

fn info_card(color: &str, icon: &str, label: &str, value: &str) -> String {
    format!(
        r#"
      <div class="info-card" style="padding: 20px; background: {CARD_BACKGROUND}; border-radius: 10px; border-left: 4px solid {color};">
        <div style="display: flex; align-items: center; gap: 10px; margin-bottom: 8px;"><span style="font-size: 20px;">{icon}</span> <strong style="color: #2c3e50; font-size: 16px;">{label}</strong></div>
        <p style="margin: 0; color: #34495e; font-size: 15px;">{value}</p>
      </div>"#
    )
}

const STYLE: &str = r#"<style>
.match-report a:hover {
  transform: translateY(-2px);
  box-shadow: 0 5px 15px rgba(0,0,0,0.3) !important;
}
@media (max-width: 768px) {
  .teams-display { flex-direction: column !important; gap: 30px !important; }
  .vs-section { order: 2; margin: 20px 0 !important; }
  .home-team { order: 1; }
  .away-team { order: 3; }
  .info-grid { grid-template-columns: 1fr !important; }
  .links-section div { grid-template-columns: 1fr !important; }
}
@media (max-width: 480px) {
  .match-report { margin: 10px !important; padding: 15px !important; }
  .teams-container { padding: 20px !important; }
  .match-info, .summary-section, .links-section { padding: 20px !important; }
}
</style>
"#;
