use itertools::Itertools;
use log::{debug, info};
use match_posts_utils::{regex, selector};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use strum::Display;

/// Everything recovered from a match page. Fields the page does not expose stay empty.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize)]
pub struct ScrapedReport {
    pub home_team: String,
    pub away_team: String,
    pub home_logo: Option<String>,
    pub away_logo: Option<String>,
    pub score: Option<Score>,
    pub events: Vec<MatchEvent>,
    pub home_lineup: Vec<String>,
    pub away_lineup: Vec<String>,
    pub competition: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct MatchEvent {
    pub minute: u32,
    pub kind: EventKind,
    pub text: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, Serialize)]
pub enum EventKind {
    #[strum(to_string = "هدف")]
    Goal,
    #[strum(to_string = "بطاقة صفراء")]
    YellowCard,
    #[strum(to_string = "بطاقة حمراء")]
    RedCard,
    #[strum(to_string = "تبديل")]
    Substitution,
    #[strum(to_string = "حدث")]
    Other,
}
impl EventKind {
    pub fn icon(self) -> &'static str {
        use EventKind::*;
        match self {
            Goal => "⚽",
            YellowCard => "🟨",
            RedCard => "🟥",
            Substitution => "🔄",
            Other => "📝",
        }
    }

    pub fn classify(text: &str) -> Self {
        use EventKind::*;
        let lower = text.to_lowercase();
        let has = |arabic: &str, english: &str| text.contains(arabic) || lower.contains(english);
        if has("هدف", "goal") {
            Goal
        } else if has("صفراء", "yellow") {
            YellowCard
        } else if has("حمراء", "red") {
            RedCard
        } else if has("تبديل", "substitution") {
            Substitution
        } else {
            Other
        }
    }
}

impl ScrapedReport {
    pub fn has_lineups(&self) -> bool {
        !self.home_lineup.is_empty() || !self.away_lineup.is_empty()
    }
}

/// Pulls score, events, lineups and logos out of a match page.
pub fn extract_report(html: &Html) -> ScrapedReport {
    let mut report = ScrapedReport::default();

    let logos = find_team_logos(html);
    if let [home, away, ..] = &logos[..] {
        report.home_logo = Some(home.src.clone());
        report.away_logo = Some(away.src.clone());
        report.home_team = home.alt.clone();
        report.away_team = away.alt.clone();
    }
    debug!("Found {} team logos", logos.len());

    if let Some((home, away)) = teams_from_title(html) {
        if report.home_team.is_empty() {
            report.home_team = home;
        }
        if report.away_team.is_empty() {
            report.away_team = away;
        }
    }

    let body = body_text(html);
    report.score = find_score(&body);
    report.events = find_events(&body);
    report.competition = find_competition(&body);
    (report.home_lineup, report.away_lineup) = find_lineups(html);

    info!(
        "Scraped {} vs {}: score={:?}, {} events, lineups {}+{}",
        report.home_team,
        report.away_team,
        report.score.map(|s| (s.home, s.away)),
        report.events.len(),
        report.home_lineup.len(),
        report.away_lineup.len(),
    );
    report
}

struct Logo {
    src: String,
    alt: String,
}

fn find_team_logos(html: &Html) -> Vec<Logo> {
    let mut res = vec![];
    for img in html.select(selector!("img")) {
        let Some(src) = [img.attr("src"), img.attr("data-src")]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
        else {
            continue;
        };
        let alt = img.attr("alt").unwrap_or_default();
        let youth_team = ["تحت", "U19", "U20", "U21"]
            .iter()
            .any(|marker| alt.contains(marker));
        if src.contains("wp-content/uploads") && (youth_team || src.contains("/202")) {
            res.push(Logo {
                src: src.to_owned(),
                alt: alt.trim().to_owned(),
            });
        }
    }
    res
}

fn teams_from_title(html: &Html) -> Option<(String, String)> {
    let title = html
        .select(selector!("title"))
        .next()?
        .text()
        .collect::<String>();
    let captures = regex!(r"(?i)^\s*(.+?)\s+(?:ضد|vs)\s+(.+?)(?:\s+[-|–]\s+|\s*$)")
        .captures(&title)?;
    Some((captures[1].trim().to_owned(), captures[2].trim().to_owned()))
}

fn body_text(html: &Html) -> String {
    html.select(selector!("body"))
        .next()
        .map(|body| body.text().collect())
        .unwrap_or_default()
}

/// First plausible pair (both sides at most 20) among the score patterns, tried in order.
fn find_score(text: &str) -> Option<Score> {
    [
        regex!(r"([0-9]+)\s*[-:]\s*([0-9]+)"),
        regex!(r"نتيجة.*?([0-9]+)\s*[-:]\s*([0-9]+)"),
        regex!(r"(?i)score.*?([0-9]+)\s*[-:]\s*([0-9]+)"),
    ]
    .into_iter()
    .find_map(|pattern| {
        pattern.captures_iter(text).find_map(|c| {
            let home = c[1].parse::<u32>().ok()?;
            let away = c[2].parse::<u32>().ok()?;
            (home <= 20 && away <= 20).then_some(Score { home, away })
        })
    })
}

fn find_events(text: &str) -> Vec<MatchEvent> {
    [
        regex!(r"([0-9]+)['′]\s*([^0-9\n\r]{3,50})"),
        regex!(r"([0-9]+)\s*دقيقة\s*([^0-9\n\r]{3,50})"),
        regex!(r"الدقيقة\s*([0-9]+)\s*([^0-9\n\r]{3,50})"),
    ]
    .into_iter()
    .flat_map(|pattern| pattern.captures_iter(text))
    .filter_map(|c| {
        let minute = c[1].parse().ok()?;
        let text = c[2].trim();
        let len = text.chars().count();
        (len > 3 && len < 100).then(|| MatchEvent {
            minute,
            kind: EventKind::classify(text),
            text: text.to_owned(),
        })
    })
    .collect()
}

static COMPETITION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ["أوروبا", "يورو", "تحت", "بطولة", "دوري", "كأس"]
        .into_iter()
        .map(|keyword| {
            let pattern = format!("({}[^.\\n]{{10,80}})", regex::escape(keyword));
            (keyword, Regex::new(&pattern).unwrap())
        })
        .collect()
});

fn find_competition(text: &str) -> Option<String> {
    COMPETITION_PATTERNS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .find_map(|(_, pattern)| pattern.captures(text))
        .map(|c| c[1].trim().to_owned())
}

/// The two innermost lineup blocks, home first.
fn find_lineups(html: &Html) -> (Vec<String>, Vec<String>) {
    let mut lists = html
        .select(selector!(r#"[class*="lineup"]"#))
        .filter(|e| e.select(selector!(r#"[class*="lineup"]"#)).next().is_none())
        .map(players);
    let home = lists.next().unwrap_or_default();
    let away = lists.next().unwrap_or_default();
    (home, away)
}

fn players(block: ElementRef) -> Vec<String> {
    let from = |selector: &Selector| {
        block
            .select(selector)
            .map(|e| e.text().collect::<String>().split_whitespace().join(" "))
            .filter(|s| !s.is_empty())
            .collect_vec()
    };
    let items = from(selector!("li"));
    if items.is_empty() {
        from(selector!(".player-name"))
    } else {
        items
    }
}
