use getset::Getters;
use log::trace;
use match_posts_utils::{regex, selector};
use scraper::Html;
use serde::{Deserialize, Serialize};

use super::title::{parse_match_title, MatchTitle};

/// What can be recovered from a live match post before it is rewritten.
#[derive(Clone, Debug, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct LivePostData {
    teams: MatchTitle,
    match_time: Option<String>,
    broadcaster: Option<String>,
    home_logo: Option<String>,
    away_logo: Option<String>,
}

/// Returns `None` when the title does not name two teams.
pub fn extract_live_post(title: &str, content: &str) -> Option<LivePostData> {
    let teams = parse_match_title(title)?;
    let match_time = find_match_time(content);
    let broadcaster = find_broadcaster(content);
    let (home_logo, away_logo) = find_logos(content, &teams);
    trace!("Extracted time={match_time:?}, broadcaster={broadcaster:?}");
    Some(LivePostData {
        teams,
        match_time,
        broadcaster,
        home_logo,
        away_logo,
    })
}

/// The `⏰ 21:45` marker live posts carry.
pub fn find_match_time(content: &str) -> Option<String> {
    regex!(r"(?i)⏰\s*(\d{1,2}:\d{2}(?:\s*[AP]M)?)")
        .captures(content)
        .map(|c| c[1].to_owned())
}

pub fn find_broadcaster(content: &str) -> Option<String> {
    [
        regex!(r"(?i)📺[^<]*?<[^>]*>([^<]+)"),
        regex!(r"(?i)القناة الناقلة[^<]*?<[^>]*>([^<]+)"),
        regex!(r"(?i)📺\s*([^<\n]+)"),
    ]
    .into_iter()
    .find_map(|pattern| pattern.captures(content))
    .map(|c| c[1].trim().to_owned())
    .filter(|s| !s.is_empty())
}

/// Assigns `<img>` sources to teams by comparing `alt` with the team names.
fn find_logos(content: &str, teams: &MatchTitle) -> (Option<String>, Option<String>) {
    let fragment = Html::parse_fragment(content);
    let mut home = None;
    let mut away = None;
    for img in fragment.select(selector!("img[alt][src]")) {
        let (Some(alt), Some(src)) = (img.attr("alt"), img.attr("src")) else {
            continue;
        };
        if alt.is_empty() {
            continue;
        }
        if alt.contains(&teams.home) || teams.home.contains(alt) {
            home = Some(src.to_owned());
        } else if alt.contains(&teams.away) || teams.away.contains(alt) {
            away = Some(src.to_owned());
        }
    }
    (home, away)
}
