use match_posts_utils::regex;
use serde::{Deserialize, Serialize};

pub const REPORT_TITLE_PREFIX: &str = "تقرير المباراة";
pub const REPORT_CLASS: &str = "match-report";

/// Teams (and optionally the competition) named in a "Home vs Away - League" title.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MatchTitle {
    pub home: String,
    pub away: String,
    pub league: Option<String>,
}

/// Whether a post title looks like a match post.
pub fn is_match_post(title: &str) -> bool {
    regex!(r"(?i)vs\s").is_match(title)
        || regex!(r"(?i)\s-\s.*(?:league|cup|championship|liga|premier|serie|bundesliga|ligue)")
            .is_match(title)
        || title.contains("مباراة")
        || title.contains("ضد")
}

/// Whether a post has already been turned into a report, by its title or body.
pub fn is_report(title: &str, content: &str) -> bool {
    title.contains(REPORT_TITLE_PREFIX) || content.contains(REPORT_CLASS)
}

pub fn parse_match_title(title: &str) -> Option<MatchTitle> {
    let title = regex!(r"تقرير المباراة:\s*").replace_all(title, "");
    let title = title.trim();
    let captures = regex!(r"(?i)^(.+?)\s+(?:vs|ضد)\s+(.+?)(?:\s+-\s+(.+))?$")
        .captures(title)
        .or_else(|| regex!(r"(?i)^(.+?)\s+(?:vs|ضد)\s+(.+)").captures(title))?;
    let home = captures[1].trim().to_owned();
    let away = captures[2].trim().to_owned();
    let league = captures
        .get(3)
        .map(|m| m.as_str().trim().to_owned())
        .filter(|league| !league.is_empty());
    Some(MatchTitle { home, away, league })
}

/// Loose pairing between a post's teams and a scraped fixture's teams.
///
/// Each side matches when the first eight characters of one name occur in the other,
/// ignoring case.
pub fn teams_match(post: &MatchTitle, home: &str, away: &str) -> bool {
    side_matches(&post.home, home) && side_matches(&post.away, away)
}

fn side_matches(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let prefix = |s: &str| s.chars().take(8).collect::<String>();
    a.contains(&prefix(&b)) || b.contains(&prefix(&a))
}
