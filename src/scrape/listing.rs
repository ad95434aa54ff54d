use std::collections::HashSet;

use log::{debug, info};
use match_posts_utils::{regex, selector};
use scraper::Html;
use serde::Serialize;
use url::Url;

/// Team names recovered from a match page slug.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ListedTeams {
    pub home: String,
    pub away: String,
}
impl ListedTeams {
    pub fn title(&self) -> String {
        format!("{} ضد {}", self.home, self.away)
    }
}

/// A fixture linked from the listing page.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ListedMatch {
    pub teams: ListedTeams,
    pub title: String,
    pub link: Url,
}

/// Collects match links from the listing page, first occurrence of each pairing wins.
pub fn parse_listing(html: &Html, site_base: &Url) -> Vec<ListedMatch> {
    let mut seen = HashSet::new();
    let mut res = vec![];
    for a in html.select(selector!("a[href]")) {
        let Some(href) = a.attr("href") else {
            continue;
        };
        if !href.contains("/matches/") || !href.contains('%') {
            continue;
        }
        let link = match site_base.join(href) {
            Ok(link) => link,
            Err(e) => {
                debug!("Skipping unusable link {href:?}: {e}");
                continue;
            }
        };
        let Some(teams) = decode_match_url(link.as_str()) else {
            debug!("Could not read teams from {link}");
            continue;
        };
        if !seen.insert(format!("{}-{}", teams.home, teams.away)) {
            continue;
        }
        res.push(ListedMatch {
            title: teams.title(),
            teams,
            link,
        });
    }
    info!("Found {} matches on the listing page", res.len());
    res
}

/// Reads the teams from a `/matches/<home>-و-<away>-في-<competition>/` slug.
pub fn decode_match_url(url: &str) -> Option<ListedTeams> {
    let decoded = urlencoding::decode(url).ok()?;
    let slug = decoded.split("/matches/").nth(1)?;
    let slug = slug.strip_suffix('/').unwrap_or(slug);
    if !slug.contains("-و-") {
        return None;
    }
    let mut parts = slug.split("-و-");
    let home = parts.next()?;
    let away = parts.next()?;
    let away = away.split("-في-").next().unwrap_or(away);
    let home = clean_team_name(home);
    let away = clean_team_name(away);
    (!home.is_empty() && !away.is_empty()).then_some(ListedTeams { home, away })
}

fn clean_team_name(slug_part: &str) -> String {
    let name = slug_part.replace('-', " ");
    regex!(r"\s*تحت\s*[0-9]+\s*")
        .replace_all(&name, " ")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use scraper::Html;
    use url::Url;

    use super::{decode_match_url, parse_listing, ListedTeams};

    fn teams(home: &str, away: &str) -> Option<ListedTeams> {
        Some(ListedTeams {
            home: home.into(),
            away: away.into(),
        })
    }

    fn encoded(slug: &str) -> String {
        format!(
            "https://www.kooralivetv.com/matches/{}/",
            urlencoding::encode(slug)
        )
    }

    #[test]
    fn decode_plain_slug() {
        assert_eq!(
            decode_match_url(&encoded("الأهلي-و-الزمالك-في-الدوري-المصري")),
            teams("الأهلي", "الزمالك")
        );
    }

    #[test]
    fn decode_multi_word_and_youth_teams() {
        assert_eq!(
            decode_match_url(&encoded("السعودية-تحت-20-و-اليابان-تحت-20-في-كأس-آسيا")),
            teams("السعودية", "اليابان")
        );
        assert_eq!(
            decode_match_url(&encoded("ريال-مدريد-و-برشلونة")),
            teams("ريال مدريد", "برشلونة")
        );
    }

    #[test]
    fn decode_rejects_other_urls() {
        assert_eq!(decode_match_url("https://www.kooralivetv.com/news/x/"), None);
        assert_eq!(decode_match_url(&encoded("الأهلي-الزمالك")), None);
        assert_eq!(decode_match_url(&encoded("-و-الزمالك")), None);
        assert_eq!(decode_match_url("https://x/matches/%FF%FE-و-b"), None);
    }

    #[test]
    fn listing_dedupes_and_absolutizes() {
        let first = urlencoding::encode("الأهلي-و-الزمالك-في-الدوري").into_owned();
        let second = urlencoding::encode("ليفربول-و-تشيلسي").into_owned();
        let html = Html::parse_document(&format!(
            r#"<html><body>
              <a href="/matches/{first}/">الأهلي ضد الزمالك</a>
              <a href="https://www.kooralivetv.com/matches/{first}/">again</a>
              <a href="/matches/{second}/">ليفربول</a>
              <a href="/matches/plain-slug/">no percent</a>
              <a href="/news/%D8%A7/">news</a>
            </body></html>"#
        ));
        let base = Url::parse("https://www.kooralivetv.com").unwrap();
        let matches = parse_listing(&html, &base);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].title, "الأهلي ضد الزمالك");
        assert_eq!(
            matches[0].link.as_str(),
            format!("https://www.kooralivetv.com/matches/{first}/")
        );
        assert_eq!(matches[1].teams, teams("ليفربول", "تشيلسي").unwrap());
    }
}
