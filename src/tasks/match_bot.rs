use anyhow::Context;
use log::{error, info, warn};
use scraper::Html;
use tokio::time::sleep;

use super::{Tally, TaskContext};
use crate::{
    blogger::schema::Post,
    post::title::{is_match_post, parse_match_title, teams_match},
    render::rich_report,
    scrape::{extract_report, parse_listing, ListedMatch, ListedTeams, PageFetcher},
};

/// Fills the live posts of yesterday's matches with scraped final reports.
pub async fn match_bot(ctx: &TaskContext<'_>, fetcher: &PageFetcher) -> anyhow::Result<Tally> {
    let scrape = &ctx.settings.scrape;
    let listing_url = scrape.listing_url()?;
    info!("Fetching match listing from {listing_url}");
    let listing = fetcher
        .fetch_page(&listing_url)
        .await
        .context("Failed to fetch the match listing")?;
    let matches = parse_listing(&Html::parse_document(&listing), &scrape.site_base);
    let mut tally = Tally::default();
    if matches.is_empty() {
        info!("No matches found on the listing page");
        return Ok(tally);
    }

    for listed in matches.iter().take(scrape.max_matches) {
        info!("Processing {}", listed.title);
        match process_match(ctx, fetcher, listed).await {
            Ok(true) => tally.changed += 1,
            Ok(false) => tally.skipped += 1,
            Err(e) => {
                error!("  Failed to process {}: {e:#}", listed.title);
                tally.errors += 1;
            }
        }
        sleep(ctx.settings.pacing.match_bot()).await;
    }

    tally.log_summary("Updated with match reports");
    info!("Matches on the listing page: {}", matches.len());
    Ok(tally)
}

/// Returns whether a post was updated.
async fn process_match(
    ctx: &TaskContext<'_>,
    fetcher: &PageFetcher,
    listed: &ListedMatch,
) -> anyhow::Result<bool> {
    let scraped = match fetcher.fetch_page(&listed.link).await {
        Ok(html) => Some(extract_report(&Html::parse_document(&html))),
        Err(e) => {
            warn!("  Could not read the match page: {e:#}");
            None
        }
    };
    let report = rich_report(scraped.as_ref(), &listed.teams, &ctx.now);
    info!(
        "  Generated {:?}: score {}, {} events, logos {}",
        report.title,
        if scraped.as_ref().is_some_and(|s| s.score.is_some()) { "yes" } else { "no" },
        scraped.as_ref().map_or(0, |s| s.events.len()),
        if scraped.as_ref().is_some_and(|s| s.home_logo.is_some()) { "yes" } else { "no" },
    );

    let posts = ctx
        .blogger
        .list_posts(ctx.settings.scrape.recent_posts)
        .await?;
    let Some(post) = find_post_for(&posts, &listed.teams) else {
        info!("  No existing post matches {}", listed.title);
        return Ok(false);
    };
    info!("  Found matching post {:?}", post.title);
    if ctx.dry_run {
        info!("  [dry run] Would update post {} as {:?}", post.id, report.title);
        return Ok(true);
    }
    ctx.blogger.update_post(&post.id, &report).await?;
    Ok(true)
}

/// First match post whose title pairs with the listed teams.
pub fn find_post_for<'a>(posts: &'a [Post], teams: &ListedTeams) -> Option<&'a Post> {
    posts.iter().filter(|post| is_match_post(&post.title)).find(|post| {
        parse_match_title(&post.title)
            .is_some_and(|title| teams_match(&title, &teams.home, &teams.away))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::{find_post_for, match_bot};
    use crate::{
        blogger::schema::Post,
        scrape::{ListedTeams, PageFetcher},
        tasks::{
            test_util::{blogger, now, post, settings},
            Tally, TaskContext,
        },
    };

    fn teams(home: &str, away: &str) -> ListedTeams {
        ListedTeams {
            home: home.into(),
            away: away.into(),
        }
    }

    #[test]
    fn pairs_posts_by_team_prefix() {
        let posts: Vec<Post> = [
            post("1", "Weekly digest", "", "2026-10-18T20:00:00+03:00"),
            post("2", "Liverpool vs Everton", "", "2026-10-18T20:00:00+03:00"),
            post("3", "الأهلي ضد الزمالك - الدوري المصري", "", "2026-10-18T20:00:00+03:00"),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();
        assert_eq!(
            find_post_for(&posts, &teams("الأهلي", "الزمالك")).map(|p| p.id.to_string()),
            Some("3".to_owned())
        );
        assert_eq!(
            find_post_for(&posts, &teams("Liverpool FC", "Everton")).map(|p| p.id.to_string()),
            Some("2".to_owned())
        );
        assert!(find_post_for(&posts, &teams("Arsenal", "Chelsea")).is_none());
    }

    #[tokio::test]
    async fn updates_matching_post() {
        let server = MockServer::start().await;
        let ahly = urlencoding::encode("الأهلي-و-الزمالك-في-الدوري-المصري").into_owned();
        let other = urlencoding::encode("ليفربول-و-تشيلسي").into_owned();
        Mock::given(method("GET"))
            .and(path("/matches-yesterday/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"<html><body><a href="/matches/{ahly}/">1</a><a href="/matches/{other}/">2</a></body></html>"#
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/matches/{ahly}/")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><p>النتيجة 3 - 0</p></body></html>"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/blogs/b1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [post("40", "الأهلي ضد الزمالك", "", "2026-10-18T20:00:00+03:00")]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/blogs/b1/posts/40"))
            .and(body_string_contains("SPORTLIVE_REPORT_V1_2025"))
            .and(body_string_contains("3 - 0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let settings = settings(&server);
        let blogger = blogger(&settings);
        let fetcher = PageFetcher::new(&settings.scrape).unwrap();
        let ctx = TaskContext {
            blogger: &blogger,
            settings: &settings,
            now: now(),
            dry_run: false,
        };
        let tally = match_bot(&ctx, &fetcher).await.unwrap();
        assert_eq!(
            tally,
            Tally {
                changed: 1,
                skipped: 1,
                errors: 0
            }
        );
    }
}
