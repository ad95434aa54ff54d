use chrono::{DateTime, FixedOffset};
use log::{error, info, warn};
use tokio::time::sleep;

use super::{Tally, TaskContext};
use crate::{
    blogger::schema::Post,
    post::{
        date_category::{age_hours, classify, DateCategory},
        extract::extract_live_post,
        title::{is_match_post, is_report},
    },
    render::{is_current_template, live_report},
};

#[derive(Clone, PartialEq, Debug)]
pub enum Plan {
    /// Already rendered with a current template.
    UpToDate,
    Keep(String),
    Convert(String),
}

/// What to do with one match post.
pub fn plan(post: &Post, now: &DateTime<FixedOffset>, live_window_hours: f64) -> (DateCategory, Plan) {
    let category = classify(&post.published, now);
    if is_report(&post.title, &post.content) {
        let plan = if is_current_template(&post.content) {
            Plan::UpToDate
        } else {
            Plan::Convert("Report uses an old template".to_owned())
        };
        return (category, plan);
    }
    let plan = match category {
        DateCategory::Older => Plan::Convert("Published before yesterday".to_owned()),
        DateCategory::Yesterday => Plan::Convert("Yesterday's match".to_owned()),
        DateCategory::Today => {
            let age = age_hours(&post.published, now);
            if age > live_window_hours {
                Plan::Convert(format!("Today's match is {age:.1} hours old"))
            } else {
                Plan::Keep(format!("Today's match is only {age:.1} hours old"))
            }
        }
        DateCategory::Future => Plan::Keep("Scheduled in the future".to_owned()),
    };
    (category, plan)
}

/// Rewrites finished live match posts as static reports.
pub async fn update_posts(ctx: &TaskContext<'_>) -> anyhow::Result<Tally> {
    let posts = ctx.blogger.list_posts(ctx.settings.max_posts).await?;
    let mut tally = Tally::default();
    if posts.is_empty() {
        info!("No posts found to process");
        return Ok(tally);
    }
    let match_posts: Vec<_> = posts.iter().filter(|p| is_match_post(&p.title)).collect();
    info!(
        "Found {} match posts out of {} posts",
        match_posts.len(),
        posts.len()
    );

    for post in match_posts {
        info!("Processing {:?} (published {})", post.title, post.published);
        let (category, decision) = plan(post, &ctx.now, ctx.settings.live_window_hours);
        info!("  Date category: {category}");
        match decision {
            Plan::UpToDate => {
                info!("  Already has a current report template");
                tally.skipped += 1;
                continue;
            }
            Plan::Keep(reason) => {
                info!("  Keeping as is: {reason}");
                tally.skipped += 1;
                continue;
            }
            Plan::Convert(reason) => info!("  Converting to report: {reason}"),
        }

        let Some(data) = extract_live_post(&post.title, &post.content) else {
            warn!("  Could not extract match data from {:?}", post.title);
            tally.skipped += 1;
            continue;
        };
        let published = post.published.with_timezone(&ctx.now.timezone()).date_naive();
        let report = live_report(&data, category, published);
        if ctx.dry_run {
            info!("  [dry run] Would update post {} as {:?}", post.id, report.title);
            tally.changed += 1;
            continue;
        }
        match ctx.blogger.update_post(&post.id, &report).await {
            Ok(()) => {
                info!("  Updated post {} as {:?}", post.id, report.title);
                tally.changed += 1;
            }
            Err(e) => {
                error!("  Failed to update post {}: {e}", post.id);
                tally.errors += 1;
            }
        }
        sleep(ctx.settings.pacing.update()).await;
    }

    tally.log_summary("Converted to reports");
    Ok(tally)
}
