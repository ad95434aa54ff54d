use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use log::{error, info};
use tokio::time::sleep;

use super::{Tally, TaskContext};
use crate::{
    blogger::schema::{DeleteOutcome, Post},
    post::{
        date_category::age_hours, extract::find_match_time, kickoff::is_match_finished,
        title::is_match_post,
    },
    settings::DeletePolicy,
    url_mappings::UrlMappings,
};

/// Returns `Ok(reason)` when the post should go, `Err(reason)` when it stays.
pub fn deletion_verdict(
    post: &Post,
    now: &DateTime<FixedOffset>,
    policy: &DeletePolicy,
) -> Result<String, String> {
    let age = age_hours(&post.published, now);
    if age > policy.max_age_hours {
        return Ok(format!(
            "Post is {age:.1} hours old (>{}h)",
            policy.max_age_hours
        ));
    }
    match find_match_time(&post.content) {
        Some(time) => {
            // an unrepresentable duration counts as finished, like an unreadable time
            let finished = Duration::try_from_secs_f64(policy.match_duration_hours.max(0.) * 3600.)
                .map_or(true, |duration| {
                    is_match_finished(&time, &post.published, now, duration)
                });
            if finished {
                Ok(format!("Match at {time} has finished"))
            } else {
                Err(format!("Match at {time} is still current or upcoming"))
            }
        }
        None if age > policy.no_time_max_age_hours => Ok(format!(
            "No match time found and post is {age:.1} hours old (>{}h)",
            policy.no_time_max_age_hours
        )),
        None => Err(format!(
            "No match time found but post is only {age:.1} hours old"
        )),
    }
}

/// Deletes match posts whose match is over, dropping their URL mappings.
pub async fn delete_old(ctx: &TaskContext<'_>) -> anyhow::Result<Tally> {
    let mappings_path = &ctx.settings.mappings_path;
    let mut mappings = UrlMappings::load(mappings_path)?;
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

    let mut removed_mappings = 0;
    for post in match_posts {
        info!("Processing {:?} (published {})", post.title, post.published);
        let reason = match deletion_verdict(post, &ctx.now, &ctx.settings.delete) {
            Ok(reason) => reason,
            Err(reason) => {
                info!("  Keeping: {reason}");
                tally.skipped += 1;
                continue;
            }
        };
        info!("  Deleting: {reason}");
        let deleted = if ctx.dry_run {
            info!("  [dry run] Would delete post {}", post.id);
            true
        } else {
            let res = ctx.blogger.delete_post(&post.id).await;
            sleep(ctx.settings.pacing.delete()).await;
            match res {
                Ok(DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone) => true,
                Err(e) => {
                    error!("  Failed to delete post {}: {e}", post.id);
                    false
                }
            }
        };
        if !deleted {
            tally.errors += 1;
            continue;
        }
        tally.changed += 1;
        if let Some((key, mapping)) = mappings.remove_by_url(&post.url) {
            info!("  Removing mapping: {}", mapping.label(&key));
            removed_mappings += 1;
        }
    }

    if removed_mappings > 0 {
        if ctx.dry_run {
            info!("[dry run] Would remove {removed_mappings} URL mappings");
        } else {
            mappings.save(mappings_path)?;
        }
    }
    tally.log_summary("Deleted");
    info!("Cleaned mappings: {removed_mappings}");
    Ok(tally)
}
