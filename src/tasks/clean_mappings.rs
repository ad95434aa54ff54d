use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use log::info;

use super::{Tally, TaskContext};
use crate::{
    blogger::schema::Post,
    post::{
        date_category::{classify, DateCategory},
        title::is_report,
    },
    url_mappings::{UrlMapping, UrlMappings},
};

/// `Ok(category)` keeps the mapping, `Err(reason)` drops it.
pub fn mapping_verdict(
    mapping: &UrlMapping,
    posts: &[Post],
    now: &DateTime<FixedOffset>,
) -> Result<DateCategory, String> {
    let Some(post) = posts.iter().find(|post| post.url == mapping.url) else {
        return Err("Post not found in blog".to_owned());
    };
    let category = classify(&post.published, now);
    info!(
        "  Post exists: category {category}, report: {}",
        is_report(&post.title, &post.content)
    );
    match category {
        DateCategory::Older => Err("Older than yesterday".to_owned()),
        _ => Ok(category),
    }
}

/// Drops URL mappings whose post is gone or too old. Needs no access token.
pub async fn clean_mappings(ctx: &TaskContext<'_>) -> anyhow::Result<Tally> {
    let mappings_path = &ctx.settings.mappings_path;
    let mut mappings = UrlMappings::load(mappings_path)?;
    let mut tally = Tally::default();
    if mappings.is_empty() {
        info!("No URL mappings to clean");
        return Ok(tally);
    }
    info!("Checking {} URL mappings", mappings.len());
    let posts = ctx
        .blogger
        .list_posts(ctx.settings.max_posts)
        .await
        .context("Could not list posts; leaving the mappings untouched")?;

    mappings.retain(|key, mapping| {
        info!("Checking {}", mapping.label(key));
        match mapping_verdict(mapping, &posts, &ctx.now) {
            Ok(category) => {
                info!("  Keeping mapping ({category})");
                tally.skipped += 1;
                true
            }
            Err(reason) => {
                info!("  Removing mapping: {reason}");
                tally.changed += 1;
                false
            }
        }
    });

    if tally.changed == 0 {
        info!("No mappings needed to be removed");
        return Ok(tally);
    }
    if ctx.dry_run {
        info!("[dry run] Would save {} remaining mappings", mappings.len());
    } else {
        mappings.save(mappings_path)?;
    }
    info!("Kept: {}", tally.skipped);
    info!("Removed: {}", tally.changed);
    info!("Final count: {}", mappings.len());
    Ok(tally)
}
