use log::info;

use crate::blogger::{schema::PostId, BloggerClient};

/// Resolves a published post URL to its id.
pub async fn lookup_post(blogger: &BloggerClient, url: &str) -> anyhow::Result<Option<PostId>> {
    info!("Looking up the post id of {url}");
    let id = blogger.find_post_id_by_url(url).await?;
    match &id {
        Some(id) => info!("Found post {id}"),
        None => info!("No post found"),
    }
    Ok(id)
}
