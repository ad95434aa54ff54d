use chrono::{DateTime, FixedOffset};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Hash, Debug, From, Display, Serialize, Deserialize)]
pub struct PostId(String);

/// A blog post as returned by the posts endpoints. Unknown fields are ignored.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostList {
    #[serde(default)]
    pub items: Vec<Post>,
    pub next_page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DeleteOutcome {
    Deleted,
    /// The server answered 404; the post was already gone.
    AlreadyGone,
}
