use std::fmt::Debug;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub const BLOG_ID_VAR: &str = "BLOG_ID";
pub const API_KEY_VAR: &str = "API_KEY";
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";

#[derive(Debug, TypedBuilder, Serialize, Deserialize)]
pub struct Credentials {
    pub blog_id: BlogId,
    pub api_key: ApiKey,
    #[builder(default)]
    pub access_token: Option<AccessToken>,
}

#[derive(Clone, Debug, From, Display, Serialize, Deserialize)]
pub struct BlogId(String);
impl BlogId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, From, Serialize, Deserialize)]
pub struct ApiKey(String);
impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(..)")
    }
}

/// OAuth bearer token used for writes.
#[derive(Clone, From, Serialize, Deserialize)]
pub struct AccessToken(String);
impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Missing required environment variables: {}", .0.join(", "))]
pub struct MissingEnv(pub Vec<&'static str>);

impl Credentials {
    /// Reads the credentials from `BLOG_ID`, `API_KEY` and `ACCESS_TOKEN`.
    pub fn from_env(require_token: bool) -> Result<Self, MissingEnv> {
        Self::from_lookup(|name| std::env::var(name).ok(), require_token)
    }

    /// Same as [`Credentials::from_env`], with an arbitrary variable source.
    /// Empty values are treated as absent.
    pub fn from_lookup(
        mut lookup: impl FnMut(&'static str) -> Option<String>,
        require_token: bool,
    ) -> Result<Self, MissingEnv> {
        let mut missing = vec![];
        let mut get = |name| match lookup(name).filter(|v| !v.trim().is_empty()) {
            Some(v) => Some(v),
            None => {
                missing.push(name);
                None
            }
        };
        let blog_id = get(BLOG_ID_VAR);
        let api_key = get(API_KEY_VAR);
        let access_token = lookup(ACCESS_TOKEN_VAR).filter(|v| !v.trim().is_empty());
        if require_token && access_token.is_none() {
            missing.push(ACCESS_TOKEN_VAR);
        }
        match (blog_id, api_key) {
            (Some(blog_id), Some(api_key)) if missing.is_empty() => Ok(Self {
                blog_id: blog_id.into(),
                api_key: api_key.into(),
                access_token: access_token.map(Into::into),
            }),
            _ => Err(MissingEnv(missing)),
        }
    }
}
