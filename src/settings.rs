use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use url::Url;

/// Tunables read from the optional TOML file. Every field has a default,
/// so an empty file (or none at all) is a valid configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_base: Url,
    pub mappings_path: PathBuf,
    pub max_posts: usize,
    pub page_size: usize,
    /// Offset used for "today" and for rendering; machine-local when absent.
    pub utc_offset_minutes: Option<i32>,
    /// A today's match younger than this stays live.
    pub live_window_hours: f64,
    pub pacing: Pacing,
    pub delete: DeletePolicy,
    pub scrape: ScrapeSettings,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: Url::parse("https://www.googleapis.com/blogger/v3")
                .expect("constant url is valid"),
            mappings_path: "match-urls.json".into(),
            max_posts: 500,
            page_size: 50,
            utc_offset_minutes: None,
            live_window_hours: 4.,
            pacing: Pacing::default(),
            delete: DeletePolicy::default(),
            scrape: ScrapeSettings::default(),
        }
    }
}

/// Fixed pauses between network calls, in seconds.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pacing {
    pub page_secs: u64,
    pub update_secs: u64,
    pub delete_secs: u64,
    pub match_bot_secs: u64,
}
impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_secs: 1,
            update_secs: 30,
            delete_secs: 10,
            match_bot_secs: 20,
        }
    }
}
impl Pacing {
    pub fn page(&self) -> Duration {
        Duration::from_secs(self.page_secs)
    }
    pub fn update(&self) -> Duration {
        Duration::from_secs(self.update_secs)
    }
    pub fn delete(&self) -> Duration {
        Duration::from_secs(self.delete_secs)
    }
    pub fn match_bot(&self) -> Duration {
        Duration::from_secs(self.match_bot_secs)
    }

    /// All pauses zeroed.
    pub fn none() -> Self {
        Self {
            page_secs: 0,
            update_secs: 0,
            delete_secs: 0,
            match_bot_secs: 0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeletePolicy {
    pub max_age_hours: f64,
    pub no_time_max_age_hours: f64,
    pub match_duration_hours: f64,
}
impl Default for DeletePolicy {
    fn default() -> Self {
        Self {
            max_age_hours: 24.,
            no_time_max_age_hours: 6.,
            match_duration_hours: 3.,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeSettings {
    pub site_base: Url,
    pub listing_path: String,
    /// Prefix the URL-encoded target is appended to. Empty means direct requests.
    pub cors_proxy: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_matches: usize,
    pub recent_posts: usize,
}
impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            site_base: Url::parse("https://www.kooralivetv.com").expect("constant url is valid"),
            listing_path: "/matches-yesterday/".into(),
            cors_proxy: "https://api.allorigins.win/raw?url=".into(),
            timeout_secs: 20,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
            max_matches: 5,
            recent_posts: 20,
        }
    }
}
impl ScrapeSettings {
    pub fn listing_url(&self) -> anyhow::Result<Url> {
        Ok(self.site_base.join(&self.listing_path)?)
    }
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
