use anyhow::{bail, Context};
use log::debug;
use url::Url;

use crate::settings::ScrapeSettings;

/// Plain GETs against the sports site, optionally through a CORS proxy.
pub struct PageFetcher {
    client: reqwest::Client,
    proxy: String,
}

impl PageFetcher {
    pub fn new(settings: &ScrapeSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(settings.timeout())
            .build()?;
        Ok(Self {
            client,
            proxy: settings.cors_proxy.clone(),
        })
    }

    /// The URL actually requested for `target`.
    pub fn request_url(&self, target: &Url) -> anyhow::Result<Url> {
        if self.proxy.is_empty() {
            return Ok(target.clone());
        }
        let url = format!("{}{}", self.proxy, urlencoding::encode(target.as_str()));
        Url::parse(&url).with_context(|| format!("Invalid proxy URL: {url:?}"))
    }

    pub async fn fetch_page(&self, target: &Url) -> anyhow::Result<String> {
        let url = self.request_url(target)?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            bail!(
                "Failed to fetch {target}: server returned {:?}",
                response.status()
            );
        }
        Ok(response.text().await?)
    }
}
