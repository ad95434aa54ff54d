use std::{
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use fs_err::File;
use indexmap::IndexMap;
use log::info;
use match_posts_utils::fs_json_util::write_json;
use serde::{Deserialize, Serialize};

/// One tracked match and the post it was published as.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct UrlMapping {
    pub url: String,
    #[serde(rename = "readableKey", default, skip_serializing_if = "Option::is_none")]
    pub readable_key: Option<String>,
    /// Fields written by other tools, kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UrlMapping {
    pub fn new(url: impl Into<String>, readable_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            readable_key: Some(readable_key.into()),
            extra: Default::default(),
        }
    }

    /// Human readable label, falling back to the map key.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.readable_key.as_deref().unwrap_or(key)
    }
}

/// Contents of `match-urls.json`: an object keyed by match key, kept in file order.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlMappings(IndexMap<String, UrlMapping>);

impl UrlMappings {
    /// A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, MappingsLoadError> {
        let path = path.into();
        match File::open(&path) {
            Ok(file) => {
                let res: Self = serde_json::from_reader(BufReader::new(file))?;
                info!("Loaded {} URL mappings from {path:?}", res.len());
                Ok(res)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No URL mappings file found at {path:?}");
                Ok(Self::default())
            }
            Err(e) => Err(MappingsLoadError::IOError(e)),
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        write_json(path, self)?;
        info!("Saved URL mappings ({} entries) to {path:?}", self.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&UrlMapping> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, mapping: UrlMapping) -> Option<UrlMapping> {
        self.0.insert(key.into(), mapping)
    }

    /// Removes the first entry (in file order) pointing at `url`.
    pub fn remove_by_url(&mut self, url: &str) -> Option<(String, UrlMapping)> {
        let key = self
            .0
            .iter()
            .find(|(_, mapping)| mapping.url == url)
            .map(|(key, _)| key.clone())?;
        self.0.shift_remove_entry(&key)
    }

    pub fn retain(&mut self, f: impl FnMut(&String, &mut UrlMapping) -> bool) {
        self.0.retain(f)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MappingsLoadError {
    #[error("An I/O error occurred when loading the URL mappings: {0:?}")]
    IOError(io::Error),
    #[error("The URL mappings json file is corrupted and could not be loaded: {0:?}")]
    JsonError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::{MappingsLoadError, UrlMapping, UrlMappings};

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = UrlMappings::load(dir.path().join("match-urls.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn save_and_load_preserve_everything() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("match-urls.json");
        let raw = json!({
            "ahly-zamalek": {
                "url": "https://blog.example/2026/10/ahly-zamalek.html",
                "readableKey": "الأهلي ضد الزمالك",
                "createdAt": "2026-10-19T10:00:00Z"
            },
            "arsenal-chelsea": { "url": "https://blog.example/2026/10/a-c.html" }
        });
        std::fs::write(&path, raw.to_string()).unwrap();

        let store = UrlMappings::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        let entry = store.get("ahly-zamalek").unwrap();
        assert_eq!(entry.label("ahly-zamalek"), "الأهلي ضد الزمالك");
        assert_eq!(entry.extra["createdAt"], "2026-10-19T10:00:00Z");
        assert_eq!(
            store.get("arsenal-chelsea").unwrap().label("arsenal-chelsea"),
            "arsenal-chelsea"
        );

        store.save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"ahly-zamalek\": {"));
        let reread: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reread, raw);
        assert_eq!(UrlMappings::load(&path).unwrap(), store);
    }

    #[test]
    fn save_keeps_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("match-urls.json");
        let raw = json!({
            "zamalek-ahly": {
                "url": "https://blog.example/2026/10/z-a.html",
                "readableKey": "الزمالك ضد الأهلي",
                "updatedAt": "2026-10-19T12:00:00Z",
                "createdAt": "2026-10-19T10:00:00Z"
            },
            "arsenal-chelsea": { "url": "https://blog.example/2026/10/a-c.html" },
            "milan-inter": { "url": "https://blog.example/2026/10/m-i.html" }
        });
        let text = format!("{}\n", serde_json::to_string_pretty(&raw).unwrap());
        std::fs::write(&path, &text).unwrap();

        let mut store = UrlMappings::load(&path).unwrap();
        store.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);

        store.remove_by_url("https://blog.example/2026/10/a-c.html");
        store.insert("barca-real", UrlMapping::new("https://blog.example/2026/10/b-r.html", "B"));
        let keys: Vec<_> = store.0.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zamalek-ahly", "milan-inter", "barca-real"]);
    }

    #[test]
    fn remove_by_url_removes_one_entry() {
        let mut store = UrlMappings::default();
        store.insert("a", UrlMapping::new("https://x/1", "A"));
        store.insert("b", UrlMapping::new("https://x/2", "B"));
        let (key, removed) = store.remove_by_url("https://x/2").unwrap();
        assert_eq!(key, "b");
        assert_eq!(removed.readable_key.as_deref(), Some("B"));
        assert!(store.remove_by_url("https://x/2").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("match-urls.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            UrlMappings::load(&path),
            Err(MappingsLoadError::JsonError(_))
        ));
    }
}
