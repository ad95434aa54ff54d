use std::{
    fmt::Debug,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};

/// Writes `value` as two-space indented JSON with a trailing newline.
///
/// The data goes to `<path>.tmp` first, which is then renamed over `path`.
pub fn write_json<P: Into<PathBuf>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let path = path.into();
    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    fs_err::rename(&tmp, &path)?;
    Ok(())
}

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))().with_context(
        || {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;
    use tempfile::tempdir;

    use super::{read_toml, write_json};

    #[test]
    fn json_is_pretty_and_replaces_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale").unwrap();
        let value = BTreeMap::from([("a", 1), ("b", 2)]);
        write_json(&path, &value).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"a\": 1,\n  \"b\": 2\n}\n"
        );
        assert!(!dir.path().join("out.json.tmp").exists());
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn toml_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf.toml");
        std::fs::write(&path, "name = \"x\"").unwrap();
        let sample: Sample = read_toml(&path).unwrap();
        assert_eq!(sample.name, "x");

        std::fs::write(&path, "name = ").unwrap();
        let err = read_toml::<_, Sample>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("conf.toml"));
    }
}
