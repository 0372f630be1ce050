//! Configuration loading and validation.
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. A config file: the one passed explicitly, otherwise the first of
//!    `config.toml`, `config.yaml`, `config.yml` or `config.json` found in the
//!    platform config directory (e.g. `~/.config/filetag` on Linux).
//! 3. Environment variables prefixed with `FILETAG_`, e.g. `FILETAG_TAG_FILE`.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{Exn, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "FILETAG_";
const DEFAULT_FILE_NAMES: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Name of the metadata store file created in each tagged directory.
    pub tag_file: String,
    /// Compact the store file whenever it is opened.
    pub vacuum: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag_file: ".tag".to_string(),
            vacuum: false,
        }
    }
}

/// Platform-specific directory searched for a config file.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "filetag").map(|dirs| dirs.config_dir().to_path_buf())
}

impl Config {
    /// Load configuration, reading `file` if given or searching the platform
    /// config directory otherwise.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_from(file, config_dir().as_deref())
    }

    fn load_from(file: Option<&Path>, search_dir: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match file {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
                }
                figment = merge_file(figment, path)?;
            },
            None => {
                let found = search_dir
                    .into_iter()
                    .flat_map(|dir| DEFAULT_FILE_NAMES.iter().map(move |name| dir.join(name)))
                    .find(|path| path.is_file());
                if let Some(path) = found {
                    figment = merge_file(figment, &path)?;
                }
            },
        }
        let config: Config = figment.merge(Env::prefixed(ENV_PREFIX)).extract().or_raise(|| ErrorKind::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that values make sense beyond their types.
    pub fn validate(&self) -> Result<()> {
        let mut components = Path::new(&self.tag_file).components();
        let single_name = matches!((components.next(), components.next()), (Some(Component::Normal(_)), None));
        if !single_name || self.tag_file.contains(['/', '\\']) {
            exn::bail!(ErrorKind::InvalidTagFile(self.tag_file.clone()));
        }
        Ok(())
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    tracing::debug!(path = %path.display(), "Loading configuration file");
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("toml") => Ok(figment.merge(Toml::file_exact(path))),
        Some("yaml" | "yml") => Ok(figment.merge(Yaml::file_exact(path))),
        Some("json") => Ok(figment.merge(Json::file_exact(path))),
        _ => Err(Exn::from(ErrorKind::UnsupportedFormat(path.to_path_buf()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(None, None).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.tag_file, ".tag");
            assert!(!config.vacuum);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "tag_file = \".meta\"\nvacuum = true\n")?;
            let config = Config::load_from(Some(Path::new("custom.toml")), None).unwrap();
            assert_eq!(config, Config { tag_file: ".meta".to_string(), vacuum: true });
            Ok(())
        });
    }

    #[test]
    fn test_search_dir_is_used_without_explicit_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "tag_file: tags.db\n")?;
            let config = Config::load_from(None, Some(jail.directory())).unwrap();
            assert_eq!(config.tag_file, "tags.db");
            assert!(!config.vacuum);
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.json", r#"{"tag_file": ".from-file", "vacuum": false}"#)?;
            jail.set_env("FILETAG_TAG_FILE", ".from-env");
            jail.set_env("FILETAG_VACUUM", "true");
            let config = Config::load_from(Some(Path::new("custom.json")), None).unwrap();
            assert_eq!(config, Config { tag_file: ".from-env".to_string(), vacuum: true });
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(Some(&dir.path().join("nope.toml")), None).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "tag_file = x").unwrap();
        let err = Config::load_from(Some(&path), None).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnsupportedFormat(_)));
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "vacuum = [1, 2]\n")?;
            let err = Config::load_from(Some(Path::new("custom.toml")), None).unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid));
            Ok(())
        });
    }

    #[rstest]
    #[case(".tag", true)]
    #[case("tags.db", true)]
    #[case("", false)]
    #[case(".", false)]
    #[case("..", false)]
    #[case("nested/.tag", false)]
    #[case("/abs/.tag", false)]
    #[case("trailing/", false)]
    #[case("back\\slash", false)]
    fn test_validate_tag_file(#[case] tag_file: &str, #[case] valid: bool) {
        let config = Config { tag_file: tag_file.to_string(), ..Config::default() };
        assert_eq!(config.validate().is_ok(), valid);
    }
}
