use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config as HierarchicalConfig, Environment};
use pokedex_catalog::Language;
use serde::{Deserialize, Serialize};
use tracing::debug;
use xdg::BaseDirectories;

/// Name of pokedex managed directories
const POKEDEX_DIR_NAME: &str = "pokedex";
const POKEDEX_CONFIG_DIR_VAR: &str = "POKEDEX_CONFIG_DIR";
pub const POKEDEX_CONFIG_FILE: &str = "pokedex.toml";
/// Prefix of environment variables overriding config keys
const POKEDEX_ENV_PREFIX: &str = "POKEDEX";

#[derive(Clone, Debug, Deserialize, Default, Serialize)]
pub struct Config {
    /// The base URL of the catalog API,
    /// [pokedex_catalog::DEFAULT_CATALOG_URL] if unset
    // Using a URL here adds an extra trailing slash,
    // so just use a String.
    pub catalog_url: Option<String>,

    /// Language of user facing text
    #[serde(default)]
    pub language: Language,

    /// User agent sent with catalog requests
    pub user_agent: Option<String>,

    /// Additional headers sent with every catalog request
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,
}

impl Config {
    /// Creates a [Config] from the environment and config files
    ///
    /// Later sources override earlier ones:
    ///
    /// 1. `/etc/pokedex.toml`
    /// 2. `pokedex.toml` in `$XDG_CONFIG_DIRS` and `$XDG_CONFIG_HOME`
    /// 3. `$POKEDEX_CONFIG_DIR/pokedex.toml`
    /// 4. `POKEDEX_*` environment variables
    pub fn parse() -> Result<Config> {
        let raw_config = read_raw_config()?;
        let config: Config = raw_config
            .try_deserialize()
            .context("Could not parse config")?;
        debug!(?config, "parsed config");
        Ok(config)
    }
}

fn read_raw_config() -> Result<HierarchicalConfig> {
    let pokedex_dirs = BaseDirectories::with_prefix(POKEDEX_DIR_NAME);

    let mut builder = HierarchicalConfig::builder();

    // read from /etc
    builder = builder.add_source(
        config::File::from(PathBuf::from("/etc").join(POKEDEX_CONFIG_FILE))
            .format(config::FileFormat::Toml)
            .required(false),
    );

    // look for files in XDG_CONFIG_DIRS locations
    for file in pokedex_dirs.find_config_files(POKEDEX_CONFIG_FILE) {
        debug!(file = %file.display(), "reading config file");
        builder = builder.add_source(config::File::from(file).format(config::FileFormat::Toml));
    }

    // Add explicit POKEDEX_CONFIG_DIR file last
    if let Ok(config_dir) = env::var(POKEDEX_CONFIG_DIR_VAR) {
        debug!("`${POKEDEX_CONFIG_DIR_VAR}` set: {config_dir}");
        builder = builder.add_source(
            config::File::from(PathBuf::from(config_dir).join(POKEDEX_CONFIG_FILE))
                .format(config::FileFormat::Toml)
                .required(false),
        );
    }

    // override via env variables
    let builder = builder.add_source(Environment::with_prefix(POKEDEX_ENV_PREFIX));

    builder.build().context("Could not read config")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    /// Run `f` with config sources restricted to `config_dir`
    fn with_config_dir<R>(
        config_dir: &TempDir,
        vars: &[(&str, Option<&str>)],
        f: impl FnOnce() -> R,
    ) -> R {
        let empty_xdg = config_dir.path().join("xdg");
        let config_dir = config_dir.path().to_str().unwrap();
        let empty_xdg = empty_xdg.to_str().unwrap();

        let mut all_vars = vec![
            (POKEDEX_CONFIG_DIR_VAR, Some(config_dir)),
            ("XDG_CONFIG_HOME", Some(empty_xdg)),
            ("XDG_CONFIG_DIRS", Some(empty_xdg)),
        ];
        all_vars.extend_from_slice(vars);
        for key in ["POKEDEX_CATALOG_URL", "POKEDEX_LANGUAGE", "POKEDEX_USER_AGENT"] {
            if !vars.iter().any(|(set, _)| *set == key) {
                all_vars.push((key, None));
            }
        }

        temp_env::with_vars(all_vars, f)
    }

    #[test]
    fn defaults_without_sources() {
        let config_dir = TempDir::new().unwrap();
        let config = with_config_dir(&config_dir, &[], Config::parse).unwrap();

        assert_eq!(config.catalog_url, None);
        assert_eq!(config.language, Language::Pt);
        assert_eq!(config.user_agent, None);
        assert!(config.extra_headers.is_empty());
    }

    #[test]
    fn reads_config_file() {
        let config_dir = TempDir::new().unwrap();
        fs::write(
            config_dir.path().join(POKEDEX_CONFIG_FILE),
            indoc::indoc! {r#"
                catalog_url = "http://localhost:8080/api/v2"
                language = "en"
            "#},
        )
        .unwrap();

        let config = with_config_dir(&config_dir, &[], Config::parse).unwrap();
        assert_eq!(
            config.catalog_url.as_deref(),
            Some("http://localhost:8080/api/v2")
        );
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn reads_extra_headers_table() {
        let config_dir = TempDir::new().unwrap();
        fs::write(
            config_dir.path().join(POKEDEX_CONFIG_FILE),
            indoc::indoc! {r#"
                [extra_headers]
                x-pokedex-client = "terminal"
            "#},
        )
        .unwrap();

        let config = with_config_dir(&config_dir, &[], Config::parse).unwrap();
        assert_eq!(
            config.extra_headers,
            BTreeMap::from([("x-pokedex-client".to_string(), "terminal".to_string())])
        );
    }

    #[test]
    fn environment_overrides_file() {
        let config_dir = TempDir::new().unwrap();
        fs::write(
            config_dir.path().join(POKEDEX_CONFIG_FILE),
            "catalog_url = \"http://from-file\"\n",
        )
        .unwrap();

        let config = with_config_dir(
            &config_dir,
            &[
                ("POKEDEX_CATALOG_URL", Some("http://from-env")),
                ("POKEDEX_USER_AGENT", Some("tests")),
            ],
            Config::parse,
        )
        .unwrap();

        assert_eq!(config.catalog_url.as_deref(), Some("http://from-env"));
        assert_eq!(config.user_agent.as_deref(), Some("tests"));
    }

    #[test]
    fn invalid_language_is_an_error() {
        let config_dir = TempDir::new().unwrap();
        let result = with_config_dir(
            &config_dir,
            &[("POKEDEX_LANGUAGE", Some("klingon"))],
            Config::parse,
        );
        assert!(result.is_err());
    }
}
