use anyhow::{Context, Result};
use ledgerlift_remote::RemoteConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::ensure_ledgerlift_home;

/// Environment variable that overrides `remote.api_key`.
pub const API_KEY_ENV: &str = "DATALAB_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub remote: RemoteSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Where CSV files are written when --out-dir is not given
    pub dir: PathBuf,
    /// Reject input PDFs larger than this
    pub max_file_mb: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    pub api_url: String,
    /// Prefer the DATALAB_API_KEY environment variable over storing it here.
    pub api_key: Option<String>,
    pub poll_interval_secs: u64,
    pub max_polls: u32,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_file_mb: 128,
        }
    }
}

impl Default for RemoteSection {
    fn default() -> Self {
        let defaults = RemoteConfig::default();
        Self {
            api_url: defaults.api_url,
            api_key: None,
            poll_interval_secs: defaults.poll_interval.as_secs(),
            max_polls: defaults.max_polls,
        }
    }
}

impl OutputSection {
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_mb.saturating_mul(1024 * 1024)
    }
}

impl RemoteSection {
    /// Build the client config; `env_key` (from DATALAB_API_KEY) wins over the file.
    pub fn to_remote_config(&self, env_key: Option<String>) -> RemoteConfig {
        RemoteConfig {
            api_url: self.api_url.clone(),
            api_key: env_key.filter(|k| !k.is_empty()).or_else(|| self.api_key.clone()),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            max_polls: self.max_polls,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_ledgerlift_home()?.join("config.toml"))
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?)
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.output.max_file_bytes(), 128 * 1024 * 1024);
        assert_eq!(cfg.remote.max_polls, 300);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.output.dir = PathBuf::from("/tmp/statements");
        cfg.remote.max_polls = 10;
        save_config_to(&p, &cfg).unwrap();

        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[remote]\npoll_interval_secs = 5\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.remote.poll_interval_secs, 5);
        assert_eq!(cfg.remote.max_polls, 300);
        assert_eq!(cfg.output, OutputSection::default());
    }

    #[test]
    fn test_env_key_overrides_file() {
        let section = RemoteSection {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        let rc = section.to_remote_config(Some("from-env".to_string()));
        assert_eq!(rc.api_key.as_deref(), Some("from-env"));
        assert_eq!(rc.poll_interval, Duration::from_secs(2));

        let rc = section.to_remote_config(Some(String::new()));
        assert_eq!(rc.api_key.as_deref(), Some("from-file"));

        let rc = section.to_remote_config(None);
        assert_eq!(rc.api_key.as_deref(), Some("from-file"));
    }
}
