use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_LEVEL: &str = "warn";

/// `[revlist]` table, shared by ~/.helix.toml and <repo>/helix.toml
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RevListSection {
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub ignore_repo: Option<PathBuf>,

    #[serde(default)]
    pub short_hashes: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub revlist: RevListSection,
}

/// Merged configuration (repo > global > defaults)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub ignore_repo: Option<PathBuf>,
    pub short_hashes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            ignore_repo: None,
            short_hashes: false,
        }
    }
}

impl Config {
    /// Load ~/.helix.toml and <repo>/helix.toml
    pub fn load(repo_path: &Path) -> Result<Self> {
        let global = dirs::home_dir().map(|home| home.join(".helix.toml"));
        Self::load_from(global.as_deref(), repo_path)
    }

    pub fn load_from(global_path: Option<&Path>, repo_path: &Path) -> Result<Self> {
        let global = match global_path {
            Some(path) => read_file(path).context("Failed to load global config")?,
            None => None,
        };
        let repo = read_file(&repo_path.join("helix.toml")).context("Failed to load repo config")?;

        Ok(Self::merge(
            global.map(|c| c.revlist).unwrap_or_default(),
            repo.map(|c| c.revlist).unwrap_or_default(),
        ))
    }

    fn merge(global: RevListSection, repo: RevListSection) -> Self {
        let defaults = Self::default();
        Self {
            log_level: repo
                .log_level
                .or(global.log_level)
                .unwrap_or(defaults.log_level),
            ignore_repo: repo.ignore_repo.or(global.ignore_repo),
            short_hashes: repo
                .short_hashes
                .or(global.short_hashes)
                .unwrap_or(defaults.short_hashes),
        }
    }
}

fn read_file(path: &Path) -> Result<Option<FileConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Some(config))
}
