//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Response to detected broken links, configured via `on_broken_links`.
///
/// An unrecognized value fails config parsing before any detection runs;
/// once a `Config` exists the policy dispatch is an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnBrokenLinks {
    /// Skip detection entirely, no report is computed.
    Ignore,
    /// Emit the report as an info-level diagnostic and continue.
    Log,
    /// Emit the report as an error-level diagnostic and continue.
    /// `error` is accepted as an alias for this variant.
    #[serde(alias = "error")]
    Warn,
    /// Fail the build with the report message.
    Throw,
}

impl OnBrokenLinks {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnBrokenLinks::Ignore => "ignore",
            OnBrokenLinks::Log => "log",
            OnBrokenLinks::Warn => "warn",
            OnBrokenLinks::Throw => "throw",
        }
    }
}

/// Main configuration struct matching the siteproof.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_policy")]
    pub on_broken_links: OnBrokenLinks,

    /// Collected links matching any of these regexes are never checked.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_policy() -> OnBrokenLinks {
    OnBrokenLinks::Throw
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the build artifacts (routes.json, links.json).
    pub manifests: PathBuf,

    /// The rendered site output directory probed by the existing-file filter.
    pub output: PathBuf,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    /// Required fields must be present and non-empty
    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::MissingField("site.title".to_string()));
        }
        if self.site.url.trim().is_empty() {
            return Err(ConfigError::MissingField("site.url".to_string()));
        }
        Ok(())
    }

    /// Get the manifests directory, resolved relative to the config file
    pub fn manifest_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.manifests)
    }

    /// Get the output directory, resolved relative to the config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Default location of the route manifest
    pub fn routes_manifest_path(&self) -> PathBuf {
        self.manifest_dir().join("routes.json")
    }

    /// Default location of the collected-links manifest
    pub fn links_manifest_path(&self) -> PathBuf {
        self.manifest_dir().join("links.json")
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.as_ref().and_then(|p| p.parent()) {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    // Rebuild segment by segment, which also collapses duplicate slashes
    let mut normalized = String::from("/");
    for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
        normalized.push_str(segment);
        normalized.push('/');
    }
    normalized
}
