use crate::changelog::RenderOptions;
use crate::domain::TagScheme;
use crate::error::{ReleaseBumpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the project-local configuration file
pub const CONFIG_FILE: &str = "releasebump.toml";

/// Represents the complete configuration for release-bump.
///
/// Contains changelog rendering settings, console display limits and tag naming patterns.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub tags: TagsConfig,
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_commit_url() -> String {
    "../../commit/{hash}".to_string()
}

fn default_short_hash_len() -> usize {
    7
}

/// Configuration for changelog generation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_file")]
    pub file_name: String,

    /// Link target for commit references; `{hash}` is substituted
    #[serde(default = "default_commit_url")]
    pub commit_url: String,

    #[serde(default = "default_short_hash_len")]
    pub short_hash_len: usize,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            file_name: default_changelog_file(),
            commit_url: default_commit_url(),
            short_hash_len: default_short_hash_len(),
        }
    }
}

impl ChangelogConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            commit_url: self.commit_url.clone(),
            short_hash_len: self.short_hash_len,
        }
    }
}

fn default_breakdown_limit() -> usize {
    5
}

fn default_other_limit() -> usize {
    3
}

/// Controls how many commits the console breakdown lists per category.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Limit for breaking changes, features and fixes
    #[serde(default = "default_breakdown_limit")]
    pub breakdown_limit: usize,

    /// Limit for everything else
    #[serde(default = "default_other_limit")]
    pub other_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            breakdown_limit: default_breakdown_limit(),
            other_limit: default_other_limit(),
        }
    }
}

fn default_workspace_tag() -> String {
    "v{version}".to_string()
}

fn default_crate_tag() -> String {
    "{crate}/v{version}".to_string()
}

/// Tag naming patterns used to find release points and suggest new tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_workspace_tag")]
    pub workspace: String,

    #[serde(default = "default_crate_tag", rename = "crate")]
    pub krate: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            workspace: default_workspace_tag(),
            krate: default_crate_tag(),
        }
    }
}

impl TagsConfig {
    pub fn scheme(&self) -> TagScheme {
        TagScheme::new(self.workspace.clone(), self.krate.clone())
    }
}

/// Parse configuration text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ReleaseBumpError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasebump.toml` in current directory
/// 3. `~/.config/.releasebump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE);

    let config_file = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(format!(".{}", CONFIG_FILE));
        if user.exists() {
            user
        } else {
            debug!("no configuration file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    debug!(path = %config_file.display(), "loading configuration");
    let content = fs::read_to_string(&config_file).map_err(|e| {
        ReleaseBumpError::config(format!("cannot read {}: {}", config_file.display(), e))
    })?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.changelog.file_name, "CHANGELOG.md");
        assert_eq!(config.changelog.short_hash_len, 7);
        assert_eq!(config.display.breakdown_limit, 5);
        assert_eq!(config.display.other_limit, 3);
        assert_eq!(config.tags.krate, "{crate}/v{version}");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config("[changelog]\nshort_hash_len = 10\n").unwrap();
        assert_eq!(config.changelog.short_hash_len, 10);
        assert_eq!(config.changelog.commit_url, "../../commit/{hash}");
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        let err = parse_config("[display]\nbreakdown_limit = \"many\"\n").unwrap_err();
        assert!(matches!(err, ReleaseBumpError::Config(_)));
    }

    #[test]
    fn test_render_options_from_config() {
        let config = parse_config("[changelog]\ncommit_url = \"https://x/{hash}\"\n").unwrap();
        let options = config.changelog.render_options();
        assert_eq!(options.commit_url, "https://x/{hash}");
        assert_eq!(options.short_hash_len, 7);
    }
}
