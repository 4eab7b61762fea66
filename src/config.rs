use crate::error::{AutotagError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "autotag.toml";

/// Represents the complete configuration for pr-autotag.
///
/// Every field has a default so that an empty file (or no file) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Prefix created tags with `v`
    #[serde(default = "default_true")]
    pub v_prefix: bool,

    #[serde(default = "default_true")]
    pub create_release: bool,

    #[serde(default = "default_true")]
    pub mark_release_as_latest: bool,

    #[serde(default = "default_true")]
    pub generate_release_notes: bool,

    /// Post (or update) the status comment on the pull request
    #[serde(default = "default_true")]
    pub comment_pr: bool,

    /// Compute and report the decision without creating anything
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default)]
    pub comment: CommentConfig,
}

fn default_true() -> bool {
    true
}

/// Returns the default list of commit types that trigger minor version bumps.
fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default list of commit types that trigger patch version bumps.
fn default_patch_types() -> Vec<String> {
    vec!["fix".to_string()]
}

/// Configuration for conventional commit analysis.
///
/// Header types are compared case-insensitively. A `!` before the colon or a
/// breaking-change footer always means major, whatever the type.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
        }
    }
}

fn default_marker() -> String {
    "pr-autotag".to_string()
}

/// Configuration for the sticky status comment
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommentConfig {
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for CommentConfig {
    fn default() -> Self {
        CommentConfig {
            marker: default_marker(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            v_prefix: true,
            create_release: true,
            mark_release_as_latest: true,
            generate_release_notes: true,
            comment_pr: true,
            dry_run: false,
            conventional_commits: ConventionalCommitsConfig::default(),
            comment: CommentConfig::default(),
        }
    }
}

/// Parse a boolean flag the way workflow inputs are passed: `"true"` in any
/// case is true, anything else is false.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl Config {
    /// Override flags from workflow inputs.
    ///
    /// `lookup` receives the input variable name (e.g. `INPUT_V_PREFIX`).
    /// Missing or empty inputs leave the current value untouched.
    pub fn apply_inputs<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let flags: [(&str, &mut bool); 6] = [
            ("INPUT_V_PREFIX", &mut self.v_prefix),
            ("INPUT_CREATE_RELEASE", &mut self.create_release),
            ("INPUT_MARK_RELEASE_AS_LATEST", &mut self.mark_release_as_latest),
            ("INPUT_GENERATE_RELEASE_NOTES", &mut self.generate_release_notes),
            ("INPUT_COMMENT_PR", &mut self.comment_pr),
            ("INPUT_DRY_RUN", &mut self.dry_run),
        ];

        for (name, flag) in flags {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *flag = parse_flag(&value);
                debug!("{} = {:?} -> {}", name, value, flag);
            }
        }
    }

    /// Override flags from the process environment
    pub fn apply_env_inputs(&mut self) {
        self.apply_inputs(|name| std::env::var(name).ok());
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autotag.toml` in current directory
/// 3. `~/.config/.autotag.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    debug!("Loading configuration from {}", path.display());
    let config_str = fs::read_to_string(&path).map_err(|e| {
        AutotagError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| AutotagError::config(format!("Cannot parse '{}': {}", path.display(), e)))
}
