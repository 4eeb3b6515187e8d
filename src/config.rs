use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Version;
use crate::error::{AutoSemverError, Result};
use crate::git::Credentials;

pub const PUSH_USER_VAR: &str = "AUTOSEMVER_GIT_PUSH_USER";
pub const PUSH_TOKEN_VAR: &str = "AUTOSEMVER_GIT_PUSH_TOKEN";
pub const ENVIRONMENT_VAR: &str = "CI_ENVIRONMENT_NAME";
pub const COMMIT_TAG_VAR: &str = "CI_COMMIT_TAG";

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "autosemver.toml";
/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".autosemver.toml";

/// Values the CI job hands to the tool through its environment.
///
/// All four variables are required; the first missing one is reported by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub credentials: Credentials,
    /// Environment the pipeline deploys to, e.g. `prod`.
    pub environment: String,
    /// Commit reference the protection tag must point at.
    pub commit_ref: String,
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, treating empty values as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    AutoSemverError::configuration(format!(
                        "required environment variable {} is not set",
                        key
                    ))
                })
        };

        let user = require(PUSH_USER_VAR)?;
        let token = require(PUSH_TOKEN_VAR)?;
        let environment = require(ENVIRONMENT_VAR)?;
        let commit_ref = require(COMMIT_TAG_VAR)?;

        Ok(Settings {
            credentials: Credentials::new(user, token),
            environment,
            commit_ref,
        })
    }
}

/// Naming conventions shared by version and protection tags.
///
/// Every field has a default, so an absent or partial `autosemver.toml` is fine.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Conventions {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    #[serde(default = "default_merge_marker")]
    pub merge_marker: String,

    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    #[serde(default = "default_remote_port_marker")]
    pub remote_port_marker: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub branches: BranchKeywords,

    #[serde(default)]
    pub protection: ProtectionConfig,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_release_prefix() -> String {
    "release-".to_string()
}

fn default_merge_marker() -> String {
    "Merge branch".to_string()
}

fn default_initial_version() -> String {
    "1.0.0".to_string()
}

fn default_remote_port_marker() -> String {
    ":7999".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Conventions {
    fn default() -> Self {
        Conventions {
            tag_prefix: default_tag_prefix(),
            release_prefix: default_release_prefix(),
            merge_marker: default_merge_marker(),
            initial_version: default_initial_version(),
            remote_port_marker: default_remote_port_marker(),
            remote: default_remote(),
            branches: BranchKeywords::default(),
            protection: ProtectionConfig::default(),
        }
    }
}

impl Conventions {
    /// Full name of the version tag for `version`, e.g. `v1.2.3`.
    pub fn version_tag(&self, version: &Version) -> String {
        format!("{}{}", self.tag_prefix, version)
    }

    /// Full name of the protection tag for `environment`, e.g. `release-prod`.
    pub fn protection_tag(&self, environment: &str) -> String {
        format!("{}{}", self.release_prefix, environment)
    }

    /// The version used when the repository has no version tags yet.
    pub fn initial_version(&self) -> Result<Version> {
        Version::parse(&self.initial_version).map_err(|e| {
            AutoSemverError::configuration(format!("invalid initial_version: {}", e))
        })
    }

    fn validate(&self) -> Result<()> {
        if self.merge_marker.trim().is_empty() {
            return Err(AutoSemverError::configuration("merge_marker must not be empty"));
        }
        if self.release_prefix.is_empty() {
            return Err(AutoSemverError::configuration(
                "release_prefix must not be empty",
            ));
        }
        self.initial_version()?;
        Ok(())
    }
}

/// Branch-name fragments that select a bump, checked patch first.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchKeywords {
    #[serde(default = "default_patch_keywords")]
    pub patch: Vec<String>,

    #[serde(default = "default_minor_keywords")]
    pub minor: Vec<String>,
}

fn default_patch_keywords() -> Vec<String> {
    vec!["bugfix/".to_string(), "hotfix/".to_string()]
}

fn default_minor_keywords() -> Vec<String> {
    vec!["feature/".to_string()]
}

impl Default for BranchKeywords {
    fn default() -> Self {
        BranchKeywords {
            patch: default_patch_keywords(),
            minor: default_minor_keywords(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ProtectionConfig {
    #[serde(default)]
    pub strategy: ProtectStrategy,
}

/// How a protection tag is replaced.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProtectStrategy {
    /// Delete the old tag, then create the new one. The tag is briefly absent in between.
    #[default]
    DeleteThenCreate,
    /// Overwrite the tag and force-push it in a single ref update.
    ForceMove,
}

/// Loads naming conventions from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autosemver.toml` in current directory
/// 3. `.autosemver.toml` in the user config directory
/// 4. Default conventions if no file found
///
/// # Returns
/// * `Ok(Conventions)` - Loaded or default conventions
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_conventions(config_path: Option<&Path>) -> Result<Conventions> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(),
    };

    let conventions = match path {
        Some(path) => {
            tracing::debug!("Loading conventions from {}", path.display());
            let content = fs::read_to_string(&path).map_err(|e| {
                AutoSemverError::configuration(format!("cannot read {}: {}", path.display(), e))
            })?;
            toml::from_str::<Conventions>(&content).map_err(|e| {
                AutoSemverError::configuration(format!("cannot parse {}: {}", path.display(), e))
            })?
        }
        None => Conventions::default(),
    };

    conventions.validate()?;
    Ok(conventions)
}

fn discover_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        let mut env = HashMap::new();
        env.insert(PUSH_USER_VAR, "ci-bot".to_string());
        env.insert(PUSH_TOKEN_VAR, "s3cret".to_string());
        env.insert(ENVIRONMENT_VAR, "prod".to_string());
        env.insert(COMMIT_TAG_VAR, "v1.4.0".to_string());
        env
    }

    #[test]
    fn test_settings_from_lookup() {
        let env = full_env();
        let settings = Settings::from_lookup(|key| env.get(key).cloned()).unwrap();

        assert_eq!(settings.credentials.user(), "ci-bot");
        assert_eq!(settings.credentials.token(), "s3cret");
        assert_eq!(settings.environment, "prod");
        assert_eq!(settings.commit_ref, "v1.4.0");
    }

    #[test]
    fn test_settings_missing_variable_is_named() {
        for missing in [PUSH_USER_VAR, PUSH_TOKEN_VAR, ENVIRONMENT_VAR, COMMIT_TAG_VAR] {
            let mut env = full_env();
            env.remove(missing);

            let err = Settings::from_lookup(|key| env.get(key).cloned()).unwrap_err();
            assert!(matches!(err, AutoSemverError::Configuration(_)));
            assert!(
                err.to_string().contains(missing),
                "error should name {}, got: {}",
                missing,
                err
            );
        }
    }

    #[test]
    fn test_settings_empty_variable_is_missing() {
        let mut env = full_env();
        env.insert(ENVIRONMENT_VAR, String::new());

        let err = Settings::from_lookup(|key| env.get(key).cloned()).unwrap_err();
        assert!(err.to_string().contains(ENVIRONMENT_VAR));
    }

    #[test]
    fn test_default_conventions() {
        let conventions = Conventions::default();
        assert_eq!(conventions.tag_prefix, "v");
        assert_eq!(conventions.release_prefix, "release-");
        assert_eq!(conventions.merge_marker, "Merge branch");
        assert_eq!(conventions.remote_port_marker, ":7999");
        assert_eq!(conventions.remote, "origin");
        assert_eq!(conventions.protection.strategy, ProtectStrategy::DeleteThenCreate);
        assert_eq!(conventions.initial_version().unwrap(), Version::new(1, 0, 0));
    }

    #[test]
    fn test_tag_names() {
        let conventions = Conventions::default();
        assert_eq!(conventions.version_tag(&Version::new(1, 2, 4)), "v1.2.4");
        assert_eq!(conventions.protection_tag("prod"), "release-prod");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let conventions: Conventions = toml::from_str(
            r#"
release_prefix = "deployed-"

[protection]
strategy = "force-move"
"#,
        )
        .unwrap();

        assert_eq!(conventions.release_prefix, "deployed-");
        assert_eq!(conventions.tag_prefix, "v");
        assert_eq!(conventions.branches, BranchKeywords::default());
        assert_eq!(conventions.protection.strategy, ProtectStrategy::ForceMove);
    }

    #[test]
    fn test_invalid_initial_version_rejected() {
        let conventions = Conventions {
            initial_version: "one".to_string(),
            ..Conventions::default()
        };
        assert!(conventions.validate().is_err());
    }

    #[test]
    fn test_empty_merge_marker_rejected() {
        let conventions = Conventions {
            merge_marker: "  ".to_string(),
            ..Conventions::default()
        };
        assert!(conventions.validate().is_err());
    }
}
