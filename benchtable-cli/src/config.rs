//! Configuration loading from benchtable.toml
//!
//! Configuration can be specified in a `benchtable.toml` file in the project root.
//! The configuration is discovered by walking up from the current directory.
//! Command-line flags override every value here.

use crate::revision::DIRTY;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file searched for during discovery
pub const CONFIG_FILE_NAME: &str = "benchtable.toml";

/// Benchtable configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchtableConfig {
    /// Table rendering defaults
    #[serde(default)]
    pub table: TableConfig,
    /// Where result files are read from
    #[serde(default)]
    pub input: InputConfig,
    /// Revisions compared when `--rev` is not given
    #[serde(default)]
    pub revisions: RevisionsConfig,
}

/// Table rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table modes: "time" and/or "memory"
    #[serde(default = "default_modes")]
    pub modes: Vec<String>,
    /// Add a ratio column when two revisions are compared
    #[serde(default)]
    pub ratio: bool,
    /// Fixed time unit: ns, μs, us, ms, s, h (automatic when unset)
    #[serde(default)]
    pub unit: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            modes: default_modes(),
            ratio: false,
            unit: None,
        }
    }
}

fn default_modes() -> Vec<String> {
    vec!["time".to_string()]
}

/// Result file location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory holding result files
    #[serde(default = "default_input_dir")]
    pub directory: String,
    /// File name pattern; `{package}` and `{rev}` are substituted
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: default_input_dir(),
            file_pattern: default_file_pattern(),
        }
    }
}

fn default_input_dir() -> String {
    ".".to_string()
}
fn default_file_pattern() -> String {
    "results_{package}@{rev}.json".to_string()
}

/// Default revision list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionsConfig {
    /// Revisions to compare, first one is the ratio numerator
    #[serde(default = "default_revisions")]
    pub default: Vec<String>,
}

impl Default for RevisionsConfig {
    fn default() -> Self {
        Self {
            default: default_revisions(),
        }
    }
}

fn default_revisions() -> Vec<String> {
    vec![DIRTY.to_string()]
}

impl InputConfig {
    /// Result file name for one package revision
    pub fn file_name(&self, package: &str, rev: &str) -> String {
        self.file_pattern
            .replace("{package}", package)
            .replace("{rev}", rev)
    }
}

impl BenchtableConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            "ignoring unreadable configuration: {e}"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Benchtable Configuration

[table]
# Tables to print, one per mode: "time" (median) and/or "memory"
modes = ["time"]
# Add a ratio column when exactly two revisions are compared
ratio = false
# Fixed time unit: ns, μs, us, ms, s, h (uncomment to enable)
# unit = "ms"

[input]
# Directory holding result files
directory = "."
# Result file name; {package} and {rev} are substituted
file_pattern = "results_{package}@{rev}.json"

[revisions]
# Revisions compared when --rev is not given ("dirty" is the working tree,
# "default" resolves to the repository's default branch)
default = ["dirty"]
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchtableConfig::default();
        assert_eq!(config.table.modes, vec!["time"]);
        assert!(!config.table.ratio);
        assert!(config.table.unit.is_none());
        assert_eq!(config.input.directory, ".");
        assert_eq!(config.revisions.default, vec!["dirty"]);
    }

    #[test]
    fn test_file_name() {
        let input = InputConfig::default();
        assert_eq!(input.file_name("MyPkg", "v1.0"), "results_MyPkg@v1.0.json");

        let custom = InputConfig {
            directory: "out".to_string(),
            file_pattern: "{rev}/{package}.json".to_string(),
        };
        assert_eq!(custom.file_name("core", "main"), "main/core.json");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [table]
            modes = ["time", "memory"]
            unit = "us"

            [revisions]
            default = ["dirty", "main"]
        "#;

        let config: BenchtableConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.table.modes, vec!["time", "memory"]);
        assert_eq!(config.table.unit.as_deref(), Some("us"));
        assert_eq!(config.revisions.default, vec!["dirty", "main"]);
        // Defaults should still apply
        assert!(!config.table.ratio);
        assert_eq!(config.input.file_pattern, "results_{package}@{rev}.json");
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = BenchtableConfig::default_toml();
        let config: BenchtableConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.table.modes, vec!["time"]);
        assert_eq!(config.input.directory, ".");
    }
}
