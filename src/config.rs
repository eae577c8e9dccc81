//! Loader for `.pymatuning.yml` configuration files.
//!
//! Format:
//! ```yaml
//! search_paths:
//!   - src
//!   - vendor
//! indent_width: 4
//! marker: checklist
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PymatuningError, Result};
use crate::render::{MarkerStyle, DEFAULT_INDENT_WIDTH};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILENAME: &str = ".pymatuning.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directories searched, in order, for the root module
    pub search_paths: Vec<PathBuf>,

    /// Spaces per outline level
    pub indent_width: usize,

    /// Marker placed before each outline entry
    pub marker: MarkerStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from(".")],
            indent_width: DEFAULT_INDENT_WIDTH,
            marker: MarkerStyle::default(),
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<Self> {
        if self.indent_width == 0 {
            return Err(PymatuningError::Config(
                "indent_width must be at least 1".to_string(),
            ));
        }
        if self.search_paths.is_empty() {
            return Err(PymatuningError::Config(
                "search_paths must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub search_paths: Vec<PathBuf>,
    pub indent_width: Option<usize>,
    pub marker: Option<MarkerStyle>,
}

impl Config {
    /// Replace every value given on the command line and re-validate.
    /// An empty override list keeps the configured search paths.
    pub fn merge(self, overrides: ConfigOverrides) -> Result<Self> {
        let search_paths = if overrides.search_paths.is_empty() {
            self.search_paths
        } else {
            overrides.search_paths
        };

        Config {
            search_paths,
            indent_width: overrides.indent_width.unwrap_or(self.indent_width),
            marker: overrides.marker.unwrap_or(self.marker),
        }
        .validate()
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(content)
        .map_err(|e| PymatuningError::Config(format!("Invalid config: {}", e)))?;
    config.validate()
}

/// Load configuration from `path`, or from [`CONFIG_FILENAME`] in the
/// working directory when no path is given. A missing default file yields
/// the default configuration; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(CONFIG_FILENAME);
            if !default_path.is_file() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    tracing::debug!("Loading config from {}", path.display());
    let content = std::fs::read_to_string(&path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
search_paths:
  - src
  - vendor
indent_width: 4
marker: checklist
"#,
        )
        .unwrap();

        assert_eq!(
            config.search_paths,
            vec![PathBuf::from("src"), PathBuf::from("vendor")]
        );
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.marker, MarkerStyle::Checklist);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config("marker: checklist\n").unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.search_paths, vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_zero_indent_rejected() {
        assert!(matches!(
            parse_config("indent_width: 0\n"),
            Err(PymatuningError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_marker_rejected() {
        assert!(parse_config("marker: stars\n").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config("indent: 3\n").is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = parse_config("search_paths: [src]\nindent_width: 4\nmarker: outline\n")
            .unwrap()
            .merge(ConfigOverrides {
                search_paths: vec![PathBuf::from("lib")],
                indent_width: Some(3),
                marker: Some(MarkerStyle::Checklist),
            })
            .unwrap();

        assert_eq!(config.search_paths, vec![PathBuf::from("lib")]);
        assert_eq!(config.indent_width, 3);
        assert_eq!(config.marker, MarkerStyle::Checklist);
    }

    #[test]
    fn test_missing_overrides_keep_file_values() {
        let from_file = parse_config("search_paths: [src]\nindent_width: 4\nmarker: checklist\n").unwrap();
        let merged = from_file.clone().merge(ConfigOverrides::default()).unwrap();
        assert_eq!(merged, from_file);
    }

    #[test]
    fn test_zero_indent_override_rejected() {
        let result = Config::default().merge(ConfigOverrides {
            indent_width: Some(0),
            ..ConfigOverrides::default()
        });
        assert!(matches!(result, Err(PymatuningError::Config(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.yml");
        fs::write(&path, "indent_width: 3\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.indent_width, 3);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_config(Some(&temp_dir.path().join("absent.yml")));
        assert!(matches!(result, Err(PymatuningError::Io(_))));
    }
}
