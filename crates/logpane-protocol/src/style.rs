//! Category styles consulted during argument processing.
//!
//! A [`StyleConfig`] holds one inline CSS string per [`StyleCategory`],
//! layered over stock defaults: an empty config already styles every
//! category, and explicit entries override per category. Configs can be
//! built programmatically, loaded from YAML, or merged.
//!
//! # Example
//!
//! ```
//! use logpane_protocol::{StyleCategory, StyleConfig};
//!
//! let config = StyleConfig::new().set(StyleCategory::Error, "color:crimson;");
//! assert_eq!(config.style(StyleCategory::Error), "color:crimson;");
//! // Unset categories fall back to the stock style.
//! assert_eq!(config.style(StyleCategory::Warn), "color:orange;");
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::css;

/// Errors raised while loading or validating style configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid style configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid {category} style: {message}")]
    Style { category: String, message: String },
    #[error("style store unavailable: {0}")]
    Store(String),
}

/// The substitution style categories.
///
/// Method categories (`error` through `group`) style auto-generated string
/// patterns; `number`, `fileline`, `classname` and `header` style the
/// corresponding generated tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    Error,
    Warn,
    Info,
    Debug,
    Log,
    Group,
    Number,
    Fileline,
    Classname,
    Header,
}

impl StyleCategory {
    /// Every category, in display order.
    pub const ALL: [StyleCategory; 10] = [
        StyleCategory::Error,
        StyleCategory::Warn,
        StyleCategory::Info,
        StyleCategory::Debug,
        StyleCategory::Log,
        StyleCategory::Group,
        StyleCategory::Number,
        StyleCategory::Fileline,
        StyleCategory::Classname,
        StyleCategory::Header,
    ];

    /// The category name as it appears in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleCategory::Error => "error",
            StyleCategory::Warn => "warn",
            StyleCategory::Info => "info",
            StyleCategory::Debug => "debug",
            StyleCategory::Log => "log",
            StyleCategory::Group => "group",
            StyleCategory::Number => "number",
            StyleCategory::Fileline => "fileline",
            StyleCategory::Classname => "classname",
            StyleCategory::Header => "header",
        }
    }

    /// The stock style used when a config carries no override.
    pub fn stock_style(&self) -> &'static str {
        match self {
            StyleCategory::Error => "color:red;",
            StyleCategory::Warn => "color:orange;",
            StyleCategory::Info => "color:limegreen;",
            StyleCategory::Debug => "",
            StyleCategory::Log => "",
            StyleCategory::Group => {
                "color:mediumturquoise;border-bottom:1px dashed;cursor:pointer;"
            }
            StyleCategory::Number => {
                "background-color:dodgerblue;color:white;font-weight:bold;\
                 border-radius:0.5em;padding:0em 0.3em;"
            }
            StyleCategory::Fileline => {
                "color:mediumpurple;font-style:italic;border-style:solid;\
                 border-width:0px 1px;border-radius:0.5em;padding:0em 0.5em;"
            }
            StyleCategory::Classname => "font-weight:bold;",
            StyleCategory::Header => {
                "display:block;background-color:black;color:white;\
                 text-align:center;padding:0.2em;border-radius:0.3em;"
            }
        }
    }
}

impl std::fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style configuration snapshot, read-only for the span of one batch.
///
/// Stores per-category overrides; lookups fall back to the stock styles, so
/// `StyleConfig::default()` behaves as a fully populated config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Per-category overrides of the stock styles.
    #[serde(default)]
    pub styles: BTreeMap<StyleCategory, String>,
    /// Whether header-sourced deliveries prepend a synthetic request line.
    #[serde(default = "default_display_request_line")]
    pub display_request_line: bool,
}

fn default_display_request_line() -> bool {
    true
}

impl StyleConfig {
    /// Creates a config with no overrides.
    pub fn new() -> Self {
        Self {
            styles: BTreeMap::new(),
            display_request_line: true,
        }
    }

    /// Sets a category style, returning the config for chaining.
    pub fn set(mut self, category: StyleCategory, style: impl Into<String>) -> Self {
        self.styles.insert(category, style.into());
        self
    }

    /// Disables or enables the synthetic request line, for chaining.
    pub fn request_line(mut self, enabled: bool) -> Self {
        self.display_request_line = enabled;
        self
    }

    /// The effective style for a category: the override when set, the
    /// stock style otherwise.
    pub fn style(&self, category: StyleCategory) -> &str {
        self.styles
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.stock_style())
    }

    /// Loads a config from YAML content. Categories absent from the file
    /// keep their stock styles.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use logpane_protocol::{StyleCategory, StyleConfig};
    ///
    /// let config = StyleConfig::from_yaml(
    ///     "styles:\n  error: \"color:crimson;\"\ndisplay_request_line: false\n",
    /// )
    /// .unwrap();
    /// assert_eq!(config.style(StyleCategory::Error), "color:crimson;");
    /// assert!(!config.display_request_line);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Merges another config into this one; entries from `other` win, and
    /// `other`'s request-line flag is taken.
    pub fn merge(mut self, other: StyleConfig) -> Self {
        self.styles.extend(other.styles);
        self.display_request_line = other.display_request_line;
        self
    }

    /// Validates every effective category style as a CSS declaration list.
    ///
    /// Called explicitly by hosts that accept user-supplied styles; the
    /// processing pipeline itself never rejects a style.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in StyleCategory::ALL {
            if let Err(message) = css::parse_declaration_names(self.style(category)) {
                return Err(ConfigError::Style {
                    category: category.as_str().to_string(),
                    message,
                });
            }
        }
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}
