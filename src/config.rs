//! Publication archive configuration.
//!
//! The set of publications to scrape, and the archive URL template of each,
//! is passed explicitly to the scraper as a [`PublicationConfig`]. It is
//! either the built-in default set or loaded from a YAML file:
//!
//! ```yaml
//! publications:
//!   - name: Towards Data Science
//!     url_template: "https://towardsdatascience.com/archive/{year}/{month}/{day}"
//! ```
//!
//! `{month}` and `{day}` expand to two zero-padded digits.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

const YEAR: &str = "{year}";
const MONTH: &str = "{month}";
const DAY: &str = "{day}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config lists no publications")]
    Empty,

    #[error("publication {name:?} is listed more than once")]
    Duplicate { name: String },

    #[error("url template for {name:?} is missing the {placeholder} placeholder")]
    MissingPlaceholder { name: String, placeholder: &'static str },

    #[error("url template for {name:?} does not produce a valid URL: {source}")]
    InvalidUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },
}

/// One publication and the template of its daily archive page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub name: String,
    pub url_template: String,
}

impl Publication {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// Expand the template for one archive day.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the expanded string is not an
    /// absolute URL.
    pub fn archive_url(&self, year: i32, month: u32, day: u32) -> Result<Url, ConfigError> {
        let expanded = self
            .url_template
            .replace(YEAR, &year.to_string())
            .replace(MONTH, &format!("{:02}", month))
            .replace(DAY, &format!("{:02}", day));
        Url::parse(&expanded).map_err(|source| ConfigError::InvalidUrl {
            name: self.name.clone(),
            source,
        })
    }
}

/// Ordered list of publications to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationConfig {
    pub publications: Vec<Publication>,
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            publications: vec![
                Publication::new(
                    "Towards Data Science",
                    "https://towardsdatascience.com/archive/{year}/{month}/{day}",
                ),
                Publication::new(
                    "UX Collective",
                    "https://uxdesign.cc/archive/{year}/{month}/{day}",
                ),
                Publication::new(
                    "The Startup",
                    "https://medium.com/swlh/archive/{year}/{month}/{day}",
                ),
                Publication::new(
                    "The Writing Cooperative",
                    "https://writingcooperative.com/archive/{year}/{month}/{day}",
                ),
                Publication::new(
                    "Data Driven Investor",
                    "https://medium.com/datadriveninvestor/archive/{year}/{month}/{day}",
                ),
                Publication::new(
                    "Better Humans",
                    "https://medium.com/better-humans/archive/{year}/{month}/{day}",
                ),
                Publication::new(
                    "Better Marketing",
                    "https://medium.com/better-marketing/archive/{year}/{month}/{day}",
                ),
            ],
        }
    }
}

impl PublicationConfig {
    /// Parse and validate a YAML configuration document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: PublicationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from `path`, or the defaults when no path is
    /// given.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let yaml = tokio::fs::read_to_string(path).await?;
                let config = Self::from_yaml(&yaml)?;
                info!(path = %path.display(), count = config.publications.len(), "Loaded publication config");
                config
            }
            None => {
                let config = Self::default();
                info!(count = config.publications.len(), "Using built-in publication config");
                config
            }
        };
        Ok(config)
    }

    /// Check that every template carries the three placeholders, names are
    /// unique, and a sample expansion parses as a URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.publications.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = std::collections::HashSet::new();
        for publication in &self.publications {
            if !seen.insert(publication.name.as_str()) {
                return Err(ConfigError::Duplicate {
                    name: publication.name.clone(),
                });
            }
            for placeholder in [YEAR, MONTH, DAY] {
                if !publication.url_template.contains(placeholder) {
                    return Err(ConfigError::MissingPlaceholder {
                        name: publication.name.clone(),
                        placeholder,
                    });
                }
            }
            publication.archive_url(2000, 1, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PublicationConfig::default();
        assert_eq!(config.publications.len(), 7);
        assert!(config.validate().is_ok());
        assert_eq!(config.publications[0].name, "Towards Data Science");
    }

    #[test]
    fn test_archive_url_zero_pads() {
        let publication = Publication::new(
            "The Startup",
            "https://medium.com/swlh/archive/{year}/{month}/{day}",
        );
        let url = publication.archive_url(2023, 3, 7).unwrap();
        assert_eq!(url.as_str(), "https://medium.com/swlh/archive/2023/03/07");
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
publications:
  - name: Example
    url_template: "https://example.com/archive/{year}/{month}/{day}"
"#;
        let config = PublicationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.publications.len(), 1);
        assert_eq!(config.publications[0].name, "Example");
    }

    #[test]
    fn test_from_yaml_rejects_missing_placeholder() {
        let yaml = r#"
publications:
  - name: Example
    url_template: "https://example.com/archive/{year}/{month}"
"#;
        let err = PublicationConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingPlaceholder { placeholder: "{day}", .. }
        ));
    }

    #[test]
    fn test_from_yaml_rejects_relative_url() {
        let yaml = r#"
publications:
  - name: Example
    url_template: "archive/{year}/{month}/{day}"
"#;
        let err = PublicationConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_duplicates_and_empty() {
        let dup = r#"
publications:
  - name: A
    url_template: "https://a.example/{year}/{month}/{day}"
  - name: A
    url_template: "https://b.example/{year}/{month}/{day}"
"#;
        assert!(matches!(
            PublicationConfig::from_yaml(dup),
            Err(ConfigError::Duplicate { .. })
        ));
        assert!(matches!(
            PublicationConfig::from_yaml("publications: []"),
            Err(ConfigError::Empty)
        ));
    }

    #[test]
    fn test_bundled_yaml_matches_defaults() {
        let yaml = include_str!("../config/publications.yaml");
        assert_eq!(PublicationConfig::from_yaml(yaml).unwrap(), PublicationConfig::default());
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let config = PublicationConfig::load(None).await.unwrap();
        assert_eq!(config, PublicationConfig::default());
    }
}
