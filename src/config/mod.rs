//! Configuration loading and management

use crate::core::criteria::DEFAULT_PRICE_CEILING;
use crate::core::error::ConfigError;
use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::core::sort::SortSpec;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Configuration for one collection screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound of the price slider
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    /// Sort applied when the screen is entered (e.g. "name:asc")
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Text fields the search box looks in; empty uses the screen's preset
    #[serde(default)]
    pub search_fields: Vec<String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_price_ceiling() -> f64 {
    DEFAULT_PRICE_CEILING
}

fn default_sort() -> String {
    SortSpec::default().to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            price_ceiling: default_price_ceiling(),
            default_sort: default_sort(),
            search_fields: Vec::new(),
        }
    }
}

impl ViewConfig {
    /// Defaults of the customer-facing catalog
    pub fn storefront() -> Self {
        Self {
            search_fields: vec!["name".to_string()],
            ..Self::default()
        }
    }

    /// Defaults of the admin product table
    pub fn admin() -> Self {
        Self {
            search_fields: vec!["name".to_string(), "sku".to_string()],
            ..Self::default()
        }
    }

    /// Parse the configured default sort
    pub fn sort_spec(&self) -> Result<SortSpec, ConfigError> {
        self.default_sort
            .parse()
            .map_err(|e: crate::core::error::CriteriaError| ConfigError::Parse {
                message: format!("default_sort '{}': {}", self.default_sort, e),
            })
    }

    /// Search fields, falling back to `preset` when none are configured
    pub fn search_fields_or(&self, preset: &[&str]) -> Vec<String> {
        if self.search_fields.is_empty() {
            preset.iter().map(|f| f.to_string()).collect()
        } else {
            self.search_fields.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize { size: 0 });
        }
        if !self.price_ceiling.is_finite() || self.price_ceiling <= 0.0 {
            return Err(ConfigError::InvalidPriceCeiling {
                value: self.price_ceiling,
            });
        }
        self.sort_spec()?;
        Ok(())
    }
}

/// Complete configuration for both collection screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Customer-facing catalog filter panel
    #[serde(default = "ViewConfig::storefront")]
    pub storefront: ViewConfig,

    /// Admin collection browser
    #[serde(default = "ViewConfig::admin")]
    pub admin: ViewConfig,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        tracing::debug!(
            storefront_page_size = config.storefront.page_size,
            admin_page_size = config.admin.page_size,
            "catalog configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storefront.validate()?;
        self.admin.validate()
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            storefront: ViewConfig::storefront(),
            admin: ViewConfig::admin(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
