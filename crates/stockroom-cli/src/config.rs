//! CLI configuration management.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// API server URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Rows per page in the category listing.
    #[serde(default = "default_category_page_size")]
    pub category_page_size: u32,
    /// Rows per page in the product listing.
    #[serde(default = "default_product_page_size")]
    pub product_page_size: u32,
    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_category_page_size() -> u32 {
    5
}

fn default_product_page_size() -> u32 {
    10
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            category_page_size: default_category_page_size(),
            product_page_size: default_product_page_size(),
            output_format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl CliConfig {
    /// Load configuration from file.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dirs = directories::ProjectDirs::from("dev", "stockroom", "stockroom")
            .ok_or("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Set a configuration value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "api_url" => self.api_url = value.to_string(),
            "category_page_size" => {
                self.category_page_size = value
                    .parse()
                    .map_err(|_| format!("Invalid page size: {}", value))?;
            }
            "product_page_size" => {
                self.product_page_size = value
                    .parse()
                    .map_err(|_| format!("Invalid page size: {}", value))?;
            }
            "output_format" => {
                self.output_format = match value {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    _ => return Err(format!("Invalid output format: {}", value)),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}
