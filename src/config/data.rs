//! Data loading configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for loading problem documents at startup
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DataConfig {
    /// Path to a JSON document file or a directory of them
    pub json_path: Option<String>,

    /// Load documents from `json_path` before serving
    #[serde(default)]
    pub load_on_startup: bool,
}

impl DataConfig {
    /// Validate data configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.load_on_startup && self.json_path.is_none() {
            return Err(ValidationError::MissingRequired("data.json_path"));
        }
        if let Some(path) = &self.json_path {
            if path.trim().is_empty() {
                return Err(ValidationError::InvalidJsonPath);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_config_defaults() {
        let config = DataConfig::default();
        assert!(config.json_path.is_none());
        assert!(!config.load_on_startup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_on_startup_requires_path() {
        let config = DataConfig {
            json_path: None,
            load_on_startup: true,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_path_rejected() {
        let config = DataConfig {
            json_path: Some("   ".to_string()),
            load_on_startup: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_path_with_startup_load() {
        let config = DataConfig {
            json_path: Some("data/problems".to_string()),
            load_on_startup: true,
        };
        assert!(config.validate().is_ok());
    }
}
