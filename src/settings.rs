//! Runtime settings.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `rental-scout.toml` in the working directory (optional), or the file
//!    passed explicitly (required)
//! 3. environment variables such as `RENTAL_SCOUT__LOG_LEVEL=debug`

use crate::afford::Lifestyle;
use crate::models::only_digits;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Landing page that share links point at
    pub site_base_url: String,
    /// Path of the lead form on the site
    pub form_path: String,
    /// Business WhatsApp number, 91 + 10 digits
    pub business_whatsapp: String,
    pub leads_dir: PathBuf,
    pub log_level: String,
    pub default_lifestyle: Lifestyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_base_url: "https://mumbairentals.in".to_string(),
            form_path: "/".to_string(),
            business_whatsapp: "917498369191".to_string(),
            leads_dir: PathBuf::from("leads"),
            log_level: "info".to_string(),
            default_lifestyle: Lifestyle::Balanced,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let digits = only_digits(&self.business_whatsapp);
        if digits.len() != 12 || !digits.starts_with("91") {
            return Err(SettingsError::Invalid {
                field: "business_whatsapp".to_string(),
                message: format!("expected 91 followed by 10 digits, got {:?}", self.business_whatsapp),
            });
        }

        Url::parse(&self.site_base_url).map_err(|e| SettingsError::Invalid {
            field: "site_base_url".to_string(),
            message: e.to_string(),
        })?;

        if !self.form_path.starts_with('/') {
            return Err(SettingsError::Invalid {
                field: "form_path".to_string(),
                message: "must start with '/'".to_string(),
            });
        }

        Ok(())
    }
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder();

    builder = match path {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder.add_source(File::with_name("rental-scout").required(false)),
    };

    builder = builder.add_source(
        Environment::with_prefix("RENTAL_SCOUT")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}
