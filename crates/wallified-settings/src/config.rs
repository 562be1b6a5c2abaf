//! Configuration and settings management for Wallified
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Pricing (base poster price, borderless surcharge)
//! - Studio limits (image cap, history depth, control ranges)
//! - Print metadata attached to every custom design
//! - Checkout fees and thresholds

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wallified_core::Rupees;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Poster pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSheet {
    /// Price of one printed sheet
    pub base_price: Rupees,
    /// Added per sheet when printed without margins
    pub borderless_surcharge: Rupees,
    /// ISO currency code shown alongside prices
    pub currency: String,
}

impl Default for PriceSheet {
    fn default() -> Self {
        Self {
            base_price: Rupees(299),
            borderless_surcharge: Rupees(9),
            currency: "INR".to_string(),
        }
    }
}

/// Limits and control ranges of the design studio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioLimits {
    /// Maximum photos per design (the layout grid supports at most 4)
    pub max_images: usize,
    /// Number of undo snapshots retained
    pub history_depth: usize,
    /// Fraction of the slot an auto-fitted photo may fill when bordered
    pub safety_margin: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub min_font_size: u32,
    pub max_font_size: u32,
}

impl Default for StudioLimits {
    fn default() -> Self {
        Self {
            max_images: 4,
            history_depth: 30,
            safety_margin: 0.95,
            min_scale: 0.1,
            max_scale: 3.0,
            min_font_size: 12,
            max_font_size: 140,
        }
    }
}

/// Print metadata recorded with each custom design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSettings {
    pub dpi: u32,
    pub color_profile: String,
    /// Margin used when the design is not borderless
    pub bordered_margin_mm: u32,
    pub paper: String,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            dpi: 300,
            color_profile: "CMYK".to_string(),
            bordered_margin_mm: 5,
            paper: "Premium Luster Photo Paper".to_string(),
        }
    }
}

/// Checkout fees and thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Surcharge for cash-on-delivery orders
    pub cod_fee: Rupees,
    /// Orders below this subtotal are refused
    pub min_order_value: Rupees,
    /// Cart subtotal at which the shipping estimate drops to zero
    pub free_shipping_threshold: Rupees,
    /// Shipping estimate shown below the threshold
    pub shipping_fee: Rupees,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            cod_fee: Rupees(50),
            min_order_value: Rupees(200),
            free_shipping_threshold: Rupees(200),
            shipping_fee: Rupees(50),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PriceSheet,
    #[serde(default)]
    pub studio: StudioLimits,
    #[serde(default)]
    pub print: PrintSettings,
    #[serde(default)]
    pub checkout: CheckoutSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config dir>/wallified/config.toml`
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("wallified").join("config.toml"))
            .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = format_of(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.pricing.base_price == Rupees::ZERO {
            return Err(ConfigError::out_of_range(
                "pricing.base_price",
                self.pricing.base_price,
            ));
        }

        let studio = &self.studio;
        if !(1..=4).contains(&studio.max_images) {
            return Err(ConfigError::out_of_range(
                "studio.max_images",
                studio.max_images,
            ));
        }
        if studio.history_depth == 0 {
            return Err(ConfigError::out_of_range(
                "studio.history_depth",
                studio.history_depth,
            ));
        }
        if !(studio.safety_margin > 0.0 && studio.safety_margin <= 1.0) {
            return Err(ConfigError::out_of_range(
                "studio.safety_margin",
                studio.safety_margin,
            ));
        }
        if !(studio.min_scale > 0.0 && studio.min_scale < studio.max_scale) {
            return Err(ConfigError::out_of_range(
                "studio.min_scale",
                studio.min_scale,
            ));
        }
        if studio.min_font_size == 0 || studio.min_font_size > studio.max_font_size {
            return Err(ConfigError::out_of_range(
                "studio.min_font_size",
                studio.min_font_size,
            ));
        }

        if self.print.dpi == 0 {
            return Err(ConfigError::out_of_range("print.dpi", self.print.dpi));
        }

        Ok(())
    }
}
