//! Wallified Settings Crate
//!
//! Handles application configuration: pricing, studio limits, print
//! metadata and checkout fees, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{CheckoutSettings, Config, PriceSheet, PrintSettings, StudioLimits};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
