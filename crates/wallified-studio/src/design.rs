//! Finished design specification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wallified_core::Rupees;
use wallified_settings::{PriceSheet, PrintSettings};

use crate::error::StudioError;
use crate::model::EditorState;
use crate::pricing::{price, sheet_count, validate_for_submission};

/// Print metadata stored with a design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSpecs {
    pub dpi: u32,
    pub color_profile: String,
    /// "0mm" when borderless
    pub margin: String,
    pub paper: String,
}

impl PrintSpecs {
    pub fn for_design(settings: &PrintSettings, borderless: bool) -> Self {
        let margin_mm = if borderless {
            0
        } else {
            settings.bordered_margin_mm
        };
        Self {
            dpi: settings.dpi,
            color_profile: settings.color_profile.clone(),
            margin: format!("{}mm", margin_mm),
            paper: settings.paper.clone(),
        }
    }
}

/// Immutable record of a submitted design: the editor state plus derived
/// price and print metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSpecification {
    #[serde(flatten)]
    pub state: EditorState,
    pub total_price: Rupees,
    pub sheet_count: u32,
    pub print_specs: PrintSpecs,
    pub created_at: DateTime<Utc>,
}

impl DesignSpecification {
    /// Freeze `state`; fails with `EmptyDesign` when it holds no photo
    pub fn new(
        state: &EditorState,
        pricing: &PriceSheet,
        print: &PrintSettings,
    ) -> Result<Self, StudioError> {
        validate_for_submission(state)?;

        Ok(Self {
            state: state.clone(),
            total_price: price(state, pricing),
            sheet_count: sheet_count(state),
            print_specs: PrintSpecs::for_design(print, state.borderless),
            created_at: Utc::now(),
        })
    }

    /// Product name shown in the cart
    pub fn display_name(&self) -> String {
        format!("Wallified Custom {}", self.state.paper_size)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, StudioError> {
        Ok(serde_json::to_value(self)?)
    }
}
