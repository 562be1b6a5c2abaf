//! Pricing and submission validation.

use wallified_core::Rupees;
use wallified_settings::PriceSheet;

use crate::error::StudioError;
use crate::model::{EditorState, LayoutMode};

/// Price of one printed sheet
pub fn per_unit_price(sheet: &PriceSheet, borderless: bool) -> Rupees {
    if borderless {
        sheet.base_price + sheet.borderless_surcharge
    } else {
        sheet.base_price
    }
}

/// Number of physical sheets the design prints on
pub fn sheet_count(state: &EditorState) -> u32 {
    match state.layout_mode {
        LayoutMode::Combined => 1,
        LayoutMode::Separate => u32::try_from(state.images.len().max(1)).unwrap_or(u32::MAX),
    }
}

/// Total price of the design
pub fn price(state: &EditorState, sheet: &PriceSheet) -> Rupees {
    per_unit_price(sheet, state.borderless).times(sheet_count(state))
}

/// A design needs at least one photo. Resolution is advisory and never
/// blocks submission.
pub fn validate_for_submission(state: &EditorState) -> Result<(), StudioError> {
    if state.images.is_empty() {
        return Err(StudioError::EmptyDesign);
    }
    Ok(())
}
