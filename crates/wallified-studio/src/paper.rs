//! Paper size catalog.
//!
//! Three ISO sheets, listed from largest to smallest. Each entry carries the
//! minimum source width (in pixels) a photo needs to print sharply at that
//! size.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StudioError;

/// Width-to-height ratio of every ISO 216 sheet
pub const ISO_RATIO: f64 = 1.0 / 1.4142;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperSizeId {
    #[default]
    A4,
    A5,
    A6,
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub id: PaperSizeId,
    pub display_name: &'static str,
    pub width_mm: u32,
    pub height_mm: u32,
    pub aspect_ratio: f64,
    /// Relative size of the sheet in the room mockup
    pub preview_scale: f64,
    pub min_adequate_width: u32,
}

const CATALOG: [PaperSize; 3] = [
    PaperSize {
        id: PaperSizeId::A4,
        display_name: "A4 Standard",
        width_mm: 210,
        height_mm: 297,
        aspect_ratio: ISO_RATIO,
        preview_scale: 1.0,
        min_adequate_width: 2400,
    },
    PaperSize {
        id: PaperSizeId::A5,
        display_name: "A5 Medium",
        width_mm: 148,
        height_mm: 210,
        aspect_ratio: ISO_RATIO,
        preview_scale: 0.8,
        min_adequate_width: 1800,
    },
    PaperSize {
        id: PaperSizeId::A6,
        display_name: "A6 Small",
        width_mm: 105,
        height_mm: 148,
        aspect_ratio: ISO_RATIO,
        preview_scale: 0.6,
        min_adequate_width: 1200,
    },
];

/// All paper sizes, largest first
pub fn catalog() -> &'static [PaperSize] {
    &CATALOG
}

/// The largest size whose threshold `width` satisfies, or the smallest size
/// when none does.
pub fn suggest_for_width(width: u32) -> PaperSizeId {
    CATALOG
        .iter()
        .find(|size| size.is_adequate(width))
        .or_else(|| CATALOG.last())
        .map_or(PaperSizeId::A6, |size| size.id)
}

impl PaperSizeId {
    /// Catalog entry for this id
    pub fn spec(self) -> &'static PaperSize {
        match self {
            PaperSizeId::A4 => &CATALOG[0],
            PaperSizeId::A5 => &CATALOG[1],
            PaperSizeId::A6 => &CATALOG[2],
        }
    }
}

impl PaperSize {
    pub fn is_adequate(&self, source_width: u32) -> bool {
        source_width >= self.min_adequate_width
    }

    /// Physical dimensions as shown to customers, e.g. "21 x 29.7 cm"
    pub fn dimensions(&self) -> String {
        format!(
            "{} x {} cm",
            f64::from(self.width_mm) / 10.0,
            f64::from(self.height_mm) / 10.0
        )
    }
}

impl fmt::Display for PaperSizeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4 => write!(f, "A4"),
            Self::A5 => write!(f, "A5"),
            Self::A6 => write!(f, "A6"),
        }
    }
}

impl FromStr for PaperSizeId {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A4" => Ok(Self::A4),
            "A5" => Ok(Self::A5),
            "A6" => Ok(Self::A6),
            _ => Err(StudioError::UnknownPaperSize(s.to_string())),
        }
    }
}
