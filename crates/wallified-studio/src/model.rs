//! Editor data model.
//!
//! [`EditorState`] is the single source of truth for a design session. It is
//! plain data: cloning it yields an independent snapshot, and the image
//! sources are reference counted so snapshots stay cheap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::StudioError;
use crate::paper::{PaperSize, PaperSizeId};

/// Stable identifier of an uploaded photo, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renderable reference to decoded image content (usually a data URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSource(Arc<str>);

impl ImageSource {
    pub fn new(url: impl AsRef<str>) -> Self {
        Self(Arc::from(url.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pixel dimensions of a decoded photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Placement of a photo within its slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Multiplier applied on top of the slot-sized box
    pub scale: f64,
    /// Degrees, clockwise
    pub rotate: f64,
    /// Offset from the slot centre, in preview pixels
    pub x: f64,
    pub y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotate: 0.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl Transform {
    /// Centered, unrotated, at `scale`
    pub fn fitted(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }
}

/// Partial transform update; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformPatch {
    pub scale: Option<f64>,
    pub rotate: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl TransformPatch {
    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn rotate(degrees: f64) -> Self {
        Self {
            rotate: Some(degrees),
            ..Self::default()
        }
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scale.is_none() && self.rotate.is_none() && self.x.is_none() && self.y.is_none()
    }
}

/// A placed photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageLayer {
    pub id: ImageId,
    #[serde(rename = "url")]
    pub source: ImageSource,
    /// Original file name
    pub name: String,
    pub resolution: Resolution,
    pub transform: Transform,
}

/// How multiple photos are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// All photos share one sheet in a grid
    #[default]
    Combined,
    /// One sheet per photo
    Separate,
}

/// Global colour adjustments, percentages where 100 is neutral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorAdjustments {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
}

impl Default for ColorAdjustments {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
        }
    }
}

impl ColorAdjustments {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 200.0;

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdjustmentsPatch {
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub saturation: Option<f64>,
}

/// Overlay font choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontId {
    #[default]
    SpaceGrotesk,
    PlayfairDisplay,
    Mono,
}

impl FontId {
    pub const ALL: [FontId; 3] = [FontId::SpaceGrotesk, FontId::PlayfairDisplay, FontId::Mono];

    pub fn display_name(self) -> &'static str {
        match self {
            FontId::SpaceGrotesk => "Space Grotesk",
            FontId::PlayfairDisplay => "Playfair Display",
            FontId::Mono => "Mono",
        }
    }

    /// CSS font stack used by the renderer
    pub fn css_family(self) -> &'static str {
        match self {
            FontId::SpaceGrotesk => "'Space Grotesk', sans-serif",
            FontId::PlayfairDisplay => "'Playfair Display', serif",
            FontId::Mono => "ui-monospace, monospace",
        }
    }
}

/// Anchor point of the overlay text, percent of sheet width/height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextPosition {
    pub x: f64,
    pub y: f64,
}

impl Default for TextPosition {
    fn default() -> Self {
        Self { x: 50.0, y: 80.0 }
    }
}

/// Optional caption printed on each sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayText {
    pub content: String,
    pub font: FontId,
    pub font_size: u32,
    pub color: String,
    pub position: TextPosition,
}

impl Default for OverlayText {
    fn default() -> Self {
        Self {
            content: String::new(),
            font: FontId::default(),
            font_size: 24,
            color: "#000000".to_string(),
            position: TextPosition::default(),
        }
    }
}

impl OverlayText {
    /// Whitespace-only captions are not rendered
    pub fn is_visible(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPatch {
    pub content: Option<String>,
    pub font: Option<FontId>,
    pub font_size: Option<u32>,
    pub color: Option<String>,
    pub position: Option<TextPosition>,
}

impl OverlayPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

/// Accepts `#RRGGBB` (case-insensitive) and returns it lowercased
pub fn normalize_hex_color(color: &str) -> Result<String, StudioError> {
    let trimmed = color.trim();
    let valid = trimmed.len() == 7
        && trimmed.starts_with('#')
        && trimmed[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(trimmed.to_ascii_lowercase())
    } else {
        Err(StudioError::InvalidColor(color.to_string()))
    }
}

/// Complete state of a design session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorState {
    /// Photos in insertion order, which is also slot order
    pub images: Vec<ImageLayer>,
    pub paper_size: PaperSizeId,
    pub borderless: bool,
    pub layout_mode: LayoutMode,
    pub adjustments: ColorAdjustments,
    #[serde(rename = "text")]
    pub overlay: OverlayText,
}

impl EditorState {
    pub fn paper(&self) -> &'static PaperSize {
        self.paper_size.spec()
    }

    pub fn image(&self, id: ImageId) -> Option<&ImageLayer> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn image_index(&self, id: ImageId) -> Option<usize> {
        self.images.iter().position(|image| image.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
