//! The operation table.
//!
//! Each [`EditorOp`] is a pure function from one [`EditorState`] to the
//! next. Structural operations refit every photo; live operations only touch
//! the fields they name.

use wallified_settings::StudioLimits;

use crate::error::StudioError;
use crate::geometry::{fitted_transform, refit_all};
use crate::model::{
    normalize_hex_color, AdjustmentsPatch, ColorAdjustments, EditorState, ImageId, ImageLayer,
    LayoutMode, OverlayPatch, TextPosition, TransformPatch,
};
use crate::paper::PaperSizeId;

/// Rotation range of the rotate control, degrees
pub const ROTATION_RANGE: (f64, f64) = (-180.0, 180.0);

#[derive(Debug, Clone, PartialEq)]
pub enum EditorOp {
    /// Append already decoded photos (truncated to remaining capacity)
    AddImages(Vec<ImageLayer>),
    RemoveImage(ImageId),
    SetTransform(ImageId, TransformPatch),
    /// Explicit refit of one photo, clearing its manual placement
    AutoFitImage(ImageId),
    SetPaperSize(PaperSizeId),
    SetLayoutMode(LayoutMode),
    SetBorderless(bool),
    SetAdjustments(AdjustmentsPatch),
    SetOverlayText(OverlayPatch),
    ResetAll,
}

impl EditorOp {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            EditorOp::AddImages(_) => "add images",
            EditorOp::RemoveImage(_) => "remove image",
            EditorOp::SetTransform(..) => "set transform",
            EditorOp::AutoFitImage(_) => "auto-fit image",
            EditorOp::SetPaperSize(_) => "set paper size",
            EditorOp::SetLayoutMode(_) => "set layout mode",
            EditorOp::SetBorderless(_) => "set borderless",
            EditorOp::SetAdjustments(_) => "set adjustments",
            EditorOp::SetOverlayText(_) => "set overlay text",
            EditorOp::ResetAll => "reset all",
        }
    }

    /// Structural operations snapshot immediately; the rest are part of a
    /// gesture and snapshot on commit.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            EditorOp::SetTransform(..) | EditorOp::SetAdjustments(_) | EditorOp::SetOverlayText(_)
        )
    }

    /// Compute the state that follows `state`
    pub fn apply(
        &self,
        state: &EditorState,
        limits: &StudioLimits,
    ) -> Result<EditorState, StudioError> {
        let mut next = state.clone();

        match self {
            EditorOp::AddImages(layers) => {
                let remaining = limits.max_images.saturating_sub(next.images.len());
                if remaining == 0 && !layers.is_empty() {
                    return Err(StudioError::CapacityExceeded {
                        max: limits.max_images,
                        dropped: layers.len(),
                    });
                }
                next.images.extend(layers.iter().take(remaining).cloned());
                refit(&mut next, limits);
            }
            EditorOp::RemoveImage(id) => {
                let index = next
                    .image_index(*id)
                    .ok_or(StudioError::UnknownImage(*id))?;
                next.images.remove(index);
                refit(&mut next, limits);
            }
            EditorOp::SetTransform(id, patch) => {
                let image = next
                    .images
                    .iter_mut()
                    .find(|image| image.id == *id)
                    .ok_or(StudioError::UnknownImage(*id))?;
                let transform = &mut image.transform;
                if let Some(scale) = patch.scale {
                    transform.scale = scale.clamp(limits.min_scale, limits.max_scale);
                }
                if let Some(rotate) = patch.rotate {
                    transform.rotate = rotate.clamp(ROTATION_RANGE.0, ROTATION_RANGE.1);
                }
                if let Some(x) = patch.x {
                    transform.x = x;
                }
                if let Some(y) = patch.y {
                    transform.y = y;
                }
            }
            EditorOp::AutoFitImage(id) => {
                let index = next
                    .image_index(*id)
                    .ok_or(StudioError::UnknownImage(*id))?;
                let count = next.images.len();
                let transform = fitted_transform(
                    &next.images[index],
                    next.paper().aspect_ratio,
                    count,
                    index,
                    next.layout_mode,
                    next.borderless,
                    limits.safety_margin,
                );
                next.images[index].transform = transform;
            }
            EditorOp::SetPaperSize(size) => {
                next.paper_size = *size;
                refit(&mut next, limits);
            }
            EditorOp::SetLayoutMode(mode) => {
                next.layout_mode = *mode;
                refit(&mut next, limits);
            }
            EditorOp::SetBorderless(borderless) => {
                next.borderless = *borderless;
                refit(&mut next, limits);
            }
            EditorOp::SetAdjustments(patch) => {
                let range = |v: f64| v.clamp(ColorAdjustments::MIN, ColorAdjustments::MAX);
                let adjustments = &mut next.adjustments;
                if let Some(v) = patch.brightness {
                    adjustments.brightness = range(v);
                }
                if let Some(v) = patch.contrast {
                    adjustments.contrast = range(v);
                }
                if let Some(v) = patch.saturation {
                    adjustments.saturation = range(v);
                }
            }
            EditorOp::SetOverlayText(patch) => {
                let overlay = &mut next.overlay;
                if let Some(color) = &patch.color {
                    overlay.color = normalize_hex_color(color)?;
                }
                if let Some(content) = &patch.content {
                    overlay.content = content.clone();
                }
                if let Some(font) = patch.font {
                    overlay.font = font;
                }
                if let Some(size) = patch.font_size {
                    overlay.font_size = size.clamp(limits.min_font_size, limits.max_font_size);
                }
                if let Some(position) = patch.position {
                    overlay.position = TextPosition {
                        x: position.x.clamp(0.0, 100.0),
                        y: position.y.clamp(0.0, 100.0),
                    };
                }
            }
            EditorOp::ResetAll => {
                next.adjustments = ColorAdjustments::default();
                next.overlay.content.clear();
                refit(&mut next, limits);
            }
        }

        Ok(next)
    }
}

fn refit(state: &mut EditorState, limits: &StudioLimits) {
    let ratio = state.paper().aspect_ratio;
    refit_all(
        &mut state.images,
        ratio,
        state.layout_mode,
        state.borderless,
        limits.safety_margin,
    );
}
