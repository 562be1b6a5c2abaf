//! Layout geometry.
//!
//! Computes the aspect ratio of each grid slot and the scale at which a
//! photo sits inside it. Only ratios matter, never absolute pixel sizes.

use crate::model::{ImageLayer, LayoutMode, Transform};

/// Default fraction of the slot a bordered photo may fill
pub const SAFETY_MARGIN: f64 = 0.95;

/// Aspect ratio (width / height) of slot `slot_index` in a grid holding
/// `image_count` photos on a sheet of ratio `paper_ratio`.
///
/// Grid shapes in combined mode:
/// - 1 photo: the whole sheet
/// - 2 photos: stacked halves
/// - 3 photos: a full-width top half over two bottom quarters
/// - 4 photos: quarters
pub fn slot_aspect_ratio(
    paper_ratio: f64,
    image_count: usize,
    slot_index: usize,
    layout: LayoutMode,
) -> f64 {
    if layout == LayoutMode::Separate {
        return paper_ratio;
    }

    match image_count {
        0 | 1 => paper_ratio,
        2 => paper_ratio * 2.0,
        3 if slot_index == 0 => paper_ratio * 2.0,
        _ => paper_ratio,
    }
}

/// Scale for a photo of aspect `image_aspect` in a slot of aspect
/// `slot_aspect`, using [`SAFETY_MARGIN`].
pub fn auto_fit_scale(image_aspect: f64, slot_aspect: f64, borderless: bool) -> f64 {
    auto_fit_scale_with_margin(image_aspect, slot_aspect, borderless, SAFETY_MARGIN)
}

/// Photos wider than their slot shrink by `slot_aspect / image_aspect`.
/// Bordered prints keep `margin` of the slot; borderless prints divide the
/// margin back out.
pub fn auto_fit_scale_with_margin(
    image_aspect: f64,
    slot_aspect: f64,
    borderless: bool,
    margin: f64,
) -> f64 {
    let bordered = if image_aspect > slot_aspect {
        (slot_aspect / image_aspect) * margin
    } else {
        margin
    };

    if borderless {
        bordered / margin
    } else {
        bordered
    }
}

/// Fitted transform for `images[index]` given the current layout
pub fn fitted_transform(
    image: &ImageLayer,
    paper_ratio: f64,
    image_count: usize,
    index: usize,
    layout: LayoutMode,
    borderless: bool,
    margin: f64,
) -> Transform {
    let slot = slot_aspect_ratio(paper_ratio, image_count, index, layout);
    Transform::fitted(auto_fit_scale_with_margin(
        image.resolution.aspect_ratio(),
        slot,
        borderless,
        margin,
    ))
}

/// Refit every photo: fresh scale, centered, rotation cleared
pub fn refit_all(
    images: &mut [ImageLayer],
    paper_ratio: f64,
    layout: LayoutMode,
    borderless: bool,
    margin: f64,
) {
    let count = images.len();
    for (index, image) in images.iter_mut().enumerate() {
        image.transform =
            fitted_transform(image, paper_ratio, count, index, layout, borderless, margin);
    }
}
