//! Preview layout.
//!
//! Describes what the page shell draws for the current state: one sheet in
//! combined mode, one per photo in separate mode. Cells are normalised to
//! the sheet's content box, and every photo is transformed about the centre
//! of its cell. Nothing here changes the editor state or recomputes scale.

use serde::Serialize;

use crate::geometry::slot_aspect_ratio;
use crate::model::{
    ColorAdjustments, EditorState, FontId, ImageId, ImageLayer, LayoutMode, OverlayText, Transform,
};

/// Sheet height in the lab view, viewport-height units
pub const LAB_COMBINED_HEIGHT_VH: f64 = 78.0;
pub const LAB_SEPARATE_HEIGHT_VH: f64 = 72.0;
/// Height of an A4 sheet on the room mockup wall
pub const ROOM_BASE_HEIGHT_VH: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Close-up editing view
    #[default]
    Lab,
    /// Framed on a wall, scaled by paper size
    Room,
}

/// Grid dimensions of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridShape {
    pub columns: u32,
    pub rows: u32,
}

/// Rectangle in the unit square of the sheet content box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellRect {
    const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const FULL: CellRect = CellRect::new(0.0, 0.0, 1.0, 1.0);

    /// Width/height of this cell on a sheet of ratio `paper_ratio`
    pub fn aspect_ratio(&self, paper_ratio: f64) -> f64 {
        paper_ratio * self.width / self.height
    }
}

/// A photo placed in its cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedImage {
    pub image_id: ImageId,
    pub source: String,
    pub cell: CellRect,
    /// Number of grid columns the cell spans
    pub column_span: u32,
    pub transform: Transform,
    /// CSS transform applied about the cell centre
    pub css_transform: String,
}

/// Caption anchored on a sheet, centred on `(x, y)` percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayPlacement {
    pub content: String,
    pub font: FontId,
    pub font_family: &'static str,
    pub font_size: u32,
    pub color: String,
    pub x: f64,
    pub y: f64,
}

/// One printed sheet as shown on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetLayout {
    pub aspect_ratio: f64,
    pub height_vh: f64,
    /// Inner margin of the sheet, `rem`
    pub padding_rem: f64,
    pub grid: GridShape,
    pub cells: Vec<PlacedImage>,
    /// CSS filter applied to the photos only
    pub filter: String,
    pub overlay: Option<OverlayPlacement>,
}

/// Grid shape and cell rectangles for `count` photos on one sheet
pub fn combined_cells(count: usize) -> (GridShape, Vec<(CellRect, u32)>) {
    match count {
        0 => (GridShape { columns: 1, rows: 1 }, Vec::new()),
        1 => (GridShape { columns: 1, rows: 1 }, vec![(CellRect::FULL, 1)]),
        2 => (
            GridShape { columns: 1, rows: 2 },
            vec![
                (CellRect::new(0.0, 0.0, 1.0, 0.5), 1),
                (CellRect::new(0.0, 0.5, 1.0, 0.5), 1),
            ],
        ),
        3 => (
            GridShape { columns: 2, rows: 2 },
            vec![
                (CellRect::new(0.0, 0.0, 1.0, 0.5), 2),
                (CellRect::new(0.0, 0.5, 0.5, 0.5), 1),
                (CellRect::new(0.5, 0.5, 0.5, 0.5), 1),
            ],
        ),
        _ => (
            GridShape { columns: 2, rows: 2 },
            vec![
                (CellRect::new(0.0, 0.0, 0.5, 0.5), 1),
                (CellRect::new(0.5, 0.0, 0.5, 0.5), 1),
                (CellRect::new(0.0, 0.5, 0.5, 0.5), 1),
                (CellRect::new(0.5, 0.5, 0.5, 0.5), 1),
            ],
        ),
    }
}

/// `translate(..) rotate(..) scale(..)` for a transform
pub fn css_transform(transform: &Transform) -> String {
    format!(
        "translate({}px, {}px) rotate({}deg) scale({})",
        transform.x, transform.y, transform.rotate, transform.scale
    )
}

/// `brightness(..) contrast(..) saturate(..)` for the adjustments
pub fn css_filter(adjustments: &ColorAdjustments) -> String {
    format!(
        "brightness({}%) contrast({}%) saturate({}%)",
        adjustments.brightness, adjustments.contrast, adjustments.saturation
    )
}

fn overlay_placement(overlay: &OverlayText) -> Option<OverlayPlacement> {
    overlay.is_visible().then(|| OverlayPlacement {
        content: overlay.content.clone(),
        font: overlay.font,
        font_family: overlay.font.css_family(),
        font_size: overlay.font_size,
        color: overlay.color.clone(),
        x: overlay.position.x,
        y: overlay.position.y,
    })
}

fn place(image: &ImageLayer, cell: CellRect, column_span: u32) -> PlacedImage {
    PlacedImage {
        image_id: image.id,
        source: image.source.to_string(),
        cell,
        column_span,
        transform: image.transform,
        css_transform: css_transform(&image.transform),
    }
}

/// Sheets to draw for `state` in `mode`
pub fn layout(state: &EditorState, mode: PreviewMode) -> Vec<SheetLayout> {
    let paper = state.paper();
    let filter = css_filter(&state.adjustments);
    let overlay = overlay_placement(&state.overlay);

    let height_vh = match (mode, state.layout_mode) {
        (PreviewMode::Lab, LayoutMode::Combined) => LAB_COMBINED_HEIGHT_VH,
        (PreviewMode::Lab, LayoutMode::Separate) => LAB_SEPARATE_HEIGHT_VH,
        (PreviewMode::Room, _) => ROOM_BASE_HEIGHT_VH * paper.preview_scale,
    };
    let padding_rem = match (state.borderless, mode, state.layout_mode) {
        (true, _, _) => 0.0,
        (false, PreviewMode::Room, _) => 1.5,
        (false, PreviewMode::Lab, LayoutMode::Combined) => 3.0,
        (false, PreviewMode::Lab, LayoutMode::Separate) => 2.5,
    };

    let sheet = |grid: GridShape, cells: Vec<PlacedImage>| SheetLayout {
        aspect_ratio: paper.aspect_ratio,
        height_vh,
        padding_rem,
        grid,
        cells,
        filter: filter.clone(),
        overlay: overlay.clone(),
    };

    match state.layout_mode {
        LayoutMode::Combined => {
            let (grid, rects) = combined_cells(state.images.len());
            let cells = state
                .images
                .iter()
                .zip(rects)
                .map(|(image, (rect, span))| place(image, rect, span))
                .collect();
            vec![sheet(grid, cells)]
        }
        LayoutMode::Separate => state
            .images
            .iter()
            .map(|image| {
                sheet(
                    GridShape { columns: 1, rows: 1 },
                    vec![place(image, CellRect::FULL, 1)],
                )
            })
            .collect(),
    }
}

/// Slot ratio the geometry engine assumes for each drawn cell, for checking
/// that layout and fit agree.
pub fn cell_slot_ratios(state: &EditorState) -> Vec<(f64, f64)> {
    let ratio = state.paper().aspect_ratio;
    let count = state.images.len();
    layout(state, PreviewMode::Lab)
        .iter()
        .flat_map(|sheet| sheet.cells.iter())
        .enumerate()
        .map(|(index, cell)| {
            (
                cell.cell.aspect_ratio(ratio),
                slot_aspect_ratio(ratio, count, index, state.layout_mode),
            )
        })
        .collect()
}
