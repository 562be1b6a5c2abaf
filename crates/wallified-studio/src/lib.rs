//! # Wallified Studio
//!
//! Custom poster design studio: photos are laid out on a paper sheet,
//! placed and styled by the customer, priced, and submitted to the cart.
//!
//! - [`geometry`]: slot aspect ratios and auto-fit scale
//! - [`paper`]: the paper size catalog
//! - [`intake`]: capacity capping, decoding, resolution advisories
//! - [`editor`]: the [`Studio`] session and its operation table
//! - [`history`]: bounded undo/redo log
//! - [`pricing`], [`design`], [`persistence`]: from state to cart line item
//! - [`preview`]: what the page shell draws

pub mod design;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod intake;
pub mod model;
pub mod paper;
pub mod persistence;
pub mod preview;
pub mod pricing;

pub use design::{DesignSpecification, PrintSpecs};
pub use editor::{EditorOp, IntakeReport, Studio};
pub use error::{StudioError, StudioResult};
pub use geometry::{auto_fit_scale, slot_aspect_ratio, SAFETY_MARGIN};
pub use history::HistoryLog;
pub use intake::{
    check_resolution, decode_batch, decode_file, plan_batch, DecodedImage, ResolutionAdvisory,
    UploadedFile,
};
pub use model::{
    AdjustmentsPatch, ColorAdjustments, EditorState, FontId, ImageId, ImageLayer, ImageSource,
    LayoutMode, OverlayPatch, OverlayText, Resolution, TextPosition, Transform, TransformPatch,
};
pub use paper::{suggest_for_width, PaperSize, PaperSizeId};
pub use persistence::{CartLineItem, CartSink, DesignSubmitter, CUSTOM_DESIGNS};
pub use preview::{PreviewMode, SheetLayout};
