//! Design session.
//!
//! [`Studio`] owns the live [`EditorState`] and its [`HistoryLog`]. Every
//! change goes through an [`EditorOp`]: structural operations snapshot right
//! away, while drags and slider scrubs change the live state and snapshot
//! once when [`Studio::commit_gesture`] marks the end of the gesture.

mod ops;

pub use ops::{EditorOp, ROTATION_RANGE};

use wallified_core::Rupees;
use wallified_settings::{Config, PriceSheet, PrintSettings, StudioLimits};

use crate::design::DesignSpecification;
use crate::error::StudioError;
use crate::history::HistoryLog;
use crate::intake::{
    check_resolution, decode_batch, plan_batch, DecodedImage, ResolutionAdvisory, UploadedFile,
};
use crate::model::{
    AdjustmentsPatch, EditorState, ImageId, ImageLayer, LayoutMode, OverlayPatch, Transform,
    TransformPatch,
};
use crate::paper::PaperSizeId;
use crate::persistence::{CartLineItem, DesignSubmitter};
use crate::preview::{layout, PreviewMode, SheetLayout};
use crate::pricing;

/// Result of adding photos to the studio
#[derive(Debug, Default)]
pub struct IntakeReport {
    /// Ids of the photos added, in slot order
    pub added: Vec<ImageId>,
    /// Capacity and decode notices for the user
    pub notices: Vec<StudioError>,
    pub advisories: Vec<ResolutionAdvisory>,
}

/// A design session
#[derive(Debug, Clone)]
pub struct Studio {
    state: EditorState,
    history: HistoryLog<EditorState>,
    limits: StudioLimits,
    pricing: PriceSheet,
    print: PrintSettings,
    gesture_pending: bool,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Studio {
    /// Start an empty session; the starting state is the first snapshot
    pub fn new(config: &Config) -> Self {
        let state = EditorState::default();
        let mut history = HistoryLog::new(config.studio.history_depth);
        history.push(state.clone());

        Self {
            state,
            history,
            limits: config.studio.clone(),
            pricing: config.pricing.clone(),
            print: config.print.clone(),
            gesture_pending: false,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn limits(&self) -> &StudioLimits {
        &self.limits
    }

    fn dispatch(&mut self, op: EditorOp) -> Result<(), StudioError> {
        let structural = op.is_structural();
        if structural {
            self.commit_gesture();
        }

        self.state = op.apply(&self.state, &self.limits)?;
        tracing::debug!("Applied {}", op.name());

        if structural {
            self.history.push(self.state.clone());
        } else {
            self.gesture_pending = true;
        }
        Ok(())
    }

    fn dispatch_infallible(&mut self, op: EditorOp) {
        let name = op.name();
        if let Err(err) = self.dispatch(op) {
            tracing::error!("{} failed: {}", name, err);
        }
    }

    fn advisories(&self) -> Vec<ResolutionAdvisory> {
        self.state
            .images
            .iter()
            .filter_map(|image| check_resolution(image, self.state.paper_size))
            .collect()
    }

    /// Add decoded photos, keeping only as many as fit.
    ///
    /// With no room left at all this fails with `CapacityExceeded` and the
    /// state is unchanged.
    pub fn add_images(&mut self, decoded: Vec<DecodedImage>) -> Result<IntakeReport, StudioError> {
        let mut report = IntakeReport::default();
        if decoded.is_empty() {
            return Ok(report);
        }

        let remaining = self
            .limits
            .max_images
            .saturating_sub(self.state.images.len());
        let dropped = decoded.len().saturating_sub(remaining);
        let layers: Vec<ImageLayer> = decoded
            .into_iter()
            .take(remaining)
            .map(|image| ImageLayer {
                id: ImageId::new(),
                source: image.source,
                name: image.name,
                resolution: image.resolution,
                transform: Transform::default(),
            })
            .collect();
        let ids: Vec<ImageId> = layers.iter().map(|layer| layer.id).collect();

        if layers.is_empty() {
            tracing::warn!("Studio is full, ignoring {} image(s)", dropped);
            return Err(StudioError::CapacityExceeded {
                max: self.limits.max_images,
                dropped,
            });
        }

        self.dispatch(EditorOp::AddImages(layers))?;
        tracing::info!("Added {} image(s)", ids.len());

        if dropped > 0 {
            report.notices.push(StudioError::CapacityExceeded {
                max: self.limits.max_images,
                dropped,
            });
        }
        report.advisories = ids
            .iter()
            .filter_map(|id| self.state.image(*id))
            .filter_map(|image| check_resolution(image, self.state.paper_size))
            .collect();
        report.added = ids;
        Ok(report)
    }

    /// Decode `files` and add the ones that fit, in selection order.
    ///
    /// The session stays borrowed until every file is decoded. Callers that
    /// keep editing while a batch decodes should run [`decode_batch`] on
    /// their own and pass the result to [`Studio::add_images`].
    pub async fn import(&mut self, files: Vec<UploadedFile>) -> Result<IntakeReport, StudioError> {
        let plan = plan_batch(self.state.images.len(), self.limits.max_images, files)?;
        let capacity_notice = plan.capacity_notice(self.limits.max_images);

        let decoded = decode_batch(plan.accepted).await;
        let mut report = self.add_images(decoded.decoded)?;
        report.notices.extend(capacity_notice);
        report.notices.extend(decoded.failures);
        Ok(report)
    }

    pub fn remove_image(&mut self, id: ImageId) -> Result<(), StudioError> {
        self.dispatch(EditorOp::RemoveImage(id))
    }

    /// Refit one photo, clearing its manual placement
    pub fn auto_fit_image(&mut self, id: ImageId) -> Result<(), StudioError> {
        self.dispatch(EditorOp::AutoFitImage(id))
    }

    /// Switch paper size; returns advisories for photos too small for it
    pub fn set_paper_size(&mut self, size: PaperSizeId) -> Vec<ResolutionAdvisory> {
        self.dispatch_infallible(EditorOp::SetPaperSize(size));
        self.advisories()
    }

    /// One-click switch to the size an advisory suggests
    pub fn apply_advisory(&mut self, advisory: &ResolutionAdvisory) -> Vec<ResolutionAdvisory> {
        self.set_paper_size(advisory.suggested)
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.dispatch_infallible(EditorOp::SetLayoutMode(mode));
    }

    pub fn set_borderless(&mut self, borderless: bool) {
        self.dispatch_infallible(EditorOp::SetBorderless(borderless));
    }

    /// Refit everything, neutral colours, no caption
    pub fn reset_all(&mut self) {
        self.dispatch_infallible(EditorOp::ResetAll);
    }

    pub fn set_transform(&mut self, id: ImageId, patch: TransformPatch) -> Result<(), StudioError> {
        self.dispatch(EditorOp::SetTransform(id, patch))
    }

    /// Move a photo by a drag delta
    pub fn nudge(&mut self, id: ImageId, dx: f64, dy: f64) -> Result<(), StudioError> {
        let current = self
            .state
            .image(id)
            .ok_or(StudioError::UnknownImage(id))?
            .transform;
        self.set_transform(id, TransformPatch::position(current.x + dx, current.y + dy))
    }

    pub fn set_adjustments(&mut self, patch: AdjustmentsPatch) {
        self.dispatch_infallible(EditorOp::SetAdjustments(patch));
    }

    pub fn set_overlay_text(&mut self, patch: OverlayPatch) -> Result<(), StudioError> {
        self.dispatch(EditorOp::SetOverlayText(patch))
    }

    /// End of a drag or slider gesture. Pushes one snapshot if the live
    /// state moved since the last one.
    pub fn commit_gesture(&mut self) -> bool {
        if !std::mem::take(&mut self.gesture_pending) {
            return false;
        }
        if self.history.current() == Some(&self.state) {
            return false;
        }
        self.history.push(self.state.clone());
        true
    }

    /// Step back one snapshot. An uncommitted gesture is committed first so
    /// that `redo` can bring it back.
    pub fn undo(&mut self) -> bool {
        self.commit_gesture();
        match self.history.undo() {
            Some(snapshot) => {
                self.state = snapshot.clone();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.state = snapshot.clone();
                self.gesture_pending = false;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        let uncommitted = self.gesture_pending && self.history.current() != Some(&self.state);
        uncommitted || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history.cursor()
    }

    pub fn price(&self) -> Rupees {
        pricing::price(&self.state, &self.pricing)
    }

    pub fn sheet_count(&self) -> u32 {
        pricing::sheet_count(&self.state)
    }

    /// Advisories for every photo against the current paper size
    pub fn resolution_advisories(&self) -> Vec<ResolutionAdvisory> {
        self.advisories()
    }

    pub fn preview(&self, mode: PreviewMode) -> Vec<SheetLayout> {
        layout(&self.state, mode)
    }

    /// Freeze the current state for submission
    pub fn design_specification(&self) -> Result<DesignSpecification, StudioError> {
        DesignSpecification::new(&self.state, &self.pricing, &self.print)
    }

    /// Validate, persist and add the design to the cart. The editor state
    /// is left as it was whatever the outcome.
    pub async fn submit(&self, submitter: &DesignSubmitter) -> Result<CartLineItem, StudioError> {
        let design = self.design_specification()?;
        submitter.submit(&design).await
    }
}
