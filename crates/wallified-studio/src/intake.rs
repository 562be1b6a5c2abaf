//! Image intake.
//!
//! Uploaded files are capped to the remaining slot capacity, decoded to learn
//! their pixel dimensions and turned into data URLs the preview can render.
//! Decoding runs on the blocking pool so the editor stays responsive; a file
//! that fails to decode is dropped on its own without affecting the rest of
//! the batch.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tokio::task::JoinSet;

use crate::error::StudioError;
use crate::model::{ImageId, ImageLayer, ImageSource, Resolution};
use crate::paper::{suggest_for_width, PaperSizeId};

/// Formats the upload control accepts
pub const ACCEPTED_FORMATS: [ImageFormat; 3] =
    [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP];

/// A file chosen by the user
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A successfully decoded upload
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub name: String,
    pub resolution: Resolution,
    pub mime_type: &'static str,
    pub source: ImageSource,
}

/// Files that fit in the remaining capacity, plus how many did not
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub accepted: Vec<UploadedFile>,
    pub dropped: usize,
}

impl BatchPlan {
    /// Notice for the user when part of the batch was dropped
    pub fn capacity_notice(&self, max_images: usize) -> Option<StudioError> {
        (self.dropped > 0).then_some(StudioError::CapacityExceeded {
            max: max_images,
            dropped: self.dropped,
        })
    }
}

/// Keep as many of `files` as fit next to `current` existing images.
///
/// A non-empty batch with no room left at all is refused outright.
pub fn plan_batch(
    current: usize,
    max_images: usize,
    mut files: Vec<UploadedFile>,
) -> Result<BatchPlan, StudioError> {
    let remaining = max_images.saturating_sub(current);
    if remaining == 0 && !files.is_empty() {
        return Err(StudioError::CapacityExceeded {
            max: max_images,
            dropped: files.len(),
        });
    }

    let dropped = files.len().saturating_sub(remaining);
    files.truncate(remaining);
    if dropped > 0 {
        tracing::warn!("Only {} image(s) fit, dropping {}", remaining, dropped);
    }

    Ok(BatchPlan {
        accepted: files,
        dropped,
    })
}

/// Decode one file to its dimensions and a data URL
pub fn decode_file(file: &UploadedFile) -> Result<DecodedImage, StudioError> {
    let failure = |reason: String| StudioError::DecodeFailure {
        name: file.name.clone(),
        reason,
    };

    let reader = ImageReader::new(Cursor::new(file.bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| failure(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| failure("unrecognised image format".to_string()))?;
    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(failure(format!("{:?} images are not supported", format)));
    }

    // Full decode: a truncated body fails here, not just a bad header
    let decoded = reader.decode().map_err(|e| failure(e.to_string()))?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(failure("image has no pixels".to_string()));
    }

    let mime_type = format.to_mime_type();
    let source = ImageSource::new(format!(
        "data:{};base64,{}",
        mime_type,
        STANDARD.encode(&file.bytes)
    ));

    Ok(DecodedImage {
        name: file.name.clone(),
        resolution: Resolution::new(width, height),
        mime_type,
        source,
    })
}

/// Outcome of decoding a batch
#[derive(Debug, Default)]
pub struct DecodeReport {
    /// Successfully decoded files, in selection order
    pub decoded: Vec<DecodedImage>,
    /// One `DecodeFailure` per dropped file
    pub failures: Vec<StudioError>,
}

/// Decode `files` concurrently on the blocking pool.
///
/// Decodes may finish in any order; results are returned in the order the
/// files were selected, so slot assignment follows the user's selection and
/// not decode timing.
pub async fn decode_batch(files: Vec<UploadedFile>) -> DecodeReport {
    let names: Vec<String> = files.iter().map(|file| file.name.clone()).collect();
    let mut slots: Vec<Option<Result<DecodedImage, StudioError>>> = vec![None; files.len()];

    let mut tasks = JoinSet::new();
    for (index, file) in files.into_iter().enumerate() {
        tasks.spawn_blocking(move || (index, decode_file(&file)));
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => tracing::error!("Decode task failed: {}", e),
        }
    }

    let mut report = DecodeReport::default();
    for (slot, name) in slots.into_iter().zip(names) {
        match slot {
            Some(Ok(image)) => report.decoded.push(image),
            Some(Err(err)) => {
                tracing::warn!("{}", err);
                report.failures.push(err);
            }
            None => report.failures.push(StudioError::DecodeFailure {
                name,
                reason: "decoder stopped unexpectedly".to_string(),
            }),
        }
    }
    report
}

/// Non-blocking suggestion to print a low-resolution photo smaller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionAdvisory {
    pub image_id: ImageId,
    pub image_width: u32,
    pub current: PaperSizeId,
    pub suggested: PaperSizeId,
}

impl ResolutionAdvisory {
    pub fn message(&self) -> String {
        format!(
            "This photo is {}px wide, which may look soft at {}. {} is recommended.",
            self.image_width, self.current, self.suggested
        )
    }
}

/// Advisory for `image` printed at `paper`, if it falls short
pub fn check_resolution(image: &ImageLayer, paper: PaperSizeId) -> Option<ResolutionAdvisory> {
    let width = image.resolution.width;
    if paper.spec().is_adequate(width) {
        return None;
    }

    Some(ResolutionAdvisory {
        image_id: image.id,
        image_width: width,
        current: paper,
        suggested: suggest_for_width(width),
    })
}
