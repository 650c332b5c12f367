//! Staged image loading.
//!
//! Loading an input view into the pipeline is a fixed sequence of stages:
//! decode, geometry validation against the scene's declared dimensions,
//! optional exposure compensation in linear space, colorspace conversion,
//! and the working-resolution downscale. The loader holds no state across
//! calls; callers parallelize across independent (view, tile) units
//! themselves.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Pixel, Rgb, Rgba};
use tracing::{debug, info, warn};

use crate::error::LoadError;

use super::color::{self, ColorSpace};
use super::metadata::{ExrMetadata, MetadataReader, EXPOSURE_COMPENSATION_ATTRIBUTE};

// =============================================================================
// Pixel capability
// =============================================================================

/// Channel layouts the loader can produce.
///
/// One loader serves all layouts; a layout only has to say how a decoded
/// image maps into its float buffer.
pub trait ImagePixel: Pixel<Subpixel = f32> + 'static {
    /// Convert a freshly decoded image into this layout's float buffer.
    fn from_decoded(image: DynamicImage) -> ImageBuffer<Self, Vec<f32>>;
}

impl ImagePixel for Rgb<f32> {
    fn from_decoded(image: DynamicImage) -> ImageBuffer<Self, Vec<f32>> {
        image.to_rgb32f()
    }
}

impl ImagePixel for Rgba<f32> {
    fn from_decoded(image: DynamicImage) -> ImageBuffer<Self, Vec<f32>> {
        image.to_rgba32f()
    }
}

// =============================================================================
// Loading contract
// =============================================================================

/// Whether exposure compensation is applied while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionMode {
    /// Decode directly into the target colorspace.
    NoCorrection,
    /// Decode into linear space, apply the embedded compensation scalar,
    /// then convert to the target colorspace.
    ApplyCorrection,
}

/// What happened on the exposure-compensation stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExposureStatus {
    /// Correction was not requested.
    NotRequested,
    /// The embedded scalar was applied.
    Applied(f32),
    /// Correction was requested but the image carries no compensation tag;
    /// a neutral multiplier was used and a warning emitted. Callers that
    /// require compensation should treat this as a configuration problem.
    TagMissing,
}

/// A validated, radiometrically normalized image buffer.
#[derive(Debug, Clone)]
pub struct LoadedImage<P: ImagePixel> {
    /// Pixel data in the requested colorspace, at working resolution.
    pub pixels: ImageBuffer<P, Vec<f32>>,
    /// Outcome of the exposure-compensation stage.
    pub exposure: ExposureStatus,
}

/// Load an image through the staged contract, reading embedded metadata
/// from the file itself.
///
/// `expected_width`/`expected_height` are the dimensions the scene declares
/// for the view; a mismatch is fatal for this artifact and is never retried.
/// `downscale` values of 1 or less leave the working resolution untouched.
pub fn load_image<P: ImagePixel>(
    path: &Path,
    expected_width: u32,
    expected_height: u32,
    colorspace: ColorSpace,
    correction: CorrectionMode,
    downscale: u32,
) -> Result<LoadedImage<P>, LoadError> {
    load_image_with(
        path,
        expected_width,
        expected_height,
        colorspace,
        correction,
        downscale,
        &ExrMetadata,
    )
}

/// [`load_image`] with an explicit metadata source.
#[allow(clippy::too_many_arguments)]
pub fn load_image_with<P: ImagePixel>(
    path: &Path,
    expected_width: u32,
    expected_height: u32,
    colorspace: ColorSpace,
    correction: CorrectionMode,
    downscale: u32,
    metadata: &dyn MetadataReader,
) -> Result<LoadedImage<P>, LoadError> {
    let decoded = image::open(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let container = ColorSpace::of_container(path);
    let mut pixels = P::from_decoded(decoded);

    // Validation runs against the original geometry, before any resampling.
    let (actual_width, actual_height) = pixels.dimensions();
    if (actual_width, actual_height) != (expected_width, expected_height) {
        return Err(LoadError::DimensionMismatch {
            path: path.to_owned(),
            expected_width,
            expected_height,
            actual_width,
            actual_height,
        });
    }

    let exposure = match correction {
        CorrectionMode::NoCorrection => {
            color::convert_in_place(&mut pixels, container, colorspace);
            ExposureStatus::NotRequested
        }
        CorrectionMode::ApplyCorrection => {
            // The compensation multiply is only valid in linear space.
            color::convert_in_place(&mut pixels, container, ColorSpace::Linear);

            let status = match metadata.exposure_compensation(path)? {
                Some(compensation) => {
                    info!(
                        path = %path.display(),
                        compensation,
                        "applying exposure compensation"
                    );
                    for pixel in pixels.pixels_mut() {
                        pixel.apply(|c| c * compensation);
                    }
                    ExposureStatus::Applied(compensation)
                }
                None => {
                    warn!(
                        path = %path.display(),
                        attribute = EXPOSURE_COMPENSATION_ATTRIBUTE,
                        "cannot compensate exposure: image carries no compensation tag, \
                         using neutral multiplier"
                    );
                    ExposureStatus::TagMissing
                }
            };

            color::convert_in_place(&mut pixels, ColorSpace::Linear, colorspace);
            status
        }
    };

    if downscale > 1 {
        debug!(path = %path.display(), downscale, "downscaling image to working resolution");
        pixels = imageops::resize(
            &pixels,
            expected_width / downscale,
            expected_height / downscale,
            FilterType::Lanczos3,
        );
    }

    Ok(LoadedImage { pixels, exposure })
}

// =============================================================================
// Tests
// =============================================================================
