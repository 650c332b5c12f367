//! Staged image ingestion: colorspace handling, embedded metadata and the
//! loader itself.

pub mod color;
pub mod metadata;

mod loader;

pub use color::{convert_in_place, linear_to_srgb, srgb_to_linear, ColorSpace};
pub use loader::{
    load_image, load_image_with, CorrectionMode, ExposureStatus, ImagePixel, LoadedImage,
};
pub use metadata::{ExrMetadata, MetadataReader, EXPOSURE_COMPENSATION_ATTRIBUTE};
