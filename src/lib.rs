//! # mvs-artifacts
//!
//! Artifact addressing and staged image ingestion for multi-view dense
//! reconstruction pipelines.
//!
//! A dense-reconstruction run is a series of independent stages (feature
//! extraction, depth estimation, filtering, meshing) exchanging per-view
//! intermediate files with no central catalog. This crate provides the two
//! contracts that make that work:
//!
//! - **Deterministic addressing**: a pure mapping from a logical artifact
//!   identity (view, kind, processing scale, optional tile, optional custom
//!   suffix) to a filesystem path, so every stage computes the same path for
//!   the same artifact. The path is the cache key.
//! - **Staged image loading**: decoding an input view into a validated,
//!   radiometrically normalized float buffer — geometry checked against the
//!   scene's declared dimensions, exposure compensated in linear space,
//!   colorspace converted, downscaled to working resolution.
//!
//! ## Architecture
//!
//! - [`scene`] - read-only reconstruction parameters: folders, the view
//!   table, the process-wide working downscale
//! - [`artifact`] - the kind registry and the path resolver
//! - [`mod@image`] - colorspace handling, embedded metadata and the loader
//! - [`calibration`] - plain-text 3x4 calibration matrices
//! - [`error`] - error taxonomy; every storage-touching failure carries the
//!   offending path
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use mvs_artifacts::{
//!     load_image, resolve_path, ArtifactKind, ColorSpace, CorrectionMode, SceneParams,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scene = SceneParams::from_manifest(Path::new("scene.json"))?;
//!     scene.validate().map_err(|e| format!("invalid scene: {e}"))?;
//!
//!     let view_id = scene.view_id(0)?;
//!     let (width, height) = scene.original_size(view_id).unwrap();
//!
//!     // Where a later stage will look for this view's raw depth map.
//!     let depth_path = resolve_path(&scene, view_id, ArtifactKind::DepthMap, 2, "", None);
//!     println!("depth map: {}", depth_path.display());
//!
//!     // Ingest the prepared image at working resolution.
//!     let image_path = resolve_path(&scene, view_id, ArtifactKind::ImageCache, 1, "", None);
//!     let loaded = load_image::<image::Rgb<f32>>(
//!         &image_path,
//!         width,
//!         height,
//!         ColorSpace::Linear,
//!         CorrectionMode::ApplyCorrection,
//!         scene.process_downscale,
//!     )?;
//!     println!("loaded {}x{}", loaded.pixels.width(), loaded.pixels.height());
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod calibration;
pub mod error;
pub mod image;
pub mod scene;

// Re-export commonly used types
pub use artifact::{
    open_artifact, resolve_path, resolve_path_by_index, ArtifactKind, FileSpec, OpenMode,
    StorageFolder, TileOrigin,
};
pub use calibration::{load_matrix_3x4, read_matrix_3x4, Matrix3x4};
pub use error::{CalibrationError, IndexError, IoError, LoadError, ManifestError};
pub use self::image::{
    load_image, load_image_with, ColorSpace, CorrectionMode, ExposureStatus, ExrMetadata,
    ImagePixel, LoadedImage, MetadataReader, EXPOSURE_COMPENSATION_ATTRIBUTE,
};
pub use scene::{SceneParams, ViewInfo, DEFAULT_PROCESS_DOWNSCALE};
