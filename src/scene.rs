//! Scene parameters: the view table and storage layout of a reconstruction.
//!
//! Every pipeline stage resolves artifact paths against the same
//! [`SceneParams`], which is why the mapping from ordinal processing index to
//! persistent view id must be total and stable for the lifetime of a run.
//! This layer only reads the scene description; it never mutates it.
//!
//! # Manifest format
//!
//! A scene manifest is a JSON document:
//!
//! ```json
//! {
//!   "images_folder": "/data/scene/images",
//!   "depth_maps_folder": "/data/scene/depthMaps",
//!   "depth_maps_filter_folder": "/data/scene/depthMapsFiltered",
//!   "process_downscale": 2,
//!   "views": [
//!     { "view_id": 10354988, "width": 4000, "height": 3000 },
//!     { "view_id": 10354989, "width": 4000, "height": 3000 }
//!   ]
//! }
//! ```
//!
//! The order of `views` is the ordinal processing order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::artifact::StorageFolder;
use crate::error::{IndexError, ManifestError};

/// Default process-wide working downscale (native resolution).
pub const DEFAULT_PROCESS_DOWNSCALE: u32 = 1;

/// One input image of the reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewInfo {
    /// Persistent view identifier, stable across pipeline stages.
    pub view_id: u32,

    /// Declared original width in pixels.
    pub width: u32,

    /// Declared original height in pixels.
    pub height: u32,
}

/// Read-only reconstruction parameters shared by all pipeline stages.
///
/// Holds the three storage folders, the ordered view table and the
/// process-wide working downscale factor. Path resolution and image loading
/// borrow this immutably, so it can be shared freely across threads.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneParams {
    /// Folder holding the prepared base images and most per-view artifacts.
    pub images_folder: PathBuf,

    /// Folder holding raw depth-estimation outputs.
    pub depth_maps_folder: PathBuf,

    /// Folder holding filtered depth-estimation outputs.
    pub depth_maps_filter_folder: PathBuf,

    /// Views in ordinal processing order.
    pub views: Vec<ViewInfo>,

    /// Process-wide working downscale factor applied when loading imagery.
    #[serde(default = "default_downscale")]
    pub process_downscale: u32,
}

fn default_downscale() -> u32 {
    DEFAULT_PROCESS_DOWNSCALE
}

impl SceneParams {
    /// Load scene parameters from a JSON manifest file.
    pub fn from_manifest(path: &Path) -> Result<SceneParams, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ManifestError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Validate the scene parameters and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.views.is_empty() {
            return Err("Scene declares no views".to_string());
        }

        if self.process_downscale == 0 {
            return Err("process_downscale must be greater than 0".to_string());
        }

        // Duplicate view ids would make two logical artifacts share a path.
        let mut ids: Vec<u32> = self.views.iter().map(|v| v.view_id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err("Scene declares duplicate view ids".to_string());
        }

        Ok(())
    }

    /// Number of views in the scene.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Translate an ordinal processing index into a persistent view id.
    pub fn view_id(&self, index: usize) -> Result<u32, IndexError> {
        self.view(index).map(|v| v.view_id)
    }

    /// Get the view at an ordinal processing index.
    pub fn view(&self, index: usize) -> Result<&ViewInfo, IndexError> {
        self.views.get(index).ok_or(IndexError::OutOfRange {
            index,
            count: self.views.len(),
        })
    }

    /// Declared original dimensions of a view, by persistent view id.
    pub fn original_size(&self, view_id: u32) -> Option<(u32, u32)> {
        self.views
            .iter()
            .find(|v| v.view_id == view_id)
            .map(|v| (v.width, v.height))
    }

    /// Storage folder for a folder class selected by the artifact registry.
    pub fn folder(&self, folder: StorageFolder) -> &Path {
        match folder {
            StorageFolder::Images => &self.images_folder,
            StorageFolder::DepthMaps => &self.depth_maps_folder,
            StorageFolder::DepthMapsFiltered => &self.depth_maps_filter_folder,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
