//! Deterministic artifact path resolution.
//!
//! Path resolution is the addressing scheme of the whole pipeline: there is
//! no central catalog, so every stage must compute the same path for the
//! same logical artifact. [`resolve_path`] is a pure function of its inputs
//! and never touches storage; a stage resumes simply by checking whether the
//! resolved path exists.
//!
//! # Filename grammar
//!
//! ```text
//! <folder>/<viewId><kindSuffix>[_scale<N>][<customSuffix>][_<tileX>_<tileY>].<ext>
//! ```
//!
//! Scale 0 and scale 1 are naming-equivalent; only scale > 1 appends a
//! `_scale<N>` component. A tile origin of (0, 0) produces `_0_0`, which is
//! distinct from the untiled name.

use std::fmt::Write as _;
use std::fs::File;
use std::path::PathBuf;

use crate::error::{IndexError, IoError};
use crate::scene::SceneParams;

use super::kind::ArtifactKind;

// =============================================================================
// TileOrigin
// =============================================================================

/// Origin of a rectangular sub-region of a view's image plane.
///
/// "No tiling" is expressed as `Option::<TileOrigin>::None`, never as a
/// sentinel coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileOrigin {
    /// X coordinate of the tile's top-left corner, in pixels.
    pub x: u32,
    /// Y coordinate of the tile's top-left corner, in pixels.
    pub y: u32,
}

impl TileOrigin {
    /// Create a tile origin.
    pub const fn new(x: u32, y: u32) -> Self {
        TileOrigin { x, y }
    }
}

// =============================================================================
// Path resolution
// =============================================================================

/// Resolve the path of an artifact addressed by persistent view id.
///
/// Pure and deterministic: identical inputs always yield an identical path,
/// and inputs differing in kind, scale class, tile or custom suffix yield
/// distinct paths for the same view. Safe to call concurrently from any
/// number of threads.
pub fn resolve_path(
    params: &SceneParams,
    view_id: u32,
    kind: ArtifactKind,
    scale: u32,
    custom_suffix: &str,
    tile: Option<TileOrigin>,
) -> PathBuf {
    let spec = kind.file_spec(scale);

    let mut name = view_id.to_string();
    name.push_str(spec.suffix);
    if scale > 1 {
        let _ = write!(name, "_scale{scale}");
    }
    name.push_str(custom_suffix);
    if let Some(tile) = tile {
        let _ = write!(name, "_{}_{}", tile.x, tile.y);
    }
    name.push('.');
    name.push_str(spec.extension);

    params.folder(spec.folder).join(name)
}

/// Resolve the path of an artifact addressed by ordinal processing index.
///
/// Translates the index through the scene's view table first and propagates
/// its failure for an out-of-range index.
pub fn resolve_path_by_index(
    params: &SceneParams,
    index: usize,
    kind: ArtifactKind,
    scale: u32,
    custom_suffix: &str,
    tile: Option<TileOrigin>,
) -> Result<PathBuf, IndexError> {
    let view_id = params.view_id(index)?;
    Ok(resolve_path(params, view_id, kind, scale, custom_suffix, tile))
}

// =============================================================================
// Handle acquisition
// =============================================================================

/// Mode an artifact stream is opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Open an existing artifact for reading.
    Read,
    /// Create or truncate the artifact for writing.
    Write,
}

/// Resolve the scale-0 path of an artifact and open a stream on it.
///
/// Fail-fast: on failure the error carries the exact path that was
/// attempted, so the caller never receives a usable-looking invalid handle.
/// The returned [`File`] is a scoped resource, released on drop on every
/// exit path.
pub fn open_artifact(
    params: &SceneParams,
    view_id: u32,
    kind: ArtifactKind,
    mode: OpenMode,
) -> Result<File, IoError> {
    let path = resolve_path(params, view_id, kind, 0, "", None);
    let result = match mode {
        OpenMode::Read => File::open(&path),
        OpenMode::Write => File::create(&path),
    };
    result.map_err(|source| IoError::Open { path, source })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::scene::ViewInfo;

    fn scene_at(root: &Path) -> SceneParams {
        SceneParams {
            images_folder: root.join("images"),
            depth_maps_folder: root.join("depthMaps"),
            depth_maps_filter_folder: root.join("depthMapsFiltered"),
            views: vec![
                ViewInfo {
                    view_id: 1234,
                    width: 100,
                    height: 100,
                },
                ViewInfo {
                    view_id: 5678,
                    width: 100,
                    height: 100,
                },
            ],
            process_downscale: 1,
        }
    }

    fn scene() -> SceneParams {
        scene_at(Path::new("/scene"))
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let params = scene();
        let a = resolve_path(
            &params,
            1234,
            ArtifactKind::DepthMap,
            2,
            "_part",
            Some(TileOrigin::new(128, 256)),
        );
        let b = resolve_path(
            &params,
            1234,
            ArtifactKind::DepthMap,
            2,
            "_part",
            Some(TileOrigin::new(128, 256)),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_grammar() {
        let params = scene();
        let path = resolve_path(
            &params,
            1234,
            ArtifactKind::DepthMap,
            2,
            "_part",
            Some(TileOrigin::new(128, 256)),
        );
        assert_eq!(
            path,
            PathBuf::from("/scene/depthMaps/1234_depthMap_scale2_part_128_256.exr")
        );
    }

    #[test]
    fn test_scale_zero_and_one_share_a_name() {
        let params = scene();
        let s0 = resolve_path(&params, 1234, ArtifactKind::NormalMap, 0, "", None);
        let s1 = resolve_path(&params, 1234, ArtifactKind::NormalMap, 1, "", None);
        assert_eq!(s0, s1);
        assert_eq!(
            s0,
            PathBuf::from("/scene/depthMapsFiltered/1234_normalMap.exr")
        );
    }

    #[test]
    fn test_scale_two_appends_suffix() {
        let params = scene();
        let path = resolve_path(&params, 1234, ArtifactKind::NormalMap, 2, "", None);
        assert_eq!(
            path,
            PathBuf::from("/scene/depthMapsFiltered/1234_normalMap_scale2.exr")
        );
    }

    #[test]
    fn test_depth_map_switches_folder_with_scale() {
        let params = scene();
        let filtered = resolve_path(&params, 1234, ArtifactKind::DepthMap, 0, "", None);
        let raw = resolve_path(&params, 1234, ArtifactKind::DepthMap, 2, "", None);
        assert_eq!(
            filtered,
            PathBuf::from("/scene/depthMapsFiltered/1234_depthMap.exr")
        );
        assert_eq!(
            raw,
            PathBuf::from("/scene/depthMaps/1234_depthMap_scale2.exr")
        );
    }

    #[test]
    fn test_tile_origin_zero_is_distinct_from_untiled() {
        let params = scene();
        let untiled = resolve_path(&params, 1234, ArtifactKind::DepthMap, 1, "", None);
        let tiled = resolve_path(
            &params,
            1234,
            ArtifactKind::DepthMap,
            1,
            "",
            Some(TileOrigin::new(0, 0)),
        );
        assert_ne!(untiled, tiled);
        assert_eq!(tiled, PathBuf::from("/scene/depthMaps/1234_depthMap_0_0.exr"));
    }

    #[test]
    fn test_collision_freedom_for_one_view() {
        let params = scene();
        let paths = [
            resolve_path(&params, 1234, ArtifactKind::DepthMap, 0, "", None),
            resolve_path(&params, 1234, ArtifactKind::DepthMap, 2, "", None),
            resolve_path(&params, 1234, ArtifactKind::SimilarityMap, 2, "", None),
            resolve_path(&params, 1234, ArtifactKind::DepthMap, 2, "_a", None),
            resolve_path(
                &params,
                1234,
                ArtifactKind::DepthMap,
                2,
                "",
                Some(TileOrigin::new(0, 0)),
            ),
            resolve_path(
                &params,
                1234,
                ArtifactKind::DepthMap,
                2,
                "",
                Some(TileOrigin::new(0, 64)),
            ),
        ];
        for (i, a) in paths.iter().enumerate() {
            for b in &paths[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_resolve_by_index() {
        let params = scene();
        let by_index =
            resolve_path_by_index(&params, 1, ArtifactKind::IntrinsicMatrix, 1, "", None).unwrap();
        let by_id = resolve_path(&params, 5678, ArtifactKind::IntrinsicMatrix, 1, "", None);
        assert_eq!(by_index, by_id);
    }

    #[test]
    fn test_resolve_by_index_out_of_range() {
        let params = scene();
        let err =
            resolve_path_by_index(&params, 9, ArtifactKind::IntrinsicMatrix, 1, "", None)
                .unwrap_err();
        match err {
            IndexError::OutOfRange { index, count } => {
                assert_eq!(index, 9);
                assert_eq!(count, 2);
            }
        }
    }

    #[test]
    fn test_open_artifact_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let params = scene_at(dir.path());
        std::fs::create_dir_all(&params.images_folder).unwrap();

        {
            let mut file = open_artifact(
                &params,
                1234,
                ArtifactKind::ProjectionMatrix,
                OpenMode::Write,
            )
            .unwrap();
            file.write_all(b"1 0 0 0\n0 1 0 0\n0 0 1 0\n").unwrap();
        }

        let mut file = open_artifact(
            &params,
            1234,
            ArtifactKind::ProjectionMatrix,
            OpenMode::Read,
        )
        .unwrap();
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        assert!(text.starts_with("1 0 0 0"));
    }

    #[test]
    fn test_open_missing_artifact_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let params = scene_at(dir.path());

        let err = open_artifact(&params, 1234, ArtifactKind::DepthMap, OpenMode::Read)
            .unwrap_err();
        let IoError::Open { path, .. } = err;
        assert_eq!(
            path,
            dir.path().join("depthMapsFiltered").join("1234_depthMap.exr")
        );
    }
}
