//! The artifact registry: kind → (folder, suffix, extension).
//!
//! Every intermediate file a pipeline stage produces or consumes belongs to
//! exactly one [`ArtifactKind`]. The registry is a fixed lookup from kind
//! (and, for a handful of kinds, the processing scale) to a folder class, a
//! filename suffix and a file extension. The suffix and extension strings
//! are load-bearing: stages written independently must agree on them
//! byte-for-byte to address the same artifact.
//!
//! The lookup is a total, exhaustive match over a closed enum. An artifact
//! kind without a rule cannot be expressed; adding a variant without
//! extending the table is a compile error.

// =============================================================================
// StorageFolder
// =============================================================================

/// Folder class an artifact is stored under.
///
/// Folder selection depends only on (kind, scale), never on view identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageFolder {
    /// Base images folder; the default for most kinds.
    Images,
    /// Raw depth-estimation outputs.
    DepthMaps,
    /// Filtered depth-estimation outputs.
    DepthMapsFiltered,
}

// =============================================================================
// ArtifactKind
// =============================================================================

/// Closed enumeration of every per-view artifact the pipeline addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Camera projection matrix P (plain text, 3x4).
    ProjectionMatrix,
    /// Camera intrinsic matrix K.
    IntrinsicMatrix,
    /// Inverse intrinsic matrix.
    InverseIntrinsicMatrix,
    /// Camera rotation matrix R.
    RotationMatrix,
    /// Inverse rotation matrix.
    InverseRotationMatrix,
    /// Camera center C.
    CameraCenter,
    /// Inverse projection matrix.
    InverseProjectionMatrix,
    /// Distortion coefficients D.
    DistortionCoefficients,
    /// Harris corner features.
    HarrisFeatures,
    /// Prematched feature set.
    PrematchedFeatures,
    /// Grown feature set.
    GrownFeatures,
    /// Per-pixel occupancy map.
    OccupancyMap,
    /// Near-geometry map.
    NearMap,
    /// Oriented points.
    OrientedPoints,
    /// Watershed segmentation.
    Watershed,
    /// Binary image cache.
    ImageCache,
    /// Transposed binary image cache.
    ImageCacheTransposed,
    /// Graph-cut label map.
    GraphCutMap,
    /// Graph-cut point set.
    GraphCutPoints,
    /// Grown label map.
    GrownMap,
    /// Agreed label map.
    AgreedMap,
    /// Agreed point set.
    AgreedPoints,
    /// Refined label map.
    RefinedMap,
    /// Seeds imported from structure-from-motion.
    SfmSeeds,
    /// Radial distortion model.
    RadialDistortion,
    /// Graph-cut surface mesh.
    GraphCutMesh,
    /// Agreed surface mesh.
    AgreedMesh,
    /// Nearest agreed label map.
    NearestAgreedMap,
    /// Segmented plane set.
    SegmentedPlanes,
    /// Agreed visibility map.
    AgreedVisibilityMap,
    /// Disk-size map.
    DiskSizeMap,
    /// Per-view depth map (raw when scaled, filtered at scale 0).
    DepthMap,
    /// Per-view normal map; always a filtered output.
    NormalMap,
    /// Per-view similarity map (raw when scaled, filtered at scale 0).
    SimilarityMap,
    /// Denoised-normal modification mask; always a filtered output.
    NmodMask,
    /// Temporary map points scratch file.
    TmpMapPoints,
    /// Temporary map point similarities scratch file.
    TmpMapPointSims,
    /// Camera visibility map.
    CameraMap,
    /// Volumetric export.
    Volume,
    /// Cross-section variant of the volumetric export.
    VolumeCross,
    /// Nine-point per-view statistics.
    Stats9Points,
    /// Tile-pattern debug mesh.
    TilePattern,
}

/// Resolved storage rule for one (kind, scale) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSpec {
    /// Folder class the artifact lives in.
    pub folder: StorageFolder,
    /// Filename suffix, appended directly after the view id.
    pub suffix: &'static str,
    /// File extension, without the dot.
    pub extension: &'static str,
}

impl FileSpec {
    const fn new(folder: StorageFolder, suffix: &'static str, extension: &'static str) -> Self {
        FileSpec {
            folder,
            suffix,
            extension,
        }
    }
}

impl ArtifactKind {
    /// Look up the storage rule for this kind at a given processing scale.
    ///
    /// Scale only participates in folder selection for the depth and
    /// similarity maps, where scale 0 designates the filtered output and any
    /// other scale the raw output. Scale suffixing of the filename is
    /// handled by the path resolver, independently of this lookup.
    pub const fn file_spec(self, scale: u32) -> FileSpec {
        use ArtifactKind::*;
        use StorageFolder::*;

        match self {
            ProjectionMatrix => FileSpec::new(Images, "_P", "txt"),
            IntrinsicMatrix => FileSpec::new(Images, "_K", "txt"),
            InverseIntrinsicMatrix => FileSpec::new(Images, "_iK", "txt"),
            RotationMatrix => FileSpec::new(Images, "_R", "txt"),
            InverseRotationMatrix => FileSpec::new(Images, "_iR", "txt"),
            CameraCenter => FileSpec::new(Images, "_C", "txt"),
            InverseProjectionMatrix => FileSpec::new(Images, "_iP", "txt"),
            DistortionCoefficients => FileSpec::new(Images, "_D", "txt"),
            HarrisFeatures => FileSpec::new(Images, "_har", "bin"),
            PrematchedFeatures => FileSpec::new(Images, "_prematched", "bin"),
            GrownFeatures => FileSpec::new(Images, "_growed", "bin"),
            OccupancyMap => FileSpec::new(Images, "_occMap", "bin"),
            NearMap => FileSpec::new(Images, "_nearMap", "bin"),
            OrientedPoints => FileSpec::new(Images, "_op", "bin"),
            Watershed => FileSpec::new(Images, "_wshed", "bin"),
            ImageCache => FileSpec::new(Images, "_img", "bin"),
            ImageCacheTransposed => FileSpec::new(Images, "_imgT", "bin"),
            GraphCutMap => FileSpec::new(Images, "_graphCutMap", "bin"),
            GraphCutPoints => FileSpec::new(Images, "_graphCutPts", "bin"),
            GrownMap => FileSpec::new(Images, "_growedMap", "bin"),
            AgreedMap => FileSpec::new(Images, "_agreedMap", "bin"),
            AgreedPoints => FileSpec::new(Images, "_agreedPts", "bin"),
            RefinedMap => FileSpec::new(Images, "_refinedMap", "bin"),
            SfmSeeds => FileSpec::new(Images, "_seeds_sfm", "bin"),
            RadialDistortion => FileSpec::new(Images, "_rd", "bin"),
            GraphCutMesh => FileSpec::new(Images, "_graphCutMesh", "bin"),
            AgreedMesh => FileSpec::new(Images, "_agreedMesh", "bin"),
            NearestAgreedMap => FileSpec::new(Images, "_nearestAgreedMap", "bin"),
            SegmentedPlanes => FileSpec::new(Images, "_segPlanes", "bin"),
            AgreedVisibilityMap => FileSpec::new(Images, "_agreedVisMap", "bin"),
            DiskSizeMap => FileSpec::new(Images, "_diskSizeMap", "bin"),
            DepthMap => {
                if scale == 0 {
                    FileSpec::new(DepthMapsFiltered, "_depthMap", "exr")
                } else {
                    FileSpec::new(DepthMaps, "_depthMap", "exr")
                }
            }
            NormalMap => FileSpec::new(DepthMapsFiltered, "_normalMap", "exr"),
            SimilarityMap => {
                if scale == 0 {
                    FileSpec::new(DepthMapsFiltered, "_simMap", "exr")
                } else {
                    FileSpec::new(DepthMaps, "_simMap", "exr")
                }
            }
            NmodMask => FileSpec::new(DepthMapsFiltered, "_nmodMap", "png"),
            TmpMapPoints => FileSpec::new(Images, "_mapPts", "tmp"),
            TmpMapPointSims => FileSpec::new(Images, "_mapPtsSims", "tmp"),
            CameraMap => FileSpec::new(Images, "_camMap", "bin"),
            Volume => FileSpec::new(DepthMaps, "_volume", "abc"),
            VolumeCross => FileSpec::new(DepthMaps, "_volume-cross", "abc"),
            Stats9Points => FileSpec::new(DepthMaps, "_9p", "csv"),
            TilePattern => FileSpec::new(DepthMaps, "_tilePattern", "obj"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
