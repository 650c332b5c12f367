//! Artifact addressing: the kind registry and the path resolver.

mod kind;
mod path;

pub use kind::{ArtifactKind, FileSpec, StorageFolder};
pub use path::{open_artifact, resolve_path, resolve_path_by_index, OpenMode, TileOrigin};
