//! Embedded image metadata: the exposure-compensation tag.
//!
//! The scene-preparation stage stores a per-view exposure-compensation
//! scalar as a named float attribute in the OpenEXR header of the prepared
//! image. The decoding crate does not surface arbitrary header attributes,
//! so the attribute list is scanned directly; the layout is simple enough
//! to walk without a full EXR reader.
//!
//! # OpenEXR header layout
//!
//! ```text
//! Bytes 0-3: Magic number (0x76 0x2F 0x31 0x01)
//! Bytes 4-7: Version field (little-endian; low byte is the format version)
//! Then a sequence of attributes, each:
//!   - name: null-terminated string
//!   - type: null-terminated string (e.g. "float", "chlist", "box2i")
//!   - size: i32, little-endian, byte length of the value
//!   - value: <size> bytes
//! The sequence ends with a single null byte in place of a name.
//! ```
//!
//! A "float" attribute stores a single little-endian f32.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::error::LoadError;

/// Name of the EXR float attribute holding the exposure-compensation scalar.
pub const EXPOSURE_COMPENSATION_ATTRIBUTE: &str = "evCompensation";

/// OpenEXR magic number.
const EXR_MAGIC: [u8; 4] = [0x76, 0x2F, 0x31, 0x01];

/// EXR attribute type name for a single float.
const FLOAT_TYPE: &[u8] = b"float";

/// Longest attribute name or type name accepted while scanning.
const MAX_NAME_LEN: usize = 256;

/// Largest attribute value accepted while scanning. Preview attributes can
/// be large, but anything beyond this indicates a corrupt header.
const MAX_ATTRIBUTE_SIZE: i32 = 64 * 1024 * 1024;

// =============================================================================
// MetadataReader
// =============================================================================

/// Source of the per-image exposure-compensation scalar.
///
/// The loader goes through this seam so tests can substitute a stub; the
/// production implementation is [`ExrMetadata`].
pub trait MetadataReader {
    /// Read the exposure-compensation scalar embedded in an image.
    ///
    /// Returns `Ok(None)` when the image carries no such tag, which the
    /// loader treats as a neutral multiplier plus a diagnostic warning.
    fn exposure_compensation(&self, path: &Path) -> Result<Option<f32>, LoadError>;
}

/// Reads the exposure-compensation attribute from OpenEXR headers.
///
/// Non-EXR payloads (checked by magic number, not extension) have no
/// embedded tag and yield `Ok(None)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExrMetadata;

impl MetadataReader for ExrMetadata {
    fn exposure_compensation(&self, path: &Path) -> Result<Option<f32>, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        scan_float_attribute(&mut reader, EXPOSURE_COMPENSATION_ATTRIBUTE, path)
    }
}

/// Walk the attribute list of an EXR header looking for a float attribute.
fn scan_float_attribute<R: Read + Seek>(
    reader: &mut R,
    name: &str,
    path: &Path,
) -> Result<Option<f32>, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: path.to_owned(),
        source,
    };
    let malformed = |message: &str| LoadError::Metadata {
        path: path.to_owned(),
        message: message.to_string(),
    };

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(io_err)?;
    if magic != EXR_MAGIC {
        // Not an EXR container; nothing to scan.
        return Ok(None);
    }

    let mut version = [0u8; 4];
    reader.read_exact(&mut version).map_err(io_err)?;

    loop {
        let attr_name = match read_null_terminated(reader, path)? {
            // A null byte in name position terminates the header.
            name if name.is_empty() => return Ok(None),
            name => name,
        };
        let attr_type = read_null_terminated(reader, path)?;
        if attr_type.is_empty() {
            return Err(malformed("attribute with empty type name"));
        }

        let mut size_bytes = [0u8; 4];
        reader.read_exact(&mut size_bytes).map_err(io_err)?;
        let size = i32::from_le_bytes(size_bytes);
        if !(0..=MAX_ATTRIBUTE_SIZE).contains(&size) {
            return Err(malformed("attribute size out of range"));
        }

        if attr_name == name.as_bytes() && attr_type == FLOAT_TYPE {
            if size != 4 {
                return Err(malformed("float attribute with non-4-byte value"));
            }
            let mut value = [0u8; 4];
            reader.read_exact(&mut value).map_err(io_err)?;
            return Ok(Some(f32::from_le_bytes(value)));
        }

        reader
            .seek(std::io::SeekFrom::Current(size as i64))
            .map_err(io_err)?;
    }
}

/// Read a null-terminated byte string, excluding the terminator.
fn read_null_terminated<R: Read>(reader: &mut R, path: &Path) -> Result<Vec<u8>, LoadError> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        reader.read_exact(&mut byte).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        if byte[0] == 0 {
            return Ok(bytes);
        }
        bytes.push(byte[0]);
        if bytes.len() > MAX_NAME_LEN {
            return Err(LoadError::Metadata {
                path: path.to_owned(),
                message: "unterminated attribute name".to_string(),
            });
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
