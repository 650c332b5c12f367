//! Plain-text calibration matrices.
//!
//! Camera calibration artifacts (projection, intrinsics, rotation and their
//! inverses) are stored as 3 rows of 4 whitespace-separated floating-point
//! values, row-major. This is the one payload format this layer parses
//! beyond image decoding, because every stage needs the matrices next to
//! the addressing scheme.

use std::io::Read;

use crate::artifact::{open_artifact, ArtifactKind, OpenMode};
use crate::error::CalibrationError;
use crate::scene::SceneParams;

/// A row-major 3x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x4 {
    /// Rows in storage order.
    pub rows: [[f32; 4]; 3],
}

impl Matrix3x4 {
    /// Element at (row, col).
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.rows[row][col]
    }
}

/// Parse a 3x4 matrix from a plain-text stream.
///
/// Reads the first 12 whitespace-separated values; trailing content is
/// ignored, matching the tolerant readers used across pipeline stages.
pub fn read_matrix_3x4<R: Read>(reader: &mut R) -> Result<Matrix3x4, CalibrationError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut values = [0.0f32; 12];
    let mut count = 0;
    for token in text.split_whitespace() {
        if count == values.len() {
            break;
        }
        values[count] = token
            .parse()
            .map_err(|source| CalibrationError::Parse {
                value: token.to_string(),
                source,
            })?;
        count += 1;
    }
    if count < values.len() {
        return Err(CalibrationError::Truncated { count });
    }

    Ok(Matrix3x4 {
        rows: [
            [values[0], values[1], values[2], values[3]],
            [values[4], values[5], values[6], values[7]],
            [values[8], values[9], values[10], values[11]],
        ],
    })
}

/// Open a view's calibration artifact and parse its matrix.
pub fn load_matrix_3x4(
    params: &SceneParams,
    view_id: u32,
    kind: ArtifactKind,
) -> Result<Matrix3x4, CalibrationError> {
    let mut file = open_artifact(params, view_id, kind, OpenMode::Read)?;
    read_matrix_3x4(&mut file)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_reads_row_major() {
        let text = "1 2 3 4\n5 6 7 8\n9 10 11 12\n";
        let m = read_matrix_3x4(&mut Cursor::new(text)).unwrap();
        assert_eq!(m.at(0, 0), 1.0);
        assert_eq!(m.at(0, 3), 4.0);
        assert_eq!(m.at(1, 0), 5.0);
        assert_eq!(m.at(2, 3), 12.0);
    }

    #[test]
    fn test_whitespace_layout_is_free_form() {
        let text = "1 2 3 4 5 6 7 8 9 10 11 12";
        let m = read_matrix_3x4(&mut Cursor::new(text)).unwrap();
        assert_eq!(m.at(2, 3), 12.0);
    }

    #[test]
    fn test_trailing_content_is_ignored() {
        let text = "1 2 3 4\n5 6 7 8\n9 10 11 12\nextra garbage";
        assert!(read_matrix_3x4(&mut Cursor::new(text)).is_ok());
    }

    #[test]
    fn test_truncated_matrix() {
        let text = "1 2 3 4\n5 6 7 8\n";
        let err = read_matrix_3x4(&mut Cursor::new(text)).unwrap_err();
        match err {
            CalibrationError::Truncated { count } => assert_eq!(count, 8),
            other => panic!("expected Truncated, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_token() {
        let text = "1 2 3 4\n5 six 7 8\n9 10 11 12\n";
        let err = read_matrix_3x4(&mut Cursor::new(text)).unwrap_err();
        match err {
            CalibrationError::Parse { value, .. } => assert_eq!(value, "six"),
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
