//! Colorspace handling for loaded imagery.
//!
//! Exposure compensation is only radiometrically valid in linear space, so
//! the loader needs to know which space a decoded buffer is in and how to
//! move it to the caller's target space. Only the two spaces the pipeline
//! works in are modeled: scene-linear and sRGB (IEC 61966-2-1 transfer
//! curve). Conversion is per-channel and leaves alpha untouched.

use std::path::Path;

use image::{ImageBuffer, Pixel};

/// Colorspace of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Scene-linear values.
    Linear,
    /// sRGB-encoded values.
    Srgb,
}

impl ColorSpace {
    /// Colorspace a container format stores its samples in.
    ///
    /// High-dynamic-range containers carry linear samples; the common raster
    /// formats carry sRGB-encoded samples.
    pub fn of_container(path: &Path) -> ColorSpace {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("exr") | Some("hdr") => ColorSpace::Linear,
            _ => ColorSpace::Srgb,
        }
    }
}

/// sRGB transfer function applied to one linear channel value.
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Inverse sRGB transfer function applied to one encoded channel value.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a pixel buffer between colorspaces in place.
///
/// A no-op when `from == to`. Alpha channels are left untouched.
pub fn convert_in_place<P>(buffer: &mut ImageBuffer<P, Vec<f32>>, from: ColorSpace, to: ColorSpace)
where
    P: Pixel<Subpixel = f32>,
{
    match (from, to) {
        (ColorSpace::Linear, ColorSpace::Srgb) => {
            for pixel in buffer.pixels_mut() {
                pixel.apply_without_alpha(linear_to_srgb);
            }
        }
        (ColorSpace::Srgb, ColorSpace::Linear) => {
            for pixel in buffer.pixels_mut() {
                pixel.apply_without_alpha(srgb_to_linear);
            }
        }
        (ColorSpace::Linear, ColorSpace::Linear) | (ColorSpace::Srgb, ColorSpace::Srgb) => {}
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use image::{Rgb, Rgba};

    use super::*;

    #[test]
    fn test_container_colorspace() {
        assert_eq!(
            ColorSpace::of_container(Path::new("/x/1234_depthMap.exr")),
            ColorSpace::Linear
        );
        assert_eq!(
            ColorSpace::of_container(Path::new("/x/env.HDR")),
            ColorSpace::Linear
        );
        assert_eq!(
            ColorSpace::of_container(Path::new("/x/1234.png")),
            ColorSpace::Srgb
        );
        assert_eq!(
            ColorSpace::of_container(Path::new("/x/noext")),
            ColorSpace::Srgb
        );
    }

    #[test]
    fn test_transfer_function_reference_values() {
        assert!((linear_to_srgb(0.0)).abs() < 1e-6);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
        // Mid-grey reference point of the IEC 61966-2-1 curve.
        assert!((linear_to_srgb(0.5) - 0.735357).abs() < 1e-4);
        assert!((srgb_to_linear(0.5) - 0.214041).abs() < 1e-4);
    }

    #[test]
    fn test_transfer_round_trip() {
        for i in 0..=100 {
            let c = i as f32 / 100.0;
            assert!((srgb_to_linear(linear_to_srgb(c)) - c).abs() < 1e-5);
        }
    }

    #[test]
    fn test_convert_in_place_is_identity_for_same_space() {
        let mut buf = ImageBuffer::from_pixel(2, 2, Rgb([0.25f32, 0.5, 0.75]));
        let reference = buf.clone();
        convert_in_place(&mut buf, ColorSpace::Linear, ColorSpace::Linear);
        assert_eq!(buf, reference);
    }

    #[test]
    fn test_convert_preserves_alpha() {
        let mut buf = ImageBuffer::from_pixel(1, 1, Rgba([0.5f32, 0.5, 0.5, 0.25]));
        convert_in_place(&mut buf, ColorSpace::Linear, ColorSpace::Srgb);
        let px = buf.get_pixel(0, 0);
        assert!((px[0] - 0.735357).abs() < 1e-4);
        assert!((px[3] - 0.25).abs() < 1e-6);
    }
}
