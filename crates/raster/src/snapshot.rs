//! PNG snapshots of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so a WASM build can depend on this
//! crate without pulling in the `image` crate.

use point_field_core::FieldError;
use std::path::Path;

use crate::Raster;

/// Writes the raster as an RGBA8 PNG.
///
/// Returns `FieldError::InvalidDimensions` if the raster dimensions overflow
/// `u32`, or `FieldError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), FieldError> {
    let w = u32::try_from(raster.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.as_rgba().to_vec())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?;
    log::debug!("wrote {w}x{h} snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use point_field_core::{Rgb, Surface};

    #[test]
    fn write_png_round_trip() {
        let mut raster = Raster::new(16, 12, Rgb::new(3, 4, 5)).unwrap();
        raster
            .fill_circle(DVec2::new(8.0, 6.0), 2.0, Rgb::new(250, 0, 0), 1.0)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.png");

        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (16, 12));
        assert_eq!(img.get_pixel(0, 0).0, [3, 4, 5, 255]);
        assert_eq!(img.get_pixel(8, 6).0, [250, 0, 0, 255]);
    }

    #[test]
    fn write_png_into_missing_directory_is_an_io_error() {
        let raster = Raster::new(2, 2, Rgb::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("field.png");
        assert!(matches!(write_png(&raster, &path), Err(FieldError::Io(_))));
    }
}
