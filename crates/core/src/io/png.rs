//! PNG raster reading/writing
//!
//! Uses the `image` crate. Source rasters are pre-rendered PNG choropleths;
//! whatever the stored color type, pixels are converted to 8-bit RGB before
//! core code ever sees them.

use crate::error::{Error, Result};
use crate::raster::{FloodMask, Raster, Rgb};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Read a PNG file into an RGB raster.
///
/// Any decodable color type is converted to 8-bit RGB. A missing or
/// undecodable file fails with [`Error::ResourceUnavailable`].
pub fn read_rgb_png<P: AsRef<Path>>(path: P) -> Result<Raster<Rgb>> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| Error::ResourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let data: Vec<Rgb> = rgb
        .pixels()
        .map(|p| Rgb::new(p[0], p[1], p[2]))
        .collect();

    Raster::from_vec(data, height as usize, width as usize)
}

/// Write a flood mask as an RGBA PNG overlay.
///
/// Inundated pixels become `color` at full opacity, everything else is fully
/// transparent, so the output can sit on top of a base map.
pub fn write_mask_png<P: AsRef<Path>>(mask: &FloodMask, color: Rgb, path: P) -> Result<()> {
    let path = path.as_ref();
    let (rows, cols) = mask.shape();

    let mut out = RgbaImage::new(cols as u32, rows as u32);
    for ((row, col), &flooded) in mask.data().indexed_iter() {
        let px = if flooded {
            Rgba([color.r, color.g, color.b, 255])
        } else {
            Rgba([0, 0, 0, 0])
        };
        out.put_pixel(col as u32, row as u32, px);
    }

    out.save(path).map_err(|e| Error::ResourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_read_rgb_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");

        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 0, image::Rgb([255, 255, 190]));
        img.put_pixel(2, 1, image::Rgb([204, 0, 0]));
        img.save(&path).unwrap();

        let raster = read_rgb_png(&path).unwrap();
        assert_eq!(raster.shape(), (2, 3));
        assert_eq!(raster.get(0, 0).unwrap(), Rgb::new(255, 255, 190));
        assert_eq!(raster.get(1, 2).unwrap(), Rgb::new(204, 0, 0));
        assert_eq!(raster.get(0, 1).unwrap(), Rgb::BLACK);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_rgb_png("/nonexistent/raster.png");
        assert!(matches!(
            result,
            Err(Error::ResourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_write_mask_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");

        let mask = FloodMask::from_vec(vec![true, false, false, true], 2, 2).unwrap();
        write_mask_png(&mask, Rgb::new(255, 0, 0), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0[3], 0);
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }
}
