//! Raster loading collaborator
//!
//! The impact pipeline never touches the filesystem directly; it asks a
//! [`RasterLoader`] for rasters by dataset kind and key. The file-backed
//! implementation follows the source archive's naming scheme.

use crate::error::{Error, Result};
use crate::io::png::read_rgb_png;
use crate::raster::{Raster, Rgb};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which dataset a raster belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Population-density choropleth for a given year
    Population,
    /// Flood extent for a given sea-level rise
    Flood,
}

/// Identifies one raster within a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RasterKey {
    /// Population rasters are keyed by year
    Year(i32),
    /// Flood rasters are keyed by sea-level rise in metres
    SeaLevel(f64),
}

impl fmt::Display for RasterKey {
    /// Sea levels render to one decimal place with a metre suffix, e.g.
    /// `1.3m`, matching the flood archive's file names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterKey::Year(year) => write!(f, "{}", year),
            RasterKey::SeaLevel(metres) => write!(f, "{:.1}m", metres),
        }
    }
}

/// Loads rasters for the impact pipeline.
///
/// Implementations must fail with [`Error::ResourceUnavailable`] when the
/// backing resource is absent or undecodable; the pipeline performs no
/// retries or partial recovery.
pub trait RasterLoader {
    fn load(&self, kind: DatasetKind, key: &RasterKey) -> Result<Raster<Rgb>>;
}

/// File-backed loader over two directories of pre-rendered PNGs.
///
/// Population rasters live at `<population_dir>/final_population_map<year>.png`
/// and flood rasters at `<flood_dir>/<level>m.png`.
#[derive(Debug, Clone)]
pub struct FileRasterLoader {
    population_dir: PathBuf,
    flood_dir: PathBuf,
}

impl FileRasterLoader {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(population_dir: P, flood_dir: Q) -> Self {
        Self {
            population_dir: population_dir.as_ref().to_path_buf(),
            flood_dir: flood_dir.as_ref().to_path_buf(),
        }
    }

    /// Resolve the path a (kind, key) pair maps to.
    pub fn path_for(&self, kind: DatasetKind, key: &RasterKey) -> PathBuf {
        match kind {
            DatasetKind::Population => self
                .population_dir
                .join(format!("final_population_map{}.png", key)),
            DatasetKind::Flood => self.flood_dir.join(format!("{}.png", key)),
        }
    }
}

impl RasterLoader for FileRasterLoader {
    fn load(&self, kind: DatasetKind, key: &RasterKey) -> Result<Raster<Rgb>> {
        let path = self.path_for(kind, key);
        if !path.is_file() {
            return Err(Error::ResourceUnavailable {
                path,
                reason: "no such file".to_string(),
            });
        }
        read_rgb_png(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formatting() {
        assert_eq!(RasterKey::Year(2050).to_string(), "2050");
        assert_eq!(RasterKey::SeaLevel(1.3).to_string(), "1.3m");
        assert_eq!(RasterKey::SeaLevel(0.0).to_string(), "0.0m");
        assert_eq!(RasterKey::SeaLevel(10.0).to_string(), "10.0m");
    }

    #[test]
    fn test_path_layout() {
        let loader = FileRasterLoader::new("Populations", "Resized");
        assert_eq!(
            loader.path_for(DatasetKind::Population, &RasterKey::Year(2050)),
            PathBuf::from("Populations/final_population_map2050.png")
        );
        assert_eq!(
            loader.path_for(DatasetKind::Flood, &RasterKey::SeaLevel(2.5)),
            PathBuf::from("Resized/2.5m.png")
        );
    }

    #[test]
    fn test_missing_file_is_resource_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileRasterLoader::new(dir.path(), dir.path());
        let result = loader.load(DatasetKind::Flood, &RasterKey::SeaLevel(1.0));
        assert!(matches!(
            result,
            Err(Error::ResourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.5m.png");
        let mut img = image::RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([230, 170, 170]));
        img.save(&path).unwrap();

        let loader = FileRasterLoader::new(dir.path(), dir.path());
        let raster = loader
            .load(DatasetKind::Flood, &RasterKey::SeaLevel(0.5))
            .unwrap();
        assert_eq!(raster.shape(), (2, 2));
        assert_eq!(raster.get(0, 0).unwrap(), Rgb::new(230, 170, 170));
    }
}
