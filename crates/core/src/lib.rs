//! # Surgemap Core
//!
//! Core types and I/O for the surgemap sea-level impact library.
//!
//! This crate provides:
//! - `Raster<T>`: 2D raster grid over RGB pixels or mask booleans
//! - `Legend`: the fixed color-to-population-range table
//! - `RasterLoader`: the collaborator that supplies rasters by kind and key
//! - Error taxonomy shared by the whole workspace

pub mod error;
pub mod io;
pub mod legend;
pub mod raster;

pub use error::{Error, Result};
pub use legend::{Legend, LegendEntry};
pub use raster::{FloodMask, Raster, RasterElement, Rgb};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::io::{DatasetKind, FileRasterLoader, RasterKey, RasterLoader};
    pub use crate::legend::{Legend, LegendEntry};
    pub use crate::raster::{FloodMask, Raster, RasterElement, Rgb};
}
