//! Raster data structures and operations

mod grid;
mod pixel;

pub use grid::{FloodMask, Raster};
pub use pixel::{RasterElement, Rgb};
