//! I/O operations for reading rasters and writing overlays

mod loader;
mod png;

pub use loader::{DatasetKind, FileRasterLoader, RasterKey, RasterLoader};
pub use png::{read_rgb_png, write_mask_png};
