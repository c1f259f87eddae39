//! RGB pixel type and the raster element trait

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// An 8-bit-per-channel RGB pixel.
///
/// Both population-density and flood-extent rasters encode their payload as
/// color, so this is the cell type of every loaded raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black, the "no data" color of the population choropleth.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Trait for types that can be stored in a raster cell.
///
/// Implemented for [`Rgb`] (loaded imagery) and `bool` (derived flood masks).
pub trait RasterElement:
    Copy + Clone + Debug + Default + PartialEq + Send + Sync + 'static
{
}

impl RasterElement for Rgb {}
impl RasterElement for bool {}
impl RasterElement for u8 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_default() {
        assert_eq!(Rgb::default(), Rgb::BLACK);
    }

    #[test]
    fn test_from_array() {
        let px: Rgb = [255, 170, 0].into();
        assert_eq!(px, Rgb::new(255, 170, 0));
    }
}
