//! Population-density legend
//!
//! The population raster is a choropleth: each pixel color stands for a
//! closed population-count interval taken from the map key. The legend is an
//! immutable ordered table so the bands cannot drift at runtime.

use crate::error::{Error, Result};
use crate::raster::Rgb;
use serde::{Deserialize, Serialize};

/// One legend band: a color mapped to a closed population interval [min, max].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color: Rgb,
    pub min: u64,
    pub max: u64,
}

impl LegendEntry {
    pub const fn new(color: Rgb, min: u64, max: u64) -> Self {
        Self { color, min, max }
    }
}

/// The fixed color-to-population-range lookup table.
///
/// Ordered and immutable after construction. Colors not present in the table
/// are unmapped; callers count them as a diagnostic rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

/// The population-density bands of the source choropleth key.
///
/// The top band is capped at 11 218 people per cell, the most densely
/// populated census area in the UK; black is the "no data" color.
const POPULATION_DENSITY_BANDS: [LegendEntry; 9] = [
    LegendEntry::new(Rgb::new(255, 255, 190), 1, 5),
    LegendEntry::new(Rgb::new(255, 255, 115), 6, 25),
    LegendEntry::new(Rgb::new(255, 255, 0), 26, 50),
    LegendEntry::new(Rgb::new(255, 170, 0), 51, 100),
    LegendEntry::new(Rgb::new(255, 102, 0), 101, 500),
    LegendEntry::new(Rgb::new(255, 0, 0), 501, 2500),
    LegendEntry::new(Rgb::new(204, 0, 0), 2501, 5000),
    LegendEntry::new(Rgb::new(115, 0, 0), 5001, 11218),
    LegendEntry::new(Rgb::BLACK, 0, 0),
];

impl Legend {
    /// Build a legend from explicit entries, validating every interval.
    pub fn from_entries(entries: Vec<LegendEntry>) -> Result<Self> {
        let legend = Self { entries };
        legend.validate()?;
        Ok(legend)
    }

    /// The built-in population-density legend.
    pub fn population_density() -> Self {
        Self {
            entries: POPULATION_DENSITY_BANDS.to_vec(),
        }
    }

    /// Check that every interval satisfies min <= max.
    pub fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            if entry.min > entry.max {
                return Err(Error::InvalidConfiguration {
                    name: "legend",
                    value: format!("{} -> [{}, {}]", entry.color, entry.min, entry.max),
                    reason: "inverted interval (min > max)".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Look up the population interval for a pixel color.
    ///
    /// Returns `None` for colors with no band. The table holds under a dozen
    /// entries, so a linear scan beats hashing per pixel.
    pub fn lookup(&self, color: Rgb) -> Option<(u64, u64)> {
        self.entries
            .iter()
            .find(|e| e.color == color)
            .map(|e| (e.min, e.max))
    }

    /// The legend bands in order.
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }
}
