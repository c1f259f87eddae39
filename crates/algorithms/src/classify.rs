//! Flood-extent classification
//!
//! Flood rasters encode inundation as a red/orange overlay hue. The
//! classifier turns such a raster into a same-shaped boolean mask with a
//! per-pixel color-band test.

use crate::maybe_rayon::*;
use ndarray::Array2;
use surgemap_core::raster::{FloodMask, Raster, Rgb};
use surgemap_core::{Error, Result};

/// Color-band rule deciding whether a pixel counts as inundated.
///
/// Two rules circulate for the same overlay hue. `StrictBand` is the
/// canonical rule used for aggregation; `Loose` admits the wider band the
/// map-overlay renderer keys on. They disagree for pixels with g or b
/// outside [150, 200], so the choice is configuration, not a detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FloodRule {
    /// r > 200 and g, b both within [150, 200]
    #[default]
    StrictBand,
    /// r > 200 and g, b both below 200
    Loose,
}

impl FloodRule {
    /// Whether a single pixel matches the flood hue under this rule.
    pub fn is_flood(&self, px: Rgb) -> bool {
        match self {
            FloodRule::StrictBand => {
                px.r > 200 && (150..=200).contains(&px.g) && (150..=200).contains(&px.b)
            }
            FloodRule::Loose => px.r > 200 && px.g < 200 && px.b < 200,
        }
    }
}

impl std::str::FromStr for FloodRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(FloodRule::StrictBand),
            "loose" => Ok(FloodRule::Loose),
            other => Err(Error::InvalidConfiguration {
                name: "flood_rule",
                value: other.to_string(),
                reason: "expected 'strict' or 'loose'".to_string(),
            }),
        }
    }
}

/// Classify a flood raster into a binary inundation mask.
///
/// Pure transform: the input is not mutated and the output has the same
/// shape. Rows are classified independently, in parallel when the
/// `parallel` feature is on.
pub fn flood_mask(raster: &Raster<Rgb>, rule: FloodRule) -> Result<FloodMask> {
    let (rows, cols) = raster.shape();

    let data: Vec<bool> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![false; cols];
            for col in 0..cols {
                let px = unsafe { raster.get_unchecked(row, col) };
                row_data[col] = rule.is_flood(px);
            }
            row_data
        })
        .collect();

    let array = Array2::from_shape_vec((rows, cols), data)
        .map_err(|e| Error::Other(e.to_string()))?;

    Ok(FloodMask::from_array(array))
}
