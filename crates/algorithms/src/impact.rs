//! Affected-population aggregation
//!
//! Walks a population raster and a flood mask together, accumulating the
//! legend's population bounds over inundated pixels, and nets a target
//! sea level against a baseline to isolate the marginal impact.

use crate::classify::{flood_mask, FloodRule};
use crate::maybe_rayon::*;
use serde::Serialize;
use surgemap_core::io::{DatasetKind, RasterKey, RasterLoader};
use surgemap_core::legend::Legend;
use surgemap_core::raster::{FloodMask, Raster, Rgb};
use surgemap_core::{Error, Result};

/// Ground area of one pixel in km², from the source's 20/51 km sample
/// distance.
pub const DEFAULT_PIXEL_AREA_KM2: f64 = (20.0 / 51.0) * (20.0 / 51.0);

/// Population bounds and land area affected by one flood extent.
///
/// The population count is an interval because the legend maps each color
/// to a density band, not an exact count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ImpactResult {
    /// Lower bound on affected population
    pub population_min: u64,
    /// Upper bound on affected population
    pub population_max: u64,
    /// Inundated land area in km²
    pub area_km2: f64,
}

impl ImpactResult {
    pub const ZERO: Self = Self {
        population_min: 0,
        population_max: 0,
        area_km2: 0.0,
    };

    /// Element-wise difference, clamped at zero.
    ///
    /// With monotonic flood extents the target dominates the baseline and
    /// nothing is clamped; a clamp firing means the inputs are inconsistent.
    pub fn saturating_sub(&self, other: &Self) -> Self {
        Self {
            population_min: self.population_min.saturating_sub(other.population_min),
            population_max: self.population_max.saturating_sub(other.population_max),
            area_km2: (self.area_km2 - other.area_km2).max(0.0),
        }
    }
}

/// An [`ImpactResult`] with its per-pass diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub impact: ImpactResult,
    /// Number of pixels the flood mask marked inundated
    pub flooded_pixels: u64,
    /// Inundated pixels whose population color had no legend band.
    /// Counted, never fatal: source maps legitimately contain unclassified
    /// (e.g. anti-aliased) colors, and those pixels are excluded from the
    /// population sums.
    pub unmapped_pixels: u64,
}

/// Marginal impact of a target sea level over a baseline, with both
/// underlying evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginalImpact {
    /// target − baseline, element-wise
    pub impact: ImpactResult,
    pub target: Evaluation,
    pub baseline: Evaluation,
}

/// Per-row accumulator. Partial tallies merge by addition, so rows can be
/// processed in any order on any number of threads.
#[derive(Debug, Clone, Copy, Default)]
struct RowTally {
    flooded: u64,
    min_sum: u64,
    max_sum: u64,
    unmapped: u64,
}

impl RowTally {
    fn merge(self, other: Self) -> Self {
        Self {
            flooded: self.flooded + other.flooded,
            min_sum: self.min_sum + other.min_sum,
            max_sum: self.max_sum + other.max_sum,
            unmapped: self.unmapped + other.unmapped,
        }
    }
}

/// The impact computation, configured once at startup.
///
/// Owns the legend, the flood-classification rule and the pixel ground
/// area; immutable after construction.
#[derive(Debug, Clone)]
pub struct ImpactEngine {
    legend: Legend,
    rule: FloodRule,
    pixel_area_km2: f64,
}

impl Default for ImpactEngine {
    fn default() -> Self {
        Self {
            legend: Legend::population_density(),
            rule: FloodRule::default(),
            pixel_area_km2: DEFAULT_PIXEL_AREA_KM2,
        }
    }
}

impl ImpactEngine {
    /// Build an engine, validating the legend and the pixel area.
    pub fn new(legend: Legend, rule: FloodRule, pixel_area_km2: f64) -> Result<Self> {
        legend.validate()?;
        if !pixel_area_km2.is_finite() || pixel_area_km2 <= 0.0 {
            return Err(Error::InvalidConfiguration {
                name: "pixel_area_km2",
                value: pixel_area_km2.to_string(),
                reason: "pixel area must be a positive finite number".to_string(),
            });
        }
        Ok(Self {
            legend,
            rule,
            pixel_area_km2,
        })
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn rule(&self) -> FloodRule {
        self.rule
    }

    pub fn pixel_area_km2(&self) -> f64 {
        self.pixel_area_km2
    }

    /// Aggregate population bounds and area over the inundated pixels.
    ///
    /// Fails with [`Error::DimensionMismatch`] before touching any pixel if
    /// the raster and mask shapes differ; otherwise runs one row-parallel
    /// pass and merges the partial tallies by addition, so the result is
    /// independent of traversal order.
    pub fn evaluate(&self, population: &Raster<Rgb>, mask: &FloodMask) -> Result<Evaluation> {
        let (rows, cols) = population.shape();
        if mask.shape() != (rows, cols) {
            return Err(Error::DimensionMismatch {
                er: rows,
                ec: cols,
                ar: mask.rows(),
                ac: mask.cols(),
            });
        }

        let total = (0..rows)
            .into_par_iter()
            .map(|row| {
                let mut tally = RowTally::default();
                for col in 0..cols {
                    if !unsafe { mask.get_unchecked(row, col) } {
                        continue;
                    }
                    tally.flooded += 1;
                    let color = unsafe { population.get_unchecked(row, col) };
                    match self.legend.lookup(color) {
                        Some((min, max)) => {
                            tally.min_sum += min;
                            tally.max_sum += max;
                        }
                        None => tally.unmapped += 1,
                    }
                }
                tally
            })
            .collect::<Vec<_>>()
            .into_iter()
            .fold(RowTally::default(), RowTally::merge);

        Ok(Evaluation {
            impact: ImpactResult {
                population_min: total.min_sum,
                population_max: total.max_sum,
                area_km2: total.flooded as f64 * self.pixel_area_km2,
            },
            flooded_pixels: total.flooded,
            unmapped_pixels: total.unmapped,
        })
    }

    /// Classify a flood raster with the engine's rule, then evaluate it.
    pub fn assess(&self, population: &Raster<Rgb>, flood: &Raster<Rgb>) -> Result<Evaluation> {
        let mask = flood_mask(flood, self.rule)?;
        self.evaluate(population, &mask)
    }

    /// Impact of `target_level` over `baseline_level` for one year.
    ///
    /// Loads the year's population raster and both flood rasters through
    /// `loader`, assesses each flood extent against the same population
    /// raster and returns the element-wise difference. Loader failures
    /// propagate untouched; there are no retries and no partial results.
    /// The baseline is conventionally the zero-rise extent, but any level
    /// is accepted.
    pub fn marginal_impact(
        &self,
        loader: &dyn RasterLoader,
        year: i32,
        target_level: f64,
        baseline_level: f64,
    ) -> Result<MarginalImpact> {
        let population = loader.load(DatasetKind::Population, &RasterKey::Year(year))?;
        let target_flood = loader.load(DatasetKind::Flood, &RasterKey::SeaLevel(target_level))?;
        let baseline_flood =
            loader.load(DatasetKind::Flood, &RasterKey::SeaLevel(baseline_level))?;

        let target = self.assess(&population, &target_flood)?;
        let baseline = self.assess(&population, &baseline_flood)?;

        Ok(MarginalImpact {
            impact: target.impact.saturating_sub(&baseline.impact),
            target,
            baseline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_area(pixel_area_km2: f64) -> ImpactEngine {
        ImpactEngine::new(
            Legend::population_density(),
            FloodRule::StrictBand,
            pixel_area_km2,
        )
        .unwrap()
    }

    #[test]
    fn test_all_false_mask_is_zero() {
        let engine = ImpactEngine::default();
        let population = Raster::filled(4, 4, Rgb::new(255, 0, 0));
        let mask = FloodMask::filled(4, 4, false);

        let eval = engine.evaluate(&population, &mask).unwrap();
        assert_eq!(eval.impact, ImpactResult::ZERO);
        assert_eq!(eval.flooded_pixels, 0);
        assert_eq!(eval.unmapped_pixels, 0);
    }

    #[test]
    fn test_uniform_all_true_mask() {
        // 3x5 raster of the (26, 50) band, fully inundated
        let engine = engine_with_area(0.25);
        let population = Raster::filled(3, 5, Rgb::new(255, 255, 0));
        let mask = FloodMask::filled(3, 5, true);

        let eval = engine.evaluate(&population, &mask).unwrap();
        assert_eq!(eval.impact.population_min, 15 * 26);
        assert_eq!(eval.impact.population_max, 15 * 50);
        assert!((eval.impact.area_km2 - 15.0 * 0.25).abs() < 1e-12);
        assert_eq!(eval.flooded_pixels, 15);
    }

    #[test]
    fn test_two_by_two_scenario() {
        let engine = engine_with_area(0.1537);
        let population = Raster::from_vec(
            vec![
                Rgb::new(255, 255, 190),
                Rgb::new(255, 255, 190),
                Rgb::BLACK,
                Rgb::BLACK,
            ],
            2,
            2,
        )
        .unwrap();
        let mask = FloodMask::from_vec(vec![true, false, false, true], 2, 2).unwrap();

        let eval = engine.evaluate(&population, &mask).unwrap();
        assert_eq!(eval.impact.population_min, 1);
        assert_eq!(eval.impact.population_max, 5);
        assert!((eval.impact.area_km2 - 0.3074).abs() < 1e-9);
        assert_eq!(eval.flooded_pixels, 2);
        assert_eq!(eval.unmapped_pixels, 0);
    }

    #[test]
    fn test_unmapped_pixels_counted_not_summed() {
        let engine = engine_with_area(1.0);
        // One band pixel, one anti-aliased off-legend pixel
        let population = Raster::from_vec(
            vec![Rgb::new(255, 255, 190), Rgb::new(254, 254, 189)],
            1,
            2,
        )
        .unwrap();
        let mask = FloodMask::filled(1, 2, true);

        let eval = engine.evaluate(&population, &mask).unwrap();
        assert_eq!(eval.impact.population_min, 1);
        assert_eq!(eval.impact.population_max, 5);
        // the unmapped pixel still counts toward flooded area
        assert!((eval.impact.area_km2 - 2.0).abs() < 1e-12);
        assert_eq!(eval.unmapped_pixels, 1);
    }

    #[test]
    fn test_dimension_mismatch() {
        let engine = ImpactEngine::default();
        let population = Raster::filled(2, 2, Rgb::BLACK);
        let mask = FloodMask::filled(2, 3, true);

        let result = engine.evaluate(&population, &mask);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_non_positive_pixel_area_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result =
                ImpactEngine::new(Legend::population_density(), FloodRule::StrictBand, bad);
            assert!(matches!(
                result,
                Err(Error::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let small = ImpactResult {
            population_min: 1,
            population_max: 5,
            area_km2: 0.5,
        };
        let large = ImpactResult {
            population_min: 10,
            population_max: 20,
            area_km2: 2.0,
        };

        let diff = large.saturating_sub(&small);
        assert_eq!(diff.population_min, 9);
        assert_eq!(diff.population_max, 15);
        assert!((diff.area_km2 - 1.5).abs() < 1e-12);

        let clamped = small.saturating_sub(&large);
        assert_eq!(clamped, ImpactResult::ZERO);
    }

    #[test]
    fn test_default_pixel_area_constant() {
        assert!((DEFAULT_PIXEL_AREA_KM2 - 0.1537).abs() < 1e-4);
    }
}
