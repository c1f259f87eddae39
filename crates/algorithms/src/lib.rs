//! # Surgemap Algorithms
//!
//! Flood classification and affected-population aggregation.
//!
//! ## Pipeline
//!
//! - **classify**: flood raster -> binary inundation mask (color-band rule)
//! - **impact**: population raster + mask -> population bounds and area,
//!   plus target-over-baseline marginal differencing

pub mod classify;
pub mod impact;
mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classify::{flood_mask, FloodRule};
    pub use crate::impact::{
        Evaluation, ImpactEngine, ImpactResult, MarginalImpact, DEFAULT_PIXEL_AREA_KM2,
    };
    pub use surgemap_core::prelude::*;
}
