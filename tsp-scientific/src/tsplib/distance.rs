#[cfg(test)]
#[path = "../../tests/unit/tsplib/distance_test.rs"]
mod distance_test;

use std::str::FromStr;
use tsp_core::utils::{Float, GenericError};

/// Earth radius used by `GEO` distance.
const EARTH_RADIUS: Float = 6378.388;

/// Pi as truncated in TSPLIB95 reference implementation, required to reproduce known optimums.
const GEO_PI: Float = 3.141592;

/// Specifies how edge weights are derived from node coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeWeightType {
    /// Euclidean distance rounded to the nearest integer.
    Euc2D,
    /// Euclidean distance rounded up.
    Ceil2D,
    /// Pseudo-Euclidean distance.
    Att,
    /// Geographical distance, coordinates are `DDD.MM` degrees and minutes.
    Geo,
}

impl EdgeWeightType {
    /// Returns distance between two nodes.
    pub fn distance(&self, from: (Float, Float), to: (Float, Float)) -> Float {
        if from == to {
            return 0.;
        }

        let (dx, dy) = (from.0 - to.0, from.1 - to.1);

        match self {
            EdgeWeightType::Euc2D => (dx * dx + dy * dy).sqrt().round(),
            EdgeWeightType::Ceil2D => (dx * dx + dy * dy).sqrt().ceil(),
            EdgeWeightType::Att => {
                let distance = ((dx * dx + dy * dy) / 10.).sqrt();
                let rounded = distance.round();

                if rounded < distance { rounded + 1. } else { rounded }
            }
            EdgeWeightType::Geo => {
                let (lat_from, lon_from) = (to_radians(from.0), to_radians(from.1));
                let (lat_to, lon_to) = (to_radians(to.0), to_radians(to.1));

                let q1 = (lon_from - lon_to).cos();
                let q2 = (lat_from - lat_to).cos();
                let q3 = (lat_from + lat_to).cos();

                (EARTH_RADIUS * (0.5 * ((1. + q1) * q2 - (1. - q1) * q3)).clamp(-1., 1.).acos() + 1.).trunc()
            }
        }
    }
}

impl FromStr for EdgeWeightType {
    type Err = GenericError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "EUC_2D" => Ok(EdgeWeightType::Euc2D),
            "CEIL_2D" => Ok(EdgeWeightType::Ceil2D),
            "ATT" => Ok(EdgeWeightType::Att),
            "GEO" => Ok(EdgeWeightType::Geo),
            _ => Err(format!("unsupported EDGE_WEIGHT_TYPE: '{value}'").into()),
        }
    }
}

fn to_radians(value: Float) -> Float {
    let degrees = value.trunc();
    let minutes = value - degrees;

    GEO_PI * (degrees + 5. * minutes / 3.) / 180.
}
