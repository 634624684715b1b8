//! Built-in sample instances.

use super::cost::CostMatrix;
use crate::error::Result;

/// Adjacency data of the seven-city road sample; `0` marks a missing road.
pub const SEVEN_CITIES: [[f64; 7]; 7] = [
    [0.0, 12.0, 10.0, 0.0, 0.0, 0.0, 12.0],
    [12.0, 0.0, 8.0, 11.0, 0.0, 0.0, 0.0],
    [10.0, 8.0, 0.0, 8.0, 3.0, 0.0, 9.0],
    [0.0, 11.0, 8.0, 0.0, 11.0, 10.0, 0.0],
    [0.0, 0.0, 3.0, 11.0, 0.0, 6.0, 7.0],
    [0.0, 0.0, 0.0, 10.0, 6.0, 0.0, 9.0],
    [12.0, 0.0, 9.0, 0.0, 7.0, 9.0, 0.0],
];

/// The seven-city sample as a [`CostMatrix`]. City 1 is index 0.
pub fn seven_cities() -> Result<CostMatrix> {
    CostMatrix::from_zero_absent(&SEVEN_CITIES)
}
