//! WebAssembly bindings.
//!
//! Matrices cross the boundary as arrays of rows; `null` marks a missing
//! edge. Results are returned as plain objects mirroring
//! [`HeldKarpResult`](crate::HeldKarpResult).

use crate::matrix::CostMatrix;
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Solves a matrix given as rows of numbers or `null`.
#[wasm_bindgen(js_name = solveTsp)]
pub fn solve_tsp(matrix: JsValue, start: usize) -> Result<JsValue, JsError> {
    let matrix: CostMatrix = serde_wasm_bindgen::from_value(matrix).map_err(js_err)?;
    let result = crate::solve(&matrix, start).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&result).map_err(js_err)
}

/// Solves a plain adjacency matrix where `0` means no edge.
#[wasm_bindgen(js_name = solveTspZeroAbsent)]
pub fn solve_tsp_zero_absent(rows: JsValue, start: usize) -> Result<JsValue, JsError> {
    let rows: Vec<Vec<f64>> = serde_wasm_bindgen::from_value(rows).map_err(js_err)?;
    let matrix = CostMatrix::from_zero_absent(&rows).map_err(js_err)?;
    let result = crate::solve(&matrix, start).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&result).map_err(js_err)
}
