// WebAssembly entry points for the concept demos

use wasm_bindgen::prelude::*;

use crate::bayes::LikelihoodTable;
use crate::cooccurrence::{build_cooccurrence, Direction, PixelGrid};
use crate::knn::{generate_clusters, recompute, DataPoint};

// ============================================================================
// KNN PLAYGROUND
// ============================================================================

/// Generate the demo point cloud for a seed.
/// Returns a Float32Array of (x, y, z, class) quads, one per point.
#[wasm_bindgen]
pub fn knn_point_cloud(seed: u32) -> Vec<f32> {
    let points = generate_clusters(seed as u64);
    let mut out = Vec::with_capacity(points.len() * 4);

    for point in &points {
        out.push(point.position[0] as f32);
        out.push(point.position[1] as f32);
        out.push(point.position[2] as f32);
        out.push(point.class as f32);
    }

    out
}

// Rebuild the typed point list from the flat (x, y, z, class) quads the
// JavaScript side holds on to
fn points_from_quads(quads: &[f32]) -> Vec<DataPoint> {
    assert!(
        quads.len() % 4 == 0,
        "Point buffer length {} is not a multiple of 4",
        quads.len()
    );

    quads
        .chunks_exact(4)
        .map(|quad| DataPoint {
            position: [quad[0] as f64, quad[1] as f64, quad[2] as f64],
            class: quad[3] as usize,
        })
        .collect()
}

/// Rank the k nearest points to the query position.
/// Returns a Uint32Array of point indices, ascending by distance.
#[wasm_bindgen]
pub fn knn_nearest(quads: &[f32], qx: f64, qy: f64, qz: f64, k: u32) -> Vec<u32> {
    let points = points_from_quads(quads);
    let set = recompute(&points, [qx, qy, qz], k as usize);
    set.neighbors.iter().map(|n| n.index as u32).collect()
}

/// Majority vote among the k nearest points.
/// Returns the winning class index, or -1 for a tie.
#[wasm_bindgen]
pub fn knn_predict(quads: &[f32], qx: f64, qy: f64, qz: f64, k: u32) -> i32 {
    let points = points_from_quads(quads);
    let set = recompute(&points, [qx, qy, qz], k as usize);
    set.outcome.as_i32()
}

// ============================================================================
// CO-OCCURRENCE DEMO
// ============================================================================

fn grid_from_cells(cells: &[u8], cols: u32, levels: u8) -> PixelGrid {
    let cols = cols as usize;
    assert!(cols >= 1, "Grid needs at least one column");
    assert!(
        cells.len() % cols == 0,
        "Cell buffer length {} is not a multiple of {} columns",
        cells.len(),
        cols
    );

    let rows = cells.chunks_exact(cols).map(|row| row.to_vec()).collect();
    PixelGrid::new(rows, levels)
}

/// Count neighbor pairs along a direction (0, 45, 90, or 135 degrees).
/// Returns the levels x levels count matrix as a row-major Uint32Array.
#[wasm_bindgen]
pub fn cooccurrence_matrix(cells: &[u8], cols: u32, levels: u8, degrees: u32) -> Vec<u32> {
    let grid = grid_from_cells(cells, cols, levels);
    let direction = Direction::from_degrees(degrees).unwrap_or(Direction::Deg0);
    let result = build_cooccurrence(&grid, direction);
    result.matrix.into_iter().flatten().collect()
}

/// Enumerate the neighbor pairs along a direction.
/// Returns a Uint32Array of (r1, c1, r2, c2, v1, v2) runs, one per pair.
#[wasm_bindgen]
pub fn cooccurrence_pairs(cells: &[u8], cols: u32, levels: u8, degrees: u32) -> Vec<u32> {
    let grid = grid_from_cells(cells, cols, levels);
    let direction = Direction::from_degrees(degrees).unwrap_or(Direction::Deg0);
    let result = build_cooccurrence(&grid, direction);

    let mut out = Vec::with_capacity(result.pairs.len() * 6);
    for pair in &result.pairs {
        out.push(pair.r1 as u32);
        out.push(pair.c1 as u32);
        out.push(pair.r2 as u32);
        out.push(pair.c2 as u32);
        out.push(pair.v1 as u32);
        out.push(pair.v2 as u32);
    }

    out
}

// ============================================================================
// POSTERIOR WALKTHROUGH
// ============================================================================

/// Evaluate the play-tennis posterior for one selected value per feature
/// (outlook, temperature, humidity, wind as value indices).
/// Returns a Float64Array of normalized class probabilities (Yes, No).
#[wasm_bindgen]
pub fn play_tennis_posterior(outlook: u32, temperature: u32, humidity: u32, wind: u32) -> Vec<f64> {
    let table = LikelihoodTable::play_tennis();
    let result = table.posterior(&[
        outlook as usize,
        temperature as usize,
        humidity as usize,
        wind as usize,
    ]);
    result.normalized
}

/// Predict the play-tennis class for one selected value per feature.
/// Returns the winning class index (0 = Yes, 1 = No), or -1 for a tie.
#[wasm_bindgen]
pub fn play_tennis_predict(outlook: u32, temperature: u32, humidity: u32, wind: u32) -> i32 {
    let table = LikelihoodTable::play_tennis();
    let result = table.posterior(&[
        outlook as usize,
        temperature as usize,
        humidity as usize,
        wind as usize,
    ]);
    result.prediction.as_i32()
}
