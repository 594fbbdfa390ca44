// Matrix binning for tractable bar-field rendering

use crate::types::{Bin, Matrix};

// ============================================================================
// BINNING ENGINE
// ============================================================================

// Bins with a total at or below this threshold are dropped from the output;
// drawing a bar for an effectively empty block only adds noise.
pub const EMPTY_BIN_EPSILON: f64 = 1e-4;

// Result of binning one matrix
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedMatrix {
    // Emitted bins only (sum above EMPTY_BIN_EPSILON), in row-major bin order
    pub bins: Vec<Bin>,

    // Largest emitted bin sum; 1.0 when nothing was emitted so downstream
    // normalization never divides by zero
    pub max_bin_val: f64,

    pub bin_count: usize,

    // Side length of the source block each bin aggregates
    pub block_size: usize,
}

// Aggregate a square matrix into a bin_count x bin_count grid of block sums
//
// Block size is ceil(original_size / bin_count); source cells past the matrix
// edge are simply skipped, so the last bin row/column may aggregate a partial
// block. When bin_count exceeds the matrix side, the trailing bins are empty
// and dropped by the epsilon filter.
//
// Caller contract: matrix is square with side >= 1, bin_count >= 1, entries
// are non-negative.
pub fn bin_matrix(matrix: &Matrix, bin_count: usize) -> BinnedMatrix {
    let original_size = matrix.len();
    assert!(original_size >= 1, "Matrix must have at least one row");
    assert!(bin_count >= 1, "Bin count must be at least 1");
    for (r, row) in matrix.iter().enumerate() {
        assert_eq!(
            row.len(),
            original_size,
            "Matrix must be square: row {} has {} columns, expected {}",
            r,
            row.len(),
            original_size
        );
    }

    let block_size = (original_size + bin_count - 1) / bin_count;
    let half = bin_count as f64 / 2.0;

    let mut bins = Vec::new();
    let mut max_bin_val = 0.0f64;

    for bi in 0..bin_count {
        for bj in 0..bin_count {
            // Sum the block, skipping out-of-range source cells
            let mut sum = 0.0;
            for i in 0..block_size {
                for j in 0..block_size {
                    let r = bi * block_size + i;
                    let c = bj * block_size + j;
                    if r < original_size && c < original_size {
                        sum += matrix[r][c];
                    }
                }
            }

            if sum > EMPTY_BIN_EPSILON {
                if sum > max_bin_val {
                    max_bin_val = sum;
                }
                bins.push(Bin {
                    row_bin: bi,
                    col_bin: bj,
                    sum,
                    position: [bi as f64 - half, 0.0, bj as f64 - half],
                });
            }
        }
    }

    if max_bin_val == 0.0 {
        max_bin_val = 1.0;
    }

    BinnedMatrix {
        bins,
        max_bin_val,
        bin_count,
        block_size,
    }
}
