// Pixel-pair co-occurrence demo engine

// ============================================================================
// DIRECTIONS
// ============================================================================

// Pairing direction, one of the four canonical GLCM angles
//
// The offset points from the reference pixel to its neighbor. Row offsets are
// negative for the diagonal/vertical angles because row 0 is the top of the
// grid while the angle convention measures counter-clockwise from horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Deg0,
    Deg45,
    Deg90,
    Deg135,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Deg0,
        Direction::Deg45,
        Direction::Deg90,
        Direction::Deg135,
    ];

    // (row, col) offset of the neighbor pixel
    #[inline]
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Self::Deg0 => (0, 1),
            Self::Deg45 => (-1, 1),
            Self::Deg90 => (-1, 0),
            Self::Deg135 => (-1, -1),
        }
    }

    #[inline]
    pub fn degrees(&self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg45 => 45,
            Self::Deg90 => 90,
            Self::Deg135 => 135,
        }
    }

    pub fn from_degrees(degrees: u32) -> Result<Self, String> {
        match degrees {
            0 => Ok(Self::Deg0),
            45 => Ok(Self::Deg45),
            90 => Ok(Self::Deg90),
            135 => Ok(Self::Deg135),
            _ => Err(format!(
                "Invalid direction: '{}°'. Must be one of: 0, 45, 90, 135",
                degrees
            )),
        }
    }
}

// ============================================================================
// EDITABLE PIXEL GRID
// ============================================================================

// Side length and gray-level count of the standard demo grid
pub const DEMO_GRID_SIZE: usize = 4;
pub const DEMO_GRAY_LEVELS: u8 = 4;

// A small grid of quantized gray values the user edits by clicking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    levels: u8,
    cells: Vec<Vec<u8>>,
}

impl PixelGrid {
    pub fn new(cells: Vec<Vec<u8>>, levels: u8) -> Self {
        assert!(levels >= 1, "Grid needs at least one gray level");
        assert!(!cells.is_empty(), "Grid must have at least one row");
        let cols = cells[0].len();
        assert!(cols >= 1, "Grid must have at least one column");
        for (r, row) in cells.iter().enumerate() {
            assert_eq!(
                row.len(),
                cols,
                "Grid must be rectangular: row {} has {} columns, expected {}",
                r,
                row.len(),
                cols
            );
            for &value in row {
                assert!(
                    value < levels,
                    "Cell value {} out of range for {} levels",
                    value,
                    levels
                );
            }
        }
        Self { levels, cells }
    }

    // The grid every demo session starts from: four identical 0..3 rows
    pub fn demo() -> Self {
        let row: Vec<u8> = (0..DEMO_GRAY_LEVELS).collect();
        Self::new(vec![row; DEMO_GRID_SIZE], DEMO_GRAY_LEVELS)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    #[inline]
    pub fn levels(&self) -> u8 {
        self.levels
    }

    #[inline]
    pub fn value(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    // Click handler: advance the cell to the next gray level, wrapping
    pub fn cycle(&mut self, row: usize, col: usize) {
        self.cells[row][col] = (self.cells[row][col] + 1) % self.levels;
    }
}

// Display shade for a gray level, in [0, 1]
#[inline]
pub fn level_shade(value: u8, levels: u8) -> f32 {
    assert!(value < levels, "Value {} out of range for {} levels", value, levels);
    if levels == 1 {
        return 0.0;
    }
    value as f32 / (levels - 1) as f32
}

// ============================================================================
// PAIR ENUMERATION AND COUNT MATRIX
// ============================================================================

// One reference/neighbor pixel pairing contributing to matrix[v1][v2]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPair {
    pub r1: usize,
    pub c1: usize,
    pub r2: usize,
    pub c2: usize,
    pub v1: u8,
    pub v2: u8,
}

impl PixelPair {
    // True when (row, col) is either end of the pair
    #[inline]
    pub fn touches(&self, row: usize, col: usize) -> bool {
        (self.r1 == row && self.c1 == col) || (self.r2 == row && self.c2 == col)
    }
}

// The demo's ground-truth co-occurrence result: the count matrix plus the
// exact pair list behind it, so every cell can explain itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cooccurrence {
    // matrix[v1][v2] = number of pairs with those values, levels x levels
    pub matrix: Vec<Vec<u32>>,
    // Row-major enumeration order
    pub pairs: Vec<PixelPair>,
}

impl Cooccurrence {
    // Reverse query for hover: all pairs counted in matrix[v1][v2]
    pub fn pairs_matching(&self, v1: u8, v2: u8) -> Vec<PixelPair> {
        self.pairs
            .iter()
            .filter(|p| p.v1 == v1 && p.v2 == v2)
            .copied()
            .collect()
    }

    // True when hovering matrix cell (v1, v2) should light up grid cell
    // (row, col): the cell participates in at least one matching pair
    pub fn highlights_cell(&self, v1: u8, v2: u8, row: usize, col: usize) -> bool {
        self.pairs
            .iter()
            .any(|p| p.v1 == v1 && p.v2 == v2 && p.touches(row, col))
    }
}

// Enumerate every in-bounds neighbor pair along a direction and count them
//
// For each cell (r, c), the neighbor is (r + dr, c + dc); cells whose
// neighbor falls outside the grid contribute nothing. This is the same
// pairing rule the full-scale texture analysis applies at image size — here
// it stays small enough to inspect pair by pair.
pub fn build_cooccurrence(grid: &PixelGrid, direction: Direction) -> Cooccurrence {
    let (dr, dc) = direction.offset();
    let levels = grid.levels() as usize;

    let mut matrix = vec![vec![0u32; levels]; levels];
    let mut pairs = Vec::new();

    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let nr = r as i32 + dr;
            let nc = c as i32 + dc;
            if nr < 0 || nr >= grid.rows() as i32 || nc < 0 || nc >= grid.cols() as i32 {
                continue;
            }

            let v1 = grid.value(r, c);
            let v2 = grid.value(nr as usize, nc as usize);
            matrix[v1 as usize][v2 as usize] += 1;
            pairs.push(PixelPair {
                r1: r,
                c1: c,
                r2: nr as usize,
                c2: nc as usize,
                v1,
                v2,
            });
        }
    }

    Cooccurrence { matrix, pairs }
}
