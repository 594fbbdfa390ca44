// Type definitions for the algorithm scene-mapping core

use serde::Serialize;

// ============================================================================
// GEOMETRY PRIMITIVES
// ============================================================================

// 3D position in scene space (x, y, z)
// The frontend camera treats +y as up; bars grow along +y from their base.
pub type Position = [f64; 3];

// Linear RGB color with channels in [0, 1]
// Converted from HSL by the color module; the frontend consumes it directly
// as a material color.
pub type Rgb = [f32; 3];

// ============================================================================
// CO-OCCURRENCE MATRIX AND BINS
// ============================================================================

// A co-occurrence matrix is a square grid of non-negative reals, produced by
// the external analysis service. Rows index the reference intensity, columns
// the neighbor intensity.
pub type Matrix = Vec<Vec<f64>>;

// Aggregate of one block of the source matrix
//
// A full-resolution co-occurrence matrix (e.g. 256x256) has far too many
// cells to draw one bar each. The binning engine collapses blocks of cells
// into a fixed-size grid of bins; a bin remembers which block it came from
// so hover tooltips can report the source intensity range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    // Bin coordinates in [0, bin_count)
    pub row_bin: usize,
    pub col_bin: usize,

    // Exact total of all in-range source cells in this block
    pub sum: f64,

    // Scene-space base position, centered so the bar field surrounds the
    // origin: (row_bin - bin_count/2, 0, col_bin - bin_count/2)
    pub position: Position,
}

// ============================================================================
// FEATURE DISPLAY MODES
// ============================================================================

// Statistical feature driving bar height and color
//
// Each mode re-weights the binned co-occurrence values with the same weight
// its statistical formula applies, so the bar field literally shows how the
// feature is computed:
// - Contrast weights by squared index distance (far-from-diagonal dominates)
// - Dissimilarity weights by absolute index distance (linear version)
// - Homogeneity weights by inverse squared distance (diagonal dominates)
// - Energy / ASM square the normalized value (dominant pairs pop out)
// - Correlation and Default show the raw normalized value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureMode {
    Default,
    Contrast,
    Dissimilarity,
    Homogeneity,
    Energy,
    Asm,
    Correlation,
}

impl Default for FeatureMode {
    fn default() -> Self {
        Self::Default
    }
}

impl FeatureMode {
    // All modes in the order the frontend lists them
    pub const ALL: [FeatureMode; 7] = [
        FeatureMode::Default,
        FeatureMode::Contrast,
        FeatureMode::Dissimilarity,
        FeatureMode::Homogeneity,
        FeatureMode::Energy,
        FeatureMode::Correlation,
        FeatureMode::Asm,
    ];

    // Payload/CLI name for this mode
    // "ASM" is capitalized in the analysis payload, so the name round-trips
    // through feature lookups unchanged.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Contrast => "contrast",
            Self::Dissimilarity => "dissimilarity",
            Self::Homogeneity => "homogeneity",
            Self::Energy => "energy",
            Self::Asm => "ASM",
            Self::Correlation => "correlation",
        }
    }

    // Parse a mode from its payload/CLI name
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "default" => Ok(Self::Default),
            "contrast" => Ok(Self::Contrast),
            "dissimilarity" => Ok(Self::Dissimilarity),
            "homogeneity" => Ok(Self::Homogeneity),
            "energy" => Ok(Self::Energy),
            "ASM" | "asm" => Ok(Self::Asm),
            "correlation" => Ok(Self::Correlation),
            _ => Err(format!(
                "Invalid feature mode: '{}'. Must be one of: default, contrast, \
                 dissimilarity, homogeneity, energy, correlation, ASM",
                name
            )),
        }
    }
}

// Visual properties of a single bar, derived from a Bin and a FeatureMode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarVisual {
    // Clamped to [0.1, 20] so the scene stays stable regardless of input scale
    pub height: f64,
    pub color: Rgb,
}

// ============================================================================
// DECISION TREE NODES AND EDGES
// ============================================================================

// Role of a node in the flattened decision tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    // The unique depth-0 node
    Root,
    // Attribute nodes and branch-value interior nodes
    Decision,
    // Terminal class labels
    Leaf,
}

// A flattened decision-tree node
//
// Ids are assigned in flattening order (root = 0) and referenced by edges.
// Exactly one node has depth 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: u32,
    pub label: String,
    pub kind: NodeKind,
    pub depth: u32,
    // Predicted class, present on leaves only
    pub value: Option<String>,
}

// A directed parent -> child edge; label carries the branch value tested at
// the parent ("Sunny", "High", ...). Connector edges between a branch-value
// node and its subtree attribute node carry an empty label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeEdge {
    pub from: u32,
    pub to: u32,
    pub label: String,
}

// ============================================================================
// PROBABILITY TABLE
// ============================================================================

// Conditional probabilities for one feature: probs[value_index][class_index]
//
// Rectangular by construction: every class has an entry for every value.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureProbs {
    pub name: String,
    pub values: Vec<String>,
    pub probs: Vec<Vec<f64>>,
}

// The nested feature -> class -> value -> probability mapping of a trained
// Naive Bayes model, converted once at the payload boundary into positional
// form. Feature, value, and class order all match the payload's declared key
// order; the grid layout depends on that order staying fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    pub classes: Vec<String>,
    pub features: Vec<FeatureProbs>,
}

impl ProbabilityTable {
    pub fn new(classes: Vec<String>, features: Vec<FeatureProbs>) -> Self {
        assert!(!classes.is_empty(), "Probability table needs at least one class");
        for feature in &features {
            assert_eq!(
                feature.values.len(),
                feature.probs.len(),
                "Feature '{}' has {} values but {} probability rows",
                feature.name,
                feature.values.len(),
                feature.probs.len()
            );
            for row in &feature.probs {
                assert_eq!(
                    row.len(),
                    classes.len(),
                    "Feature '{}' has a probability row for {} classes, expected {}",
                    feature.name,
                    row.len(),
                    classes.len()
                );
                for &p in row {
                    assert!(
                        (0.0..=1.0).contains(&p),
                        "Probability {} out of [0, 1] in feature '{}'",
                        p,
                        feature.name
                    );
                }
            }
        }
        Self { classes, features }
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.features.len()
    }
}
