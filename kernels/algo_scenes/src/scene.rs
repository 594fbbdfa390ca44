// Scene assembly and manifest metadata

use serde::Serialize;
use std::collections::BTreeMap;

use crate::binning::bin_matrix;
use crate::feature_bars::bar_visual;
use crate::prob_grid::{layout_grid, ProbGrid};
use crate::tree_layout::layout_tree;
use crate::types::{
    FeatureMode, Matrix, NodeKind, Position, ProbabilityTable, Rgb, TreeEdge, TreeNode,
};

// ============================================================================
// MANIFEST METADATA
// ============================================================================

// Manifest metadata for a generated scene
// This gets serialized to JSON for the frontend next to the scene itself
#[derive(Debug, Clone, Serialize)]
pub struct SceneManifest {
    pub scene: String,
    pub source: String,
    pub mode: Option<String>,
    pub angle: Option<u32>,
    pub bin_count: Option<usize>,
    pub primitives: usize,
    pub scene_url: String,
}

impl SceneManifest {
    pub fn new(
        scene: &str,
        source: &str,
        mode: Option<String>,
        angle: Option<u32>,
        bin_count: Option<usize>,
        primitives: usize,
    ) -> Self {
        Self {
            scene: scene.to_string(),
            source: source.to_string(),
            mode,
            angle,
            bin_count,
            primitives,
            scene_url: format!("/scenes/{}/scene.json", scene),
        }
    }
}

// ============================================================================
// GLCM BAR FIELD
// ============================================================================

// One rendered bar of the binned co-occurrence field, carrying its source
// block so the tooltip can report the intensity range it covers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneBar {
    pub position: Position,
    pub height: f64,
    pub color: Rgb,
    pub row_bin: usize,
    pub col_bin: usize,
    pub sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlcmScene {
    pub mode: String,
    pub bin_count: usize,
    pub block_size: usize,
    pub max_bin_val: f64,
    pub bars: Vec<SceneBar>,
}

// Bin a co-occurrence matrix and weight every emitted bin by the feature mode
pub fn build_glcm_scene(matrix: &Matrix, mode: FeatureMode, bin_count: usize) -> GlcmScene {
    let binned = bin_matrix(matrix, bin_count);

    let bars = binned
        .bins
        .iter()
        .map(|bin| {
            let visual = bar_visual(bin, binned.max_bin_val, mode, bin_count);
            SceneBar {
                position: bin.position,
                height: visual.height,
                color: visual.color,
                row_bin: bin.row_bin,
                col_bin: bin.col_bin,
                sum: bin.sum,
            }
        })
        .collect();

    GlcmScene {
        mode: mode.name().to_string(),
        bin_count,
        block_size: binned.block_size,
        max_bin_val: binned.max_bin_val,
        bars,
    }
}

// ============================================================================
// DECISION TREE SCENE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: u32,
    pub label: String,
    pub kind: NodeKind,
    pub depth: u32,
    pub value: Option<String>,
    pub position: Position,
}

// An edge as a drawable segment; midpoint anchors the branch-value label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEdge {
    pub from: u32,
    pub to: u32,
    pub label: String,
    pub start: Position,
    pub end: Position,
    pub midpoint: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeScene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

// Position every node with the fan layout and resolve edges into segments
pub fn build_tree_scene(nodes: &[TreeNode], edges: &[TreeEdge]) -> TreeScene {
    let positions: BTreeMap<u32, Position> = layout_tree(nodes, edges);

    let scene_nodes = nodes
        .iter()
        .map(|node| SceneNode {
            id: node.id,
            label: node.label.clone(),
            kind: node.kind,
            depth: node.depth,
            value: node.value.clone(),
            position: positions[&node.id],
        })
        .collect();

    let scene_edges = edges
        .iter()
        .map(|edge| {
            let start = positions[&edge.from];
            let end = positions[&edge.to];
            SceneEdge {
                from: edge.from,
                to: edge.to,
                label: edge.label.clone(),
                start,
                end,
                midpoint: [
                    (start[0] + end[0]) / 2.0,
                    (start[1] + end[1]) / 2.0,
                    (start[2] + end[2]) / 2.0,
                ],
            }
        })
        .collect();

    TreeScene {
        nodes: scene_nodes,
        edges: scene_edges,
    }
}

// ============================================================================
// PROBABILITY GRID SCENE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbScene {
    // Class names with their legend colors, in table order
    pub classes: Vec<String>,
    pub class_colors: Vec<Rgb>,
    #[serde(flatten)]
    pub grid: ProbGrid,
}

// Lay out a probability table and attach the per-class legend
pub fn build_prob_scene(table: &ProbabilityTable) -> ProbScene {
    use crate::color::{class_hue, hsl_to_rgb};

    let num_classes = table.num_classes();
    let class_colors = (0..num_classes)
        .map(|i| hsl_to_rgb(class_hue(i, num_classes), 0.8, 0.5))
        .collect();

    ProbScene {
        classes: table.classes.clone(),
        class_colors,
        grid: layout_grid(table),
    }
}
