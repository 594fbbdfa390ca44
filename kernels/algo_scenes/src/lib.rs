// kernels/algo_scenes/src/lib.rs

// Algorithm Scene-Mapping Core
//
// This library turns algorithm-result payloads (co-occurrence matrices,
// trained decision trees, conditional probability tables) into render-ready
// 3D scene data: bar fields, node/edge layouts, and grouped probability
// grids. All computations are pure and synchronous; the frontend owns every
// piece of interactive state and calls back in on each input change.

pub mod binning;
pub mod color;
pub mod feature_bars;
pub mod payload;
pub mod prob_grid;
pub mod scene;
pub mod tree_flatten;
pub mod tree_layout;
pub mod types;

pub use binning::{bin_matrix, BinnedMatrix, EMPTY_BIN_EPSILON};
pub use color::hsl_to_rgb;
pub use feature_bars::{bar_visual, MAX_BAR_HEIGHT, MIN_BAR_HEIGHT};
pub use payload::{
    angle_index, DecisionTreeTraining, GlcmAnalysis, KnnTraining, NaiveBayesTraining,
};
pub use prob_grid::{layout_grid, ProbGrid};
pub use scene::{
    build_glcm_scene, build_prob_scene, build_tree_scene, GlcmScene, ProbScene, SceneManifest,
    TreeScene,
};
pub use tree_flatten::{flatten_tree, TreeShape};
pub use tree_layout::{layout_tree, ROOT_ANCHOR};
pub use types::{
    BarVisual, Bin, FeatureMode, FeatureProbs, Matrix, NodeKind, Position, ProbabilityTable, Rgb,
    TreeEdge, TreeNode,
};
