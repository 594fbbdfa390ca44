// kernels/concept_demos/src/lib.rs

// Interactive Concept Demo Engines
//
// Pure, synchronous engines behind the in-browser teaching demos: the KNN
// playground (drag a query point, watch the vote), the pixel-pair
// co-occurrence grid, and the Naive Bayes posterior walkthrough. Each engine
// recomputes its full result on every input change within one event-loop
// turn; the wasm module exposes them to the page as flat-array calls.

pub mod bayes;
pub mod cooccurrence;
pub mod knn;
pub mod types;
pub mod wasm;

pub use bayes::{LikelihoodTable, PosteriorResult};
pub use cooccurrence::{build_cooccurrence, Cooccurrence, Direction, PixelGrid, PixelPair};
pub use knn::{euclidean_distance, generate_clusters, recompute, DataPoint, Neighbor, NeighborSet};
pub use types::{tally_vote, Position, Vote, CLASS_COLORS};
