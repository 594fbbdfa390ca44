// Nearest-neighbour live recompute for the KNN playground

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::types::{tally_vote, Position, Vote, CLASS_COLORS};

// ============================================================================
// SYNTHETIC POINT CLOUD
// ============================================================================

// Points per cluster in the demo population
pub const CLUSTER_POINTS: usize = 20;

// Cluster centers and per-axis spreads; positions are drawn uniformly in
// center ± spread/2 on each axis
const CLUSTER_CENTERS: [Position; 2] = [[-3.0, 1.0, -2.0], [3.0, 1.0, 2.0]];
const CLUSTER_SPREAD: Position = [6.0, 4.0, 6.0];

// A member of the fixed demo population
//
// Points are immutable once generated for a session; the query point is a
// separate mutable position and never joins the population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub position: Position,
    pub class: usize,
}

impl DataPoint {
    // Display color for this point's class
    #[inline]
    pub fn color(&self) -> [f32; 3] {
        CLASS_COLORS[self.class]
    }
}

// Generate the two-cluster demo population from a seed
//
// The same seed always produces the same cloud, so a session can be replayed
// and tests can pin exact positions. Class 0 fills the first half of the
// list, class 1 the second half.
pub fn generate_clusters(seed: u64) -> Vec<DataPoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(CLUSTER_CENTERS.len() * CLUSTER_POINTS);

    for (class, center) in CLUSTER_CENTERS.iter().enumerate() {
        for _ in 0..CLUSTER_POINTS {
            let mut position = [0.0; 3];
            for axis in 0..3 {
                position[axis] =
                    center[axis] + (rng.gen::<f64>() - 0.5) * CLUSTER_SPREAD[axis];
            }
            points.push(DataPoint { position, class });
        }
    }

    points
}

// ============================================================================
// NEIGHBOUR RECOMPUTE
// ============================================================================

// One ranked neighbour; index refers into the input point list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub class: usize,
    pub distance: f64,
}

// The K nearest points plus the vote they imply
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborSet {
    // Ascending by distance; equal distances keep input order
    pub neighbors: Vec<Neighbor>,
    // Vote count per class, indexed by class id
    pub votes: Vec<usize>,
    pub outcome: Vote,
}

#[inline]
pub fn euclidean_distance(a: &Position, b: &Position) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

// Recompute the neighbour set for the current query position and K
//
// Runs a full pass on every call: distance to every point, a stable sort,
// take min(k, n). The population is tens of points, so this comfortably fits
// a pointer-move or slider-drag frame; a spatial index would only add state
// to invalidate. The sort must stay stable so equal-distance points rank in
// first-seen order and repeated calls agree.
pub fn recompute(points: &[DataPoint], query: Position, k: usize) -> NeighborSet {
    let mut ranked: Vec<Neighbor> = points
        .iter()
        .enumerate()
        .map(|(index, point)| Neighbor {
            index,
            class: point.class,
            distance: euclidean_distance(&point.position, &query),
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(k.min(points.len()));

    let num_classes = points.iter().map(|p| p.class + 1).max().unwrap_or(0);
    let mut votes = vec![0usize; num_classes];
    for neighbor in &ranked {
        votes[neighbor.class] += 1;
    }
    let outcome = tally_vote(&votes);

    NeighborSet {
        neighbors: ranked,
        votes,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, z: f64, class: usize) -> DataPoint {
        DataPoint {
            position: [x, y, z],
            class,
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let a = generate_clusters(7);
        let b = generate_clusters(7);
        assert_eq!(a, b);
        assert_ne!(a, generate_clusters(8));
    }

    #[test]
    fn test_generated_points_stay_in_their_cluster_box() {
        let points = generate_clusters(42);
        assert_eq!(points.len(), 2 * CLUSTER_POINTS);

        for point in &points {
            let center = CLUSTER_CENTERS[point.class];
            for axis in 0..3 {
                let offset = (point.position[axis] - center[axis]).abs();
                assert!(
                    offset <= CLUSTER_SPREAD[axis] / 2.0,
                    "class {} point strays {} on axis {}",
                    point.class,
                    offset,
                    axis
                );
            }
        }
    }

    #[test]
    fn test_class_colors_are_distinct() {
        let points = generate_clusters(1);
        let red = points.first().unwrap().color();
        let blue = points.last().unwrap().color();
        assert_ne!(red, blue);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let points = generate_clusters(3);
        let query = [0.5, 0.0, -0.5];
        assert_eq!(recompute(&points, query, 5), recompute(&points, query, 5));
    }

    #[test]
    fn test_neighbor_count_is_min_k_n() {
        let points = vec![point(1.0, 0.0, 0.0, 0), point(2.0, 0.0, 0.0, 1)];
        assert_eq!(recompute(&points, [0.0; 3], 1).neighbors.len(), 1);
        assert_eq!(recompute(&points, [0.0; 3], 5).neighbors.len(), 2);
        assert_eq!(recompute(&points, [0.0; 3], 0).neighbors.len(), 0);
    }

    #[test]
    fn test_neighbors_dominate_excluded_points() {
        let points = generate_clusters(11);
        let query = [1.0, 1.0, 0.0];
        let set = recompute(&points, query, 7);

        let cutoff = set.neighbors.last().unwrap().distance;
        let chosen: Vec<usize> = set.neighbors.iter().map(|n| n.index).collect();
        for (index, point) in points.iter().enumerate() {
            if !chosen.contains(&index) {
                assert!(euclidean_distance(&point.position, &query) >= cutoff);
            }
        }
    }

    #[test]
    fn test_neighbors_sorted_ascending() {
        let points = generate_clusters(19);
        let set = recompute(&points, [0.0; 3], 10);
        for pair in set.neighbors.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_equidistant_pair_reports_tie() {
        // One point of each class, mirrored around the query
        let points = vec![point(1.0, 0.0, 0.0, 0), point(-1.0, 0.0, 0.0, 1)];
        let set = recompute(&points, [0.0; 3], 2);

        assert_eq!(set.votes, vec![1, 1]);
        assert_eq!(set.outcome, Vote::Tie);
    }

    #[test]
    fn test_equal_distances_keep_input_order() {
        // Four points on a unit sphere around the query: ranking must follow
        // input order, not an arbitrary reshuffle
        let points = vec![
            point(1.0, 0.0, 0.0, 0),
            point(0.0, 1.0, 0.0, 1),
            point(0.0, 0.0, 1.0, 0),
            point(-1.0, 0.0, 0.0, 1),
        ];
        let set = recompute(&points, [0.0; 3], 3);
        let indices: Vec<usize> = set.neighbors.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_majority_vote() {
        let points = vec![
            point(0.1, 0.0, 0.0, 0),
            point(0.2, 0.0, 0.0, 0),
            point(5.0, 0.0, 0.0, 1),
        ];
        let set = recompute(&points, [0.0; 3], 3);
        assert_eq!(set.votes, vec![2, 1]);
        assert_eq!(set.outcome, Vote::Majority(0));
    }

    #[test]
    fn test_query_near_a_cluster_predicts_that_cluster() {
        let points = generate_clusters(5);
        let set = recompute(&points, CLUSTER_CENTERS[1], 5);
        assert_eq!(set.outcome, Vote::Majority(1));
    }
}
