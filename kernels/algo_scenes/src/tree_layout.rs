// Radial fan layout for decision trees

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::types::{Position, TreeEdge, TreeNode};

// ============================================================================
// FAN LAYOUT
// ============================================================================

// The root sits at a fixed anchor; every deeper level fans out below it
pub const ROOT_ANCHOR: Position = [0.0, 4.0, 0.0];

// Levels spread across 270 degrees rather than a full circle, so the tree
// reads as a hierarchy hanging from the root instead of a radial wheel
pub const FAN_SPAN: f64 = 1.5 * PI;

// Per-depth scene spacing
const WIDTH_PER_DEPTH: f64 = 4.0;
const DROP_PER_DEPTH: f64 = 3.0;
const DEPTH_SPREAD: f64 = 2.0;

// Assign a scene position to every node
//
// Nodes are grouped by depth; each level's nodes are distributed across the
// fan in list order, centered on angle zero:
//
//   angle(i) = (i - (count - 1) / 2) * (FAN_SPAN / max(count, 1))
//   x = sin(angle) * depth * 4
//   y = 4 - depth * 3
//   z = cos(angle) * depth * 2
//
// The fan widens and descends with depth, which avoids overlap for the
// shallow (<= 4 level) trees this domain produces without needing a
// force-directed pass. Caller guarantees tree-shaped input; no cycle
// detection is performed.
pub fn layout_tree(nodes: &[TreeNode], edges: &[TreeEdge]) -> BTreeMap<u32, Position> {
    #[cfg(debug_assertions)]
    {
        let known = |id: u32| nodes.iter().any(|n| n.id == id);
        for edge in edges {
            debug_assert!(
                known(edge.from) && known(edge.to),
                "Edge {} -> {} references an unknown node",
                edge.from,
                edge.to
            );
        }
    }
    #[cfg(not(debug_assertions))]
    let _ = edges;

    let mut by_depth: BTreeMap<u32, Vec<&TreeNode>> = BTreeMap::new();
    for node in nodes {
        by_depth.entry(node.depth).or_default().push(node);
    }

    let mut positions = BTreeMap::new();
    for (&depth, level) in &by_depth {
        let count = level.len();
        let angle_step = FAN_SPAN / count.max(1) as f64;

        for (index, node) in level.iter().enumerate() {
            if depth == 0 {
                positions.insert(node.id, ROOT_ANCHOR);
                continue;
            }

            let angle = (index as f64 - (count - 1) as f64 / 2.0) * angle_step;
            let d = depth as f64;
            positions.insert(
                node.id,
                [
                    angle.sin() * d * WIDTH_PER_DEPTH,
                    ROOT_ANCHOR[1] - d * DROP_PER_DEPTH,
                    angle.cos() * d * DEPTH_SPREAD,
                ],
            );
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;

    fn node(id: u32, depth: u32) -> TreeNode {
        TreeNode {
            id,
            label: format!("n{}", id),
            kind: if depth == 0 {
                NodeKind::Root
            } else {
                NodeKind::Decision
            },
            depth,
            value: None,
        }
    }

    fn fan_nodes() -> Vec<TreeNode> {
        vec![node(0, 0), node(1, 1), node(2, 1), node(3, 1), node(4, 2)]
    }

    #[test]
    fn test_root_is_anchored() {
        let positions = layout_tree(&fan_nodes(), &[]);
        assert_eq!(positions[&0], ROOT_ANCHOR);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let nodes = fan_nodes();
        let a = layout_tree(&nodes, &[]);
        let b = layout_tree(&nodes, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_siblings_do_not_overlap() {
        let positions = layout_tree(&fan_nodes(), &[]);
        for (i, a) in [1u32, 2, 3].iter().enumerate() {
            for b in &[1u32, 2, 3][i + 1..] {
                let pa = positions[a];
                let pb = positions[b];
                assert!(
                    (pa[0] - pb[0]).abs() > 1e-9 || (pa[2] - pb[2]).abs() > 1e-9,
                    "nodes {} and {} share an (x, z) pair",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_level_is_centered_on_the_fan() {
        // Odd-sized level: middle node sits at angle 0, i.e. straight ahead
        let positions = layout_tree(&fan_nodes(), &[]);
        let mid = positions[&2];
        assert!(mid[0].abs() < 1e-9);
        assert!((mid[2] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_depth_strictly_lowers_y() {
        let positions = layout_tree(&fan_nodes(), &[]);
        assert_eq!(positions[&0][1], 4.0);
        assert_eq!(positions[&1][1], 1.0);
        assert_eq!(positions[&4][1], -2.0);
    }

    #[test]
    fn test_every_node_gets_a_position() {
        let nodes = fan_nodes();
        let positions = layout_tree(&nodes, &[]);
        assert_eq!(positions.len(), nodes.len());
    }

    #[test]
    fn test_single_child_level_sits_ahead() {
        // A lone node at depth 2 gets angle 0: x = 0, z = 2 * DEPTH_SPREAD
        let positions = layout_tree(&fan_nodes(), &[]);
        let only = positions[&4];
        assert!(only[0].abs() < 1e-9);
        assert!((only[2] - 4.0).abs() < 1e-9);
    }
}
