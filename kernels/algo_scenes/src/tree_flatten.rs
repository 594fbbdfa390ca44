// Decision-tree payload conversion and flattening

use serde_json::Value;

use crate::types::{NodeKind, TreeEdge, TreeNode};

// ============================================================================
// TAGGED TREE SHAPE
// ============================================================================

// Explicit form of the training payload's nested tree_structure
//
// The service encodes a tree as either a bare class string (leaf) or a
// single-key object {attribute: {branch_value: subtree, ...}}. Converting to
// a tagged variant once at the boundary keeps the rest of the pipeline free
// of JSON type inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeShape {
    Leaf(String),
    Branch {
        attribute: String,
        // Branch values in declared order; order determines node ids and
        // therefore layout, so it must not be re-sorted
        branches: Vec<(String, TreeShape)>,
    },
}

impl TreeShape {
    // Convert a raw payload value into a TreeShape
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(label) => Ok(Self::Leaf(label.clone())),
            Value::Object(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "Tree node must have exactly one attribute key, found {}",
                        map.len()
                    ));
                }
                // Sole entry: attribute -> {branch_value: subtree}
                let (attribute, subtrees) = map.iter().next().unwrap();
                let subtrees = subtrees.as_object().ok_or_else(|| {
                    format!("Branches of '{}' must be an object", attribute)
                })?;

                let mut branches = Vec::with_capacity(subtrees.len());
                for (value, subtree) in subtrees {
                    branches.push((value.clone(), Self::from_json(subtree)?));
                }

                Ok(Self::Branch {
                    attribute: attribute.clone(),
                    branches,
                })
            }
            other => Err(format!("Unexpected tree node: {}", other)),
        }
    }
}

// ============================================================================
// FLATTENING TO NODE/EDGE LISTS
// ============================================================================

// Flatten a TreeShape into the node/edge lists the layout engine consumes
//
// Ids are assigned in visit order (root = 0). Depth assignment per level of
// the source tree: the attribute node at depth d, each branch-value interior
// node at d + 1 (edge labeled with the branch value), each nested attribute
// node at d + 2, each leaf child at d + 1. A degenerate all-leaf tree yields
// a single root node carrying the class label.
pub fn flatten_tree(shape: &TreeShape) -> (Vec<TreeNode>, Vec<TreeEdge>) {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    match shape {
        TreeShape::Leaf(label) => {
            nodes.push(TreeNode {
                id: 0,
                label: label.clone(),
                kind: NodeKind::Root,
                depth: 0,
                value: Some(label.clone()),
            });
        }
        TreeShape::Branch { .. } => {
            flatten_branch(shape, None, 0, &mut nodes, &mut edges);
        }
    }

    (nodes, edges)
}

fn flatten_branch(
    shape: &TreeShape,
    parent: Option<(u32, String)>,
    depth: u32,
    nodes: &mut Vec<TreeNode>,
    edges: &mut Vec<TreeEdge>,
) {
    let TreeShape::Branch { attribute, branches } = shape else {
        unreachable!("flatten_branch is only called on Branch nodes");
    };

    let current_id = nodes.len() as u32;
    nodes.push(TreeNode {
        id: current_id,
        label: attribute.clone(),
        kind: if depth == 0 { NodeKind::Root } else { NodeKind::Decision },
        depth,
        value: None,
    });

    if let Some((parent_id, edge_label)) = parent {
        edges.push(TreeEdge {
            from: parent_id,
            to: current_id,
            label: edge_label,
        });
    }

    for (branch_value, subtree) in branches {
        match subtree {
            TreeShape::Leaf(label) => {
                let leaf_id = nodes.len() as u32;
                nodes.push(TreeNode {
                    id: leaf_id,
                    label: label.clone(),
                    kind: NodeKind::Leaf,
                    depth: depth + 1,
                    value: Some(label.clone()),
                });
                edges.push(TreeEdge {
                    from: current_id,
                    to: leaf_id,
                    label: branch_value.clone(),
                });
            }
            TreeShape::Branch { .. } => {
                // Interior node carrying the branch value, then the subtree
                // attribute two levels down
                let value_id = nodes.len() as u32;
                nodes.push(TreeNode {
                    id: value_id,
                    label: branch_value.clone(),
                    kind: NodeKind::Decision,
                    depth: depth + 1,
                    value: None,
                });
                edges.push(TreeEdge {
                    from: current_id,
                    to: value_id,
                    label: branch_value.clone(),
                });

                flatten_branch(
                    subtree,
                    Some((value_id, String::new())),
                    depth + 2,
                    nodes,
                    edges,
                );
            }
        }
    }
}
