// Grouped 3D bar grid for conditional probability tables

use serde::Serialize;

use crate::color::{class_hue, hsl_to_rgb};
use crate::types::{Position, ProbabilityTable, Rgb};

// ============================================================================
// GRID LAYOUT
// ============================================================================

// Spacing constants shared with the frontend camera framing
pub const VALUE_SPACING: f64 = 1.2;
pub const CLASS_SPACING: f64 = 1.5;
pub const FEATURE_GAP: f64 = 2.0;
pub const HEIGHT_SCALE: f64 = 6.0;
pub const MIN_BAR_HEIGHT: f64 = 0.1;

// Class colors use a softer saturation than the feature bars so many classes
// stay distinguishable side by side
const CLASS_SATURATION: f64 = 0.8;
const CLASS_LIGHTNESS: f64 = 0.5;

// One probability bar with enough metadata to answer hover queries without
// reverse-engineering its position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbBar {
    pub position: Position,
    pub height: f64,
    pub color: Rgb,
    pub feature: String,
    pub value: String,
    pub class: String,
    pub prob: f64,
}

// Anchor for a feature's name, centered under its value group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureLabel {
    pub text: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbGrid {
    pub bars: Vec<ProbBar>,
    pub feature_labels: Vec<FeatureLabel>,
    // Total x extent including the trailing feature gap; the camera targets
    // total_width / 2
    pub total_width: f64,
}

// Lay out a probability table as grouped bars
//
// Features advance along x (each group is its values side by side, then a
// fixed gap); classes advance along z; bar height is the probability scaled
// by HEIGHT_SCALE with a visibility floor. Iteration follows the table's
// declared order exactly — bar identity is positional, so reordering keys
// would silently relabel every bar.
pub fn layout_grid(table: &ProbabilityTable) -> ProbGrid {
    let num_classes = table.num_classes();

    let mut bars = Vec::new();
    let mut feature_labels = Vec::new();
    let mut x_offset = 0.0;

    for feature in &table.features {
        let start_x = x_offset;

        for (value_index, value) in feature.values.iter().enumerate() {
            for (class_index, class) in table.classes.iter().enumerate() {
                let prob = feature.probs[value_index][class_index];

                bars.push(ProbBar {
                    position: [
                        x_offset + value_index as f64 * VALUE_SPACING,
                        0.0,
                        class_index as f64 * CLASS_SPACING,
                    ],
                    height: (prob * HEIGHT_SCALE).max(MIN_BAR_HEIGHT),
                    color: hsl_to_rgb(
                        class_hue(class_index, num_classes),
                        CLASS_SATURATION,
                        CLASS_LIGHTNESS,
                    ),
                    feature: feature.name.clone(),
                    value: value.clone(),
                    class: class.clone(),
                    prob,
                });
            }
        }

        let group_width = feature.values.len() as f64 * VALUE_SPACING;
        feature_labels.push(FeatureLabel {
            text: feature.name.clone(),
            position: [
                start_x + group_width / 2.0 - VALUE_SPACING / 2.0,
                0.0,
                num_classes as f64 * CLASS_SPACING + 1.0,
            ],
        });

        x_offset += group_width + FEATURE_GAP;
    }

    ProbGrid {
        bars,
        feature_labels,
        total_width: x_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureProbs;

    fn two_by_three_table() -> ProbabilityTable {
        // 2 features x 3 values x 2 classes
        let feature = |name: &str| FeatureProbs {
            name: name.into(),
            values: vec!["a".into(), "b".into(), "c".into()],
            probs: vec![vec![0.5, 0.1], vec![0.3, 0.4], vec![0.2, 0.5]],
        };
        ProbabilityTable::new(
            vec!["Yes".into(), "No".into()],
            vec![feature("F1"), feature("F2")],
        )
    }

    #[test]
    fn test_total_width_scenario() {
        // 2 features * (3 * 1.2 + 2) = 11.2
        let grid = layout_grid(&two_by_three_table());
        assert!((grid.total_width - 11.2).abs() < 1e-9);
    }

    #[test]
    fn test_bar_count_and_order() {
        let grid = layout_grid(&two_by_three_table());
        assert_eq!(grid.bars.len(), 12);

        // Declared order: feature-major, then value, then class
        assert_eq!(grid.bars[0].feature, "F1");
        assert_eq!(grid.bars[0].value, "a");
        assert_eq!(grid.bars[0].class, "Yes");
        assert_eq!(grid.bars[1].class, "No");
        assert_eq!(grid.bars[2].value, "b");
        assert_eq!(grid.bars[6].feature, "F2");
    }

    #[test]
    fn test_bar_positions() {
        let grid = layout_grid(&two_by_three_table());

        // First feature group starts at x = 0
        assert_eq!(grid.bars[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(grid.bars[1].position, [0.0, 0.0, 1.5]);
        assert_eq!(grid.bars[2].position, [1.2, 0.0, 0.0]);

        // Second group starts after 3 * 1.2 + 2
        assert!((grid.bars[6].position[0] - 5.6).abs() < 1e-9);
    }

    #[test]
    fn test_height_scaling_and_floor() {
        let table = ProbabilityTable::new(
            vec!["Yes".into()],
            vec![FeatureProbs {
                name: "F".into(),
                values: vec!["hi".into(), "zero".into()],
                probs: vec![vec![0.5], vec![0.0]],
            }],
        );
        let grid = layout_grid(&table);
        assert_eq!(grid.bars[0].height, 3.0);
        assert_eq!(grid.bars[1].height, MIN_BAR_HEIGHT);
    }

    #[test]
    fn test_classes_get_distinct_colors() {
        let grid = layout_grid(&two_by_three_table());
        assert_ne!(grid.bars[0].color, grid.bars[1].color);
    }

    #[test]
    fn test_feature_labels_centered_under_groups() {
        let grid = layout_grid(&two_by_three_table());
        assert_eq!(grid.feature_labels.len(), 2);

        let first = &grid.feature_labels[0];
        assert_eq!(first.text, "F1");
        // 3 values: center at 3 * 1.2 / 2 - 0.6 = 1.2
        assert!((first.position[0] - 1.2).abs() < 1e-9);
        // Behind the class rows: 2 * 1.5 + 1 = 4
        assert!((first.position[2] - 4.0).abs() < 1e-9);

        let second = &grid.feature_labels[1];
        assert!((second.position[0] - (5.6 + 1.2)).abs() < 1e-9);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let table = two_by_three_table();
        assert_eq!(layout_grid(&table), layout_grid(&table));
    }
}
