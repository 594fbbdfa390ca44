// Typed views of the external analysis-service payloads

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::tree_flatten::TreeShape;
use crate::types::{FeatureMode, FeatureProbs, Matrix, ProbabilityTable};

// ============================================================================
// GLCM ANALYSIS RESULT
// ============================================================================

// Texture-analysis response: one co-occurrence matrix per requested angle
// plus the derived statistical features, one value per angle column
#[derive(Debug, Clone, Deserialize)]
pub struct GlcmAnalysis {
    // Feature name ("contrast", "ASM", ...) -> per-angle values
    pub features: BTreeMap<String, Vec<f64>>,

    // Angles the service was asked for, in request order
    pub degrees: Vec<u32>,

    // Angle (as a decimal string key, e.g. "45") -> co-occurrence matrix
    pub glcm_matrices: BTreeMap<String, Matrix>,
}

// Column index of an angle in the per-feature value arrays
//
// The service reports features for the canonical four angles in this fixed
// order; unknown angles fall back to the first column.
#[inline]
pub fn angle_index(angle: u32) -> usize {
    match angle {
        0 => 0,
        45 => 1,
        90 => 2,
        135 => 3,
        _ => 0,
    }
}

impl GlcmAnalysis {
    // The co-occurrence matrix for an angle, if the service computed it
    pub fn matrix_for(&self, angle: u32) -> Option<&Matrix> {
        self.glcm_matrices.get(&angle.to_string())
    }

    // The scalar feature value shown in the scene legend
    //
    // Default mode has no associated statistic, so it reports nothing.
    pub fn feature_value_at(&self, mode: FeatureMode, angle: u32) -> Option<f64> {
        if mode == FeatureMode::Default {
            return None;
        }
        self.features
            .get(mode.name())
            .and_then(|values| values.get(angle_index(angle)))
            .copied()
    }
}

// ============================================================================
// DECISION TREE TRAINING RESULT
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTreeTraining {
    pub accuracy: f64,
    pub dataset_size: usize,

    // Feature -> information gain at the root split
    pub feature_importance: BTreeMap<String, f64>,

    // Nested mapping-or-leaf-string; convert with tree() before layout
    pub tree_structure: Value,
}

impl DecisionTreeTraining {
    // Boundary conversion of the raw tree into its tagged form
    pub fn tree(&self) -> Result<TreeShape, String> {
        TreeShape::from_json(&self.tree_structure)
    }
}

// ============================================================================
// NAIVE BAYES TRAINING RESULT
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ManualCalculation {
    pub prior: BTreeMap<String, f64>,
    pub posterior: BTreeMap<String, f64>,
    pub prediction: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SklearnCalculation {
    pub probabilities: BTreeMap<String, f64>,
    pub prediction: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NaiveBayesTraining {
    pub manual_calculation: ManualCalculation,
    pub sklearn_calculation: SklearnCalculation,

    // feature -> class -> value -> probability; convert with
    // probability_table() before layout
    pub conditional_probabilities: Value,

    pub num_samples: usize,
}

impl NaiveBayesTraining {
    pub fn probability_table(&self) -> Result<ProbabilityTable, String> {
        probability_table_from_json(&self.conditional_probabilities)
    }
}

// Convert the nested conditional-probability mapping into positional form
//
// Class order comes from the first feature's keys, value order from the
// first class's keys within each feature; both are the payload's declared
// order (serde_json preserves it). Missing class/value combinations read as
// probability zero, matching the service's sparse encoding of unseen pairs.
pub fn probability_table_from_json(value: &Value) -> Result<ProbabilityTable, String> {
    let features_map = value
        .as_object()
        .ok_or("Conditional probabilities must be an object")?;

    let first_feature = features_map
        .values()
        .next()
        .and_then(Value::as_object)
        .ok_or("Conditional probabilities must contain at least one feature")?;
    let classes: Vec<String> = first_feature.keys().cloned().collect();
    if classes.is_empty() {
        return Err("Conditional probabilities must contain at least one class".into());
    }

    let mut features = Vec::with_capacity(features_map.len());
    for (feature_name, class_map) in features_map {
        let class_map = class_map
            .as_object()
            .ok_or_else(|| format!("Feature '{}' must map classes to values", feature_name))?;

        let values: Vec<String> = class_map
            .values()
            .next()
            .and_then(Value::as_object)
            .map(|value_map| value_map.keys().cloned().collect())
            .unwrap_or_default();

        let mut probs = vec![vec![0.0; classes.len()]; values.len()];
        for (class_index, class) in classes.iter().enumerate() {
            let Some(value_map) = class_map.get(class).and_then(Value::as_object) else {
                continue;
            };
            for (value_index, value_name) in values.iter().enumerate() {
                if let Some(p) = value_map.get(value_name).and_then(Value::as_f64) {
                    probs[value_index][class_index] = p;
                }
            }
        }

        features.push(FeatureProbs {
            name: feature_name.clone(),
            values,
            probs,
        });
    }

    Ok(ProbabilityTable::new(classes, features))
}

// ============================================================================
// KNN TRAINING RESULT
// ============================================================================

// Evaluation metrics consumed directly by the results panel; the interactive
// point-cloud demo runs client-side and never sees this payload
#[derive(Debug, Clone, Deserialize)]
pub struct KnnTraining {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub train_size: usize,
    pub test_size: usize,
    pub confusion_matrix: Vec<Vec<u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_glcm_payload_round_trip() {
        let payload: GlcmAnalysis = serde_json::from_value(json!({
            "features": {
                "contrast": [0.5, 0.6, 0.7, 0.8],
                "ASM": [0.1, 0.2, 0.3, 0.4]
            },
            "degrees": [0, 45, 90, 135],
            "glcm_matrices": {
                "0": [[1.0, 0.0], [0.0, 1.0]],
                "45": [[0.5, 0.5], [0.5, 0.5]]
            }
        }))
        .unwrap();

        assert_eq!(payload.degrees, vec![0, 45, 90, 135]);
        assert_eq!(payload.matrix_for(45).unwrap()[0][1], 0.5);
        assert!(payload.matrix_for(90).is_none());
    }

    #[test]
    fn test_feature_value_lookup() {
        let payload: GlcmAnalysis = serde_json::from_value(json!({
            "features": { "contrast": [0.5, 0.6, 0.7, 0.8] },
            "degrees": [0, 45, 90, 135],
            "glcm_matrices": {}
        }))
        .unwrap();

        assert_eq!(payload.feature_value_at(FeatureMode::Contrast, 90), Some(0.7));
        assert_eq!(payload.feature_value_at(FeatureMode::Default, 90), None);
        assert_eq!(payload.feature_value_at(FeatureMode::Energy, 0), None);
        // Unknown angle falls back to the first column
        assert_eq!(payload.feature_value_at(FeatureMode::Contrast, 30), Some(0.5));
    }

    #[test]
    fn test_tree_payload_conversion() {
        let payload: DecisionTreeTraining = serde_json::from_value(json!({
            "accuracy": 1.0,
            "dataset_size": 14,
            "feature_importance": { "Outlook": 0.247 },
            "tree_structure": { "Outlook": { "Overcast": "Yes", "Sunny": "No" } }
        }))
        .unwrap();

        let TreeShape::Branch { attribute, branches } = payload.tree().unwrap() else {
            panic!("expected branch root");
        };
        assert_eq!(attribute, "Outlook");
        assert_eq!(branches.len(), 2);
    }

    #[test]
    fn test_probability_table_preserves_declared_order() {
        let table = probability_table_from_json(&json!({
            "Outlook": {
                "Yes": { "Sunny": 0.22, "Overcast": 0.44, "Rainy": 0.33 },
                "No": { "Sunny": 0.6, "Overcast": 0.0, "Rainy": 0.4 }
            },
            "Windy": {
                "Yes": { "True": 0.33, "False": 0.66 },
                "No": { "True": 0.6, "False": 0.4 }
            }
        }))
        .unwrap();

        assert_eq!(table.classes, vec!["Yes", "No"]);
        assert_eq!(table.features[0].name, "Outlook");
        assert_eq!(table.features[0].values, vec!["Sunny", "Overcast", "Rainy"]);
        assert_eq!(table.features[1].name, "Windy");
        // probs[value][class]
        assert_eq!(table.features[0].probs[1], vec![0.44, 0.0]);
    }

    #[test]
    fn test_probability_table_missing_entries_read_zero() {
        let table = probability_table_from_json(&json!({
            "F": {
                "Yes": { "a": 0.5, "b": 0.5 },
                "No": { "a": 1.0 }
            }
        }))
        .unwrap();
        assert_eq!(table.features[0].probs[1], vec![0.5, 0.0]);
    }

    #[test]
    fn test_probability_table_rejects_non_object() {
        assert!(probability_table_from_json(&json!([1, 2])).is_err());
        assert!(probability_table_from_json(&json!({})).is_err());
    }

    #[test]
    fn test_naive_bayes_payload_round_trip() {
        let payload: NaiveBayesTraining = serde_json::from_value(json!({
            "manual_calculation": {
                "prior": { "Yes": 0.64, "No": 0.36 },
                "posterior": { "Yes": 0.8, "No": 0.2 },
                "prediction": "Yes"
            },
            "sklearn_calculation": {
                "probabilities": { "Yes": 0.79, "No": 0.21 },
                "prediction": "Yes"
            },
            "conditional_probabilities": {
                "F": { "Yes": { "a": 0.5 }, "No": { "a": 0.25 } }
            },
            "num_samples": 14
        }))
        .unwrap();

        assert_eq!(payload.manual_calculation.prediction, "Yes");
        let table = payload.probability_table().unwrap();
        assert_eq!(table.features[0].probs[0], vec![0.5, 0.25]);
    }

    #[test]
    fn test_knn_payload_round_trip() {
        let payload: KnnTraining = serde_json::from_value(json!({
            "accuracy": 0.9,
            "precision": 0.88,
            "recall": 0.91,
            "f1_score": 0.89,
            "train_size": 120,
            "test_size": 30,
            "confusion_matrix": [[14, 2], [1, 13]]
        }))
        .unwrap();
        assert_eq!(payload.confusion_matrix[0][0], 14);
    }
}
