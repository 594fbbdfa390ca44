// Naive Bayes posterior walkthrough

use crate::types::{tally_vote, Vote};

// ============================================================================
// LIKELIHOOD TABLE
// ============================================================================

// Conditional probabilities for one feature: probs[value_index][class_index]
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: &'static str,
    pub values: Vec<&'static str>,
    pub probs: Vec<Vec<f64>>,
}

// A fitted model in walkthrough form: class priors plus per-feature value
// likelihoods, everything indexed positionally so the scene can address bars
// without string lookups
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodTable {
    pub classes: Vec<&'static str>,
    pub priors: Vec<f64>,
    pub features: Vec<Feature>,
}

impl LikelihoodTable {
    pub fn new(classes: Vec<&'static str>, priors: Vec<f64>, features: Vec<Feature>) -> Self {
        assert_eq!(classes.len(), priors.len(), "One prior per class");
        assert!(!classes.is_empty(), "Table needs at least one class");
        for feature in &features {
            assert_eq!(
                feature.values.len(),
                feature.probs.len(),
                "Feature '{}' needs one probability row per value",
                feature.name
            );
            for row in &feature.probs {
                assert_eq!(row.len(), classes.len(), "One probability per class");
            }
        }
        Self {
            classes,
            priors,
            features,
        }
    }

    // The play-tennis statistics the walkthrough ships with
    //
    // Counts come from the classic 14-sample weather dataset: 9 play days,
    // 5 stay-home days.
    pub fn play_tennis() -> Self {
        Self::new(
            vec!["Yes", "No"],
            vec![9.0 / 14.0, 5.0 / 14.0],
            vec![
                Feature {
                    name: "Outlook",
                    values: vec!["Sunny", "Overcast", "Rainy"],
                    probs: vec![
                        vec![2.0 / 9.0, 3.0 / 5.0],
                        vec![4.0 / 9.0, 0.0 / 5.0],
                        vec![3.0 / 9.0, 2.0 / 5.0],
                    ],
                },
                Feature {
                    name: "Temperature",
                    values: vec!["Hot", "Mild", "Cool"],
                    probs: vec![
                        vec![2.0 / 9.0, 2.0 / 5.0],
                        vec![4.0 / 9.0, 2.0 / 5.0],
                        vec![3.0 / 9.0, 1.0 / 5.0],
                    ],
                },
                Feature {
                    name: "Humidity",
                    values: vec!["High", "Normal"],
                    probs: vec![
                        vec![3.0 / 9.0, 4.0 / 5.0],
                        vec![6.0 / 9.0, 1.0 / 5.0],
                    ],
                },
                Feature {
                    name: "Wind",
                    values: vec!["Weak", "Strong"],
                    probs: vec![
                        vec![6.0 / 9.0, 2.0 / 5.0],
                        vec![3.0 / 9.0, 3.0 / 5.0],
                    ],
                },
            ],
        )
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }
}

// ============================================================================
// POSTERIOR EVALUATION
// ============================================================================

// One multiplied-in likelihood, kept so the walkthrough can show every step
// of the product
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorDetail {
    pub feature: usize,
    pub value: usize,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorResult {
    // Unnormalized products prior * Π likelihood, per class
    pub raw: Vec<f64>,
    // Raw scaled to sum to 1; all zeros when every product vanishes
    pub normalized: Vec<f64>,
    // details[class][feature] = the likelihood multiplied in for that feature
    pub details: Vec<Vec<FactorDetail>>,
    pub prediction: Vote,
}

impl LikelihoodTable {
    // Evaluate the posterior for one observed value per feature
    //
    // selection[f] is the value index chosen for feature f. The computation
    // is the walkthrough's whole lesson: multiply the prior by one likelihood
    // per feature, then normalize across classes.
    pub fn posterior(&self, selection: &[usize]) -> PosteriorResult {
        assert_eq!(
            selection.len(),
            self.features.len(),
            "One selected value per feature"
        );

        let num_classes = self.num_classes();
        let mut raw = self.priors.clone();
        let mut details = vec![Vec::with_capacity(self.features.len()); num_classes];

        for (feature_index, (feature, &value_index)) in
            self.features.iter().zip(selection).enumerate()
        {
            assert!(
                value_index < feature.values.len(),
                "Value index {} out of range for feature '{}'",
                value_index,
                feature.name
            );

            for class_index in 0..num_classes {
                let probability = feature.probs[value_index][class_index];
                raw[class_index] *= probability;
                details[class_index].push(FactorDetail {
                    feature: feature_index,
                    value: value_index,
                    probability,
                });
            }
        }

        let total: f64 = raw.iter().sum();
        let normalized = if total > 0.0 {
            raw.iter().map(|&r| r / total).collect()
        } else {
            vec![0.0; num_classes]
        };

        // Vote on the raw products; normalization preserves order but the
        // all-zero case must still read as a tie
        let prediction = vote_on_products(&raw);

        PosteriorResult {
            raw,
            normalized,
            details,
            prediction,
        }
    }
}

// Strict-maximum vote over real-valued products
fn vote_on_products(raw: &[f64]) -> Vote {
    let max = raw.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        return Vote::Tie;
    }

    // Reduce to counts so the shared tally rule decides
    let winners: Vec<usize> = raw
        .iter()
        .enumerate()
        .filter(|&(_, &r)| r == max)
        .map(|(i, _)| i)
        .collect();
    let mut counts = vec![0usize; raw.len()];
    for &w in &winners {
        counts[w] = 1;
    }
    tally_vote(&counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{} != {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_textbook_sunny_cool_high_strong() {
        // The classic worked example: the strong-wind humid sunny day where
        // the model says stay home
        let table = LikelihoodTable::play_tennis();
        // Sunny, Cool, High, Strong
        let result = table.posterior(&[0, 2, 0, 1]);

        let expected_yes = 9.0 / 14.0 * (2.0 / 9.0) * (3.0 / 9.0) * (3.0 / 9.0) * (3.0 / 9.0);
        let expected_no = 5.0 / 14.0 * (3.0 / 5.0) * (1.0 / 5.0) * (4.0 / 5.0) * (3.0 / 5.0);
        assert_close(result.raw[0], expected_yes);
        assert_close(result.raw[1], expected_no);

        assert_close(result.normalized[0] + result.normalized[1], 1.0);
        assert!(result.normalized[1] > result.normalized[0]);
        assert_eq!(result.prediction, Vote::Majority(1));
    }

    #[test]
    fn test_overcast_day_prefers_playing() {
        // Overcast has zero likelihood under "No", so "Yes" takes the whole
        // posterior mass
        let table = LikelihoodTable::play_tennis();
        // Overcast, Mild, Normal, Weak
        let result = table.posterior(&[1, 1, 1, 0]);

        assert_eq!(result.prediction, Vote::Majority(0));
        assert_close(result.normalized[0], 1.0);
        assert_close(result.normalized[1], 0.0);
    }

    #[test]
    fn test_details_record_every_factor() {
        let table = LikelihoodTable::play_tennis();
        let result = table.posterior(&[0, 0, 0, 0]);

        assert_eq!(result.details.len(), 2);
        for class_details in &result.details {
            assert_eq!(class_details.len(), 4);
        }
        // First factor for "Yes" is P(Sunny | Yes)
        assert_close(result.details[0][0].probability, 2.0 / 9.0);
        // First factor for "No" is P(Sunny | No)
        assert_close(result.details[1][0].probability, 3.0 / 5.0);
    }

    #[test]
    fn test_equal_products_tie() {
        let table = LikelihoodTable::new(
            vec!["A", "B"],
            vec![0.5, 0.5],
            vec![Feature {
                name: "F",
                values: vec!["x"],
                probs: vec![vec![0.4, 0.4]],
            }],
        );
        let result = table.posterior(&[0]);
        assert_eq!(result.prediction, Vote::Tie);
        assert_close(result.normalized[0], 0.5);
    }

    #[test]
    fn test_all_zero_products_tie_without_dividing() {
        let table = LikelihoodTable::new(
            vec!["A", "B"],
            vec![0.5, 0.5],
            vec![Feature {
                name: "F",
                values: vec!["x"],
                probs: vec![vec![0.0, 0.0]],
            }],
        );
        let result = table.posterior(&[0]);
        assert_eq!(result.prediction, Vote::Tie);
        assert_eq!(result.normalized, vec![0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_rejects_bad_value_index() {
        LikelihoodTable::play_tennis().posterior(&[9, 0, 0, 0]);
    }
}
