//! Bootstrap-aggregated regression trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

use super::tree::{RegressionTree, TreeConfig};
use super::EtaRegressor;

/// Forest hyper-parameters.
///
/// Defaults: 250 trees, depth 15, at least 5 samples per leaf, seed 42.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Draw a bootstrap sample per tree; when false every tree sees all rows.
    pub bootstrap: bool,
    /// Tree `i` is seeded with `seed + i`.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 250,
            max_depth: Some(15),
            min_samples_split: 2,
            min_samples_leaf: 5,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestConfig {
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split.max(2),
            min_samples_leaf: self.min_samples_leaf.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
    n_features: usize,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    pub fn fit(x: &[Vec<f64>], y: &[f64], config: &ForestConfig) -> Result<Self, ModelError> {
        Self::fit_with_progress(x, y, config, || {})
    }

    /// Fit the forest, calling `on_tree_fitted` once per finished tree.
    ///
    /// Trees are fitted in parallel; the result does not depend on the number
    /// of worker threads.
    pub fn fit_with_progress<F>(
        x: &[Vec<f64>],
        y: &[f64],
        config: &ForestConfig,
        on_tree_fitted: F,
    ) -> Result<Self, ModelError>
    where
        F: Fn() + Sync,
    {
        if x.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if x.len() != y.len() {
            return Err(ModelError::LengthMismatch {
                rows: x.len(),
                targets: y.len(),
            });
        }
        if config.n_estimators == 0 {
            return Err(ModelError::InvalidConfig(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        let n_features = x[0].len();
        if let Some(bad) = x.iter().find(|row| row.len() != n_features) {
            return Err(ModelError::FeatureCountMismatch {
                expected: n_features,
                actual: bad.len(),
            });
        }

        let tree_config = config.tree_config();
        let n_rows = x.len();

        let fitted: Vec<(RegressionTree, Vec<f64>)> = (0..config.n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                let indices: Vec<usize> = if config.bootstrap {
                    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(tree_idx as u64));
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };
                let fitted = RegressionTree::fit(x, y, &indices, tree_config);
                on_tree_fitted();
                fitted
            })
            .collect();

        let mut feature_importances = vec![0.0; n_features];
        let mut trees = Vec::with_capacity(fitted.len());
        for (tree, importances) in fitted {
            let total: f64 = importances.iter().sum();
            if total > 0.0 {
                for (acc, value) in feature_importances.iter_mut().zip(&importances) {
                    *acc += value / total;
                }
            }
            trees.push(tree);
        }
        let total: f64 = feature_importances.iter().sum();
        if total > 0.0 {
            feature_importances.iter_mut().for_each(|v| *v /= total);
        }

        Ok(Self {
            config: config.clone(),
            trees,
            n_features,
            feature_importances,
        })
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Impurity-based importance per feature column; sums to 1 unless no
    /// tree ever split.
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Structural check for a forest read back from disk.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Corrupt("forest has no trees".to_string()));
        }
        if self.feature_importances.len() != self.n_features {
            return Err(ModelError::Corrupt(format!(
                "{} feature importances for {} features",
                self.feature_importances.len(),
                self.n_features
            )));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate()?;
            if tree.n_features() != self.n_features {
                return Err(ModelError::Corrupt(format!(
                    "tree {idx} expects {} features, forest has {}",
                    tree.n_features(),
                    self.n_features
                )));
            }
        }
        Ok(())
    }

    /// Mean prediction of all trees. The row must have `n_features` values.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        sum / self.trees.len() as f64
    }
}

impl EtaRegressor for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        Ok(self.predict(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// y = 2 * x0 + 10 * x1 on a small grid.
    fn linear_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for a in 0..30 {
            for b in 0..2 {
                x.push(vec![a as f64, b as f64]);
                y.push(2.0 * a as f64 + 10.0 * b as f64);
            }
        }
        (x, y)
    }

    fn small_config() -> ForestConfig {
        ForestConfig::default()
            .with_n_estimators(12)
            .with_min_samples_leaf(1)
            .with_max_depth(Some(8))
    }

    #[test]
    fn fits_a_simple_relationship() {
        let (x, y) = linear_data();
        let forest = RandomForest::fit(&x, &y, &small_config()).expect("fit");
        assert_eq!(forest.n_trees(), 12);
        let low = forest.predict(&[2.0, 0.0]);
        let high = forest.predict(&[27.0, 1.0]);
        assert!(low < high);
        assert!((high - 64.0).abs() < 8.0, "high prediction {high}");
    }

    #[test]
    fn same_seed_gives_identical_forest() {
        let (x, y) = linear_data();
        let a = RandomForest::fit(&x, &y, &small_config()).expect("fit");
        let b = RandomForest::fit(&x, &y, &small_config()).expect("fit");
        assert_eq!(a, b);
        let row = [13.0, 1.0];
        assert_eq!(a.predict(&row), a.predict(&row));
    }

    #[test]
    fn importances_are_normalized() {
        let (x, y) = linear_data();
        let forest = RandomForest::fit(&x, &y, &small_config()).expect("fit");
        let total: f64 = forest.feature_importances().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(forest.feature_importances()[0] > forest.feature_importances()[1]);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            RandomForest::fit(&[], &[], &small_config()),
            Err(ModelError::EmptyTrainingSet)
        ));
        assert!(matches!(
            RandomForest::fit(&[vec![1.0]], &[1.0, 2.0], &small_config()),
            Err(ModelError::LengthMismatch { rows: 1, targets: 2 })
        ));
        assert!(matches!(
            RandomForest::fit(&[vec![1.0], vec![1.0, 2.0]], &[1.0, 2.0], &small_config()),
            Err(ModelError::FeatureCountMismatch { expected: 1, actual: 2 })
        ));
        assert!(matches!(
            RandomForest::fit(&[vec![1.0]], &[1.0], &small_config().with_n_estimators(0)),
            Err(ModelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn fitted_forest_validates() {
        let (x, y) = linear_data();
        let forest = RandomForest::fit(&x, &y, &small_config()).expect("fit");
        assert!(forest.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_and_mismatched_forests() {
        let (x, y) = linear_data();
        let forest = RandomForest::fit(&x, &y, &small_config()).expect("fit");

        let mut empty = forest.clone();
        empty.trees.clear();
        assert!(matches!(empty.validate(), Err(ModelError::Corrupt(_))));

        let mut wider = forest;
        wider.n_features = 3;
        wider.feature_importances.push(0.0);
        assert!(matches!(wider.validate(), Err(ModelError::Corrupt(_))));
    }

    #[test]
    fn predict_row_checks_width() {
        let (x, y) = linear_data();
        let forest = RandomForest::fit(&x, &y, &small_config()).expect("fit");
        assert!(forest.predict_row(&[1.0, 0.0]).is_ok());
        assert!(matches!(
            forest.predict_row(&[1.0]),
            Err(ModelError::FeatureCountMismatch { expected: 2, actual: 1 })
        ));
    }
}
