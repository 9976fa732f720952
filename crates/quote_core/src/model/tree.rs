//! CART regression tree with a squared-error split criterion.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Stopping rules for tree growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth; `None` grows until the other rules stop it.
    pub max_depth: Option<usize>,
    /// A node with fewer samples than this becomes a leaf.
    pub min_samples_split: usize,
    /// Every leaf keeps at least this many samples.
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// Relative squared error below which a node counts as pure.
const PURE_NODE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    n_features: usize,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    child_sse: f64,
}

/// Sum, sum of squares and count of a sample of targets.
#[derive(Clone, Copy, Default)]
struct Moments {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl Moments {
    fn push(&mut self, y: f64) {
        self.sum += y;
        self.sum_sq += y * y;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Sum of squared deviations from the mean.
    fn sse(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum_sq - self.sum * self.sum / self.count as f64).max(0.0)
    }
}

struct Builder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [f64],
    config: TreeConfig,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

impl RegressionTree {
    /// Fit a tree on the rows selected by `sample_indices` (duplicates allowed,
    /// which is how bootstrap samples are passed in).
    ///
    /// Returns the tree together with the raw impurity decrease credited to
    /// each feature.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        sample_indices: &[usize],
        config: TreeConfig,
    ) -> (Self, Vec<f64>) {
        let n_features = x.first().map_or(0, Vec::len);
        let mut builder = Builder {
            x,
            y,
            config,
            nodes: Vec::new(),
            importances: vec![0.0; n_features],
        };
        let mut indices = sample_indices.to_vec();
        builder.grow(&mut indices, 0);
        (
            Self {
                nodes: builder.nodes,
                n_features,
            },
            builder.importances,
        )
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], at: usize) -> usize {
            match nodes[at] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Check the node graph of a decoded tree: every split reads a known
    /// feature and points forward at existing nodes, so `predict` always
    /// terminates in a leaf.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Corrupt("tree has no nodes".to_string()));
        }
        for (at, node) in self.nodes.iter().enumerate() {
            let (feature, left, right) = match *node {
                Node::Leaf { .. } => continue,
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => (feature, left, right),
            };
            if feature >= self.n_features {
                return Err(ModelError::Corrupt(format!(
                    "node {at} splits on feature {feature} but the tree has {} features",
                    self.n_features
                )));
            }
            for child in [left, right] {
                if child <= at || child >= self.nodes.len() {
                    return Err(ModelError::Corrupt(format!(
                        "node {at} points at invalid child {child}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Predict a single row. The row must have [`Self::n_features`] values.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut at = 0;
        loop {
            match self.nodes[at] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

impl Builder<'_> {
    fn grow(&mut self, indices: &mut [usize], depth: usize) -> usize {
        let mut moments = Moments::default();
        for &i in indices.iter() {
            moments.push(self.y[i]);
        }
        let node_sse = moments.sse();

        let at_max_depth = self.config.max_depth.is_some_and(|max| depth >= max);
        let too_small = indices.len() < self.config.min_samples_split
            || indices.len() < 2 * self.config.min_samples_leaf;
        if at_max_depth || too_small || node_sse <= PURE_NODE_TOLERANCE * (1.0 + moments.sum_sq) {
            return self.push_leaf(moments.mean());
        }

        let Some(split) = self.best_split(indices, node_sse) else {
            return self.push_leaf(moments.mean());
        };

        self.importances[split.feature] += node_sse - split.child_sse;

        let x = self.x;
        let mid = partition(indices, |i| x[i][split.feature] <= split.threshold);
        let at = self.push_leaf(moments.mean());
        let (left_indices, right_indices) = indices.split_at_mut(mid);
        let left = self.grow(left_indices, depth + 1);
        let right = self.grow(right_indices, depth + 1);
        self.nodes[at] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        at
    }

    fn push_leaf(&mut self, value: f64) -> usize {
        self.nodes.push(Node::Leaf { value });
        self.nodes.len() - 1
    }

    fn best_split(&self, indices: &[usize], node_sse: f64) -> Option<SplitCandidate> {
        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let n_features = self.importances.len();
        let mut best: Option<SplitCandidate> = None;
        let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(n);

        for feature in 0..n_features {
            pairs.clear();
            pairs.extend(indices.iter().map(|&i| (self.x[i][feature], self.y[i])));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            if pairs[0].0 == pairs[n - 1].0 {
                continue;
            }

            let mut total = Moments::default();
            for &(_, y) in &pairs {
                total.push(y);
            }

            let mut left = Moments::default();
            for split_at in 1..n {
                left.push(pairs[split_at - 1].1);
                if split_at < min_leaf || n - split_at < min_leaf {
                    continue;
                }
                let (lo, hi) = (pairs[split_at - 1].0, pairs[split_at].0);
                if lo == hi {
                    continue;
                }
                let right = Moments {
                    sum: total.sum - left.sum,
                    sum_sq: total.sum_sq - left.sum_sq,
                    count: total.count - left.count,
                };
                let child_sse = left.sse() + right.sse();
                if best.as_ref().map_or(true, |b| child_sse < b.child_sse) {
                    let mut threshold = lo + (hi - lo) / 2.0;
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        child_sse,
                    });
                }
            }
        }

        best.filter(|b| b.child_sse < node_sse)
    }
}

/// Reorder `items` so every element matching `pred` comes first; returns the
/// number of matching elements.
fn partition(items: &mut [usize], pred: impl Fn(usize) -> bool) -> usize {
    let mut next = 0;
    for i in 0..items.len() {
        if pred(items[i]) {
            items.swap(next, i);
            next += 1;
        }
    }
    next
}
