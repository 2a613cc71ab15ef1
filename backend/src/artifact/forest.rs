//! Regression trees and the random forest that averages them.
//!
//! Trees are stored as flat node arrays with the root at index 0. Children
//! always live at a higher index than their parent, which [`RegressionTree::validate`]
//! checks on load so traversal is guaranteed to terminate.

use serde::{Deserialize, Serialize};

/// A node in a regression tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Internal split node; go left if `features[feature] < threshold`
    Split {
        feature: u32,
        threshold: f64,
        left: u32,
        right: u32,
    },
    /// Leaf node with the predicted value
    Leaf { value: f64 },
}

impl Node {
    pub fn split(feature: u32, threshold: f64, left: u32, right: u32) -> Self {
        Self::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    pub fn leaf(value: f64) -> Self {
        Self::Leaf { value }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// A single regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Depth of the tree; a lone leaf has depth 0.
    ///
    /// Children that do not point forward are not followed.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match nodes.get(idx) {
                Some(Node::Split { left, right, .. }) => {
                    let child = |next: u32| {
                        let next = next as usize;
                        if next > idx {
                            walk(nodes, next)
                        } else {
                            0
                        }
                    };
                    1 + child(*left).max(child(*right))
                }
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }

    /// Predict for a single row of features.
    ///
    /// Returns NaN if the walk leaves the node array, which only happens for
    /// trees that were not validated.
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        let mut idx = 0usize;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let Some(x) = features.get(*feature as usize) else {
                        return f64::NAN;
                    };
                    let next = if *x < *threshold { *left } else { *right };
                    let next = next as usize;
                    if next <= idx {
                        return f64::NAN;
                    }
                    idx = next;
                }
                None => return f64::NAN,
            }
        }
    }

    /// Check structural soundness against the number of model features.
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        let n_nodes = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature as usize >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} but the model has {} features",
                            idx, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", idx));
                    }
                    for child in [*left as usize, *right as usize] {
                        if child <= idx || child >= n_nodes {
                            return Err(format!(
                                "node {} points to invalid child {} (tree has {} nodes)",
                                idx, child, n_nodes
                            ));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} has a non-finite value", idx));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Ensemble of regression trees; the prediction is the mean over trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    pub fn new(trees: Vec<RegressionTree>) -> Self {
        Self { trees }
    }

    #[inline]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Predict for a single row of features. NaN for an empty forest.
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return f64::NAN;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Total number of leaves across all trees.
    pub fn n_leaves(&self) -> usize {
        self.trees.iter().map(RegressionTree::n_leaves).sum()
    }

    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}
