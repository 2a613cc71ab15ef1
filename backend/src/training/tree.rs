//! CART regression tree fitting.
//!
//! Splits minimize the summed squared error of the two children. Candidate
//! thresholds are midpoints between adjacent distinct feature values, so a
//! threshold never equals an observed value.

use crate::artifact::{Node, RegressionTree};

use super::dataset::Dataset;

/// Reduction in squared error below which a split is not worth making.
const MIN_IMPROVEMENT: f64 = 1e-12;

/// Stopping parameters for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    sse: f64,
}

/// Fit a tree on the rows listed in `sample` (duplicates allowed).
pub fn fit_tree(data: &Dataset, sample: &[usize], params: &TreeParams) -> RegressionTree {
    let mut builder = TreeBuilder {
        data,
        params,
        nodes: Vec::new(),
    };
    let mut rows = sample.to_vec();
    builder.build(&mut rows, 0);
    RegressionTree::new(builder.nodes)
}

struct TreeBuilder<'a> {
    data: &'a Dataset,
    params: &'a TreeParams,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    /// Build the subtree for `rows` and return its root index.
    ///
    /// The parent slot is pushed before its children so child indices are
    /// always greater than the parent's.
    fn build(&mut self, rows: &mut [usize], depth: usize) -> u32 {
        let idx = self.nodes.len();
        self.nodes.push(Node::leaf(self.mean(rows)));

        if rows.is_empty()
            || depth >= self.params.max_depth
            || rows.len() < self.params.min_samples_split
        {
            return idx as u32;
        }

        let Some(split) = self.best_split(rows) else {
            return idx as u32;
        };

        let (mut left, mut right): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .partition(|&&r| self.data.value(r, split.feature) < split.threshold);
        if left.is_empty() || right.is_empty() {
            return idx as u32;
        }

        let left_idx = self.build(&mut left, depth + 1);
        let right_idx = self.build(&mut right, depth + 1);
        self.nodes[idx] = Node::split(split.feature as u32, split.threshold, left_idx, right_idx);
        idx as u32
    }

    fn mean(&self, rows: &[usize]) -> f64 {
        if rows.is_empty() {
            return 0.0;
        }
        rows.iter().map(|&r| self.data.targets[r]).sum::<f64>() / rows.len() as f64
    }

    fn best_split(&self, rows: &mut [usize]) -> Option<Split> {
        let n = rows.len();
        let total_sum: f64 = rows.iter().map(|&r| self.data.targets[r]).sum();
        let total_sq: f64 = rows.iter().map(|&r| self.data.targets[r].powi(2)).sum();
        let parent_sse = total_sq - total_sum * total_sum / n as f64;

        let mut best: Option<Split> = None;
        for feature in 0..self.data.n_features() {
            rows.sort_by(|&a, &b| {
                self.data
                    .value(a, feature)
                    .total_cmp(&self.data.value(b, feature))
            });

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for i in 1..n {
                let y = self.data.targets[rows[i - 1]];
                left_sum += y;
                left_sq += y * y;

                let prev = self.data.value(rows[i - 1], feature);
                let next = self.data.value(rows[i], feature);
                if prev >= next {
                    continue;
                }

                let n_left = i as f64;
                let n_right = (n - i) as f64;
                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / n_left)
                    + (right_sq - right_sum * right_sum / n_right);

                if best.map_or(true, |b| sse < b.sse) {
                    best = Some(Split {
                        feature,
                        threshold: (prev + next) / 2.0,
                        sse,
                    });
                }
            }
        }

        best.filter(|b| parent_sse - b.sse > MIN_IMPROVEMENT)
    }
}
