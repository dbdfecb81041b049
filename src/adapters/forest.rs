//! Random forest classifier.
//!
//! Each tree is a flat node array rooted at index 0. A row follows the left
//! child while `row[feature] <= threshold`; the forest predicts the class
//! with the most leaf votes.

use serde::{Deserialize, Serialize};

use crate::ports::{check_row, Classifier, InferenceError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children always sit after their parent, so traversal terminates.
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!("node {idx} splits on feature {feature} of {n_features}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { leaf } => {
                    if leaf >= n_classes {
                        return Err(format!("node {idx} is a leaf for class {leaf} of {n_classes}"));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, row: &[f64]) -> usize {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { leaf } => return leaf,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Forest parameters exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// # Errors
    /// Returns a description of the first inconsistency found.
    pub fn validate(&self) -> Result<(), String> {
        if self.n_features == 0 {
            return Err("forest has zero features".into());
        }
        if self.n_classes < 2 {
            return Err(format!("forest needs at least 2 classes, got {}", self.n_classes));
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".into());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.n_classes)
                .map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }

    /// Per-class vote counts for one row.
    #[must_use]
    pub fn votes(&self, row: &[f64]) -> Vec<u32> {
        let mut votes = vec![0u32; self.n_classes];
        for tree in &self.trees {
            votes[tree.predict(row)] += 1;
        }
        votes
    }
}

impl Classifier for ForestModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_row(&self, row: &[f64]) -> Result<usize, InferenceError> {
        check_row(self.n_features, row)?;

        let votes = self.votes(row);
        let mut best = 0;
        for (class, count) in votes.iter().enumerate().skip(1) {
            if *count > votes[best] {
                best = class;
            }
        }
        Ok(best)
    }
}
