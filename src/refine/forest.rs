//! Regression forest refiner.
//!
//! Each tree is stored flat: node `0` is the root, split nodes point at their
//! children by index, and `x[feature] <= threshold` goes left. The forest's
//! prediction is the mean of its trees' leaf values.
//!
//! Artifacts come from outside the crate, so traversal checks every index it
//! follows and bounds the walk by the node count (a cycle in the child links is
//! an error, not a hang).

use serde::{Deserialize, Serialize};

use super::{FeatureVector, RefineError, Refiner};

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
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn evaluate(&self, tree_idx: usize, features: &FeatureVector) -> Result<f64, RefineError> {
        let invalid = |reason: String| RefineError::InvalidTree {
            tree: tree_idx,
            reason,
        };

        let mut idx = 0usize;
        for _ in 0..self.nodes.len() {
            let node = self
                .nodes
                .get(idx)
                .ok_or_else(|| invalid(format!("node index {idx} out of range")))?;
            match *node {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = features
                        .get(feature)
                        .ok_or_else(|| invalid(format!("feature index {feature} out of range")))?;
                    idx = if x <= threshold { left } else { right };
                }
            }
        }

        Err(invalid("no leaf reached (empty tree or cyclic links)".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForestRefiner {
    trees: Vec<RegressionTree>,
}

impl ForestRefiner {
    pub fn new(trees: Vec<RegressionTree>) -> Result<Self, RefineError> {
        if trees.is_empty() {
            return Err(RefineError::InvalidTree {
                tree: 0,
                reason: "forest has no trees".to_string(),
            });
        }
        Ok(Self { trees })
    }
}

impl Refiner for ForestRefiner {
    fn predict(&self, features: &FeatureVector) -> Result<f64, RefineError> {
        let mut sum = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            sum += tree.evaluate(i, features)?;
        }
        let y = sum / self.trees.len() as f64;
        if y.is_finite() { Ok(y) } else { Err(RefineError::NonFinite) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: left },
                TreeNode::Leaf { value: right },
            ],
        }
    }

    #[test]
    fn forest_averages_tree_outputs() {
        let forest = ForestRefiner::new(vec![stump(0, 29.0, 28.0, 31.0), stump(2, 40.0, 30.0, 45.0)]).unwrap();
        let y = forest.predict(&FeatureVector::new(28.0, 2.0, 28.5)).unwrap();
        assert!((y - 29.0).abs() < 1e-12);
    }

    #[test]
    fn bad_feature_index_fails() {
        let forest = ForestRefiner::new(vec![stump(7, 1.0, 1.0, 2.0)]).unwrap();
        let err = forest.predict(&FeatureVector::new(1.0, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, RefineError::InvalidTree { tree: 0, .. }));
    }

    #[test]
    fn cyclic_tree_does_not_hang() {
        let tree = RegressionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 0,
            }],
        };
        let forest = ForestRefiner::new(vec![tree]).unwrap();
        assert!(forest.predict(&FeatureVector::new(1.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn empty_forest_is_rejected() {
        assert!(ForestRefiner::new(Vec::new()).is_err());
    }

    #[test]
    fn nodes_deserialize_untagged() {
        let tree: RegressionTree = serde_json::from_str(
            r#"{"nodes":[{"feature":1,"threshold":2.5,"left":1,"right":2},{"value":27.0},{"value":29.0}]}"#,
        )
        .unwrap();
        assert_eq!(tree, stump(1, 2.5, 27.0, 29.0));
    }
}
