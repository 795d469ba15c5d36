use std::{fs, path::Path};

use serde::Deserialize;

use super::{ModelError, Predictor};
use crate::models::feature_record::{FeatureRecord, FEATURE_COLUMNS};

/// Regression forest exported as JSON.
///
/// ```json
/// {
///   "feature_names": ["sup_m2", "lat", "lon", "banos", "comuna_num", "ambientes", "dormitorios"],
///   "trees": [
///     { "nodes": [
///         { "kind": "split", "feature": 0, "threshold": 60.0, "left": 1, "right": 2 },
///         { "kind": "leaf", "value": 95000.0 },
///         { "kind": "leaf", "value": 150000.0 }
///     ] }
///   ]
/// }
/// ```
///
/// Children always come after their parent in `nodes`, which is checked when
/// the artifact is loaded, so every walk ends at a leaf.
#[derive(Debug, Clone, Deserialize)]
pub struct ForestModel {
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
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

impl ForestModel {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let contents = fs::read_to_string(path)?;
        ForestModel::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: ForestModel = serde_json::from_str(json)?;
        model.check()?;
        Ok(model)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn check(&self) -> Result<(), ModelError> {
        if self.feature_names != FEATURE_COLUMNS {
            return Err(ModelError::Artifact(format!(
                "expected features {:?}, artifact declares {:?}",
                FEATURE_COLUMNS, self.feature_names
            )));
        }

        if self.trees.is_empty() {
            return Err(ModelError::Artifact("forest has no trees".into()));
        }

        for (tree_index, tree) in self.trees.iter().enumerate() {
            tree.check()
                .map_err(|reason| ModelError::Artifact(format!("tree {tree_index}: {reason}")))?;
        }

        Ok(())
    }
}

impl RegressionTree {
    fn check(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("no nodes".into());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COLUMNS.len() {
                        return Err(format!("node {index} splits on unknown feature {feature}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if *child <= index || *child >= self.nodes.len() {
                            return Err(format!("node {index} points to invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {index} has a non-finite value"));
                    }
                }
            }
        }

        Ok(())
    }

    fn evaluate(&self, values: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if values[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

impl Predictor for ForestModel {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let values = record.values();
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::Evaluation(format!(
                "feature {} is not a finite number",
                FEATURE_COLUMNS[position]
            )));
        }

        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(&values)).sum();
        Ok(total / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        "random-forest"
    }
}
