//! Isolation Forest anomaly scoring.
//!
//! Anomalies isolate in few random splits, so short average path lengths
//! across the ensemble mean high anomaly scores. Fitting is explicit and
//! returns an owned model; scoring borrows it. A fixed seed gives a fully
//! deterministic ensemble.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uo_core::{EvalError, EvalResult};

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

#[derive(Debug, Clone, Copy)]
pub struct ForestConfig {
    pub n_trees: usize,
    /// Rows subsampled per tree (capped at the data size)
    pub sample_size: usize,
    /// Expected anomaly fraction, sets the prediction threshold
    pub contamination: f64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            sample_size: 256,
            contamination: 0.05,
        }
    }
}

impl ForestConfig {
    fn validate(&self) -> EvalResult<()> {
        if self.n_trees == 0 {
            return Err(EvalError::domain("forest needs at least one tree"));
        }
        if self.sample_size < 2 {
            return Err(EvalError::domain("sample size must be at least 2"));
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(EvalError::domain(
                "contamination must be within (0, 0.5]",
            ));
        }
        Ok(())
    }
}

enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

pub struct IsolationForest {
    trees: Vec<Node>,
    /// Normalization c(sample_size) shared by all trees
    c_norm: f64,
    /// Score above which a row is called anomalous
    pub threshold: f64,
    num_features: usize,
}

impl IsolationForest {
    pub fn fit(data: &[Vec<f64>], config: &ForestConfig, seed: u64) -> EvalResult<Self> {
        config.validate()?;
        if data.len() < 2 {
            return Err(EvalError::domain("forest needs at least 2 rows"));
        }
        let num_features = data[0].len();
        if num_features == 0 {
            return Err(EvalError::domain("forest needs at least one feature"));
        }
        if data.iter().any(|row| row.len() != num_features) {
            return Err(EvalError::domain("rows have inconsistent widths"));
        }
        if data
            .iter()
            .any(|row| row.iter().any(|v| !v.is_finite()))
        {
            return Err(EvalError::numerical("training data contains non-finite values"));
        }

        let sample_size = config.sample_size.min(data.len());
        let max_depth = (sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut trees = Vec::with_capacity(config.n_trees);
        for _ in 0..config.n_trees {
            let indices =
                rand::seq::index::sample(&mut rng, data.len(), sample_size).into_vec();
            trees.push(build_tree(data, &indices, 0, max_depth, &mut rng));
        }

        let mut forest = Self {
            trees,
            c_norm: average_path_length(sample_size),
            threshold: 0.0,
            num_features,
        };

        // Threshold at the contamination quantile of the training scores.
        let mut scores: Vec<f64> = data
            .iter()
            .map(|row| forest.score_unchecked(row))
            .collect();
        scores.sort_by(|a, b| b.total_cmp(a));
        let k = ((config.contamination * data.len() as f64).ceil() as usize)
            .clamp(1, data.len());
        forest.threshold = scores[k - 1];
        Ok(forest)
    }

    /// Anomaly score in (0, 1); values near 1 isolate quickly.
    pub fn score(&self, row: &[f64]) -> EvalResult<f64> {
        if row.len() != self.num_features {
            return Err(EvalError::domain(format!(
                "expected {} features, got {}",
                self.num_features,
                row.len()
            )));
        }
        Ok(self.score_unchecked(row))
    }

    pub fn predict(&self, row: &[f64]) -> EvalResult<bool> {
        Ok(self.score(row)? >= self.threshold)
    }

    fn score_unchecked(&self, row: &[f64]) -> f64 {
        let mean_path: f64 = self
            .trees
            .iter()
            .map(|tree| path_length(tree, row, 0))
            .sum::<f64>()
            / self.trees.len() as f64;
        2f64.powf(-mean_path / self.c_norm)
    }
}

/// Expected path length of an unsuccessful BST search over `n` points.
fn average_path_length(n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let n = n as f64;
    let harmonic = (n - 1.0).ln() + EULER_MASCHERONI;
    2.0 * harmonic - 2.0 * (n - 1.0) / n
}

fn build_tree(
    data: &[Vec<f64>],
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= max_depth || indices.len() <= 1 {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    // Pick a random feature with spread; give up after a few draws so a
    // batch of duplicate rows still terminates.
    let num_features = data[indices[0]].len();
    let mut split = None;
    for _ in 0..num_features.max(4) {
        let feature = rng.random_range(0..num_features);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &i in indices {
            lo = lo.min(data[i][feature]);
            hi = hi.max(data[i][feature]);
        }
        if hi > lo {
            split = Some((feature, rng.random_range(lo..hi)));
            break;
        }
    }
    let Some((feature, threshold)) = split else {
        return Node::Leaf {
            size: indices.len(),
        };
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| data[i][feature] < threshold);
    if left.is_empty() || right.is_empty() {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_tree(data, &left, depth + 1, max_depth, rng)),
        right: Box::new(build_tree(data, &right, depth + 1, max_depth, rng)),
    }
}

fn path_length(node: &Node, row: &[f64], depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + average_path_length(*size),
        Node::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            let next = if row[*feature] < *threshold {
                left
            } else {
                right
            };
            path_length(next, row, depth + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Tight cluster around the origin plus one far outlier.
    fn cluster_with_outlier() -> Vec<Vec<f64>> {
        let mut data: Vec<Vec<f64>> = (0..200)
            .map(|i| {
                let a = (i % 20) as f64 * 0.01;
                let b = (i / 20) as f64 * 0.01;
                vec![a, b]
            })
            .collect();
        data.push(vec![10.0, 10.0]);
        data
    }

    #[test]
    fn outlier_scores_above_cluster() {
        let data = cluster_with_outlier();
        let forest = IsolationForest::fit(&data, &ForestConfig::default(), 42).unwrap();
        let outlier = forest.score(&[10.0, 10.0]).unwrap();
        let inlier = forest.score(&[0.05, 0.05]).unwrap();
        assert!(outlier > inlier);
        assert!(forest.predict(&[10.0, 10.0]).unwrap());
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let data = cluster_with_outlier();
        let config = ForestConfig::default();
        let a = IsolationForest::fit(&data, &config, 7).unwrap();
        let b = IsolationForest::fit(&data, &config, 7).unwrap();
        for row in &data {
            assert_relative_eq!(
                a.score(row).unwrap(),
                b.score(row).unwrap(),
                epsilon = 0.0
            );
        }
        assert_relative_eq!(a.threshold, b.threshold, epsilon = 0.0);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let data = cluster_with_outlier();
        let forest = IsolationForest::fit(&data, &ForestConfig::default(), 1).unwrap();
        for row in &data {
            let s = forest.score(row).unwrap();
            assert!(s > 0.0 && s < 1.0);
        }
    }

    #[test]
    fn wrong_width_rejected() {
        let data = cluster_with_outlier();
        let forest = IsolationForest::fit(&data, &ForestConfig::default(), 1).unwrap();
        assert!(forest.score(&[1.0]).is_err());
    }

    #[test]
    fn bad_contamination_rejected() {
        let config = ForestConfig {
            contamination: 0.0,
            ..ForestConfig::default()
        };
        let data = cluster_with_outlier();
        assert!(IsolationForest::fit(&data, &config, 1).is_err());
    }
}
