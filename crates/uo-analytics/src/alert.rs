//! Alert classification over scored sensor batches.

use serde::{Deserialize, Serialize};
use uo_core::{EvalError, EvalResult};

/// How many of the highest-scoring rows to keep in the summary.
const WORST_ROWS_KEPT: usize = 5;
/// Fault fraction above which a batch escalates from Warning to Critical.
const CRITICAL_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSummary {
    pub level: AlertLevel,
    pub total_rows: usize,
    pub fault_count: usize,
    pub fault_fraction: f64,
    /// (row index, anomaly score) of the worst offenders, highest first
    pub worst_rows: Vec<(usize, f64)>,
}

/// Classify one batch of (score, is_anomaly) pairs.
pub fn classify_batch(scores: &[f64], anomalies: &[bool]) -> EvalResult<AlertSummary> {
    if scores.len() != anomalies.len() {
        return Err(EvalError::domain("score and flag lengths differ"));
    }
    if scores.is_empty() {
        return Err(EvalError::domain("batch must not be empty"));
    }

    let fault_count = anomalies.iter().filter(|&&a| a).count();
    let fault_fraction = fault_count as f64 / scores.len() as f64;
    let level = if fault_count == 0 {
        AlertLevel::Normal
    } else if fault_fraction <= CRITICAL_FRACTION {
        AlertLevel::Warning
    } else {
        AlertLevel::Critical
    };

    let mut flagged: Vec<(usize, f64)> = scores
        .iter()
        .zip(anomalies)
        .enumerate()
        .filter(|&(_, (_, &a))| a)
        .map(|(i, (&s, _))| (i, s))
        .collect();
    flagged.sort_by(|a, b| b.1.total_cmp(&a.1));
    flagged.truncate(WORST_ROWS_KEPT);

    Ok(AlertSummary {
        level,
        total_rows: scores.len(),
        fault_count,
        fault_fraction,
        worst_rows: flagged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_batch_is_normal() {
        let summary = classify_batch(&[0.3, 0.4, 0.35], &[false, false, false]).unwrap();
        assert_eq!(summary.level, AlertLevel::Normal);
        assert_eq!(summary.fault_count, 0);
        assert!(summary.worst_rows.is_empty());
    }

    #[test]
    fn sparse_faults_warn() {
        let scores = vec![0.3; 20];
        let mut flags = vec![false; 20];
        flags[7] = true;
        let summary = classify_batch(&scores, &flags).unwrap();
        assert_eq!(summary.level, AlertLevel::Warning);
        assert_eq!(summary.worst_rows, vec![(7, 0.3)]);
    }

    #[test]
    fn heavy_faults_escalate_to_critical() {
        let scores = vec![0.9, 0.8, 0.3, 0.2];
        let flags = vec![true, true, false, false];
        let summary = classify_batch(&scores, &flags).unwrap();
        assert_eq!(summary.level, AlertLevel::Critical);
        assert_eq!(summary.fault_count, 2);
        // Highest score first
        assert_eq!(summary.worst_rows[0], (0, 0.9));
        assert_eq!(summary.worst_rows[1], (1, 0.8));
    }

    #[test]
    fn worst_rows_capped() {
        let scores: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let flags = vec![true; 10];
        let summary = classify_batch(&scores, &flags).unwrap();
        assert_eq!(summary.worst_rows.len(), 5);
        assert_eq!(summary.worst_rows[0].0, 9);
    }
}
