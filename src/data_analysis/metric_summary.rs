// src/data_analysis/metric_summary.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt; // .min() / .max() on Array1
use std::fmt;

/// NaN-aware description of the metric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub count: usize,
    pub finite_count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
}

/// Summarizes `metric`, ignoring NaN and infinite values.
pub fn summarize_metric(metric: &[f64]) -> MetricSummary {
    let finite: Array1<f64> = metric.iter().copied().filter(|v| v.is_finite()).collect();

    let median = if finite.is_empty() {
        None
    } else {
        let mut sorted = finite.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        Some(if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        })
    };

    MetricSummary {
        count: metric.len(),
        finite_count: finite.len(),
        mean: finite.mean(),
        min: finite.min().ok().copied(),
        max: finite.max().ok().copied(),
        median,
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for MetricSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples ({} finite), mean {}, median {}, min {}, max {}",
            self.count,
            self.finite_count,
            format_optional(self.mean),
            format_optional(self.median),
            format_optional(self.min),
            format_optional(self.max)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary_ignores_nan() {
        let summary = summarize_metric(&[1.0, f64::NAN, 3.0, f64::INFINITY, 8.0]);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.finite_count, 3);
        assert_relative_eq!(summary.mean.unwrap(), 4.0);
        assert_eq!(summary.min, Some(1.0));
        assert_eq!(summary.max, Some(8.0));
        assert_eq!(summary.median, Some(3.0));
    }

    #[test]
    fn test_even_count_median() {
        let summary = summarize_metric(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(summary.median, Some(2.5));
    }

    #[test]
    fn test_no_finite_values() {
        let summary = summarize_metric(&[f64::NAN]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.finite_count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.min, None);
        assert_eq!(summary.max, None);
        assert_eq!(summary.median, None);
        assert!(summary.to_string().contains("mean n/a"));
    }
}

// src/data_analysis/metric_summary.rs
