use crate::analyzer::insights::category_insights;
use crate::analyzer::recommendations::recommendations_at;
use crate::model::{DataRecord, Summary};
use chrono::Utc;

/// Trait defining the interface for a record analyzer.
pub trait Analyzer {
    fn calculate_summary(&self, records: &[DataRecord]) -> Summary;
    fn generate_insights(&self, records: &[DataRecord]) -> Vec<String>;
    fn generate_recommendations(&self, records: &[DataRecord]) -> Vec<String>;
}

/// Stateless implementation of the record analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    /// Calculates count, mean, maximum and minimum of record values.
    /// Every statistic is zero for an empty collection.
    fn calculate_summary(&self, records: &[DataRecord]) -> Summary {
        if records.is_empty() {
            return Summary::default();
        }
        let count = records.len() as f64;
        let max = records
            .iter()
            .map(DataRecord::value)
            .fold(f64::NEG_INFINITY, f64::max);
        let min = records
            .iter()
            .map(DataRecord::value)
            .fold(f64::INFINITY, f64::min);
        // Rounding can push the mean a few ulps past the extremes.
        let avg = mean_value(records).clamp(min, max);

        Summary {
            total_records: count,
            average_value: avg,
            max_value: max,
            min_value: min,
        }
    }

    fn generate_insights(&self, records: &[DataRecord]) -> Vec<String> {
        category_insights(records)
    }

    fn generate_recommendations(&self, records: &[DataRecord]) -> Vec<String> {
        recommendations_at(records, Utc::now())
    }
}

/// Arithmetic mean of record values, zero for an empty slice.
///
/// Accumulated incrementally so that large finite values never overflow.
pub fn mean_value(records: &[DataRecord]) -> f64 {
    records
        .iter()
        .map(DataRecord::value)
        .enumerate()
        .fold(0.0, |mean, (i, value)| {
            let n = (i + 1) as f64;
            mean + (value / n - mean / n)
        })
}

/// Population standard deviation of record values.
pub fn value_std_dev(records: &[DataRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let count = records.len() as f64;
    let mean = mean_value(records);
    // Halved deviations stay finite even when values span the whole f64 range.
    let half_deviations: Vec<f64> = records
        .iter()
        .map(|r| r.value() * 0.5 - mean * 0.5)
        .collect();
    let scale = half_deviations.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    let variance = half_deviations
        .iter()
        .map(|d| (d / scale).powi(2) / count)
        .sum::<f64>();
    variance.sqrt() * scale * 2.0
}
