use crate::analyzer::record_analysis::{mean_value, value_std_dev};
use crate::model::DataRecord;
use crate::utils::age_in_days;
use chrono::{DateTime, Duration, Utc};

/// Below this many records the collection is considered too small.
pub const MIN_RECORDS_THRESHOLD: usize = 100;
/// The newest record must be younger than this for data to count as fresh.
pub const STALE_DATA_THRESHOLD_DAYS: i64 = 7;
/// Coefficient of variation above which values are flagged as noisy.
pub const HIGH_VARIABILITY_THRESHOLD: f64 = 1.0;

/// Applies threshold heuristics to the collection, evaluated against `now`.
///
/// An empty collection yields no recommendations.
pub fn recommendations_at(records: &[DataRecord], now: DateTime<Utc>) -> Vec<String> {
    let mut result = Vec::new();
    if records.is_empty() {
        return result;
    }

    if records.len() < MIN_RECORDS_THRESHOLD {
        result.push(format!(
            "Consider increasing data collection: only {} records available (recommended minimum: {})",
            records.len(),
            MIN_RECORDS_THRESHOLD
        ));
    }

    if let Some(latest) = records.iter().map(DataRecord::timestamp).max() {
        if now.signed_duration_since(latest) > Duration::days(STALE_DATA_THRESHOLD_DAYS) {
            result.push(format!(
                "Data appears outdated: most recent record is {} days old",
                age_in_days(latest, now)
            ));
        }
    }

    let mean = mean_value(records);
    if mean.abs() > f64::EPSILON {
        let variation = value_std_dev(records) / mean.abs();
        if variation > HIGH_VARIABILITY_THRESHOLD {
            result.push(format!(
                "High value variability detected (coefficient of variation {:.2}); review data quality",
                variation
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record_at(id: String, timestamp: DateTime<Utc>, value: f64) -> DataRecord {
        DataRecord::new(id, timestamp, value, HashMap::new())
    }

    #[test]
    fn single_record_asks_for_more_data() {
        let now = Utc::now();
        let records = vec![record_at("rec1".into(), now, 10.0)];
        let recs = recommendations_at(&records, now);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Consider increasing data collection"));
    }

    #[test]
    fn month_old_data_is_outdated() {
        let now = Utc::now();
        let records: Vec<DataRecord> = (0..200)
            .map(|i| record_at(format!("old_rec{i}"), now - Duration::days(30), 50.0))
            .collect();
        let recs = recommendations_at(&records, now);
        assert_eq!(
            recs,
            vec!["Data appears outdated: most recent record is 30 days old".to_string()]
        );
    }

    #[test]
    fn one_fresh_record_keeps_data_current() {
        let now = Utc::now();
        let mut records: Vec<DataRecord> = (0..150)
            .map(|i| record_at(format!("old{i}"), now - Duration::days(30), 50.0))
            .collect();
        records.push(record_at("fresh".into(), now - Duration::hours(1), 50.0));
        assert!(recommendations_at(&records, now).is_empty());
    }

    #[test]
    fn staleness_boundary_is_exclusive() {
        let now = Utc::now();
        let records: Vec<DataRecord> = (0..MIN_RECORDS_THRESHOLD)
            .map(|i| {
                let timestamp = now - Duration::days(STALE_DATA_THRESHOLD_DAYS);
                record_at(format!("r{i}"), timestamp, 5.0)
            })
            .collect();
        assert!(recommendations_at(&records, now).is_empty());
    }

    #[test]
    fn skewed_values_are_flagged() {
        let now = Utc::now();
        let mut records: Vec<DataRecord> = (0..MIN_RECORDS_THRESHOLD)
            .map(|i| record_at(format!("r{i}"), now, 1.0))
            .collect();
        records.push(record_at("spike".into(), now, 10_000.0));
        let recs = recommendations_at(&records, now);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("High value variability detected"));
    }

    #[test]
    fn huge_values_still_get_a_variability_verdict() {
        let now = Utc::now();
        let records: Vec<DataRecord> = (0..MIN_RECORDS_THRESHOLD)
            .map(|i| record_at(format!("r{i}"), now, 1e308))
            .collect();
        assert!(recommendations_at(&records, now).is_empty());

        let mut spiky = records;
        spiky.push(record_at("dip".into(), now, -1e308));
        spiky.push(record_at("dip2".into(), now, -1e308));
        let recs = recommendations_at(&spiky, now);
        assert!(recs.iter().all(|r| !r.contains("inf") && !r.contains("NaN")));
    }

    #[test]
    fn empty_collection_has_no_advice() {
        assert!(recommendations_at(&[], Utc::now()).is_empty());
    }
}
