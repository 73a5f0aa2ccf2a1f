// Core structs: DataRecord, Summary, AnalysisResult, ExportSnapshot
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

/// Metadata key used to group records into categories.
pub const CATEGORY_KEY: &str = "category";

/// A timestamped numeric observation with attached metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    id: String,
    timestamp: DateTime<Utc>,
    value: f64,
    metadata: HashMap<String, Value>,
}

impl DataRecord {
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        value: f64,
        metadata: HashMap<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            value,
            metadata,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn metadata(&self) -> &HashMap<String, Value> {
        &self.metadata
    }

    /// Returns the category tag, if the record carries a string one.
    pub fn category(&self) -> Option<&str> {
        self.metadata.get(CATEGORY_KEY).and_then(Value::as_str)
    }
}

/// Aggregate statistics over the record collection.
///
/// An empty collection yields all-zero statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_records: f64,
    pub average_value: f64,
    pub max_value: f64,
    pub min_value: f64,
}

impl Summary {
    pub const TOTAL_RECORDS: &'static str = "totalRecords";
    pub const AVERAGE_VALUE: &'static str = "averageValue";
    pub const MAX_VALUE: &'static str = "maxValue";
    pub const MIN_VALUE: &'static str = "minValue";

    /// Looks up a statistic by its exported name.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            Self::TOTAL_RECORDS => Some(self.total_records),
            Self::AVERAGE_VALUE => Some(self.average_value),
            Self::MAX_VALUE => Some(self.max_value),
            Self::MIN_VALUE => Some(self.min_value),
            _ => None,
        }
    }

    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            (Self::TOTAL_RECORDS, self.total_records),
            (Self::AVERAGE_VALUE, self.average_value),
            (Self::MAX_VALUE, self.max_value),
            (Self::MIN_VALUE, self.min_value),
        ])
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: Summary,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    /// Wall-clock time spent producing this result.
    pub processing_time_ms: f64,
}

/// Point-in-time copy of the record collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    data: Vec<DataRecord>,
    export_time: DateTime<Utc>,
    record_count: usize,
    system_version: String,
}

impl ExportSnapshot {
    pub fn new(data: Vec<DataRecord>, system_version: impl Into<String>) -> Self {
        Self {
            record_count: data.len(),
            data,
            export_time: Utc::now(),
            system_version: system_version.into(),
        }
    }

    pub fn data(&self) -> &[DataRecord] {
        &self.data
    }

    pub fn export_time(&self) -> DateTime<Utc> {
        self.export_time
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn system_version(&self) -> &str {
        &self.system_version
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerState {
    Uninitialized,
    Initialized,
    Analyzed,
    ShutDown,
}

impl fmt::Display for AnalyzerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalyzerState::Uninitialized => "uninitialized",
            AnalyzerState::Initialized => "initialized",
            AnalyzerState::Analyzed => "analyzed",
            AnalyzerState::ShutDown => "shut down",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("record generation failed: {0}")]
    Generation(String),
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analyzer has been shut down")]
    ShutDown,
    #[error("background task failed: {0}")]
    TaskFailed(String),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_exposes_its_fields() {
        let now = Utc::now();
        let mut metadata = HashMap::new();
        metadata.insert("key".to_string(), json!("value"));
        let record = DataRecord::new("1", now, 100.0, metadata);

        assert_eq!(record.id(), "1");
        assert_eq!(record.timestamp(), now);
        assert!((record.value() - 100.0).abs() < 0.001);
        assert_eq!(record.metadata().get("key"), Some(&json!("value")));
        assert_eq!(record.category(), None);
    }

    #[test]
    fn non_string_category_is_ignored() {
        let mut metadata = HashMap::new();
        metadata.insert(CATEGORY_KEY.to_string(), json!(7));
        let record = DataRecord::new("x", Utc::now(), 1.0, metadata);
        assert_eq!(record.category(), None);
    }

    #[test]
    fn summary_map_uses_exported_names() {
        let summary = Summary {
            total_records: 3.0,
            average_value: 20.0,
            max_value: 30.0,
            min_value: 10.0,
        };
        let map = summary.as_map();
        assert_eq!(map.get("totalRecords"), Some(&3.0));
        assert_eq!(summary.get("minValue"), Some(10.0));
        assert_eq!(summary.get("median"), None);
    }

    #[test]
    fn snapshot_serializes_with_expected_keys() {
        let snapshot = ExportSnapshot::new(Vec::new(), "0.1.0");
        let value = serde_json::to_value(&snapshot).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["data", "exportTime", "recordCount", "systemVersion"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["recordCount"], json!(0));
        assert_eq!(obj["data"].as_array().unwrap().len(), 0);
    }
}
