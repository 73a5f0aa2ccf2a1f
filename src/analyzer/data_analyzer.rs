use crate::analyzer::record_analysis::{Analyzer, AnalyzerImpl};
use crate::config::AppConfig;
use crate::executor::Executor;
use crate::model::{
    AnalysisResult, AnalyzerError, AnalyzerState, DataRecord, ExportSnapshot, Summary,
};
use crate::source::{RecordSource, SyntheticSource};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct Store {
    records: Vec<DataRecord>,
    state: AnalyzerState,
}

/// Owns the record collection and runs analysis over it.
///
/// `initialize` and `process_data` run on a background worker, one at a time
/// in the order they were awaited. The remaining read operations work on the
/// current collection directly and never fail; before any data exists they
/// return a zeroed summary and empty lists.
pub struct DataAnalyzer {
    store: Arc<RwLock<Store>>,
    analyzer: AnalyzerImpl,
    source: Arc<dyn RecordSource>,
    executor: Executor,
    system_version: String,
}

impl DataAnalyzer {
    /// Creates an analyzer backed by synthetic data. Must be called within a Tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_source(Arc::new(SyntheticSource::new(config)), config.system_version.clone())
    }

    pub fn with_source(source: Arc<dyn RecordSource>, system_version: impl Into<String>) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                records: Vec::new(),
                state: AnalyzerState::Uninitialized,
            })),
            analyzer: AnalyzerImpl::new(),
            source,
            executor: Executor::spawn(),
            system_version: system_version.into(),
        }
    }

    /// Appends a batch from the record source. Returns how many records were added.
    pub async fn initialize(&self) -> Result<usize, AnalyzerError> {
        let store = self.store.clone();
        let source = self.source.clone();
        let added = self
            .executor
            .submit(async move {
                // Jobs are serialized, so no other batch can land between the read and the write.
                let start = store.read().await.records.len();
                let batch = source.fetch(start).await?;
                let added = batch.len();
                let mut guard = store.write().await;
                guard.records.extend(batch);
                if guard.state == AnalyzerState::Uninitialized {
                    guard.state = AnalyzerState::Initialized;
                }
                Ok::<_, AnalyzerError>(added)
            })
            .await??;

        info!("📥 Initialized with {} new records", added);
        Ok(added)
    }

    /// Computes summary, insights and recommendations in one pass and times it.
    pub async fn process_data(&self) -> Result<AnalysisResult, AnalyzerError> {
        let store = self.store.clone();
        let analyzer = self.analyzer;
        let result = self
            .executor
            .submit(async move {
                let started = Instant::now();
                let mut guard = store.write().await;
                let summary = analyzer.calculate_summary(&guard.records);
                let insights = analyzer.generate_insights(&guard.records);
                let recommendations = analyzer.generate_recommendations(&guard.records);
                guard.state = AnalyzerState::Analyzed;

                AnalysisResult {
                    summary,
                    insights,
                    recommendations,
                    processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
                }
            })
            .await?;

        info!(
            "📊 Processed {} records in {:.3} ms ({} insights, {} recommendations)",
            result.summary.total_records,
            result.processing_time_ms,
            result.insights.len(),
            result.recommendations.len()
        );
        Ok(result)
    }

    pub async fn add_record(&self, record: DataRecord) {
        debug!("Appending record {}", record.id());
        self.store.write().await.records.push(record);
    }

    pub async fn calculate_summary(&self) -> Summary {
        self.analyzer.calculate_summary(&self.store.read().await.records)
    }

    pub async fn generate_insights(&self) -> Vec<String> {
        self.analyzer.generate_insights(&self.store.read().await.records)
    }

    pub async fn generate_recommendations(&self) -> Vec<String> {
        self.analyzer.generate_recommendations(&self.store.read().await.records)
    }

    pub async fn export_data(&self) -> ExportSnapshot {
        let data = self.store.read().await.records.clone();
        let snapshot = ExportSnapshot::new(data, self.system_version.clone());
        info!("📤 Exported {} records", snapshot.record_count());
        snapshot
    }

    /// Export as a JSON object with `data`, `exportTime`, `recordCount` and `systemVersion`.
    pub async fn export_json(&self) -> Result<Value, AnalyzerError> {
        Ok(serde_json::to_value(self.export_data().await)?)
    }

    /// Drops every record and returns to the uninitialized state.
    pub async fn reset(&self) -> Result<(), AnalyzerError> {
        let mut guard = self.store.write().await;
        if guard.state == AnalyzerState::ShutDown {
            return Err(AnalyzerError::ShutDown);
        }
        let cleared = guard.records.len();
        guard.records.clear();
        guard.state = AnalyzerState::Uninitialized;
        info!("🧹 Reset analyzer, {} records cleared", cleared);
        Ok(())
    }

    pub async fn records(&self) -> Vec<DataRecord> {
        self.store.read().await.records.clone()
    }

    pub async fn record_count(&self) -> usize {
        self.store.read().await.records.len()
    }

    pub async fn state(&self) -> AnalyzerState {
        self.store.read().await.state
    }

    /// Stops the background worker. Safe to call more than once.
    pub async fn shutdown(&mut self) {
        if self.executor.is_shutdown() {
            debug!("Shutdown requested again, ignoring");
            return;
        }
        self.executor.shutdown().await;
        self.store.write().await.state = AnalyzerState::ShutDown;
        info!("🛑 Analyzer shut down");
    }

    pub fn is_shutdown(&self) -> bool {
        self.executor.is_shutdown()
    }

    pub fn is_terminated(&self) -> bool {
        self.executor.is_terminated()
    }
}
