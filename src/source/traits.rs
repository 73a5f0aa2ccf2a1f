use crate::model::{DataRecord, SourceError};

/// Supplies batches of records for `DataAnalyzer::initialize`.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Produces the next batch. `start_index` is the number of records already
    /// held, so sources can keep identifiers unique across batches.
    async fn fetch(&self, start_index: usize) -> Result<Vec<DataRecord>, SourceError>;
}
