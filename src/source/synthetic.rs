use crate::config::AppConfig;
use crate::model::{CATEGORY_KEY, DataRecord, SourceError};
use crate::source::traits::RecordSource;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

/// Generates random records spread over the recent past.
pub struct SyntheticSource {
    batch_size: usize,
    categories: Vec<String>,
    value_min: f64,
    value_max: f64,
    max_age_hours: i64,
    seed: Option<u64>,
}

impl SyntheticSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            batch_size: config.synthetic_batch_size,
            categories: config.categories.clone(),
            value_min: config.value_min,
            value_max: config.value_max,
            max_age_hours: config.max_age_hours,
            seed: config.seed,
        }
    }

    fn rng_for(&self, start_index: usize) -> StdRng {
        match self.seed {
            // Offset by the batch start so repeated batches differ but stay reproducible.
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(start_index as u64)),
            None => StdRng::from_os_rng(),
        }
    }

    fn generate(&self, start_index: usize) -> Result<Vec<DataRecord>, SourceError> {
        if self.categories.is_empty() {
            return Err(SourceError::Generation("no categories configured".into()));
        }
        if !(self.value_min < self.value_max) || !(self.value_max - self.value_min).is_finite() {
            return Err(SourceError::Generation(format!(
                "unusable value range {}..{}",
                self.value_min, self.value_max
            )));
        }
        let now = Utc::now();
        let max_age_secs = self
            .max_age_hours
            .checked_mul(3600)
            .and_then(Duration::try_seconds)
            .filter(|span| now.checked_sub_signed(*span).is_some())
            .map(|span| span.num_seconds().max(1))
            .ok_or_else(|| {
                SourceError::Generation(format!(
                    "max age of {} hours is out of range",
                    self.max_age_hours
                ))
            })?;

        let mut rng = self.rng_for(start_index);
        let records = (start_index..start_index + self.batch_size)
            .map(|index| {
                let category = &self.categories[rng.random_range(0..self.categories.len())];
                let age = Duration::seconds(rng.random_range(0..max_age_secs));
                let value = rng.random_range(self.value_min..self.value_max);

                let mut metadata = HashMap::new();
                metadata.insert(CATEGORY_KEY.to_string(), json!(category));
                metadata.insert("source".to_string(), json!("synthetic"));
                metadata.insert("sequence".to_string(), json!(index));

                DataRecord::new(format!("rec-{:06}", index), now - age, value, metadata)
            })
            .collect();
        Ok(records)
    }
}

#[async_trait::async_trait]
impl RecordSource for SyntheticSource {
    async fn fetch(&self, start_index: usize) -> Result<Vec<DataRecord>, SourceError> {
        let records = self.generate(start_index)?;
        debug!("Generated {} synthetic records from index {}", records.len(), start_index);
        Ok(records)
    }
}
