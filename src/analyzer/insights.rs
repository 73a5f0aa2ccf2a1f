use crate::model::DataRecord;
use crate::utils::{percentage, round_to};
use std::collections::HashMap;

struct CategoryShare<'a> {
    name: &'a str,
    count: usize,
    value_sum: f64,
}

/// Describes how records are distributed across the `category` metadata tag.
///
/// Categories are reported in the order they are first seen. Records without
/// a string category count towards the total but form no group of their own.
pub fn category_insights(records: &[DataRecord]) -> Vec<String> {
    let total = records.len();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut shares: Vec<CategoryShare> = Vec::new();

    for record in records {
        let Some(name) = record.category() else {
            continue;
        };
        let slot = *index.entry(name).or_insert_with(|| {
            shares.push(CategoryShare {
                name,
                count: 0,
                value_sum: 0.0,
            });
            shares.len() - 1
        });
        shares[slot].count += 1;
        shares[slot].value_sum += record.value();
    }

    shares
        .iter()
        .map(|share| {
            format!(
                "Category '{}' represents {:.1}% of records (average value {:.2})",
                share.name,
                round_to(percentage(share.count, total), 1),
                share.value_sum / share.count as f64
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn tagged(id: &str, value: f64, category: Option<&str>) -> DataRecord {
        let mut metadata = HashMap::new();
        if let Some(c) = category {
            metadata.insert("category".to_string(), json!(c));
        }
        DataRecord::new(id, Utc::now(), value, metadata)
    }

    #[test]
    fn reports_share_per_category() {
        let records = vec![
            tagged("rec1", 10.0, Some("A")),
            tagged("rec2", 100.0, Some("A")),
            tagged("rec3", 10.0, Some("B")),
        ];
        let insights = category_insights(&records);
        assert_eq!(
            insights,
            vec![
                "Category 'A' represents 66.7% of records (average value 55.00)".to_string(),
                "Category 'B' represents 33.3% of records (average value 10.00)".to_string(),
            ]
        );
    }

    #[test]
    fn keeps_first_seen_order() {
        let records = vec![
            tagged("1", 1.0, Some("Z")),
            tagged("2", 1.0, Some("A")),
            tagged("3", 1.0, Some("Z")),
        ];
        let insights = category_insights(&records);
        assert!(insights[0].starts_with("Category 'Z'"));
        assert!(insights[1].starts_with("Category 'A'"));
    }

    #[test]
    fn untagged_records_dilute_shares() {
        let records = vec![tagged("1", 1.0, Some("A")), tagged("2", 1.0, None)];
        let insights = category_insights(&records);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("50.0%"));
    }

    #[test]
    fn empty_input_has_no_insights() {
        assert!(category_insights(&[]).is_empty());
    }
}
