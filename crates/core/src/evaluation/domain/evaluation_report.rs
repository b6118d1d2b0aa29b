use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregator::aggregate;
use super::run_mode::RunMode;
use crate::metrics::domain::metric_result::MetricResult;

/// Compact UTC timestamp used in report contents and file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Persisted outcome of one evaluation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub dataset: String,
    pub mode: RunMode,
    pub generated_dir: String,
    pub timestamp_utc: String,
    pub samples: BTreeMap<String, MetricResult>,
    pub summary: BTreeMap<String, f64>,
}

impl EvaluationReport {
    /// Builds a report and derives its summary from `samples`.
    pub fn new(
        dataset: impl Into<String>,
        mode: RunMode,
        generated_dir: impl Into<String>,
        timestamp: DateTime<Utc>,
        samples: BTreeMap<String, MetricResult>,
    ) -> Self {
        let summary = aggregate(&samples);
        Self {
            dataset: dataset.into(),
            mode,
            generated_dir: generated_dir.into(),
            timestamp_utc: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            samples,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_formats_timestamp_and_summarizes() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let mut samples = BTreeMap::new();
        samples.insert("a".to_string(), [("m", 1.0)].into_iter().collect());
        samples.insert("b".to_string(), [("m", 3.0)].into_iter().collect());

        let report = EvaluationReport::new("data.jsonl", RunMode::Mock, "gen", timestamp, samples);

        assert_eq!(report.timestamp_utc, "20240309T070501Z");
        assert_eq!(report.summary.get("avg_m"), Some(&2.0));
    }

    #[test]
    fn test_serialized_field_names() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let report =
            EvaluationReport::new("d.jsonl", RunMode::Live, "g", timestamp, BTreeMap::new());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["mode"], "live");
        assert_eq!(value["dataset"], "d.jsonl");
        assert_eq!(value["generated_dir"], "g");
        assert!(value["samples"].as_object().unwrap().is_empty());
        assert!(value["summary"].as_object().unwrap().is_empty());
    }
}
