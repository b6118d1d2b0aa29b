use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metric keys produced by the built-in scorers.
///
/// The schema is open: optional keys are absent when their scorer is not
/// available, and `BERT_F1_ERROR` replaces the semantic keys when that scorer
/// fails at runtime.
pub mod keys {
    pub const ROUGE1_F: &str = "rouge1_f";
    pub const ROUGE_L_F: &str = "rougeL_f";
    pub const KEYWORD_RECALL: &str = "keyword_recall";
    pub const CALL_TO_ACTION: &str = "call_to_action";
    pub const HEADING_COUNT: &str = "heading_count";
    pub const WORD_COUNT_GENERATED: &str = "word_count_generated";
    pub const WORD_COUNT_REFERENCE: &str = "word_count_reference";
    pub const BERT_PRECISION: &str = "bert_precision";
    pub const BERT_RECALL: &str = "bert_recall";
    pub const BERT_F1: &str = "bert_f1";
    pub const BERT_F1_ERROR: &str = "bert_f1_error";
}

/// Named scalar scores for one sample, ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricResult(BTreeMap<String, f64>);

impl MetricResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricResult {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
