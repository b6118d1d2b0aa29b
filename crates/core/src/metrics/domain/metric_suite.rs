use super::lexical_metrics::{
    CallToActionMetric, HeadingCountMetric, KeywordRecallMetric, WordCountMetric,
};
use super::metric_result::MetricResult;
use super::rouge::{LexicalOverlapRouge, RougeMetric, RougeScorer};
use super::text_metric::TextMetric;

/// Ordered set of metrics applied to every sample.
pub struct MetricSuite {
    metrics: Vec<Box<dyn TextMetric>>,
}

impl MetricSuite {
    pub fn new(metrics: Vec<Box<dyn TextMetric>>) -> Self {
        Self { metrics }
    }

    /// The always-available metrics, with `rouge` as the ROUGE backend.
    pub fn standard(rouge: Box<dyn RougeScorer>) -> Self {
        Self::new(vec![
            Box::new(RougeMetric::new(rouge)),
            Box::new(KeywordRecallMetric),
            Box::new(CallToActionMetric),
            Box::new(HeadingCountMetric),
            Box::new(WordCountMetric),
        ])
    }

    pub fn add(&mut self, metric: impl TextMetric + 'static) {
        self.metrics.push(Box::new(metric));
    }

    /// Union of every metric's scores for one sample.
    pub fn collect(&self, reference: &str, generated: &str) -> MetricResult {
        let mut result = MetricResult::new();
        for metric in &self.metrics {
            metric.record(reference, generated, &mut result);
        }
        result
    }

    pub fn names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }
}

impl Default for MetricSuite {
    /// Standard metrics with the lexical-overlap ROUGE fallback.
    fn default() -> Self {
        Self::standard(Box::new(LexicalOverlapRouge))
    }
}
