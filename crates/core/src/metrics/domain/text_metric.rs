use super::metric_result::MetricResult;

/// Domain interface for a scorer comparing generated text to a reference.
///
/// A metric writes one or more named scalars into the sample's result.
/// Implementations must not panic on any input; a metric that cannot be
/// computed records its documented fallback or error flag instead.
pub trait TextMetric: Send + Sync {
    fn name(&self) -> &str;

    fn record(&self, reference: &str, generated: &str, result: &mut MetricResult);
}
