use std::collections::BTreeMap;

use crate::metrics::domain::metric_result::MetricResult;

pub const SUMMARY_PREFIX: &str = "avg_";

/// Mean of every metric over the samples that reported it.
///
/// Samples without a metric are excluded from its mean rather than counted
/// as zero. Keys are `avg_<metric>`; empty input gives an empty summary.
pub fn aggregate(results: &BTreeMap<String, MetricResult>) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for metrics in results.values() {
        for (name, value) in metrics.iter() {
            let entry = sums.entry(name).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(name, (sum, count))| (format!("{SUMMARY_PREFIX}{name}"), sum / count as f64))
        .collect()
}
