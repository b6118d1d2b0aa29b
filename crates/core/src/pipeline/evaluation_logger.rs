use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for evaluation run events.
///
/// Use cases report through this port so the CLI and tests can observe a
/// run without the orchestration code knowing where output goes.
pub trait EvaluationLogger: Send {
    /// Report sample-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage (`read`, `resolve`, `score`) took for one sample.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record one metric value observed for a sample.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullEvaluationLogger;

impl EvaluationLogger for NullEvaluationLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger that tracks per-stage timing and metric means and prints a
/// summary when the run completes.
pub struct StdoutEvaluationLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_samples: usize,
}

impl StdoutEvaluationLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            total_samples: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Evaluation summary ({} samples, {:.1}s total):",
            self.total_samples,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = mean(durations);
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:8.1}ms  total {total_ms:9.0}ms"
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            lines.push(format!(
                "  {name}: avg {:.4} over {} samples",
                mean(values),
                values.len()
            ));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for StdoutEvaluationLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl EvaluationLogger for StdoutEvaluationLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_samples = total;
        if total > 0 {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Evaluated {current}/{total} samples ({pct:.0}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
