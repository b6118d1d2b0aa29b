use crate::dataset::domain::sample::Sample;
use crate::evaluation::domain::evaluation_error::EvaluationError;
use crate::evaluation::domain::run_mode::RunMode;
use crate::metrics::domain::metric_result::MetricResult;
use crate::pipeline::evaluation_logger::EvaluationLogger;

/// Scores and stage timings produced for one sample.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleOutcome {
    pub sample_id: String,
    pub metrics: MetricResult,
    pub timings: Vec<(&'static str, f64)>,
}

/// Per-sample unit of work handed to an executor.
pub type SampleTask<'a> = dyn Fn(&Sample) -> Result<SampleOutcome, EvaluationError> + Sync + 'a;

/// Abstracts how the per-sample tasks of a run are scheduled.
///
/// Outcomes are returned in dataset order. On failure the error of the
/// earliest failing sample (by dataset position) is returned.
pub trait SampleExecutor: Send {
    fn execute(
        &self,
        samples: &[Sample],
        task: &SampleTask<'_>,
        logger: &mut dyn EvaluationLogger,
    ) -> Result<Vec<SampleOutcome>, EvaluationError>;
}

/// Runs samples one at a time on the calling thread, stopping at the first failure.
pub struct SequentialSampleExecutor;

impl SampleExecutor for SequentialSampleExecutor {
    fn execute(
        &self,
        samples: &[Sample],
        task: &SampleTask<'_>,
        logger: &mut dyn EvaluationLogger,
    ) -> Result<Vec<SampleOutcome>, EvaluationError> {
        let total = samples.len();
        let mut outcomes = Vec::with_capacity(total);
        for sample in samples {
            let outcome = task(sample)?;
            record_outcome(logger, &outcome, outcomes.len() + 1, total);
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

/// Forwards one finished sample to the logger.
pub(crate) fn record_outcome(
    logger: &mut dyn EvaluationLogger,
    outcome: &SampleOutcome,
    done: usize,
    total: usize,
) {
    for (stage, ms) in &outcome.timings {
        logger.timing(stage, *ms);
    }
    for (name, value) in outcome.metrics.iter() {
        logger.metric(name, value);
    }
    logger.progress(done, total);
}

/// Worker count for a run. Live runs are capped by `max_live_concurrency`
/// so the generation provider sees at most that many parallel calls.
pub fn effective_workers(mode: RunMode, jobs: usize, max_live_concurrency: usize) -> usize {
    let jobs = jobs.max(1);
    match mode {
        RunMode::Mock => jobs,
        RunMode::Live => jobs.min(max_live_concurrency.max(1)),
    }
}
