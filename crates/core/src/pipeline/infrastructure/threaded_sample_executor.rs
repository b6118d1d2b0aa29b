use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::Receiver;

use crate::dataset::domain::sample::Sample;
use crate::evaluation::domain::evaluation_error::EvaluationError;
use crate::pipeline::evaluation_logger::EvaluationLogger;
use crate::pipeline::sample_executor::{record_outcome, SampleExecutor, SampleOutcome, SampleTask};

type Completion = (usize, Result<SampleOutcome, EvaluationError>);

/// Runs samples on a fixed pool of scoped worker threads.
///
/// Layout: `feeder → [workers] → collector (calling thread)`
///
/// The feeder hands out dataset indices in order over a bounded channel.
/// Once a sample fails, indices after it are skipped, while every earlier
/// index still runs, so the reported error is always the first failing
/// sample in dataset order.
pub struct ThreadedSampleExecutor {
    workers: usize,
}

impl ThreadedSampleExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl SampleExecutor for ThreadedSampleExecutor {
    fn execute(
        &self,
        samples: &[Sample],
        task: &SampleTask<'_>,
        logger: &mut dyn EvaluationLogger,
    ) -> Result<Vec<SampleOutcome>, EvaluationError> {
        let total = samples.len();
        if total == 0 {
            return Ok(Vec::new());
        }
        let workers = self.workers.min(total);
        let first_failure = AtomicUsize::new(usize::MAX);

        let (job_tx, job_rx) = crossbeam_channel::bounded::<usize>(workers);
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<Completion>();

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers + 1);
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let done_tx = done_tx.clone();
                let first_failure = &first_failure;
                handles.push(scope.spawn(move || {
                    for index in job_rx {
                        if index > first_failure.load(Ordering::Acquire) {
                            continue;
                        }
                        let result = task(&samples[index]);
                        if result.is_err() {
                            first_failure.fetch_min(index, Ordering::AcqRel);
                        }
                        if done_tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                }));
            }
            drop(job_rx);
            drop(done_tx);

            let feeder_failure = &first_failure;
            handles.push(scope.spawn(move || {
                for index in 0..total {
                    if index > feeder_failure.load(Ordering::Acquire) {
                        break;
                    }
                    if job_tx.send(index).is_err() {
                        break;
                    }
                }
            }));

            let collected = collect_outcomes(done_rx, total, logger);

            let mut panicked = false;
            for handle in handles {
                panicked |= handle.join().is_err();
            }
            if panicked {
                return Err(EvaluationError::WorkerPanicked);
            }
            collected
        })
    }
}

fn collect_outcomes(
    done_rx: Receiver<Completion>,
    total: usize,
    logger: &mut dyn EvaluationLogger,
) -> Result<Vec<SampleOutcome>, EvaluationError> {
    let mut slots: Vec<Option<SampleOutcome>> = (0..total).map(|_| None).collect();
    let mut first_error: Option<(usize, EvaluationError)> = None;
    let mut done = 0;

    for (index, result) in done_rx {
        match result {
            Ok(outcome) => {
                done += 1;
                record_outcome(logger, &outcome, done, total);
                slots[index] = Some(outcome);
            }
            Err(e) => {
                log::debug!("Sample at position {index} failed: {e}");
                if first_error.as_ref().map_or(true, |(seen, _)| index < *seen) {
                    first_error = Some((index, e));
                }
            }
        }
    }

    if let Some((_, e)) = first_error {
        return Err(e);
    }
    if slots.iter().any(Option::is_none) {
        return Err(EvaluationError::WorkerPanicked);
    }
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::evaluation_logger::{NullEvaluationLogger, StdoutEvaluationLogger};
    use rstest::rstest;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    fn samples(count: usize) -> Vec<Sample> {
        (0..count)
            .map(|i| Sample::new(format!("s{i}"), "t.txt", "r.md"))
            .collect()
    }

    fn outcome(sample: &Sample) -> SampleOutcome {
        SampleOutcome {
            sample_id: sample.id.clone(),
            metrics: [("m", 1.0)].into_iter().collect(),
            timings: vec![("score", 0.5)],
        }
    }

    fn missing(sample: &Sample) -> EvaluationError {
        EvaluationError::MissingFile {
            sample_id: sample.id.clone(),
            path: PathBuf::from("gone.txt"),
        }
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(16)]
    fn test_outcomes_are_in_dataset_order(#[case] workers: usize) {
        let data = samples(10);
        let task = |sample: &Sample| -> Result<SampleOutcome, EvaluationError> {
            // Later samples finish first.
            let delay = 10 - sample.id[1..].parse::<u64>().unwrap();
            thread::sleep(Duration::from_millis(delay));
            Ok(outcome(sample))
        };
        let mut logger = StdoutEvaluationLogger::new();

        let outcomes = ThreadedSampleExecutor::new(workers)
            .execute(&data, &task, &mut logger)
            .unwrap();

        let ids: Vec<_> = outcomes.iter().map(|o| o.sample_id.clone()).collect();
        let expected: Vec<_> = data.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, expected);
        assert_eq!(logger.timings_for("score").unwrap().len(), 10);
    }

    #[test]
    fn test_empty_input() {
        let task = |sample: &Sample| -> Result<SampleOutcome, EvaluationError> { Ok(outcome(sample)) };
        let outcomes = ThreadedSampleExecutor::new(4)
            .execute(&[], &task, &mut NullEvaluationLogger)
            .unwrap();
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_reports_earliest_failure_in_dataset_order() {
        let data = samples(8);
        let task = |sample: &Sample| -> Result<SampleOutcome, EvaluationError> {
            match sample.id.as_str() {
                "s2" => {
                    thread::sleep(Duration::from_millis(30));
                    Err(missing(sample))
                }
                "s5" => Err(missing(sample)),
                _ => Ok(outcome(sample)),
            }
        };

        let err = ThreadedSampleExecutor::new(4)
            .execute(&data, &task, &mut NullEvaluationLogger)
            .unwrap_err();

        assert!(matches!(err, EvaluationError::MissingFile { ref sample_id, .. } if sample_id == "s2"));
    }

    #[test]
    fn test_samples_after_failure_are_not_started() {
        let data = samples(50);
        let started = Mutex::new(Vec::new());
        let task = |sample: &Sample| -> Result<SampleOutcome, EvaluationError> {
            started.lock().unwrap().push(sample.id.clone());
            if sample.id == "s0" {
                Err(missing(sample))
            } else {
                thread::sleep(Duration::from_millis(5));
                Ok(outcome(sample))
            }
        };

        assert!(ThreadedSampleExecutor::new(1)
            .execute(&data, &task, &mut NullEvaluationLogger)
            .is_err());
        assert!(started.lock().unwrap().len() < data.len());
    }

    #[test]
    fn test_workers_clamped_to_at_least_one() {
        assert_eq!(ThreadedSampleExecutor::new(0).workers(), 1);
    }
}
