use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;

use crate::dataset::domain::dataset_store::DatasetStore;
use crate::dataset::domain::sample::Sample;
use crate::evaluation::domain::evaluation_error::EvaluationError;
use crate::evaluation::domain::evaluation_report::EvaluationReport;
use crate::evaluation::domain::output_resolver::{OutputResolver, ResolveRequest};
use crate::evaluation::domain::report_writer::ReportWriter;
use crate::evaluation::domain::run_mode::RunMode;
use crate::metrics::domain::metric_result::MetricResult;
use crate::metrics::domain::metric_suite::MetricSuite;
use crate::pipeline::evaluation_logger::EvaluationLogger;
use crate::pipeline::sample_executor::{SampleExecutor, SampleOutcome};

/// Run description copied into the report header.
#[derive(Clone, Debug)]
pub struct RunInfo {
    pub dataset: String,
    pub mode: RunMode,
    pub generated_dir: String,
}

/// Evaluation pipeline: load → (per sample) read → resolve → score → aggregate → write.
pub struct EvaluateDatasetUseCase {
    store: Box<dyn DatasetStore>,
    resolver: Box<dyn OutputResolver>,
    metrics: MetricSuite,
    executor: Box<dyn SampleExecutor>,
    logger: Box<dyn EvaluationLogger>,
}

impl EvaluateDatasetUseCase {
    pub fn new(
        store: Box<dyn DatasetStore>,
        resolver: Box<dyn OutputResolver>,
        metrics: MetricSuite,
        executor: Box<dyn SampleExecutor>,
        logger: Box<dyn EvaluationLogger>,
    ) -> Self {
        Self {
            store,
            resolver,
            metrics,
            executor,
            logger,
        }
    }

    /// Scores every sample in the dataset, keyed by sample id.
    ///
    /// The first failing sample aborts the whole run.
    pub fn evaluate(&mut self) -> Result<BTreeMap<String, MetricResult>, EvaluationError> {
        let samples = self.store.load()?;
        self.logger.info(&format!(
            "Evaluating {} samples with metrics: {}",
            samples.len(),
            self.metrics.names().join(", ")
        ));

        let store = self.store.as_ref();
        let resolver = self.resolver.as_ref();
        let metrics = &self.metrics;
        let task = |sample: &Sample| evaluate_sample(store, resolver, metrics, sample);

        let outcomes = self
            .executor
            .execute(&samples, &task, self.logger.as_mut())?;

        let mut results = BTreeMap::new();
        for outcome in outcomes {
            if results.contains_key(&outcome.sample_id) {
                log::warn!("Duplicate sample id {}, keeping the later entry", outcome.sample_id);
            }
            results.insert(outcome.sample_id, outcome.metrics);
        }
        Ok(results)
    }

    /// Evaluates the dataset and persists the report.
    ///
    /// Nothing is written when any sample fails.
    pub fn execute(
        &mut self,
        run: &RunInfo,
        writer: &dyn ReportWriter,
    ) -> Result<(EvaluationReport, PathBuf), EvaluationError> {
        let results = self.evaluate()?;
        let report = EvaluationReport::new(
            run.dataset.clone(),
            run.mode,
            run.generated_dir.clone(),
            Utc::now(),
            results,
        );
        let path = writer.write(&report)?;
        self.logger.summary();
        Ok((report, path))
    }
}

fn evaluate_sample(
    store: &dyn DatasetStore,
    resolver: &dyn OutputResolver,
    metrics: &MetricSuite,
    sample: &Sample,
) -> Result<SampleOutcome, EvaluationError> {
    let mut timings = Vec::with_capacity(3);

    let t0 = Instant::now();
    let transcript = read_sample_file(store, sample, &sample.transcript_path)?;
    let reference = read_sample_file(store, sample, &sample.reference_blog_path)?;
    timings.push(("read", elapsed_ms(t0)));

    let t0 = Instant::now();
    let generated = resolver.resolve(&ResolveRequest {
        sample_id: &sample.id,
        transcript: &transcript,
        tone: sample.parsed_tone(),
    })?;
    timings.push(("resolve", elapsed_ms(t0)));

    let t0 = Instant::now();
    let scores = metrics.collect(&reference, &generated);
    timings.push(("score", elapsed_ms(t0)));

    log::debug!("Scored {}: {} metrics", sample.id, scores.len());
    Ok(SampleOutcome {
        sample_id: sample.id.clone(),
        metrics: scores,
        timings,
    })
}

fn read_sample_file(
    store: &dyn DatasetStore,
    sample: &Sample,
    stored: &Path,
) -> Result<String, EvaluationError> {
    let path = store.resolve_path(stored);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(text.trim().to_string()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(EvaluationError::MissingFile {
            sample_id: sample.id.clone(),
            path,
        }),
        Err(source) => Err(EvaluationError::ReadFile {
            sample_id: sample.id.clone(),
            path,
            source,
        }),
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::domain::dataset_error::DatasetError;
    use crate::evaluation::domain::output_resolver::ResolveError;
    use crate::evaluation::domain::report_writer::ReportError;
    use crate::metrics::domain::metric_result::keys;
    use crate::pipeline::evaluation_logger::NullEvaluationLogger;
    use crate::pipeline::sample_executor::SequentialSampleExecutor;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubStore {
        samples: Vec<Sample>,
        base: PathBuf,
    }

    impl DatasetStore for StubStore {
        fn load(&self) -> Result<Vec<Sample>, DatasetError> {
            Ok(self.samples.clone())
        }

        fn add(&self, _sample: Sample) -> Result<Vec<PathBuf>, DatasetError> {
            Ok(Vec::new())
        }

        fn resolve_path(&self, stored: &Path) -> PathBuf {
            self.base.join(stored)
        }
    }

    struct EchoResolver;

    impl OutputResolver for EchoResolver {
        fn resolve(&self, request: &ResolveRequest<'_>) -> Result<String, ResolveError> {
            if request.sample_id == "broken" {
                return Err(ResolveError::Generation {
                    sample_id: request.sample_id.to_string(),
                    message: "provider down".to_string(),
                });
            }
            Ok(format!("# {}\n{}", request.tone, request.transcript))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingWriter {
        written: Arc<Mutex<Vec<EvaluationReport>>>,
    }

    impl ReportWriter for RecordingWriter {
        fn write(&self, report: &EvaluationReport) -> Result<PathBuf, ReportError> {
            self.written.lock().unwrap().push(report.clone());
            Ok(PathBuf::from("report.json"))
        }
    }

    fn fixture(ids: &[&str]) -> (tempfile::TempDir, Vec<Sample>) {
        let dir = tempfile::tempdir().unwrap();
        let samples = ids
            .iter()
            .map(|id| {
                fs::write(dir.path().join(format!("{id}.txt")), "transcript text\n").unwrap();
                fs::write(dir.path().join(format!("{id}.md")), "# Heading\nreference text").unwrap();
                Sample::new(*id, format!("{id}.txt"), format!("{id}.md")).with_tone("casual")
            })
            .collect();
        (dir, samples)
    }

    fn use_case(base: &Path, samples: Vec<Sample>) -> EvaluateDatasetUseCase {
        EvaluateDatasetUseCase::new(
            Box::new(StubStore {
                samples,
                base: base.to_path_buf(),
            }),
            Box::new(EchoResolver),
            MetricSuite::default(),
            Box::new(SequentialSampleExecutor),
            Box::new(NullEvaluationLogger),
        )
    }

    fn run_info() -> RunInfo {
        RunInfo {
            dataset: "dataset.jsonl".to_string(),
            mode: RunMode::Mock,
            generated_dir: "gen".to_string(),
        }
    }

    // --- Tests ---

    #[test]
    fn test_evaluate_keys_results_by_sample_id() {
        let (dir, samples) = fixture(&["a", "b"]);
        let results = use_case(dir.path(), samples).evaluate().unwrap();

        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        let a = &results["a"];
        assert_eq!(a.get(keys::HEADING_COUNT), Some(1.0));
        assert!(a.contains(keys::ROUGE1_F));
    }

    #[test]
    fn test_missing_reference_names_sample_and_path() {
        let (dir, samples) = fixture(&["a", "b"]);
        fs::remove_file(dir.path().join("b.md")).unwrap();

        let err = use_case(dir.path(), samples).evaluate().unwrap_err();

        match err {
            EvaluationError::MissingFile { sample_id, path } => {
                assert_eq!(sample_id, "b");
                assert_eq!(path, dir.path().join("b.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_execute_writes_report_with_summary() {
        let (dir, samples) = fixture(&["a", "b"]);
        let writer = RecordingWriter::default();

        let (report, path) = use_case(dir.path(), samples)
            .execute(&run_info(), &writer)
            .unwrap();

        assert_eq!(path, PathBuf::from("report.json"));
        assert_eq!(report.samples.len(), 2);
        assert_eq!(report.summary.get("avg_heading_count"), Some(&1.0));
        assert_eq!(writer.written.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_run_writes_nothing() {
        let (dir, samples) = fixture(&["a", "broken"]);
        let writer = RecordingWriter::default();

        let err = use_case(dir.path(), samples)
            .execute(&run_info(), &writer)
            .unwrap_err();

        assert!(err.to_string().contains("broken"));
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_dataset_gives_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RecordingWriter::default();

        let (report, _) = use_case(dir.path(), Vec::new())
            .execute(&run_info(), &writer)
            .unwrap();

        assert!(report.samples.is_empty());
        assert!(report.summary.is_empty());
    }
}
