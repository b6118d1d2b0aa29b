use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use reqwest::blocking::Client;

use vidscribe_core::dataset::domain::dataset_store::DatasetStore;
use vidscribe_core::dataset::domain::path_issue::MissingPathIssue;
use vidscribe_core::dataset::domain::sample::Sample;
use vidscribe_core::dataset::infrastructure::jsonl_dataset_store::JsonlDatasetStore;
use vidscribe_core::evaluation::domain::output_resolver::OutputResolver;
use vidscribe_core::evaluation::domain::run_mode::RunMode;
use vidscribe_core::evaluation::infrastructure::cached_output_resolver::CachedOutputResolver;
use vidscribe_core::evaluation::infrastructure::json_report_writer::JsonReportWriter;
use vidscribe_core::evaluation::infrastructure::live_output_resolver::LiveOutputResolver;
use vidscribe_core::generation::domain::tone::Tone;
use vidscribe_core::generation::infrastructure::openai_article_generator::OpenAiArticleGenerator;
use vidscribe_core::media::infrastructure::yt_dlp_fetcher::YtDlpFetcher;
use vidscribe_core::metrics::infrastructure::metric_suite_factory::{
    create_metric_suite, MetricOptions, ScorerCapabilities,
};
use vidscribe_core::pipeline::convert_video_use_case::ConvertVideoUseCase;
use vidscribe_core::pipeline::evaluate_dataset_use_case::{EvaluateDatasetUseCase, RunInfo};
use vidscribe_core::pipeline::evaluation_logger::StdoutEvaluationLogger;
use vidscribe_core::pipeline::infrastructure::threaded_sample_executor::ThreadedSampleExecutor;
use vidscribe_core::pipeline::sample_executor::{
    effective_workers, SampleExecutor, SequentialSampleExecutor,
};
use vidscribe_core::shared::api_config::ApiConfig;
use vidscribe_core::shared::cache_dir::download_cache_dir;
use vidscribe_core::shared::constants::{
    DEFAULT_API_BASE, DEFAULT_BERT_BASELINE, DEFAULT_BERT_MODEL, DEFAULT_DATASET_PATH,
    DEFAULT_GENERATED_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS, DEFAULT_TONE,
};
use vidscribe_core::transcription::domain::model_size::ModelSize;
use vidscribe_core::transcription::infrastructure::whisper_api_recognizer::WhisperApiRecognizer;

/// Turn videos into articles and score generated articles against references.
#[derive(Parser)]
#[command(name = "vidscribe")]
struct Cli {
    /// API key for the OpenAI-compatible provider.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Base URL of the OpenAI-compatible provider.
    #[arg(long, env = "VIDSCRIBE_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    api_base: String,

    /// HTTP timeout for provider calls, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the evaluation dataset.
    Dataset(DatasetArgs),
    /// Score generated articles against the dataset references.
    Eval(EvalArgs),
    /// Fetch, transcribe and convert a video into an article.
    Convert(ConvertArgs),
}

#[derive(Args)]
struct DatasetArgs {
    /// Path to the JSONL dataset.
    #[arg(long, default_value = DEFAULT_DATASET_PATH, global = true)]
    dataset: PathBuf,

    /// Directory that relative sample paths are resolved against.
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    action: DatasetAction,
}

#[derive(Subcommand)]
enum DatasetAction {
    /// Append a sample, creating empty placeholder files for missing paths.
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        video_url: String,
        #[arg(long)]
        transcript: PathBuf,
        #[arg(long)]
        reference: PathBuf,
        #[arg(long, default_value = DEFAULT_TONE)]
        tone: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Print every sample.
    List,
    /// Check that every referenced file exists.
    Validate,
}

#[derive(Args)]
struct EvalArgs {
    /// Path to the JSONL dataset.
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Where generated text comes from: mock (cached files) or live.
    #[arg(long, default_value = "mock")]
    mode: RunMode,

    /// Directory of cached outputs named `<sample id>.md` or `.txt`.
    #[arg(long, default_value = DEFAULT_GENERATED_DIR)]
    generated_dir: PathBuf,

    /// Directory reports are written to.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Disable the semantic similarity scorer.
    #[arg(long)]
    skip_bert_score: bool,

    /// Embedding model used by the semantic similarity scorer.
    #[arg(long, default_value = DEFAULT_BERT_MODEL)]
    bert_model: String,

    /// Similarity expected between unrelated texts, used for rescaling.
    #[arg(long, default_value_t = DEFAULT_BERT_BASELINE)]
    bert_baseline: f64,

    /// Base URL of an OpenAI-compatible embeddings API. Enables semantic similarity.
    #[arg(long, env = "VIDSCRIBE_EMBEDDINGS_URL")]
    embeddings_url: Option<String>,

    /// Directory that relative sample paths are resolved against.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Number of samples evaluated in parallel.
    #[arg(long, default_value_t = 1)]
    jobs: usize,

    /// Upper bound on parallel generation calls in live mode.
    #[arg(long, default_value_t = 1)]
    max_live_concurrency: usize,
}

#[derive(Args)]
struct ConvertArgs {
    /// Video URL or bare video id.
    source: String,

    /// Article tone: professional, casual, educational or persuasive.
    #[arg(long, default_value = DEFAULT_TONE)]
    tone: String,

    /// Speech model size: tiny, base, small, medium or large.
    #[arg(long, default_value = "base")]
    model_size: ModelSize,

    /// Write the article here instead of printing it.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for downloaded audio (defaults to the user cache).
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command completed but reported a failure.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let api = ApiConfig::new(cli.api_key)
        .with_api_base(cli.api_base)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    match cli.command {
        Command::Dataset(args) => run_dataset(args),
        Command::Eval(args) => {
            let client = api.build_client()?;
            run_eval(args, &api, &client)?;
            Ok(true)
        }
        Command::Convert(args) => {
            let client = api.build_client()?;
            run_convert(args, &api, &client)?;
            Ok(true)
        }
    }
}

fn open_store(dataset: &Path, base_dir: Option<PathBuf>) -> JsonlDatasetStore {
    let store = JsonlDatasetStore::new(dataset);
    match base_dir {
        Some(dir) => store.with_base_dir(dir),
        None => store,
    }
}

fn run_dataset(args: DatasetArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let store = open_store(&args.dataset, args.base_dir);

    match args.action {
        DatasetAction::Add {
            id,
            title,
            video_url,
            transcript,
            reference,
            tone,
            notes,
        } => {
            let sample = Sample::new(id.clone(), transcript, reference)
                .with_title(title)
                .with_video_url(video_url)
                .with_tone(tone)
                .with_notes(notes);
            for path in store.add(sample)? {
                println!("Created placeholder {}", path.display());
            }
            println!("Added sample '{id}' to {}", store.path().display());
            Ok(true)
        }
        DatasetAction::List => {
            let samples = store.list()?;
            if samples.is_empty() {
                println!("Dataset is empty.");
            }
            for sample in &samples {
                println!("{}", describe_sample(sample));
            }
            Ok(true)
        }
        DatasetAction::Validate => {
            let issues = store.validate()?;
            if issues.is_empty() {
                println!("All dataset paths are valid.");
                return Ok(true);
            }
            println!("{}", describe_issues(&issues));
            Ok(false)
        }
    }
}

fn describe_issues(issues: &[MissingPathIssue]) -> String {
    let mut lines = vec!["Validation failed:".to_string()];
    lines.extend(issues.iter().map(|issue| format!("- {issue}")));
    lines.join("\n")
}

fn describe_sample(sample: &Sample) -> String {
    let mut lines = vec![
        format!("{}: {}", sample.id, sample.video_title),
        format!("  tone: {}", sample.tone),
        format!("  transcript: {}", sample.transcript_path.display()),
        format!("  reference: {}", sample.reference_blog_path.display()),
    ];
    if !sample.notes.is_empty() {
        lines.push(format!("  notes: {}", sample.notes));
    }
    lines.join("\n")
}

fn run_eval(
    args: EvalArgs,
    api: &ApiConfig,
    client: &Client,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = MetricOptions {
        skip_semantic: args.skip_bert_score,
        bert_model: args.bert_model,
        bert_baseline: args.bert_baseline,
        embeddings: args
            .embeddings_url
            .map(|url| api.clone().with_api_base(url)),
    };
    let suite = create_metric_suite(ScorerCapabilities::detect(&options), &options, client);

    let resolver: Box<dyn OutputResolver> = match args.mode {
        RunMode::Mock => Box::new(CachedOutputResolver::new(&args.generated_dir)),
        RunMode::Live => {
            warn_if_unauthenticated(api);
            Box::new(LiveOutputResolver::new(Box::new(
                OpenAiArticleGenerator::new(client.clone(), api.clone())?,
            )))
        }
    };

    let workers = effective_workers(args.mode, args.jobs, args.max_live_concurrency);
    let executor: Box<dyn SampleExecutor> = if workers > 1 {
        log::info!("Evaluating with {workers} workers");
        Box::new(ThreadedSampleExecutor::new(workers))
    } else {
        Box::new(SequentialSampleExecutor)
    };

    let mut use_case = EvaluateDatasetUseCase::new(
        Box::new(open_store(&args.dataset, args.base_dir)),
        resolver,
        suite,
        executor,
        Box::new(StdoutEvaluationLogger::new()),
    );
    let info = RunInfo {
        dataset: args.dataset.display().to_string(),
        mode: args.mode,
        generated_dir: args.generated_dir.display().to_string(),
    };
    let (report, path) = use_case.execute(&info, &JsonReportWriter::new(&args.output_dir))?;

    println!("Evaluated {} samples", report.samples.len());
    for (name, value) in &report.summary {
        println!("  {name}: {value:.4}");
    }
    println!("Report written to {}", path.display());
    Ok(())
}

fn run_convert(
    args: ConvertArgs,
    api: &ApiConfig,
    client: &Client,
) -> Result<(), Box<dyn std::error::Error>> {
    let tone = Tone::parse(&args.tone);
    if !tone.as_str().eq_ignore_ascii_case(args.tone.trim()) {
        log::warn!("Unknown tone '{}', using {tone}", args.tone);
    }
    warn_if_unauthenticated(api);

    let download_dir = match args.download_dir {
        Some(dir) => dir,
        None => download_cache_dir()?,
    };

    let use_case = ConvertVideoUseCase::new(
        Box::new(YtDlpFetcher::new()),
        Box::new(WhisperApiRecognizer::new(client.clone(), api.clone())),
        Box::new(OpenAiArticleGenerator::new(client.clone(), api.clone())?),
    );
    let conversion = use_case.execute(&args.source, &download_dir, args.model_size, tone)?;

    match args.output {
        Some(path) => {
            fs::write(&path, &conversion.article.blog_post)?;
            log::info!("Article written to {}", path.display());
        }
        None => println!("{}", conversion.article.blog_post),
    }
    if let Some(tokens) = conversion.article.tokens_used {
        log::info!("Tokens used: {tokens}");
    }
    Ok(())
}

fn warn_if_unauthenticated(api: &ApiConfig) {
    if api.api_key.is_none() {
        log::warn!(
            "No API key set (OPENAI_API_KEY); requests to {} are sent unauthenticated",
            api.api_base
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidscribe_core::dataset::domain::path_issue::SampleField;

    #[test]
    fn test_eval_defaults() {
        let cli = Cli::try_parse_from(["vidscribe", "eval"]).unwrap();
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        assert_eq!(args.mode, RunMode::Mock);
        assert_eq!(args.dataset, PathBuf::from(DEFAULT_DATASET_PATH));
        assert_eq!(args.generated_dir, PathBuf::from(DEFAULT_GENERATED_DIR));
        assert_eq!(args.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(args.bert_model, DEFAULT_BERT_MODEL);
        assert!(!args.skip_bert_score);
        assert_eq!(args.jobs, 1);
        assert_eq!(args.max_live_concurrency, 1);
        assert_eq!(cli.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_eval_accepts_cached_alias_and_flags() {
        let cli = Cli::try_parse_from([
            "vidscribe",
            "eval",
            "--mode",
            "cached",
            "--skip-bert-score",
            "--jobs",
            "4",
            "--timeout-secs",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.timeout_secs, 30);
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        assert_eq!(args.mode, RunMode::Mock);
        assert!(args.skip_bert_score);
        assert_eq!(args.jobs, 4);
    }

    #[test]
    fn test_eval_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["vidscribe", "eval", "--mode", "replay"]).is_err());
    }

    #[test]
    fn test_dataset_add_requires_id() {
        let result = Cli::try_parse_from([
            "vidscribe",
            "dataset",
            "add",
            "--title",
            "t",
            "--video-url",
            "u",
            "--transcript",
            "a.txt",
            "--reference",
            "b.md",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dataset_add_defaults_tone() {
        let cli = Cli::try_parse_from([
            "vidscribe",
            "dataset",
            "--dataset",
            "d.jsonl",
            "add",
            "--id",
            "s1",
            "--title",
            "t",
            "--video-url",
            "u",
            "--transcript",
            "a.txt",
            "--reference",
            "b.md",
        ])
        .unwrap();
        let Command::Dataset(args) = cli.command else {
            panic!("expected dataset");
        };
        assert_eq!(args.dataset, PathBuf::from("d.jsonl"));
        match args.action {
            DatasetAction::Add { tone, notes, .. } => {
                assert_eq!(tone, DEFAULT_TONE);
                assert!(notes.is_empty());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_convert_parses_model_size() {
        let cli =
            Cli::try_parse_from(["vidscribe", "convert", "abc123", "--model-size", "small"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.source, "abc123");
        assert_eq!(args.model_size, ModelSize::Small);
        assert!(Cli::try_parse_from(["vidscribe", "convert", "x", "--model-size", "huge"]).is_err());
    }

    #[test]
    fn test_describe_sample_includes_notes_only_when_present() {
        let sample = Sample::new("s1", "t.txt", "r.md").with_title("Intro");
        let text = describe_sample(&sample);
        assert!(text.starts_with("s1: Intro"));
        assert!(text.contains("tone: professional"));
        assert!(!text.contains("notes"));

        let text = describe_sample(&sample.with_notes("needs review"));
        assert!(text.contains("notes: needs review"));
    }

    #[test]
    fn test_describe_issues_lists_each_missing_path() {
        let issues = vec![
            MissingPathIssue {
                sample_id: "s1".to_string(),
                field: SampleField::Transcript,
                path: PathBuf::from("t/s1.txt"),
            },
            MissingPathIssue {
                sample_id: "s2".to_string(),
                field: SampleField::Reference,
                path: PathBuf::from("r/s2.md"),
            },
        ];
        assert_eq!(
            describe_issues(&issues),
            "Validation failed:\n\
             - Missing transcript for s1: t/s1.txt\n\
             - Missing reference for s2: r/s2.md"
        );
    }

    #[test]
    fn test_dataset_commands_round_trip_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("dataset.jsonl");
        let args = |action| DatasetArgs {
            dataset: dataset.clone(),
            base_dir: Some(dir.path().to_path_buf()),
            action,
        };

        assert!(run_dataset(args(DatasetAction::Add {
            id: "s1".to_string(),
            title: "Intro".to_string(),
            video_url: "https://youtu.be/abc".to_string(),
            transcript: PathBuf::from("t/s1.txt"),
            reference: PathBuf::from("r/s1.md"),
            tone: "casual".to_string(),
            notes: String::new(),
        }))
        .unwrap());
        assert!(run_dataset(args(DatasetAction::Validate)).unwrap());

        fs::remove_file(dir.path().join("r/s1.md")).unwrap();
        assert!(!run_dataset(args(DatasetAction::Validate)).unwrap());
    }
}
