use reqwest::blocking::Client;

use crate::metrics::domain::metric_suite::MetricSuite;
use crate::metrics::domain::rouge::{LexicalOverlapRouge, RougeScorer};
use crate::metrics::domain::semantic_similarity::SemanticSimilarityMetric;
use crate::metrics::infrastructure::http_token_embedder::HttpTokenEmbedder;
use crate::shared::api_config::ApiConfig;
use crate::shared::constants::{DEFAULT_BERT_BASELINE, DEFAULT_BERT_MODEL};

/// Settings for the optional scorers.
#[derive(Clone, Debug)]
pub struct MetricOptions {
    pub skip_semantic: bool,
    pub bert_model: String,
    pub bert_baseline: f64,
    /// Embedding backend; semantic similarity is unavailable without one.
    pub embeddings: Option<ApiConfig>,
}

impl Default for MetricOptions {
    fn default() -> Self {
        Self {
            skip_semantic: false,
            bert_model: DEFAULT_BERT_MODEL.to_string(),
            bert_baseline: DEFAULT_BERT_BASELINE,
            embeddings: None,
        }
    }
}

/// Which optional scorers this run can use. Detected once per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScorerCapabilities {
    pub rouge: bool,
    pub semantic: bool,
}

impl ScorerCapabilities {
    pub fn detect(options: &MetricOptions) -> Self {
        Self {
            rouge: cfg!(feature = "rouge"),
            semantic: !options.skip_semantic && options.embeddings.is_some(),
        }
    }
}

/// Assemble the metric suite for the detected capabilities.
///
/// Logs which backend is selected for each optional scorer.
pub fn create_metric_suite(
    capabilities: ScorerCapabilities,
    options: &MetricOptions,
    client: &Client,
) -> MetricSuite {
    let mut suite = MetricSuite::standard(rouge_backend(capabilities));

    match (&options.embeddings, capabilities.semantic) {
        (Some(config), true) => {
            log::info!(
                "Semantic similarity enabled with {} (baseline {})",
                options.bert_model,
                options.bert_baseline
            );
            let embedder =
                HttpTokenEmbedder::new(client.clone(), config.clone(), options.bert_model.clone());
            suite.add(SemanticSimilarityMetric::new(
                Box::new(embedder),
                options.bert_baseline,
            ));
        }
        _ if options.skip_semantic => log::info!("Semantic similarity disabled"),
        _ => log::info!("No embedding backend configured, semantic similarity unavailable"),
    }

    suite
}

fn rouge_backend(capabilities: ScorerCapabilities) -> Box<dyn RougeScorer> {
    #[cfg(feature = "rouge")]
    if capabilities.rouge {
        log::info!("Using stemmed ROUGE scorer");
        return Box::new(super::stemmed_rouge_scorer::StemmedRougeScorer::new());
    }
    log::info!(
        "ROUGE scorer unavailable (rouge={}), falling back to lexical overlap",
        capabilities.rouge
    );
    Box::new(LexicalOverlapRouge)
}
