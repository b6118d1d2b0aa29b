pub mod http_token_embedder;
pub mod metric_suite_factory;
#[cfg(feature = "rouge")]
pub mod stemmed_rouge_scorer;
