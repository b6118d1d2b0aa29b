pub mod lexical_metrics;
pub mod metric_result;
pub mod metric_suite;
pub mod rouge;
pub mod semantic_similarity;
pub mod text_metric;
pub mod token_embedder;
pub mod tokenizer;
