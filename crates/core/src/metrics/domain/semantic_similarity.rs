use ndarray::{Array2, Axis};

use super::metric_result::{keys, MetricResult};
use super::text_metric::TextMetric;
use super::token_embedder::TokenEmbedder;
use super::tokenizer::round_metric;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimilarityScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl SimilarityScores {
    /// Rescale each score against a baseline: `(x - b) / (1 - b)`.
    pub fn rescaled(self, baseline: f64) -> Self {
        if baseline >= 1.0 {
            return self;
        }
        let rescale = |x: f64| (x - baseline) / (1.0 - baseline);
        Self {
            precision: rescale(self.precision),
            recall: rescale(self.recall),
            f1: rescale(self.f1),
        }
    }
}

/// Stack embeddings into an L2-normalised row matrix.
fn normalized_matrix(
    embeddings: &[Vec<f32>],
) -> Result<Array2<f32>, Box<dyn std::error::Error>> {
    let dim = embeddings.first().map(Vec::len).ok_or("no token embeddings")?;
    if dim == 0 || embeddings.iter().any(|e| e.len() != dim) {
        return Err("token embeddings have inconsistent dimensions".into());
    }
    let flat: Vec<f32> = embeddings.iter().flatten().copied().collect();
    let mut matrix = Array2::from_shape_vec((embeddings.len(), dim), flat)?;
    for mut row in matrix.rows_mut() {
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }
    Ok(matrix)
}

/// Greedy cosine matching between token embeddings.
///
/// Precision averages, over generated tokens, the best match in the
/// reference; recall does the same from the reference side.
pub fn greedy_match(
    generated: &[Vec<f32>],
    reference: &[Vec<f32>],
) -> Result<SimilarityScores, Box<dyn std::error::Error>> {
    let gen = normalized_matrix(generated)?;
    let refs = normalized_matrix(reference)?;
    if gen.ncols() != refs.ncols() {
        return Err("generated and reference embeddings differ in dimension".into());
    }

    let similarity = gen.dot(&refs.t());
    let best = |axis: Axis| -> f64 {
        let maxima = similarity.map_axis(axis, |lane| {
            lane.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v))
        });
        maxima.mean().unwrap_or(0.0) as f64
    };
    let precision = best(Axis(1));
    let recall = best(Axis(0));
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    Ok(SimilarityScores {
        precision,
        recall,
        f1,
    })
}

/// Best-effort BERTScore-style metric.
///
/// Records precision/recall/F1 with baseline rescaling. Any failure records
/// `bert_f1_error = 1.0` instead and never aborts the run.
pub struct SemanticSimilarityMetric {
    embedder: Box<dyn TokenEmbedder>,
    baseline: f64,
}

impl SemanticSimilarityMetric {
    pub fn new(embedder: Box<dyn TokenEmbedder>, baseline: f64) -> Self {
        Self { embedder, baseline }
    }

    fn compute(
        &self,
        reference: &str,
        generated: &str,
    ) -> Result<SimilarityScores, Box<dyn std::error::Error>> {
        let gen = self.embedder.embed_tokens(generated)?;
        let refs = self.embedder.embed_tokens(reference)?;
        Ok(greedy_match(&gen, &refs)?.rescaled(self.baseline))
    }
}

impl TextMetric for SemanticSimilarityMetric {
    fn name(&self) -> &str {
        "semantic_similarity"
    }

    fn record(&self, reference: &str, generated: &str, result: &mut MetricResult) {
        match self.compute(reference, generated) {
            Ok(scores) => {
                result.insert(keys::BERT_PRECISION, round_metric(scores.precision));
                result.insert(keys::BERT_RECALL, round_metric(scores.recall));
                result.insert(keys::BERT_F1, round_metric(scores.f1));
            }
            Err(e) => {
                log::warn!(
                    "Semantic similarity with {} failed ({e}); recorded {} = 1.0",
                    self.embedder.model(),
                    keys::BERT_F1_ERROR
                );
                result.insert(keys::BERT_F1_ERROR, 1.0);
            }
        }
    }
}
