use std::collections::HashMap;

use super::lexical_metrics::lexical_overlap;
use super::metric_result::{keys, MetricResult};
use super::text_metric::TextMetric;
use super::tokenizer::round_metric;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RougeScores {
    pub rouge1_f: f64,
    pub rouge_l_f: f64,
}

/// Domain interface for ROUGE-1 / ROUGE-L F-measure backends.
pub trait RougeScorer: Send + Sync {
    fn name(&self) -> &str;

    fn score(&self, reference: &str, generated: &str) -> RougeScores;
}

/// Stand-in used when no ROUGE backend is available: both values are the
/// lexical-overlap score, so callers see the same keys but not ROUGE
/// semantics.
pub struct LexicalOverlapRouge;

impl RougeScorer for LexicalOverlapRouge {
    fn name(&self) -> &str {
        "lexical-overlap"
    }

    fn score(&self, reference: &str, generated: &str) -> RougeScores {
        let overlap = lexical_overlap(reference, generated);
        RougeScores {
            rouge1_f: overlap,
            rouge_l_f: overlap,
        }
    }
}

pub struct RougeMetric {
    scorer: Box<dyn RougeScorer>,
}

impl RougeMetric {
    pub fn new(scorer: Box<dyn RougeScorer>) -> Self {
        Self { scorer }
    }

    pub fn backend(&self) -> &str {
        self.scorer.name()
    }
}

impl TextMetric for RougeMetric {
    fn name(&self) -> &str {
        "rouge"
    }

    fn record(&self, reference: &str, generated: &str, result: &mut MetricResult) {
        let scores = self.scorer.score(reference, generated);
        result.insert(keys::ROUGE1_F, scores.rouge1_f);
        result.insert(keys::ROUGE_L_F, scores.rouge_l_f);
    }
}

fn f_measure(overlap: usize, reference_len: usize, candidate_len: usize) -> f64 {
    if overlap == 0 || reference_len == 0 || candidate_len == 0 {
        return 0.0;
    }
    let precision = overlap as f64 / candidate_len as f64;
    let recall = overlap as f64 / reference_len as f64;
    round_metric(2.0 * precision * recall / (precision + recall))
}

/// ROUGE-1 F-measure over pre-tokenized text (clipped unigram counts).
pub fn rouge1_f(reference: &[String], candidate: &[String]) -> f64 {
    let mut ref_counts: HashMap<&str, usize> = HashMap::new();
    for tok in reference {
        *ref_counts.entry(tok.as_str()).or_default() += 1;
    }
    let mut overlap = 0;
    for tok in candidate {
        if let Some(count) = ref_counts.get_mut(tok.as_str()) {
            if *count > 0 {
                *count -= 1;
                overlap += 1;
            }
        }
    }
    f_measure(overlap, reference.len(), candidate.len())
}

/// ROUGE-L F-measure over pre-tokenized text.
pub fn rouge_l_f(reference: &[String], candidate: &[String]) -> f64 {
    f_measure(
        lcs_len(reference, candidate),
        reference.len(),
        candidate.len(),
    )
}

/// Longest common subsequence length, two-row dynamic programming.
pub fn lcs_len(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
