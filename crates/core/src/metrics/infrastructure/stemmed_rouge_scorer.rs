use rust_stemmers::{Algorithm, Stemmer};

use crate::metrics::domain::rouge::{rouge1_f, rouge_l_f, RougeScorer, RougeScores};

/// Tokens at or below this length are not stemmed.
const MIN_STEM_LEN: usize = 3;

/// ROUGE-1 and ROUGE-L with English stemming.
///
/// Tokens are the `[a-z0-9]` runs of the lower-cased text, so non-ASCII
/// letters split words ("café" yields "caf"). Stop words are kept. The
/// stemmer is Snowball English (Porter2), which stems a few words differently
/// from the classic Porter algorithm, so scores can drift slightly from other
/// ROUGE implementations.
pub struct StemmedRougeScorer {
    stemmer: Stemmer,
}

impl StemmedRougeScorer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    fn tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|ch: char| !(ch.is_ascii_lowercase() || ch.is_ascii_digit()))
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                if tok.len() > MIN_STEM_LEN {
                    self.stemmer.stem(tok).into_owned()
                } else {
                    tok.to_string()
                }
            })
            .collect()
    }
}

impl Default for StemmedRougeScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RougeScorer for StemmedRougeScorer {
    fn name(&self) -> &str {
        "rouge-stemmed"
    }

    fn score(&self, reference: &str, generated: &str) -> RougeScores {
        let reference = self.tokens(reference);
        let generated = self.tokens(generated);
        RougeScores {
            rouge1_f: rouge1_f(&reference, &generated),
            rouge_l_f: rouge_l_f(&reference, &generated),
        }
    }
}
