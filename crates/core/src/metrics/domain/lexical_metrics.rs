use super::metric_result::{keys, MetricResult};
use super::text_metric::TextMetric;
use super::tokenizer::{round_metric, token_set, tokenize};
use crate::shared::constants::{CTA_KEYWORDS, HEADING_MARKER, KEYWORD_MIN_LEN};

/// Jaccard similarity of the content-word sets, `0.0` when the reference has
/// no content words.
pub fn lexical_overlap(reference: &str, generated: &str) -> f64 {
    let ref_tokens = token_set(reference);
    if ref_tokens.is_empty() {
        return 0.0;
    }
    let gen_tokens = token_set(generated);
    let intersection = ref_tokens.intersection(&gen_tokens).count();
    let union = ref_tokens.union(&gen_tokens).count();
    round_metric(intersection as f64 / union as f64)
}

/// Share of long reference content words that reappear in the generated text.
pub fn keyword_recall(reference: &str, generated: &str) -> f64 {
    let keywords: std::collections::HashSet<String> = tokenize(reference)
        .into_iter()
        .filter(|tok| tok.chars().count() > KEYWORD_MIN_LEN)
        .collect();
    if keywords.is_empty() {
        return 0.0;
    }
    let gen_tokens = token_set(generated);
    let found = keywords.iter().filter(|k| gen_tokens.contains(*k)).count();
    round_metric(found as f64 / keywords.len() as f64)
}

pub fn has_call_to_action(text: &str) -> bool {
    let lower = text.to_lowercase();
    CTA_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Line boundaries recognised when counting headings, including a lone `\r`.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

pub fn heading_count(text: &str) -> usize {
    text.split(LINE_BREAKS)
        .filter(|line| line.trim_start().starts_with(HEADING_MARKER))
        .count()
}

pub struct KeywordRecallMetric;

impl TextMetric for KeywordRecallMetric {
    fn name(&self) -> &str {
        keys::KEYWORD_RECALL
    }

    fn record(&self, reference: &str, generated: &str, result: &mut MetricResult) {
        result.insert(keys::KEYWORD_RECALL, keyword_recall(reference, generated));
    }
}

pub struct CallToActionMetric;

impl TextMetric for CallToActionMetric {
    fn name(&self) -> &str {
        keys::CALL_TO_ACTION
    }

    fn record(&self, _reference: &str, generated: &str, result: &mut MetricResult) {
        let present = if has_call_to_action(generated) { 1.0 } else { 0.0 };
        result.insert(keys::CALL_TO_ACTION, present);
    }
}

pub struct HeadingCountMetric;

impl TextMetric for HeadingCountMetric {
    fn name(&self) -> &str {
        keys::HEADING_COUNT
    }

    fn record(&self, _reference: &str, generated: &str, result: &mut MetricResult) {
        result.insert(keys::HEADING_COUNT, heading_count(generated) as f64);
    }
}

/// Content-word counts of both texts, for scale comparison.
pub struct WordCountMetric;

impl TextMetric for WordCountMetric {
    fn name(&self) -> &str {
        "word_count"
    }

    fn record(&self, reference: &str, generated: &str, result: &mut MetricResult) {
        result.insert(keys::WORD_COUNT_GENERATED, tokenize(generated).len() as f64);
        result.insert(keys::WORD_COUNT_REFERENCE, tokenize(reference).len() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_overlap_identical_text_is_one() {
        let text = "the quick brown fox jumps";
        assert_eq!(lexical_overlap(text, text), 1.0);
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = "alpha beta gamma";
        let b = "beta gamma delta epsilon";
        assert_relative_eq!(lexical_overlap(a, b), 0.4);
        assert_relative_eq!(lexical_overlap(b, a), 0.4);
    }

    #[test]
    fn test_overlap_disjoint_is_zero() {
        assert_eq!(lexical_overlap("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_overlap_empty_reference_is_zero() {
        assert_eq!(lexical_overlap("", "anything at all"), 0.0);
        assert_eq!(lexical_overlap("the and of", "anything at all"), 0.0);
    }

    #[test]
    fn test_overlap_rounds_to_four_places() {
        // 1 shared of 4 total
        assert_eq!(lexical_overlap("alpha beta", "alpha gamma delta"), 0.25);
        // 1 shared of 3 total
        assert_eq!(lexical_overlap("alpha beta", "alpha gamma"), 0.3333);
    }

    #[test]
    fn test_keyword_recall_is_not_symmetric() {
        let long = "distributed systems require careful design";
        let short = "careful design matters";
        assert_eq!(keyword_recall(long, short), 0.4);
        assert_eq!(keyword_recall(short, long), 0.6667);
    }

    #[test]
    fn test_keyword_recall_ignores_short_words() {
        // "fox" and "dog" are too short to count as keywords
        assert_eq!(keyword_recall("fox dog", "fox dog"), 0.0);
        assert_eq!(keyword_recall("quick brown foxes", "brown foxes"), 0.6667);
    }

    #[test]
    fn test_keyword_recall_empty_reference_is_zero() {
        assert_eq!(keyword_recall("", "generated text with words"), 0.0);
    }

    #[rstest]
    #[case("If you enjoyed this, please subscribe!", true)]
    #[case("Let Us Know what you think.", true)]
    #[case("Leave a COMMENT below", true)]
    #[case("A plain summary of the topic.", false)]
    #[case("", false)]
    fn test_call_to_action(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(has_call_to_action(text), expected);
    }

    #[test]
    fn test_heading_count() {
        let text = "# Title\n  ## Section\nBody with a #hashtag\n\n### Another\nplain";
        assert_eq!(heading_count(text), 3);
        assert_eq!(heading_count(""), 0);
    }

    #[rstest]
    #[case("# Title\r## Section\rbody")]
    #[case("# Title\r\n## Section\r\nbody")]
    #[case("# Title\u{2028}## Section\u{0c}body")]
    fn test_heading_count_on_other_line_breaks(#[case] text: &str) {
        assert_eq!(heading_count(text), 2);
    }

    #[test]
    fn test_call_to_action_metric_encodes_bool() {
        let mut result = MetricResult::new();
        CallToActionMetric.record("ref", "please subscribe", &mut result);
        assert_eq!(result.get(keys::CALL_TO_ACTION), Some(1.0));

        let mut result = MetricResult::new();
        CallToActionMetric.record("ref", "nothing to see", &mut result);
        assert_eq!(result.get(keys::CALL_TO_ACTION), Some(0.0));
    }

    #[test]
    fn test_word_count_metric_excludes_stopwords() {
        let mut result = MetricResult::new();
        WordCountMetric.record("the quick fox", "a b c and d", &mut result);
        assert_eq!(result.get(keys::WORD_COUNT_REFERENCE), Some(2.0));
        assert_eq!(result.get(keys::WORD_COUNT_GENERATED), Some(3.0));
    }
}
