pub const DEFAULT_DATASET_PATH: &str = "evals/dataset.jsonl";
pub const DEFAULT_GENERATED_DIR: &str = "evals/mock_outputs";
pub const DEFAULT_OUTPUT_DIR: &str = "evals/results";

pub const DEFAULT_TONE: &str = "professional";

/// Extensions tried, in order, when looking up a cached output for a sample.
pub const CACHED_OUTPUT_EXTENSIONS: &[&str] = &["md", "txt"];

pub const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "be", "but", "for", "from", "in", "is", "it", "of", "on",
    "or", "that", "the", "to", "with", "you", "your", "this", "we",
];

pub const CTA_KEYWORDS: &[&str] = &[
    "subscribe",
    "share",
    "tag",
    "join",
    "follow",
    "call to action",
    "let us know",
    "tell us",
    "comment",
];

/// Reference tokens must be longer than this to count as keywords.
pub const KEYWORD_MIN_LEN: usize = 4;

pub const HEADING_MARKER: char = '#';

pub const METRIC_PRECISION: i32 = 4;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const GENERATION_MAX_TOKENS: u32 = 2000;
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Transcript token budget before the prompt is truncated.
pub const TRANSCRIPT_TOKEN_BUDGET: usize = 3000;

pub const DEFAULT_BERT_MODEL: &str = "roberta-large";
/// Baseline used to rescale semantic-similarity scores when none is configured.
pub const DEFAULT_BERT_BASELINE: f64 = 0.83;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";
