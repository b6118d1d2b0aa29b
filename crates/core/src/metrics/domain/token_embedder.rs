/// Domain interface for per-token embeddings used by semantic similarity.
///
/// Returns one vector per token of `text`, all of the same dimension.
pub trait TokenEmbedder: Send + Sync {
    fn embed_tokens(&self, text: &str) -> Result<Vec<Vec<f32>>, Box<dyn std::error::Error>>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}
