use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::metrics::domain::token_embedder::TokenEmbedder;
use crate::shared::api_config::ApiConfig;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

/// Per-request input limit of the OpenAI embeddings endpoint.
pub const MAX_INPUTS_PER_REQUEST: usize = 2048;

/// Token embedder backed by an OpenAI-compatible `/embeddings` endpoint.
///
/// Each whitespace-delimited token is embedded on its own, so vectors carry
/// no sentence context and punctuation stays attached ("safe." and "safe"
/// differ). Scores built on it approximate BERTScore with word vectors.
///
/// Tokens go out in batches of at most `batch_size` inputs. Each response is
/// reordered by `index`, so the result lines up with the token order.
pub struct HttpTokenEmbedder {
    client: Client,
    config: ApiConfig,
    model: String,
    batch_size: usize,
}

impl HttpTokenEmbedder {
    pub fn new(client: Client, config: ApiConfig, model: impl Into<String>) -> Self {
        Self {
            client,
            config,
            model: model.into(),
            batch_size: MAX_INPUTS_PER_REQUEST,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn embed_batch(&self, batch: &[&str]) -> Result<Vec<Vec<f32>>, Box<dyn std::error::Error>> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: batch.to_vec(),
        };
        let mut request = self.client.post(self.config.endpoint("embeddings")).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("embedding request failed: HTTP {status}").into());
        }
        let parsed: EmbeddingResponse = response.json()?;
        embeddings_in_order(parsed, batch.len())
    }
}

impl TokenEmbedder for HttpTokenEmbedder {
    fn embed_tokens(&self, text: &str) -> Result<Vec<Vec<f32>>, Box<dyn std::error::Error>> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut embeddings = Vec::with_capacity(tokens.len());
        for batch in tokens.chunks(self.batch_size) {
            embeddings.extend(self.embed_batch(batch)?);
        }
        Ok(embeddings)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn embeddings_in_order(
    mut response: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, Box<dyn std::error::Error>> {
    if response.data.len() != expected {
        return Err(format!(
            "expected {expected} embeddings, got {}",
            response.data.len()
        )
        .into());
    }
    response.data.sort_by_key(|item| item.index);
    Ok(response.data.into_iter().map(|item| item.embedding).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeddings_reordered_by_index() {
        let response: EmbeddingResponse = serde_json::from_str(
            r#"{"data":[{"index":1,"embedding":[0.0,1.0]},{"index":0,"embedding":[1.0,0.0]}]}"#,
        )
        .unwrap();
        let embeddings = embeddings_in_order(response, 2).unwrap();
        assert_eq!(embeddings, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_embedding_count_mismatch_is_error() {
        let response: EmbeddingResponse =
            serde_json::from_str(r#"{"data":[{"index":0,"embedding":[1.0]}]}"#).unwrap();
        assert!(embeddings_in_order(response, 3).is_err());
    }

    #[test]
    fn test_empty_text_skips_request() {
        let config = ApiConfig::default().with_api_base("http://127.0.0.1:9");
        let embedder = HttpTokenEmbedder::new(Client::new(), config, "roberta-large");
        assert!(embedder.embed_tokens("   ").unwrap().is_empty());
        assert_eq!(embedder.model(), "roberta-large");
    }

    /// Serves `connections` embedding requests, echoing each input parsed as
    /// a number and recording the batch sizes it saw.
    fn serve_embeddings(connections: usize) -> (String, std::thread::JoinHandle<Vec<usize>>) {
        use std::io::{BufRead, BufReader, Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let mut sizes = Vec::new();
            for _ in 0..connections {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut content_length = 0;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    if line == "\r\n" {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                    }
                }
                let mut body = vec![0; content_length];
                reader.read_exact(&mut body).unwrap();
                let request: serde_json::Value = serde_json::from_slice(&body).unwrap();
                let inputs = request["input"].as_array().unwrap();
                sizes.push(inputs.len());

                let data: Vec<serde_json::Value> = inputs
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, input)| {
                        let value: f32 = input.as_str().unwrap().parse().unwrap();
                        serde_json::json!({"index": i, "embedding": [value]})
                    })
                    .collect();
                let payload = serde_json::json!({ "data": data }).to_string();
                let mut stream = stream;
                write!(
                    stream,
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    payload.len(),
                    payload
                )
                .unwrap();
            }
            sizes
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_long_text_is_split_into_batches() {
        let (base, server) = serve_embeddings(3);
        let config = ApiConfig::default().with_api_base(base);
        let embedder =
            HttpTokenEmbedder::new(config.build_client().unwrap(), config, "roberta-large")
                .with_batch_size(2);

        let embeddings = embedder.embed_tokens("1 2 3 4 5").unwrap();

        assert_eq!(
            embeddings,
            vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0], vec![5.0]]
        );
        assert_eq!(server.join().unwrap(), vec![2, 2, 1]);
    }

    #[test]
    fn test_unreachable_endpoint_is_error() {
        let config = ApiConfig::default()
            .with_api_base("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));
        let embedder =
            HttpTokenEmbedder::new(config.build_client().unwrap(), config, "roberta-large");
        assert!(embedder.embed_tokens("hello world").is_err());
    }
}
