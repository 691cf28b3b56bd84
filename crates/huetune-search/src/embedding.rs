//! Text embedding providers.
//!
//! The genre index and every query go through one [`EmbeddingProvider`] so
//! that all vectors share a model and dimensionality. [`OllamaEmbedder`]
//! talks to a local Ollama server; tests substitute in-memory providers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

const SOURCE_NAME: &str = "Ollama";

/// Maps text to fixed-length float vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name used in logs and errors.
    fn name(&self) -> &str;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> SearchResult<Vec<f32>>;

    /// Embed many texts, returning one vector per input in input order.
    ///
    /// The default implementation embeds one text at a time.
    async fn embed_batch(&self, texts: &[String]) -> SearchResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

/// Embedding provider backed by Ollama's `/api/embed` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    /// Create a client for the server at `base_url` (e.g.
    /// `http://localhost:11434`) using `model`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> SearchResult<Self> {
        let http = Client::builder()
            .user_agent("huetune/0.1.0 (https://github.com/oxur/huetune)")
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embed", self.base_url)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn embed(&self, text: &str) -> SearchResult<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| SearchError::EmptyResponse {
            source_name: SOURCE_NAME.to_string(),
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> SearchResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        log::debug!("Embedding {} text(s) with {}", texts.len(), self.model);

        let response = self
            .http
            .post(self.endpoint())
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SearchError::Http {
                source_name: SOURCE_NAME.to_string(),
                message: e.to_string(),
            })?;

        let body: EmbedResponse = response.json().await.map_err(|e| SearchError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        validate_batch(body.embeddings, texts.len())
    }
}

/// Check that a batch has one non-empty vector per input, all of the same
/// dimensionality.
pub(crate) fn validate_batch(vectors: Vec<Vec<f32>>, expected: usize) -> SearchResult<Vec<Vec<f32>>> {
    if vectors.len() != expected || vectors.first().is_some_and(Vec::is_empty) {
        return Err(SearchError::EmptyResponse {
            source_name: SOURCE_NAME.to_string(),
        });
    }

    if let Some(first) = vectors.first() {
        let dimension = first.len();
        if let Some(odd) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(SearchError::DimensionMismatch {
                expected: dimension,
                actual: odd.len(),
            });
        }
    }

    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_embed_response() {
        let json = r#"{
            "model": "nomic-embed-text",
            "embeddings": [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]],
            "total_duration": 14143917
        }"#;
        let body: EmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.embeddings.len(), 2);
        assert!((body.embeddings[1][2] - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_deserialize_missing_embeddings() {
        let body: EmbedResponse = serde_json::from_str(r#"{"model": "x"}"#).unwrap();
        assert!(body.embeddings.is_empty());
    }

    #[test]
    fn test_serialize_request() {
        let input = vec!["surf rock".to_string()];
        let json = serde_json::to_value(EmbedRequest {
            model: "nomic-embed-text",
            input: &input,
        })
        .unwrap();
        assert_eq!(json["model"], "nomic-embed-text");
        assert_eq!(json["input"][0], "surf rock");
    }

    #[test]
    fn test_validate_batch_count_mismatch() {
        let err = validate_batch(vec![vec![1.0]], 2).unwrap_err();
        assert!(matches!(err, SearchError::EmptyResponse { .. }));
    }

    #[test]
    fn test_validate_batch_dimension_mismatch() {
        let err = validate_batch(vec![vec![1.0, 0.0], vec![1.0]], 2).unwrap_err();
        assert!(matches!(
            err,
            SearchError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_validate_batch_ok() {
        let vectors = validate_batch(vec![vec![1.0, 0.0], vec![0.0, 1.0]], 2).unwrap();
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let embedder = OllamaEmbedder::new("http://localhost:11434/", "nomic-embed-text").unwrap();
        assert_eq!(embedder.endpoint(), "http://localhost:11434/api/embed");
        assert_eq!(embedder.name(), "Ollama");
    }
}
