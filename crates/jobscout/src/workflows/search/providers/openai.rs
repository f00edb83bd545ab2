//! OpenAI-backed similarity and explanation providers. All outbound AI calls
//! in the search workflow go through these two clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;

use super::{ExplainRequest, ExplanationProvider, ProviderError, SimilarityProvider};

const EXPLANATION_SYSTEM_PROMPT: &str = "You are a job matching assistant. Analyze the match between a job and a resume. \
Return a brief explanation (2-3 sentences) of why this is a good/poor match. \
Focus on: matching skills, relevant experience, and keyword alignment. \
Be specific and concise.";

/// Character cap for the description and resume excerpts placed in the prompt.
const PROMPT_EXCERPT_CHARS: usize = 500;
const CHAT_TEMPERATURE: f32 = 0.3;

fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Embedding client used by the semantic scoring strategy.
pub struct OpenAiEmbeddings {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbeddings {
    pub fn new(
        config: &ProviderConfig,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_base: config.api_base.clone(),
            api_key,
            model: config.embedding_model.clone(),
        })
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

#[async_trait]
impl SimilarityProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let response = self
            .client
            .post(format!("{}/embeddings", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: EmbeddingResponse = response.json().await?;
        payload
            .data
            .into_iter()
            .next()
            .map(|row| row.embedding)
            .ok_or(ProviderError::EmptyPayload)
    }
}

/// Chat-completion client writing prose match explanations.
pub struct OpenAiExplanations {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiExplanations {
    pub fn new(
        config: &ProviderConfig,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_base: config.api_base.clone(),
            api_key,
            model: config.chat_model.clone(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl ExplanationProvider for OpenAiExplanations {
    async fn explain(&self, request: ExplainRequest<'_>) -> Result<String, ProviderError> {
        let prompt = format!(
            "Job: {}\nDescription: {}...\n\nResume excerpt: {}...\n\nMatch score: {}%\n\nProvide a brief explanation for this match score.",
            request.title,
            excerpt(request.description, PROMPT_EXCERPT_CHARS),
            excerpt(request.resume_text, PROMPT_EXCERPT_CHARS),
            request.score,
        );

        let body = ChatRequest {
            model: &self.model,
            temperature: CHAT_TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: EXPLANATION_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ChatResponse = response.json().await?;
        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyPayload)
    }
}
