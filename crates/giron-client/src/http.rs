//! HTTP implementation of `DiscussionService`.
//!
//! Thin translation layer: one method per remote operation, typed
//! responses, no retries. Every failure surfaces as
//! [`GironError::Api`] with a human-readable message — HTTP status and
//! body text when a response was obtained, a fixed per-operation
//! fallback otherwise.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use giron_core::discussion::{Discussion, DiscussionService, Message, StopSummary};
use giron_core::error::{GironError, Result};
use giron_core::persona::{CreatePersonaRequest, Persona};

use crate::config::ClientConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct PersonasResponse {
    personas: Vec<Persona>,
}

#[derive(Debug, Deserialize)]
struct PersonaResponse {
    persona: Persona,
}

#[derive(Debug, Deserialize)]
struct DiscussionResponse {
    discussion: Discussion,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: Message,
}

/// REST client for the external discussion service.
#[derive(Clone)]
pub struct DiscussionApiClient {
    client: Client,
    base_url: String,
}

impl DiscussionApiClient {
    /// Creates a client from the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GironError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a response to its typed payload, or to an `Api` error built
    /// from the status and body text.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = if body.trim().is_empty() {
                "不明なエラーが発生しました".to_string()
            } else {
                body
            };
            return Err(GironError::api(format!(
                "APIエラー: {} - {}",
                status.as_u16(),
                detail
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GironError::api(format!("APIエラー: 不正な応答 - {e}")))
    }
}

#[async_trait::async_trait]
impl DiscussionService for DiscussionApiClient {
    async fn get_personas(&self) -> Result<Vec<Persona>> {
        let response = self
            .client
            .get(self.url("/personas"))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("get_personas transport error: {e}");
                GironError::api("ペルソナの取得に失敗しました")
            })?;

        let payload: PersonasResponse = Self::handle_response(response).await?;
        Ok(payload.personas)
    }

    async fn create_persona(&self, request: &CreatePersonaRequest) -> Result<Persona> {
        request.validate()?;

        let mut form = reqwest::multipart::Form::new()
            .text("name", request.name.clone())
            .text("role", request.role.clone())
            .text("position", request.position.clone())
            .text("speaking_style", request.speaking_style.clone());
        if let Some(icon) = &request.icon {
            form = form.text("icon", icon.clone());
        }
        if let Some(path) = &request.image_path {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            form = form.part(
                "image",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );
        }

        let response = self
            .client
            .post(self.url("/personas"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("create_persona transport error: {e}");
                GironError::api("ペルソナの更新に失敗しました")
            })?;

        let payload: PersonaResponse = Self::handle_response(response).await?;
        Ok(payload.persona)
    }

    async fn start_discussion(&self, content: &str) -> Result<Discussion> {
        let response = self
            .client
            .post(self.url("/discussion/start"))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("start_discussion transport error: {e}");
                GironError::api("議論の開始に失敗しました")
            })?;

        let payload: DiscussionResponse = Self::handle_response(response).await?;
        Ok(payload.discussion)
    }

    async fn next_message(&self) -> Result<Message> {
        let response = self
            .client
            .post(self.url("/discussion/next"))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("next_message transport error: {e}");
                GironError::api("次のメッセージの取得に失敗しました")
            })?;

        let payload: MessageResponse = Self::handle_response(response).await?;
        Ok(payload.message)
    }

    async fn stop_discussion(&self) -> Result<StopSummary> {
        let response = self
            .client
            .post(self.url("/discussion/stop"))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("stop_discussion transport error: {e}");
                GironError::api("議論の停止に失敗しました")
            })?;

        Self::handle_response(response).await
    }
}
