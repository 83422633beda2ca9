//! AI assistant area. Runs on the extended timeout; generative replies are
//! slower than CRUD.

use reqwest::Method;

use crate::error::ClientError;
use crate::net::http::{ApiClient, decode};
use crate::net::types::{
    Acknowledgement, AiAnalysis, AnalysisWindow, ChatPrompt, ChatRecord, ChatReply, ChatSession,
    Recommendations,
};

pub struct AiApi {
    api: ApiClient,
}

impl AiApi {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /ai/chat`.
    pub async fn send_message(&self, prompt: &ChatPrompt) -> Result<ChatReply, ClientError> {
        let body = serde_json::to_value(prompt)?;
        decode(self.api.request::<()>(Method::POST, "/ai/chat", None, Some(body)).await?)
    }

    /// `GET /ai/chat/history`.
    pub async fn chat_history(&self) -> Result<Vec<ChatSession>, ClientError> {
        decode(self.api.request::<()>(Method::GET, "/ai/chat/history", None, None).await?)
    }

    /// `GET /ai/chat/{id}/messages`.
    pub async fn chat_messages(&self, chat_id: i64) -> Result<Vec<ChatRecord>, ClientError> {
        let path = format!("/ai/chat/{chat_id}/messages");
        decode(self.api.request::<()>(Method::GET, &path, None, None).await?)
    }

    /// `DELETE /ai/chat/{id}`.
    pub async fn delete_chat(&self, chat_id: i64) -> Result<Acknowledgement, ClientError> {
        let path = format!("/ai/chat/{chat_id}");
        decode(self.api.request::<()>(Method::DELETE, &path, None, None).await?)
    }

    /// `GET /ai/recommendations/{user_id}`.
    pub async fn recommendations(&self, user_id: i64) -> Result<Recommendations, ClientError> {
        let path = format!("/ai/recommendations/{user_id}");
        decode(self.api.request::<()>(Method::GET, &path, None, None).await?)
    }

    /// `POST /ai/analyze`.
    pub async fn analyze(&self, window: &AnalysisWindow) -> Result<AiAnalysis, ClientError> {
        let body = serde_json::to_value(window)?;
        decode(self.api.request::<()>(Method::POST, "/ai/analyze", None, Some(body)).await?)
    }
}
