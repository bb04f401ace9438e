//! Gemini API連携
//!
//! generateContent へ指示テキストとファイルパートを1回で送信する

use async_trait::async_trait;
use purus_common::{build_generate_request, parse_generate_response, AnalysisRequest};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{GenerativeModel, ModelError};
use crate::config::Config;
use crate::error::{PurusError, Result};

/// Gemini REST API アダプタ
///
/// HTTPクライアントはプロセス内で1度だけ作成し使い回す
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
    temperature: Option<f32>,
}

impl GeminiModel {
    pub fn new(client: Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            api_base: crate::config::DEFAULT_API_BASE.to_string(),
            temperature: None,
        }
    }

    /// 設定からモデルを構築（APIキー未設定なら即エラー）
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PurusError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self::new(client, api_key, config.model.clone())
            .with_api_base(config.api_base.clone())
            .with_temperature(config.temperature))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate(&self, request: &AnalysisRequest) -> std::result::Result<String, ModelError> {
        let body = build_generate_request(request, self.temperature);

        debug!(endpoint = %self.endpoint(), "calling Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::new(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ModelError::with_status(status.as_u16(), format!("failed to read body: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(ModelError::with_status(status.as_u16(), text));
        }

        parse_generate_response(&text).map_err(|e| ModelError::with_status(status.as_u16(), e.to_string()))
    }
}
