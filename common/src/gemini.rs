//! Gemini generateContent のワイヤ形式
//!
//! リクエスト組み立てとレスポンス本文からのテキスト抽出。
//! HTTP送信そのものは各フロントエンドが担当する。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::AnalysisRequest;

/// generateContent リクエスト
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

/// generateContent レスポンス
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// AnalysisRequest から送信ボディを作成
///
/// パート順は「指示テキスト → ファイル（入力順）」で固定
pub fn build_generate_request(
    request: &AnalysisRequest,
    temperature: Option<f32>,
) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(request.parts.len() + 1);
    parts.push(Part::Text { text: request.prompt.clone() });

    for part in &request.parts {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: part.mime_type.clone(),
                data: part.data.clone(),
            },
        });
    }

    GenerateContentRequest {
        contents: vec![Content { parts }],
        generation_config: temperature.map(|temperature| GenerationConfig { temperature }),
    }
}

/// レスポンス本文から生成テキストを取り出す
///
/// 先頭候補のテキストパートをすべて連結する
pub fn parse_generate_response(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::EmptyResponse("no candidates".into()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(Error::EmptyResponse("candidate has no text".into()));
    }

    Ok(text)
}
