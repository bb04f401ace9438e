use futures::future::try_join_all;
use purus_common::{build_prompt, encode_bytes, AnalysisMode, AnalysisRequest, EncodedFilePart};
use tracing::{debug, error};

use super::{AnalysisError, GenerativeModel};
use crate::documents::SelectedFile;

/// 解析クライアント
///
/// 1回の呼び出しにつき外部モデルへのリクエストは1回だけ。リトライしない。
pub struct AnalysisClient<M> {
    model: M,
}

impl<M: GenerativeModel> AnalysisClient<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// 1文書サマリー
    pub async fn analyze_document(
        &self,
        file: &SelectedFile,
        symptoms: Option<&str>,
    ) -> Result<String, AnalysisError> {
        self.run(std::slice::from_ref(file), AnalysisMode::Summary, symptoms).await
    }

    /// 複数文書トレンド
    pub async fn analyze_health_trend(
        &self,
        files: &[SelectedFile],
        symptoms: Option<&str>,
    ) -> Result<String, AnalysisError> {
        self.run(files, AnalysisMode::Trend, symptoms).await
    }

    /// モードとファイル数から経路を選んで解析
    ///
    /// トレンドは2ファイル以上のときのみ。それ以外は先頭ファイルのサマリー。
    pub async fn analyze(
        &self,
        files: &[SelectedFile],
        mode: AnalysisMode,
        symptoms: Option<&str>,
    ) -> Result<String, AnalysisError> {
        let first = files.first().ok_or(AnalysisError::NoFiles)?;

        match effective_mode(mode, files.len()) {
            AnalysisMode::Trend => self.analyze_health_trend(files, symptoms).await,
            AnalysisMode::Summary => self.analyze_document(first, symptoms).await,
        }
    }

    async fn run(
        &self,
        files: &[SelectedFile],
        mode: AnalysisMode,
        symptoms: Option<&str>,
    ) -> Result<String, AnalysisError> {
        if files.is_empty() {
            return Err(AnalysisError::NoFiles);
        }

        let parts = encode_files(files).await?;
        let prompt = build_prompt(mode, symptoms);
        let request = AnalysisRequest::new(prompt, parts);

        debug!(
            mode = %mode,
            parts = request.parts.len(),
            prompt_chars = request.prompt.len(),
            "sending analysis request"
        );

        match self.model.generate(&request).await {
            Ok(text) => {
                debug!(response_chars = text.len(), "analysis response received");
                Ok(text)
            }
            Err(err) => {
                error!(mode = %mode, error = %err, "model call failed");
                Err(AnalysisError::classify(&err, mode))
            }
        }
    }
}

/// 実際に使う解析モード
pub fn effective_mode(mode: AnalysisMode, file_count: usize) -> AnalysisMode {
    match mode {
        AnalysisMode::Trend if file_count > 1 => AnalysisMode::Trend,
        _ => AnalysisMode::Summary,
    }
}

/// 全ファイルをエンコード（並行読み込み、出力順は入力順）
async fn encode_files(files: &[SelectedFile]) -> Result<Vec<EncodedFilePart>, AnalysisError> {
    try_join_all(files.iter().map(|file| async move {
        let bytes = file.read_bytes().await.map_err(|source| AnalysisError::FileRead {
            name: file.name.clone(),
            source,
        })?;
        Ok::<_, AnalysisError>(encode_bytes(&bytes, &file.media_type))
    }))
    .await
}
