//! アプリケーション状態マシン
//!
//! Idle → Analyzing → Success / Error → (reset) → Idle
//!
//! 同時に進行できる解析は1件のみ。Analyzing 中の再開始とリセットは拒否する。
//! 実行中の解析を中断する手段はない。

use purus_common::{split_report, AnalysisMode, ReportSections};
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analyzer::{effective_mode, AnalysisClient, GenerativeModel};
use crate::documents::SelectedFile;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// 解析セッションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppStatus {
    #[default]
    Idle,
    Analyzing,
    Success,
    Error,
}

impl AppStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Idle => "idle",
            AppStatus::Analyzing => "analyzing",
            AppStatus::Success => "success",
            AppStatus::Error => "error",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please select at least one file.")]
    NoFilesSelected,

    #[error("An analysis is already in progress.")]
    AlreadyAnalyzing,

    #[error("Start over before changing the session ({0}).")]
    NotIdle(&'static str),

    #[error("No analysis is in progress.")]
    NotAnalyzing,
}

/// begin() が返す1回分の解析内容
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub files: Vec<SelectedFile>,
    pub mode: AnalysisMode,
    pub symptoms: Option<String>,
}

/// 1回の解析セッション
#[derive(Debug, Default)]
pub struct Session {
    status: AppStatus,
    mode: AnalysisMode,
    files: Vec<SelectedFile>,
    symptoms: String,
    result: String,
    error: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    /// 成功時のみ、結果をセクションに分割して返す
    pub fn report(&self) -> Option<ReportSections> {
        (self.status == AppStatus::Success).then(|| split_report(&self.result))
    }

    pub fn set_mode(&mut self, mode: AnalysisMode) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.mode = mode;
        Ok(())
    }

    /// ファイル選択を丸ごと置き換える
    ///
    /// サマリーモードでは先頭の1件だけを保持する
    pub fn select_files(&mut self, mut files: Vec<SelectedFile>) -> Result<(), SessionError> {
        self.ensure_idle()?;
        if !self.mode.accepts_multiple() {
            files.truncate(1);
        }
        self.files = files;
        self.error.clear();
        Ok(())
    }

    /// トレンドを選んだが1ファイルしかなく、サマリーで解析されるか
    pub fn trend_falls_back_to_summary(&self) -> bool {
        self.mode == AnalysisMode::Trend
            && !self.files.is_empty()
            && effective_mode(self.mode, self.files.len()) == AnalysisMode::Summary
    }

    /// 選択のキャンセル（検証メッセージは残す）
    pub fn clear_files(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.files.clear();
        Ok(())
    }

    pub fn set_symptoms(&mut self, symptoms: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.symptoms = symptoms.into();
        Ok(())
    }

    /// Idle → Analyzing
    ///
    /// ファイル未選択なら Idle のまま検証メッセージを設定する
    pub fn begin(&mut self) -> Result<AnalysisJob, SessionError> {
        match self.status {
            AppStatus::Idle => {}
            AppStatus::Analyzing => return Err(SessionError::AlreadyAnalyzing),
            AppStatus::Success | AppStatus::Error => return Err(SessionError::NotIdle(self.status.as_str())),
        }

        if self.files.is_empty() {
            self.error = SessionError::NoFilesSelected.to_string();
            return Err(SessionError::NoFilesSelected);
        }

        self.status = AppStatus::Analyzing;
        self.error.clear();
        debug!(mode = %self.mode, files = self.files.len(), "analysis started");

        let symptoms = self.symptoms.trim();
        Ok(AnalysisJob {
            files: self.files.clone(),
            mode: self.mode,
            symptoms: (!symptoms.is_empty()).then(|| symptoms.to_string()),
        })
    }

    /// Analyzing → Success / Error
    pub fn finish<E: Display>(&mut self, outcome: Result<String, E>) -> Result<(), SessionError> {
        if self.status != AppStatus::Analyzing {
            warn!(status = self.status.as_str(), "analysis outcome received outside Analyzing");
            return Err(SessionError::NotAnalyzing);
        }

        match outcome {
            Ok(text) => {
                self.result = text;
                self.status = AppStatus::Success;
            }
            Err(err) => {
                let message = err.to_string();
                self.error = if message.trim().is_empty() {
                    UNKNOWN_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                self.status = AppStatus::Error;
            }
        }

        debug!(status = self.status.as_str(), "analysis settled");
        Ok(())
    }

    /// begin → 解析 → finish をまとめて実行
    pub async fn run<M: GenerativeModel>(
        &mut self,
        client: &AnalysisClient<M>,
    ) -> Result<AppStatus, SessionError> {
        let job = self.begin()?;
        let outcome = client
            .analyze(&job.files, job.mode, job.symptoms.as_deref())
            .await;
        self.finish(outcome)?;
        Ok(self.status)
    }

    /// 全セッションデータを消去して Idle に戻す（モードはサマリー）
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.status == AppStatus::Analyzing {
            return Err(SessionError::AlreadyAnalyzing);
        }
        *self = Self::default();
        Ok(())
    }

    /// 主ボタンの表示名
    pub fn primary_action_label(&self) -> &'static str {
        match self.mode {
            AnalysisMode::Trend => "Analyze Health Trend",
            AnalysisMode::Summary => "Generate Simple Report",
        }
    }

    /// 選択状態の表示
    pub fn selection_label(&self) -> String {
        if self.files.is_empty() {
            "Click to Upload Files".to_string()
        } else {
            format!("{} file(s) selected", self.files.len())
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.status == AppStatus::Idle {
            Ok(())
        } else {
            Err(SessionError::NotIdle(self.status.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, "application/pdf", name.as_bytes().to_vec())
    }

    fn analyzing_session() -> Session {
        let mut session = Session::new();
        session.select_files(vec![file("lab.pdf")]).unwrap();
        session.begin().unwrap();
        session
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert_eq!(session.status(), AppStatus::Idle);
        assert_eq!(session.mode(), AnalysisMode::Summary);
        assert!(session.files().is_empty());
        assert_eq!(session.selection_label(), "Click to Upload Files");
        assert_eq!(session.primary_action_label(), "Generate Simple Report");
    }

    #[test]
    fn test_begin_without_files_stays_idle() {
        let mut session = Session::new();
        assert_eq!(session.begin().unwrap_err(), SessionError::NoFilesSelected);
        assert_eq!(session.status(), AppStatus::Idle);
        assert_eq!(session.error(), "Please select at least one file.");
    }

    #[test]
    fn test_selection_clears_validation_message() {
        let mut session = Session::new();
        session.begin().unwrap_err();
        session.select_files(vec![file("a.pdf")]).unwrap();
        assert_eq!(session.error(), "");
    }

    #[test]
    fn test_summary_mode_keeps_first_file() {
        let mut session = Session::new();
        session.select_files(vec![file("a.pdf"), file("b.pdf")]).unwrap();
        assert_eq!(session.files().len(), 1);
        assert_eq!(session.files()[0].name, "a.pdf");
    }

    #[test]
    fn test_trend_mode_keeps_all_files() {
        let mut session = Session::new();
        session.set_mode(AnalysisMode::Trend).unwrap();
        session.select_files(vec![file("a.pdf"), file("b.pdf"), file("c.pdf")]).unwrap();
        assert_eq!(session.files().len(), 3);
        assert_eq!(session.selection_label(), "3 file(s) selected");
        assert_eq!(session.primary_action_label(), "Analyze Health Trend");
    }

    #[test]
    fn test_trend_fallback_detected() {
        let mut session = Session::new();
        assert!(!session.trend_falls_back_to_summary());

        session.set_mode(AnalysisMode::Trend).unwrap();
        assert!(!session.trend_falls_back_to_summary());
        session.select_files(vec![file("a.pdf")]).unwrap();
        assert!(session.trend_falls_back_to_summary());
        session.select_files(vec![file("a.pdf"), file("b.pdf")]).unwrap();
        assert!(!session.trend_falls_back_to_summary());

        session.set_mode(AnalysisMode::Summary).unwrap();
        session.select_files(vec![file("a.pdf")]).unwrap();
        assert!(!session.trend_falls_back_to_summary());
    }

    #[test]
    fn test_clear_files_keeps_validation_message() {
        let mut session = Session::new();
        session.select_files(vec![file("a.pdf")]).unwrap();
        session.clear_files().unwrap();
        assert!(session.files().is_empty());
        assert_eq!(session.selection_label(), "Click to Upload Files");

        session.begin().unwrap_err();
        session.clear_files().unwrap();
        assert_eq!(session.error(), "Please select at least one file.");
    }

    #[test]
    fn test_begin_builds_job() {
        let mut session = Session::new();
        session.set_mode(AnalysisMode::Trend).unwrap();
        session.select_files(vec![file("a.pdf"), file("b.pdf")]).unwrap();
        session.set_symptoms("  headache ").unwrap();

        let job = session.begin().unwrap();
        assert_eq!(session.status(), AppStatus::Analyzing);
        assert_eq!(job.mode, AnalysisMode::Trend);
        assert_eq!(job.files.len(), 2);
        assert_eq!(job.symptoms.as_deref(), Some("headache"));
    }

    #[test]
    fn test_blank_symptoms_are_absent() {
        let mut session = Session::new();
        session.select_files(vec![file("a.pdf")]).unwrap();
        session.set_symptoms("   ").unwrap();
        assert!(session.begin().unwrap().symptoms.is_none());
    }

    #[test]
    fn test_reentry_rejected_while_analyzing() {
        let mut session = analyzing_session();
        assert_eq!(session.begin().unwrap_err(), SessionError::AlreadyAnalyzing);
        assert_eq!(session.reset().unwrap_err(), SessionError::AlreadyAnalyzing);
        assert!(session.select_files(vec![file("x.pdf")]).is_err());
        assert_eq!(session.status(), AppStatus::Analyzing);
    }

    #[test]
    fn test_finish_success() {
        let mut session = analyzing_session();
        session.finish(Ok::<_, String>("### Key Summary".to_string())).unwrap();
        assert_eq!(session.status(), AppStatus::Success);
        assert_eq!(session.result(), "### Key Summary");
        assert!(session.report().is_some());
    }

    #[test]
    fn test_finish_error() {
        let mut session = analyzing_session();
        session.finish(Err::<String, _>("Too many requests.")).unwrap();
        assert_eq!(session.status(), AppStatus::Error);
        assert_eq!(session.error(), "Too many requests.");
        assert!(session.report().is_none());
    }

    #[test]
    fn test_finish_error_without_message() {
        let mut session = analyzing_session();
        session.finish(Err::<String, _>("")).unwrap();
        assert_eq!(session.error(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_finish_outside_analyzing() {
        let mut session = Session::new();
        assert_eq!(
            session.finish(Ok::<_, String>("x".into())).unwrap_err(),
            SessionError::NotAnalyzing
        );
        assert_eq!(session.status(), AppStatus::Idle);
    }

    #[test]
    fn test_begin_requires_reset_after_result() {
        let mut session = analyzing_session();
        session.finish(Ok::<_, String>("done".into())).unwrap();
        assert!(matches!(session.begin(), Err(SessionError::NotIdle(_))));
        assert_eq!(session.status(), AppStatus::Success);
    }

    #[test]
    fn test_reset_clears_everything() {
        for outcome in [Ok("report".to_string()), Err("failed".to_string())] {
            let mut session = Session::new();
            session.set_mode(AnalysisMode::Trend).unwrap();
            session.select_files(vec![file("a.pdf"), file("b.pdf")]).unwrap();
            session.set_symptoms("cough").unwrap();
            session.begin().unwrap();
            session.finish(outcome).unwrap();

            session.reset().unwrap();
            assert_eq!(session.status(), AppStatus::Idle);
            assert_eq!(session.mode(), AnalysisMode::Summary);
            assert!(session.files().is_empty());
            assert_eq!(session.symptoms(), "");
            assert_eq!(session.result(), "");
            assert_eq!(session.error(), "");
        }
    }
}
