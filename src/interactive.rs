//! 対話式解析モジュール
//!
//! モード選択 → ファイル入力 → 症状入力 → 解析 → 結果表示 → やり直し/終了

use dialoguer::{Confirm, Input, Select};
use purus_common::AnalysisMode;
use std::path::{Path, PathBuf};

use crate::analyzer::{AnalysisClient, GenerativeModel, SINGLE_FILE_TREND_WARNING};
use crate::app::{AppStatus, Session};
use crate::documents::{is_supported_media_type, SelectedFile};
use crate::error::Result;
use crate::export;
use crate::loader::AnalysisLoader;

const MODES: [AnalysisMode; 2] = [AnalysisMode::Summary, AnalysisMode::Trend];

/// 入力されたパス文字列を分割（カンマ区切り、前後空白・引用符を除去）
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn prompt_files(mode: AnalysisMode) -> Result<Vec<SelectedFile>> {
    let prompt = if mode.accepts_multiple() {
        "Documents (comma separated, oldest to newest)"
    } else {
        "Document"
    };

    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let mut files = Vec::new();
    for path in parse_path_list(&input) {
        match SelectedFile::from_path(&path) {
            Ok(file) => {
                if !is_supported_media_type(&file.media_type) {
                    println!("⚠ {} is not an image or PDF ({})", file.name, file.media_type);
                }
                files.push(file);
            }
            Err(err) => println!("⚠ {}", err),
        }
    }
    Ok(files)
}

/// 対話セッションを実行
pub async fn run_interactive<M: GenerativeModel>(
    client: &AnalysisClient<M>,
    output_dir: &Path,
    output_file: &str,
) -> Result<()> {
    let mut session = Session::new();

    loop {
        let labels: Vec<&str> = MODES.iter().map(|m| m.label()).collect();
        let selected = Select::new()
            .with_prompt("Select Analysis Type")
            .items(&labels)
            .default(0)
            .interact()?;
        session.set_mode(MODES[selected])?;

        let files = prompt_files(session.mode())?;
        if files.is_empty() {
            // 選択キャンセル: 検証メッセージは残したまま選択だけ外す
            session.clear_files()?;
        } else {
            session.select_files(files)?;
        }
        println!("{}", session.selection_label());
        if session.trend_falls_back_to_summary() {
            println!("⚠ {}", SINGLE_FILE_TREND_WARNING);
        }

        let symptoms: String = Input::new()
            .with_prompt("Add Symptoms (Optional)")
            .allow_empty(true)
            .interact_text()?;
        session.set_symptoms(symptoms)?;

        if !Confirm::new()
            .with_prompt(session.primary_action_label())
            .default(true)
            .interact()?
        {
            return Ok(());
        }

        let loader = AnalysisLoader::start();
        let outcome = session.run(client).await;
        loader.finish();

        match outcome {
            Ok(AppStatus::Success) => {
                if let Some(report) = session.report() {
                    export::print_report(&report);
                    if Confirm::new().with_prompt("Download PDF").default(true).interact()? {
                        export::export_pdf(&report, output_dir, output_file)?;
                    }
                }
            }
            Ok(_) => {
                println!("\n❌ Analysis Failed");
                println!("{}\n", session.error());
            }
            Err(err) => {
                // ファイル未選択: Idle のまま入力をやり直す
                println!("⚠ {}", err);
                continue;
            }
        }

        let again = Confirm::new()
            .with_prompt(if session.status() == AppStatus::Error { "Try Again" } else { "Start Over" })
            .default(true)
            .interact()?;
        session.reset()?;
        if !again {
            return Ok(());
        }
    }
}
