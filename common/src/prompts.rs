//! プロンプト生成モジュール
//!
//! AIモデルへ送る指示テキストを組み立てる:
//! - build_summary_prompt: 1文書サマリー用
//! - build_trend_prompt: 複数文書トレンド用
//! - build_prompt: モード別ディスパッチ
//!
//! 見出し文言と NEW_PAGE_MARKER はレポート分割（report.rs）との契約。
//! 変更すると出力の分割が壊れるため、互換性のない変更として扱うこと。

use crate::types::AnalysisMode;

/// サマリーとトレンド解析を区切る予約トークン
pub const NEW_PAGE_MARKER: &str = "---NEW_PAGE---";

/// 出力の先頭に必ず置かせる免責文
pub const DISCLAIMER: &str = "This is an AI-generated summary and not a substitute for professional medical advice. Please consult your doctor for any health concerns.";

/// 1文書サマリーの見出し（この順序で出力させる）
pub const SUMMARY_HEADINGS: &[&str] = &[
    "Document Type",
    "Key Summary",
    "Detailed Breakdown",
    "Recommendations & Next Steps",
];

/// トレンドモードで最新文書に使う見出し
pub const LATEST_DOCUMENT_HEADINGS: &[&str] = &["Document Type", "Key Summary", "Detailed Breakdown"];

/// トレンド解析セクションの見出し
pub const TREND_HEADINGS: &[&str] = &[
    "Health Trend Analysis",
    "Key Changes Over Time",
    "Visual Trend Spotlight",
    "Potential Areas for Discussion",
];

pub const SYMPTOM_ANALYSIS_HEADING: &str = "Symptom Analysis";
pub const SYMPTOM_CORRELATION_HEADING: &str = "Symptom Correlation";

/// 症状テキストを正規化（前後空白を除去、空ならNone）
pub fn normalize_symptoms(symptoms: Option<&str>) -> Option<&str> {
    symptoms.map(str::trim).filter(|s| !s.is_empty())
}

/// ユーザー入力に予約トークンが紛れ込まないようにする
fn sanitize_symptoms(symptoms: &str) -> String {
    symptoms.replace(NEW_PAGE_MARKER, "[page break]")
}

/// 1文書サマリー用プロンプト生成
///
/// 症状が指定された場合のみ "Symptom Analysis" 指示を1ブロック追加する
pub fn build_summary_prompt(symptoms: Option<&str>) -> String {
    let headings = SUMMARY_HEADINGS
        .iter()
        .map(|h| format!("    *   ### {}", h))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        r#"You are a helpful medical assistant AI named Purus. Your task is to analyze a medical document (which could be a prescription, lab report, ECG, scan, etc.) and generate a simple, easy-to-understand summary for a patient.

**Instructions:**
1.  **Do Not Provide Medical Advice:** Start your response with a clear disclaimer: "{DISCLAIMER}"
2.  **Structure the Report:** Organize the output in clear sections using Markdown. Use the following headings:
{headings}
3.  **Simplify Language:** Avoid jargon. Explain complex terms in plain language.
4.  **Analyze Content:**
    *   **For Lab Reports:** Identify values that are outside the normal range. Explain what these markers generally relate to in simple terms.
    *   **For Prescriptions:** List each medication, its purpose, dosage, and frequency clearly in a table.
    *   **For other documents (ECG, Scans):** Summarize the findings mentioned in the report.
5.  **Maintain a supportive and clear tone.**
"#
    );

    if let Some(symptoms) = normalize_symptoms(symptoms) {
        prompt.push_str(&symptom_analysis_section(&sanitize_symptoms(symptoms)));
    }

    prompt
}

fn symptom_analysis_section(symptoms: &str) -> String {
    format!(
        r####"6.  **{SYMPTOM_ANALYSIS_HEADING}:** The user has reported the following symptoms: "{symptoms}". Please add a section titled "### {SYMPTOM_ANALYSIS_HEADING}" where you analyze these symptoms in the context of the provided medical document. Discuss potential correlations or points of discussion for their doctor, while reiterating that this is not a medical diagnosis.
"####
    )
}

/// 複数文書トレンド用プロンプト生成
///
/// 最新文書のサマリー → NEW_PAGE_MARKER 単独行 → トレンド解析、の順で出力させる
pub fn build_trend_prompt(symptoms: Option<&str>) -> String {
    let symptoms = normalize_symptoms(symptoms).map(sanitize_symptoms);

    let symptom_context = symptoms
        .as_deref()
        .map(|s| format!("You should also consider the user's current symptoms: \"{}\"\n", s))
        .unwrap_or_default();

    let latest_headings = LATEST_DOCUMENT_HEADINGS.join(", ");
    let (overview, changes) = (TREND_HEADINGS[0], TREND_HEADINGS[1]);
    let (spotlight, discussion) = (TREND_HEADINGS[2], TREND_HEADINGS[3]);

    let symptom_correlation = if symptoms.is_some() {
        format!(
            r#"    *   #### {SYMPTOM_CORRELATION_HEADING}
        *   Briefly discuss if any of the observed trends could be related to the reported symptoms, framing this as a point for discussion with a healthcare professional.
"#
        )
    } else {
        String::new()
    };

    format!(
        r#"You are a helpful medical assistant AI named Purus. Your task is to analyze a series of medical documents provided over time and generate a comprehensive health trend report for a patient.
{symptom_context}
**Instructions:**
1.  **Do Not Provide Medical Advice:** Start your response with a clear disclaimer: "{DISCLAIMER}"
2.  **Summarize Latest Document:** First, provide a summary of the most recent document (based on content and filenames if possible), following the structure for a single document analysis ({latest_headings}).
3.  **Introduce Trend Analysis Section:** After the summary of the latest document, you MUST insert a special separator on its own line: `{NEW_PAGE_MARKER}`. This is critical for formatting the downloadable report.
4.  **Structure the Trend Analysis:** After the separator, create the trend analysis report with the following Markdown headings:
    *   ### {overview}
    *   #### {changes}
        *   Analyze all provided documents chronologically.
        *   Highlight significant changes in lab results (e.g., rising/falling levels of specific markers), changes in prescriptions (new medications, dosage adjustments), and findings from scans or other reports. Use bullet points for clarity.
    *   #### {spotlight}
        *   Create a Markdown table for one or two of the most significant changing lab markers. The table should show the date (if available in the document) and the value.
    *   #### {discussion}
        *   Based on the trends, suggest topics the user might want to discuss with their doctor. Do not give advice, but frame them as questions or discussion points.
{symptom_correlation}5.  **Maintain a supportive and clear tone throughout.**
"#
    )
}

/// モードに応じたプロンプトを生成
pub fn build_prompt(mode: AnalysisMode, symptoms: Option<&str>) -> String {
    match mode {
        AnalysisMode::Summary => build_summary_prompt(symptoms),
        AnalysisMode::Trend => build_trend_prompt(symptoms),
    }
}
