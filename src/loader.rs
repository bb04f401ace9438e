//! 解析中の進捗表示
//!
//! スピナーと経過時間（MM:SS）を表示し、3秒ごとにメッセージを切り替える

use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

pub const LOADER_MESSAGES: &[&str] = &[
    "Initializing analysis...",
    "Reading your document(s)...",
    "Applying medical knowledge base...",
    "Simplifying complex terminology...",
    "Cross-referencing data points...",
    "Generating your report...",
    "Finalizing insights...",
];

const MESSAGE_INTERVAL_SECS: u64 = 3;

/// 経過秒数に対応するメッセージ
pub fn loader_message(elapsed_secs: u64) -> &'static str {
    let index = (elapsed_secs / MESSAGE_INTERVAL_SECS) as usize % LOADER_MESSAGES.len();
    LOADER_MESSAGES[index]
}

/// 経過時間を MM:SS 形式に
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn status_line(elapsed_secs: u64) -> String {
    format!("{}  [{}]", loader_message(elapsed_secs), format_elapsed(elapsed_secs))
}

pub struct AnalysisLoader {
    bar: ProgressBar,
    ticker: JoinHandle<()>,
}

impl AnalysisLoader {
    pub fn start() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.yellow} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(status_line(0));
        bar.enable_steady_tick(Duration::from_millis(120));

        let started = Instant::now();
        let ticker_bar = bar.clone();
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            loop {
                interval.tick().await;
                ticker_bar.set_message(status_line(started.elapsed().as_secs()));
            }
        });

        Self { bar, ticker }
    }

    pub fn finish(self) {
        self.ticker.abort();
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(3600), "60:00");
    }

    #[test]
    fn test_message_rotation() {
        assert_eq!(loader_message(0), "Initializing analysis...");
        assert_eq!(loader_message(2), "Initializing analysis...");
        assert_eq!(loader_message(3), "Reading your document(s)...");
        assert_eq!(loader_message(18), "Finalizing insights...");
        assert_eq!(loader_message(21), "Initializing analysis...");
    }

    #[tokio::test]
    async fn test_loader_start_and_finish() {
        let loader = AnalysisLoader::start();
        loader.finish();
    }
}
