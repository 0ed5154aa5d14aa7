//! analyze コマンドの実行（セッション駆動・進捗表示・結果保存）

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dialoguer::{Confirm, MultiSelect};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use ingredient_lens_common::view::SOFT_SIZE_LIMIT_BYTES;
use ingredient_lens_common::{
    analyze_with_timeout, AnalysisResult, AnalysisSession, DietaryFilterSet, DietaryType,
    IngredientAnalyzer, LabelImage, MockConfig, Phase, Sleeper,
};

use crate::config::Config;
use crate::error::{LensError, Result};
use crate::report::{render_failure, render_result};
use crate::scanner::LabelFile;

/// tokio のタイマー
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

/// 対話操作（失敗時の再試行・フィルタ選択）
pub trait Decider {
    fn retry_after_failure(&mut self, message: &str) -> Result<bool>;
    fn choose_filters(&mut self, current: &DietaryFilterSet) -> Result<DietaryFilterSet>;
}

/// 非対話: 再試行しない・フィルタはそのまま
#[derive(Debug, Default)]
pub struct NonInteractive;

impl Decider for NonInteractive {
    fn retry_after_failure(&mut self, _message: &str) -> Result<bool> {
        Ok(false)
    }

    fn choose_filters(&mut self, current: &DietaryFilterSet) -> Result<DietaryFilterSet> {
        Ok(current.clone())
    }
}

/// dialoguer による対話
#[derive(Debug, Default)]
pub struct PromptDecider;

impl Decider for PromptDecider {
    fn retry_after_failure(&mut self, _message: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt("Try again?")
            .default(true)
            .interact()?)
    }

    fn choose_filters(&mut self, current: &DietaryFilterSet) -> Result<DietaryFilterSet> {
        let labels: Vec<&str> = DietaryType::ALL.iter().map(|d| d.label()).collect();
        let defaults: Vec<bool> = DietaryType::ALL.iter().map(|d| current.contains(*d)).collect();

        let chosen = MultiSelect::new()
            .with_prompt("Dietary filters (space to toggle, enter to confirm)")
            .items(&labels)
            .defaults(&defaults)
            .interact()?;

        Ok(chosen.into_iter().map(|i| DietaryType::ALL[i]).collect())
    }
}

/// 対応状況の1行
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityRow {
    pub diet: DietaryType,
    pub compatible: bool,
}

/// 1画像分の保存形式
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub file_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub result: AnalysisResult,
    pub visible_compatibility: Vec<CompatibilityRow>,
}

/// 実行時オプション
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub filters: DietaryFilterSet,
    pub timeout: Duration,
    pub show_progress: bool,
}

/// 設定ファイル + コマンドライン上書き
pub fn effective_mock_config(config: &Config, failure_rate: Option<f64>, no_delay: bool) -> MockConfig {
    let mut mock = config.mock;
    if let Some(rate) = failure_rate {
        mock.failure_rate = rate;
    }
    if no_delay {
        mock.min_delay_ms = 0;
        mock.max_delay_ms = 0;
    }
    mock
}

fn spinner(show: bool, file_name: &str) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Analyzing ingredients... ({})", file_name));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 1回分の解析（Busy → Ready/Failed）
///
/// `interrupt` が先に完了した場合は試行を取り消して Idle に戻す。
pub async fn run_attempt<A, T, I>(
    session: &mut AnalysisSession,
    analyzer: &A,
    timer: &T,
    image: &LabelImage,
    timeout: Duration,
    interrupt: I,
) -> Result<()>
where
    A: IngredientAnalyzer,
    T: Sleeper,
    I: Future<Output = ()>,
{
    let ticket = session.begin(image).map_err(|e| match e {
        ingredient_lens_common::Error::NotAnImage(_) => LensError::NotAnImage(image.file_name.clone()),
        other => LensError::Analysis(other),
    })?;

    tokio::select! {
        biased;
        _ = interrupt => {
            session.cancel();
            warn!(file = %image.file_name, "analysis interrupted");
            Err(LensError::Interrupted)
        }
        outcome = analyze_with_timeout(analyzer, timer, image, timeout) => {
            session.finish(ticket, outcome);
            Ok(())
        }
    }
}

/// Ctrl-C を待つ（ハンドラを登録できなければ完了しない）
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// 複数画像の解析結果
///
/// 途中で止まっても、それまでに完了したレポートは `reports` に残る。
#[derive(Debug, Default)]
pub struct AnalysisRun {
    pub reports: Vec<AnalysisReport>,
    pub error: Option<LensError>,
}

impl AnalysisRun {
    pub fn into_result(self) -> Result<Vec<AnalysisReport>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.reports),
        }
    }
}

/// 画像を順に解析する
///
/// 2枚目以降は「新しい製品を解析」と同じくセッションをリセットしてから開始する。
/// 最初のエラーで停止する。
pub async fn analyze_labels<A, T, D>(
    labels: &[LabelFile],
    analyzer: &A,
    timer: &T,
    decider: &mut D,
    options: &RunOptions,
) -> AnalysisRun
where
    A: IngredientAnalyzer,
    T: Sleeper,
    D: Decider,
{
    let mut session = AnalysisSession::new();
    let mut run = AnalysisRun::default();

    for (index, label) in labels.iter().enumerate() {
        if index > 0 {
            session.reset();
        }
        session.replace_filters(options.filters.clone());

        println!("[{}/{}] {}", index + 1, labels.len(), label.path.display());

        match analyze_label(&mut session, label, analyzer, timer, decider, options).await {
            Ok(report) => run.reports.push(report),
            Err(e) => {
                run.error = Some(e);
                break;
            }
        }
    }

    run
}

async fn analyze_label<A, T, D>(
    session: &mut AnalysisSession,
    label: &LabelFile,
    analyzer: &A,
    timer: &T,
    decider: &mut D,
    options: &RunOptions,
) -> Result<AnalysisReport>
where
    A: IngredientAnalyzer,
    T: Sleeper,
    D: Decider,
{
    let image = &label.image;
    if image.size_bytes > SOFT_SIZE_LIMIT_BYTES {
        warn!(file = %image.file_name, size = image.size_bytes, "image exceeds the 10MB guidance");
    }

    loop {
        let pb = spinner(options.show_progress, &image.file_name);
        let attempt = run_attempt(session, analyzer, timer, image, options.timeout, ctrl_c()).await;
        pb.finish_and_clear();
        attempt?;

        match session.phase().clone() {
            Phase::Ready(result) => {
                let chosen = decider.choose_filters(session.filters())?;
                session.replace_filters(chosen);

                println!("{}", render_result(&result, session.filters()));
                return Ok(AnalysisReport {
                    file_name: image.file_name.clone(),
                    analyzed_at: Utc::now(),
                    visible_compatibility: session
                        .visible_compatibility()
                        .into_iter()
                        .map(|(diet, compatible)| CompatibilityRow { diet, compatible })
                        .collect(),
                    result,
                });
            }
            Phase::Failed(message) => {
                println!("{}", render_failure(&message));
                if decider.retry_after_failure(&message)? {
                    session.retry();
                    continue;
                }
                return Err(LensError::AnalysisFailed(message));
            }
            Phase::Idle | Phase::Busy(_) => {
                return Err(LensError::AnalysisFailed("analysis did not settle".into()));
            }
        }
    }
}

/// 結果をJSONで保存
pub fn save_reports(reports: &[AnalysisReport], output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(output, json)?;
    info!(path = %output.display(), count = reports.len(), "reports saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_mock_config_overrides() {
        let config = Config::default();
        let mock = effective_mock_config(&config, Some(0.0), true);
        assert_eq!(mock.failure_rate, 0.0);
        assert_eq!(mock.min_delay_ms, 0);
        assert_eq!(mock.max_delay_ms, 0);
        assert_eq!(mock.timeout_ms, config.mock.timeout_ms);
    }

    #[test]
    fn test_effective_mock_config_keeps_config_values() {
        let config = Config::default();
        let mock = effective_mock_config(&config, None, false);
        assert_eq!(mock, config.mock);
    }

    #[tokio::test]
    async fn test_interrupt_cancels_attempt() {
        use ingredient_lens_common::{MockAnalyzer, NoDelay, RandomDice};

        let analyzer =
            MockAnalyzer::with_dice(MockConfig::default(), NoDelay, RandomDice::seeded(1)).unwrap();
        let image = LabelImage::new("label.jpg", "image/jpeg", 1024);
        let mut session = AnalysisSession::new();

        let result = run_attempt(
            &mut session,
            &analyzer,
            &NoDelay,
            &image,
            Duration::from_secs(5),
            std::future::ready(()),
        )
        .await;

        assert!(matches!(result, Err(LensError::Interrupted)));
        assert_eq!(session.phase(), &Phase::Idle);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_attempt_settles_without_interrupt() {
        use ingredient_lens_common::{MockAnalyzer, NoDelay, RandomDice};

        let config = MockConfig {
            failure_rate: 0.0,
            ..Default::default()
        };
        let analyzer = MockAnalyzer::with_dice(config, NoDelay, RandomDice::seeded(2)).unwrap();
        let image = LabelImage::new("label.jpg", "image/jpeg", 1024);
        let mut session = AnalysisSession::new();

        run_attempt(
            &mut session,
            &analyzer,
            &NoDelay,
            &image,
            Duration::from_secs(5),
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

        assert!(matches!(session.phase(), Phase::Ready(_)));
    }
}
