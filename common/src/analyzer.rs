//! 解析ロジック（CLI/WASM共通）
//!
//! - `IngredientAnalyzer`: ラベル画像 → 解析結果 の境界（実AIに差し替える箇所）
//! - `MockAnalyzer`: 遅延・失敗・固定結果をランダムに返すスタブ
//! - `analyze_with_timeout`: タイムアウト付き呼び出し
//!
//! 乱数（`Dice`）と待機（`Sleeper`）は注入可能で、テストでは待たずに結果を固定できる。

use std::future::Future;
use std::ops::Range;
use std::pin::pin;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use futures::future::{self, Either};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fixtures::fixtures;
use crate::types::{AnalysisResult, LabelImage};

/// シミュレート失敗時のメッセージ
pub const FAILURE_MESSAGE: &str =
    "Unable to process image. Please ensure the ingredient label is clearly visible and try again.";

/// 成分解析の境界
pub trait IngredientAnalyzer {
    fn analyze(&self, image: &LabelImage) -> impl Future<Output = Result<AnalysisResult>>;
}

/// 非同期待機（ランタイムごとに実装）
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// 待たない Sleeper（テスト・`--no-delay` 用）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Sleeper for NoDelay {
    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> {
        future::ready(())
    }
}

/// モック解析の乱数源
pub trait Dice {
    /// `range` から遅延ミリ秒を選ぶ（空範囲なら start）
    fn delay_ms(&mut self, range: Range<u64>) -> u64;
    /// 確率 `probability` で true
    fn fails(&mut self, probability: f64) -> bool;
    /// `0..len` から1つ選ぶ
    fn pick(&mut self, len: usize) -> usize;
}

/// rand の RNG を使う Dice
#[derive(Debug, Clone)]
pub struct RandomDice<R>(pub R);

impl RandomDice<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Dice for RandomDice<R> {
    fn delay_ms(&mut self, range: Range<u64>) -> u64 {
        if range.is_empty() {
            range.start
        } else {
            self.0.gen_range(range)
        }
    }

    fn fails(&mut self, probability: f64) -> bool {
        self.0.gen::<f64>() < probability
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.0.gen_range(0..len)
        }
    }
}

/// モック解析の設定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MockConfig {
    /// 失敗確率（0.0〜1.0）
    pub failure_rate: f64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// 解析全体のタイムアウト
    pub timeout_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            failure_rate: 0.1,
            min_delay_ms: 2000,
            max_delay_ms: 4000,
            timeout_ms: 15000,
        }
    }
}

impl MockConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(Error::Config(format!(
                "failure_rate must be within 0..=1 (got {})",
                self.failure_rate
            )));
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(Error::Config(format!(
                "min_delay_ms ({}) exceeds max_delay_ms ({})",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// 固定結果を返すモック解析
pub struct MockAnalyzer<S, D = RandomDice<StdRng>> {
    config: MockConfig,
    sleeper: S,
    dice: Mutex<D>,
    fixtures: Vec<AnalysisResult>,
}

impl<S: Sleeper> MockAnalyzer<S> {
    /// 既定設定（検証済みのため失敗しない）
    pub fn with_default_config(sleeper: S) -> Self {
        Self {
            config: MockConfig::default(),
            sleeper,
            dice: Mutex::new(RandomDice::from_entropy()),
            fixtures: fixtures(),
        }
    }
}

impl<S: Sleeper, D: Dice> MockAnalyzer<S, D> {
    pub fn with_dice(config: MockConfig, sleeper: S, dice: D) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sleeper,
            dice: Mutex::new(dice),
            fixtures: fixtures(),
        })
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    fn roll<T>(&self, f: impl FnOnce(&mut D) -> T) -> T {
        let mut dice = self.dice.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut dice)
    }
}

impl<S: Sleeper, D: Dice> IngredientAnalyzer for MockAnalyzer<S, D> {
    async fn analyze(&self, image: &LabelImage) -> Result<AnalysisResult> {
        let range = self.config.min_delay_ms..self.config.max_delay_ms;
        let delay = self.roll(|d| d.delay_ms(range));
        debug!(file = %image.file_name, delay_ms = delay, "mock analysis started");

        self.sleeper.sleep(Duration::from_millis(delay)).await;

        if self.roll(|d| d.fails(self.config.failure_rate)) {
            debug!(file = %image.file_name, "mock analysis failed");
            return Err(Error::AnalysisFailed(FAILURE_MESSAGE.to_string()));
        }

        let index = self.roll(|d| d.pick(self.fixtures.len()));
        debug!(file = %image.file_name, fixture = index, "mock analysis finished");
        self.fixtures
            .get(index)
            .cloned()
            .ok_or_else(|| Error::AnalysisFailed(FAILURE_MESSAGE.to_string()))
    }
}

/// タイムアウト付きで解析する
///
/// `timer` が先に完了した場合は `Error::Timeout`。
pub async fn analyze_with_timeout<A, T>(
    analyzer: &A,
    timer: &T,
    image: &LabelImage,
    timeout: Duration,
) -> Result<AnalysisResult>
where
    A: IngredientAnalyzer,
    T: Sleeper,
{
    let analysis = pin!(analyzer.analyze(image));
    let deadline = pin!(timer.sleep(timeout));

    match future::select(analysis, deadline).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => {
            debug!(file = %image.file_name, timeout_ms = timeout.as_millis() as u64, "analysis timed out");
            Err(Error::Timeout(timeout.as_millis() as u64))
        }
    }
}
