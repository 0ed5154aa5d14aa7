//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 解析失敗（メッセージはそのまま画面に表示する）
    #[error("{0}")]
    AnalysisFailed(String),

    #[error("Analysis timed out after {0} ms. Please try again.")]
    Timeout(u64),

    #[error("Unsupported file type: {0}. Please choose a PNG or JPG image.")]
    NotAnImage(String),

    #[error("An analysis is already in progress")]
    Busy,

    #[error("Unknown dietary requirement: {0}")]
    UnknownDiet(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
