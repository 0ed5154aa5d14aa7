use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Not an image file: {0} (PNG, JPG, JPEG are supported)")]
    NotAnImage(String),

    #[error("No images found: {0}")]
    NoImagesFound(String),

    #[error(transparent)]
    Analysis(#[from] ingredient_lens_common::Error),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Interrupted")]
    Interrupted,

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LensError>;
