//! Ingredient Lens Common Library
//!
//! CLIとWeb(WASM)で共有される型・モック解析・画面状態

pub mod types;
pub mod error;
pub mod fixtures;
pub mod analyzer;
pub mod filters;
pub mod session;
pub mod view;

pub use types::{AnalysisResult, DietaryCompatibility, DietaryType, Ingredient, LabelImage, SafetyRating};
pub use error::{Error, Result};
pub use fixtures::{fixtures, FIXTURE_COUNT};
pub use analyzer::{
    analyze_with_timeout, Dice, IngredientAnalyzer, MockAnalyzer, MockConfig, NoDelay,
    RandomDice, Sleeper, FAILURE_MESSAGE,
};
pub use filters::DietaryFilterSet;
pub use session::{AnalysisSession, Phase, Ticket, UploadState};
pub use view::UploadControls;
