//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - LabelImage: アップロードされた成分表示ラベル画像
//! - Ingredient: 成分ごとの安全性評価
//! - AnalysisResult: 解析結果（成分一覧 + 総合評価 + 食事制限対応）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// 安全性評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyRating {
    Safe,
    Caution,
    Avoid,
}

impl SafetyRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyRating::Safe => "safe",
            SafetyRating::Caution => "caution",
            SafetyRating::Avoid => "avoid",
        }
    }
}

impl fmt::Display for SafetyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 成分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub safety_rating: SafetyRating,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<String>>,
}

/// 食事制限の種類（宣言順が表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietaryType {
    Vegan,
    Vegetarian,
    Keto,
    Diabetic,
    GlutenFree,
    DairyFree,
    NutFree,
}

impl DietaryType {
    pub const ALL: [DietaryType; 7] = [
        DietaryType::Vegan,
        DietaryType::Vegetarian,
        DietaryType::Keto,
        DietaryType::Diabetic,
        DietaryType::GlutenFree,
        DietaryType::DairyFree,
        DietaryType::NutFree,
    ];

    /// JSONキー名（camelCase）
    pub fn key(&self) -> &'static str {
        match self {
            DietaryType::Vegan => "vegan",
            DietaryType::Vegetarian => "vegetarian",
            DietaryType::Keto => "keto",
            DietaryType::Diabetic => "diabetic",
            DietaryType::GlutenFree => "glutenFree",
            DietaryType::DairyFree => "dairyFree",
            DietaryType::NutFree => "nutFree",
        }
    }
}

impl fmt::Display for DietaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DietaryType {
    type Err = Error;

    /// `glutenFree` / `gluten-free` / `gluten_free` を受け付ける（大文字小文字無視）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .flat_map(char::to_lowercase)
            .collect();

        DietaryType::ALL
            .into_iter()
            .find(|d| d.key().to_lowercase() == normalized)
            .ok_or_else(|| Error::UnknownDiet(s.to_string()))
    }
}

/// 食事制限への対応状況（7項目固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryCompatibility {
    pub vegan: bool,
    pub vegetarian: bool,
    pub keto: bool,
    pub diabetic: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub nut_free: bool,
}

impl DietaryCompatibility {
    pub fn get(&self, diet: DietaryType) -> bool {
        match diet {
            DietaryType::Vegan => self.vegan,
            DietaryType::Vegetarian => self.vegetarian,
            DietaryType::Keto => self.keto,
            DietaryType::Diabetic => self.diabetic,
            DietaryType::GlutenFree => self.gluten_free,
            DietaryType::DairyFree => self.dairy_free,
            DietaryType::NutFree => self.nut_free,
        }
    }

    /// 宣言順の (種類, 対応可否) 一覧
    pub fn entries(&self) -> [(DietaryType, bool); 7] {
        DietaryType::ALL.map(|d| (d, self.get(d)))
    }
}

/// AI解析結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub ingredients: Vec<Ingredient>,
    pub overall_rating: SafetyRating,
    pub dietary_compatibility: DietaryCompatibility,
    pub summary: String,
}

/// アップロードされたラベル画像
///
/// 解析は内容を読まないため、ファイル名・MIMEタイプ・サイズのみ保持する。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelImage {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl LabelImage {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
