//! 表示用の文言・派生状態（CLI/WASM共通）

use crate::types::{DietaryType, Ingredient, SafetyRating};

/// エラー画面のトラブルシューティング（エラー内容によらず固定）
pub const TROUBLESHOOTING_TIPS: [&str; 4] = [
    "Ensure the image is clear and well-lit",
    "Make sure ingredient labels are visible",
    "Try a different image format (JPG, PNG)",
    "Check your internet connection",
];

/// アップロード欄の案内（サイズは目安のみ）
pub const UPLOAD_HINT: &str = "PNG, JPG, JPEG up to 10MB";

/// 目安サイズ（10MB）
pub const SOFT_SIZE_LIMIT_BYTES: u64 = 10 * 1024 * 1024;

pub const NO_CONCERNS: &str = "No specific concerns";
pub const NO_ALTERNATIVES: &str = "None suggested";

pub const DISCLAIMER: &str =
    "This tool provides general information and should not replace professional medical advice.";

impl SafetyRating {
    /// 総合評価の見出し
    pub fn headline(&self) -> &'static str {
        match self {
            SafetyRating::Safe => "Generally Safe",
            SafetyRating::Caution => "Use with Caution",
            SafetyRating::Avoid => "Not Recommended",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SafetyRating::Safe => "✅",
            SafetyRating::Caution => "⚠️",
            SafetyRating::Avoid => "❌",
        }
    }
}

impl DietaryType {
    /// フィルタボタンのラベル
    pub fn label(&self) -> &'static str {
        match self {
            DietaryType::Vegan => "Vegan",
            DietaryType::Vegetarian => "Vegetarian",
            DietaryType::Keto => "Keto",
            DietaryType::Diabetic => "Diabetic-Friendly",
            DietaryType::GlutenFree => "Gluten-Free",
            DietaryType::DairyFree => "Dairy-Free",
            DietaryType::NutFree => "Nut-Free",
        }
    }

    /// 対応状況欄の表示名（camelCaseを分割して先頭大文字）
    pub fn display_name(&self) -> String {
        title_case_key(self.key())
    }
}

fn title_case_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

/// 成分の懸念事項（空なら案内文）
pub fn concerns_text(ingredient: &Ingredient) -> Vec<String> {
    if ingredient.concerns.is_empty() {
        vec![NO_CONCERNS.to_string()]
    } else {
        ingredient.concerns.clone()
    }
}

/// 成分の代替候補（なし/空なら案内文）
pub fn alternatives_text(ingredient: &Ingredient) -> Vec<String> {
    match &ingredient.alternatives {
        Some(alts) if !alts.is_empty() => alts.clone(),
        _ => vec![NO_ALTERNATIVES.to_string()],
    }
}

/// アップロード欄の操作可否
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadControls {
    pub input_disabled: bool,
    pub can_clear: bool,
    pub show_overlay: bool,
}

impl UploadControls {
    pub fn new(busy: bool, has_preview: bool) -> Self {
        Self {
            input_disabled: busy,
            can_clear: has_preview && !busy,
            show_overlay: has_preview && busy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline() {
        assert_eq!(SafetyRating::Safe.headline(), "Generally Safe");
        assert_eq!(SafetyRating::Caution.headline(), "Use with Caution");
        assert_eq!(SafetyRating::Avoid.headline(), "Not Recommended");
    }

    #[test]
    fn test_display_name_splits_camel_case() {
        assert_eq!(DietaryType::GlutenFree.display_name(), "Gluten Free");
        assert_eq!(DietaryType::NutFree.display_name(), "Nut Free");
        assert_eq!(DietaryType::Vegan.display_name(), "Vegan");
    }

    #[test]
    fn test_filter_labels() {
        let labels: Vec<&str> = DietaryType::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(
            labels,
            vec!["Vegan", "Vegetarian", "Keto", "Diabetic-Friendly", "Gluten-Free", "Dairy-Free", "Nut-Free"]
        );
    }

    #[test]
    fn test_concerns_and_alternatives_fallbacks() {
        let ingredient = Ingredient {
            name: "Sea Salt".to_string(),
            safety_rating: SafetyRating::Safe,
            concerns: vec![],
            alternatives: Some(vec![]),
        };
        assert_eq!(concerns_text(&ingredient), vec![NO_CONCERNS]);
        assert_eq!(alternatives_text(&ingredient), vec![NO_ALTERNATIVES]);
    }

    #[test]
    fn test_upload_controls() {
        let busy = UploadControls::new(true, true);
        assert!(busy.input_disabled);
        assert!(!busy.can_clear);
        assert!(busy.show_overlay);

        let idle = UploadControls::new(false, true);
        assert!(!idle.input_disabled);
        assert!(idle.can_clear);
        assert!(!idle.show_overlay);

        let empty = UploadControls::new(false, false);
        assert!(!empty.can_clear);
    }
}
