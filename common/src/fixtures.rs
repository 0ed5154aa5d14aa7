//! モック解析で返す固定の解析結果（3件）

use crate::types::{AnalysisResult, DietaryCompatibility, Ingredient, SafetyRating};

/// 固定結果の件数
pub const FIXTURE_COUNT: usize = 3;

fn ingredient(
    name: &str,
    safety_rating: SafetyRating,
    concerns: &[&str],
    alternatives: Option<&[&str]>,
) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        safety_rating,
        concerns: concerns.iter().map(|s| s.to_string()).collect(),
        alternatives: alternatives.map(|a| a.iter().map(|s| s.to_string()).collect()),
    }
}

/// 固定結果一覧（順序固定）
pub fn fixtures() -> Vec<AnalysisResult> {
    vec![baked_snack(), nut_mix(), soft_drink()]
}

/// 小麦粉・砂糖系の菓子（要注意）
fn baked_snack() -> AnalysisResult {
    AnalysisResult {
        ingredients: vec![
            ingredient(
                "Organic Wheat Flour",
                SafetyRating::Safe,
                &[],
                Some(&["Almond Flour", "Rice Flour"]),
            ),
            ingredient(
                "Cane Sugar",
                SafetyRating::Caution,
                &["High glycemic index", "May cause blood sugar spikes"],
                Some(&["Stevia", "Monk Fruit", "Erythritol"]),
            ),
            ingredient(
                "Palm Oil",
                SafetyRating::Caution,
                &["Environmental concerns", "High in saturated fat"],
                Some(&["Coconut Oil", "Olive Oil"]),
            ),
            ingredient("Natural Vanilla Extract", SafetyRating::Safe, &[], None),
        ],
        overall_rating: SafetyRating::Caution,
        dietary_compatibility: DietaryCompatibility {
            vegan: false,
            vegetarian: true,
            keto: false,
            diabetic: false,
            gluten_free: false,
            dairy_free: true,
            nut_free: true,
        },
        summary: "This product contains some ingredients that may require caution, particularly for those monitoring sugar intake or following specific diets.".to_string(),
    }
}

/// ナッツ系（安全）
fn nut_mix() -> AnalysisResult {
    AnalysisResult {
        ingredients: vec![
            ingredient("Organic Almonds", SafetyRating::Safe, &[], None),
            ingredient("Sea Salt", SafetyRating::Safe, &[], None),
            ingredient("Organic Coconut Oil", SafetyRating::Safe, &[], None),
        ],
        overall_rating: SafetyRating::Safe,
        dietary_compatibility: DietaryCompatibility {
            vegan: true,
            vegetarian: true,
            keto: true,
            diabetic: true,
            gluten_free: true,
            dairy_free: true,
            nut_free: false,
        },
        summary: "This product appears to be made with high-quality, minimally processed ingredients that are suitable for most dietary preferences.".to_string(),
    }
}

/// 清涼飲料（非推奨）
fn soft_drink() -> AnalysisResult {
    AnalysisResult {
        ingredients: vec![
            ingredient(
                "High Fructose Corn Syrup",
                SafetyRating::Avoid,
                &["Linked to obesity", "May increase diabetes risk", "Highly processed"],
                Some(&["Pure Maple Syrup", "Honey", "Date Syrup"]),
            ),
            ingredient(
                "Artificial Colors (Red 40, Yellow 6)",
                SafetyRating::Avoid,
                &["May cause hyperactivity in children", "Potential allergen", "Synthetic additive"],
                Some(&["Natural Food Coloring", "Beet Juice", "Turmeric"]),
            ),
            ingredient(
                "Sodium Benzoate",
                SafetyRating::Caution,
                &["Preservative", "May form benzene when combined with vitamin C"],
                Some(&["Natural Preservatives", "Rosemary Extract"]),
            ),
        ],
        overall_rating: SafetyRating::Avoid,
        dietary_compatibility: DietaryCompatibility {
            vegan: true,
            vegetarian: true,
            keto: false,
            diabetic: false,
            gluten_free: true,
            dairy_free: true,
            nut_free: true,
        },
        summary: "This product contains several highly processed ingredients and artificial additives that are not recommended for optimal health.".to_string(),
    }
}
