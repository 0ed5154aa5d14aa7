//! 端末向けの結果表示

use ingredient_lens_common::view::{alternatives_text, concerns_text, TROUBLESHOOTING_TIPS};
use ingredient_lens_common::{AnalysisResult, DietaryFilterSet};

/// 解析結果（フィルタ適用済み）
pub fn render_result(result: &AnalysisResult, filters: &DietaryFilterSet) -> String {
    let mut lines = vec![
        format!("{} {}", result.overall_rating.icon(), result.overall_rating.headline()),
        result.summary.clone(),
        String::new(),
    ];

    let rows = filters.project(&result.dietary_compatibility);
    if !rows.is_empty() {
        lines.push("Dietary Compatibility".to_string());
        for (diet, compatible) in rows {
            let mark = if compatible { "✔" } else { "✘" };
            lines.push(format!("  {} {}", mark, diet.display_name()));
        }
        if let Some(summary) = filters.summary() {
            lines.push(format!("  ({})", summary));
        }
        lines.push(String::new());
    }

    lines.push("Ingredient Analysis".to_string());
    for ingredient in &result.ingredients {
        lines.push(format!(
            "  {} {} [{}]",
            ingredient.safety_rating.icon(),
            ingredient.name,
            ingredient.safety_rating
        ));
        lines.push(format!("      Concerns:     {}", concerns_text(ingredient).join(", ")));
        lines.push(format!("      Alternatives: {}", alternatives_text(ingredient).join(", ")));
    }

    lines.join("\n")
}

/// エラー表示（トラブルシューティングは固定）
pub fn render_failure(message: &str) -> String {
    let mut lines = vec![
        "❌ Analysis Failed".to_string(),
        message.to_string(),
        String::new(),
        "Troubleshooting Tips:".to_string(),
    ];
    lines.extend(TROUBLESHOOTING_TIPS.iter().map(|tip| format!("  • {}", tip)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingredient_lens_common::{fixtures, DietaryType};

    #[test]
    fn test_render_result_all_rows() {
        let result = &fixtures()[1];
        let text = render_result(result, &DietaryFilterSet::new());

        assert!(text.starts_with("✅ Generally Safe"));
        assert!(text.contains("✔ Gluten Free"));
        assert!(text.contains("✘ Nut Free"));
        assert!(text.contains("Organic Almonds [safe]"));
        assert!(text.contains("No specific concerns"));
        assert!(text.contains("None suggested"));
        assert!(!text.contains("Filtering by"));
    }

    #[test]
    fn test_render_result_filtered() {
        let result = &fixtures()[0];
        let filters: DietaryFilterSet = [DietaryType::Vegan].into_iter().collect();
        let text = render_result(result, &filters);

        assert!(text.contains("✘ Vegan"));
        assert!(!text.contains("Vegetarian"));
        assert!(text.contains("Filtering by: 1 dietary requirement"));
        assert!(text.contains("Stevia, Monk Fruit, Erythritol"));
    }

    #[test]
    fn test_render_failure_has_fixed_tips() {
        let a = render_failure("first");
        let b = render_failure("something else entirely");
        let tips = |s: &str| s.split("Troubleshooting Tips:").nth(1).map(str::to_string);
        assert_eq!(tips(&a), tips(&b));
        assert!(a.contains("Check your internet connection"));
    }

    #[test]
    fn test_render_failure_layout() {
        let text = render_failure("oops");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "❌ Analysis Failed");
        assert_eq!(lines[1], "oops");
        assert_eq!(lines[3], "Troubleshooting Tips:");
        assert_eq!(lines.len(), 4 + TROUBLESHOOTING_TIPS.len());
    }
}
