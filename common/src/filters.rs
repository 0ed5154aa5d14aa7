//! 食事制限フィルタ

use std::collections::BTreeSet;

use crate::types::{DietaryCompatibility, DietaryType};

/// 選択中の食事制限（重複なし・宣言順で列挙）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietaryFilterSet {
    selected: BTreeSet<DietaryType>,
}

impl DietaryFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未選択なら追加、選択済みなら解除
    pub fn toggle(&mut self, diet: DietaryType) {
        if !self.selected.remove(&diet) {
            self.selected.insert(diet);
        }
    }

    pub fn insert(&mut self, diet: DietaryType) {
        self.selected.insert(diet);
    }

    pub fn contains(&self, diet: DietaryType) -> bool {
        self.selected.contains(&diet)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DietaryType> + '_ {
        self.selected.iter().copied()
    }

    /// 表示する対応状況の行
    ///
    /// 選択が空なら7項目すべて、そうでなければ選択中の項目のみ（宣言順）。
    pub fn project(&self, compat: &DietaryCompatibility) -> Vec<(DietaryType, bool)> {
        compat
            .entries()
            .into_iter()
            .filter(|(diet, _)| self.is_empty() || self.contains(*diet))
            .collect()
    }

    /// 「Filtering by: N dietary requirement(s)」（未選択なら None）
    pub fn summary(&self) -> Option<String> {
        match self.len() {
            0 => None,
            1 => Some("Filtering by: 1 dietary requirement".to_string()),
            n => Some(format!("Filtering by: {} dietary requirements", n)),
        }
    }
}

impl FromIterator<DietaryType> for DietaryFilterSet {
    fn from_iter<I: IntoIterator<Item = DietaryType>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_but_vegan() -> DietaryCompatibility {
        DietaryCompatibility {
            vegan: false,
            vegetarian: true,
            keto: true,
            diabetic: true,
            gluten_free: true,
            dairy_free: true,
            nut_free: true,
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut filters = DietaryFilterSet::new();
        filters.toggle(DietaryType::Keto);
        assert!(filters.contains(DietaryType::Keto));
        filters.toggle(DietaryType::Keto);
        assert!(!filters.contains(DietaryType::Keto));
    }

    #[test]
    fn test_double_toggle_restores_selection() {
        let original: DietaryFilterSet =
            [DietaryType::Vegan, DietaryType::NutFree].into_iter().collect();

        for diet in DietaryType::ALL {
            let mut filters = original.clone();
            filters.toggle(diet);
            filters.toggle(diet);
            assert_eq!(filters, original);
        }
    }

    #[test]
    fn test_project_single_selection() {
        let filters: DietaryFilterSet = [DietaryType::Vegan].into_iter().collect();
        let rows = filters.project(&all_but_vegan());
        assert_eq!(rows, vec![(DietaryType::Vegan, false)]);
    }

    #[test]
    fn test_project_empty_selection_shows_all_in_order() {
        let rows = DietaryFilterSet::new().project(&all_but_vegan());
        let order: Vec<DietaryType> = rows.iter().map(|(d, _)| *d).collect();
        assert_eq!(order, DietaryType::ALL.to_vec());
    }

    #[test]
    fn test_project_keeps_declaration_order_regardless_of_toggle_order() {
        let mut filters = DietaryFilterSet::new();
        filters.toggle(DietaryType::NutFree);
        filters.toggle(DietaryType::Vegetarian);
        let rows = filters.project(&all_but_vegan());
        assert_eq!(
            rows,
            vec![(DietaryType::Vegetarian, true), (DietaryType::NutFree, true)]
        );
    }

    #[test]
    fn test_from_iter_deduplicates() {
        let filters: DietaryFilterSet =
            [DietaryType::Keto, DietaryType::Keto].into_iter().collect();
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_summary() {
        let mut filters = DietaryFilterSet::new();
        assert_eq!(filters.summary(), None);
        filters.insert(DietaryType::Keto);
        assert_eq!(filters.summary().as_deref(), Some("Filtering by: 1 dietary requirement"));
        filters.insert(DietaryType::Vegan);
        assert_eq!(filters.summary().as_deref(), Some("Filtering by: 2 dietary requirements"));
    }
}
