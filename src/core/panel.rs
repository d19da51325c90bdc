use crate::core::{DateRange, FilterState, FilterValue};
use std::collections::HashMap;

/// 篩選面板:展開/收合與篩選狀態互不影響
///
/// 面板是 FilterState 的唯一生產者;所有操作都是同步、無 I/O 的
/// 純狀態轉換。
#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    expanded: bool,
    filters: FilterState,
    /// 每個篩選鍵可供選擇的值,由各報表視圖提供
    options: HashMap<String, Vec<String>>,
}

impl FilterPanel {
    pub fn new(options: HashMap<String, Vec<String>>) -> Self {
        Self {
            expanded: false,
            filters: FilterState::new(),
            options,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn options(&self, key: &str) -> &[String] {
        self.options.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn select(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.set(key, value);
    }

    pub fn select_many(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.filters.set_many(key, values);
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filters.date = Some(range);
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.filters.clear(key);
    }

    pub fn clear_all(&mut self) {
        self.filters.clear_all();
    }

    /// 「N active」徽章的數字;與 can_clear 用同一套計數
    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    pub fn can_clear(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// 目前某鍵已選的值(多選回傳全部)
    pub fn selected(&self, key: &str) -> Vec<&str> {
        match self.filters.selections.get(key) {
            Some(FilterValue::One(value)) if !value.is_empty() => vec![value.as_str()],
            Some(FilterValue::Many(values)) => values.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn panel() -> FilterPanel {
        let mut options = HashMap::new();
        options.insert(
            "status".to_string(),
            vec!["Active".to_string(), "Inactive".to_string()],
        );
        options.insert(
            "department".to_string(),
            vec!["CCS".to_string(), "COE".to_string()],
        );
        FilterPanel::new(options)
    }

    #[test]
    fn test_expand_independent_of_filters() {
        let mut panel = panel();
        assert!(!panel.is_expanded());

        panel.select("status", "Active");
        panel.toggle_expanded();
        assert!(panel.is_expanded());
        assert_eq!(panel.active_filter_count(), 1);

        panel.toggle_expanded();
        assert!(!panel.is_expanded());
        // 收合不影響篩選狀態
        assert_eq!(panel.active_filter_count(), 1);
    }

    #[test]
    fn test_active_count_drives_clear() {
        let mut panel = panel();
        assert!(!panel.can_clear());

        panel.select("status", "");
        panel.select_many("sdg", vec![]);
        assert_eq!(panel.active_filter_count(), 0);
        assert!(!panel.can_clear());

        panel.select("status", "Active");
        panel.select_many("sdg", vec!["4".to_string()]);
        panel.set_date_range(DateRange {
            field: "submittedAt".to_string(),
            fallback_field: None,
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: None,
        });
        assert_eq!(panel.active_filter_count(), 3);
        assert!(panel.can_clear());

        panel.clear_all();
        assert_eq!(panel.active_filter_count(), 0);
        assert!(!panel.can_clear());
    }

    #[test]
    fn test_selected_values() {
        let mut panel = panel();
        assert!(panel.selected("status").is_empty());

        panel.select("status", "Active");
        assert_eq!(panel.selected("status"), vec!["Active"]);

        panel.select_many("department", vec!["CCS".to_string(), "COE".to_string()]);
        assert_eq!(panel.selected("department"), vec!["CCS", "COE"]);

        panel.clear_filter("status");
        assert!(panel.selected("status").is_empty());
    }

    #[test]
    fn test_options_lookup() {
        let panel = panel();
        assert_eq!(panel.options("status").len(), 2);
        assert!(panel.options("unknown").is_empty());
    }
}
