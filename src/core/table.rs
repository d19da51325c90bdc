use crate::core::{ColumnSpec, Record, SortConfig, SortDirection};

/// 缺漏資料的顯示佔位符
pub const MISSING_PLACEHOLDER: &str = "-";
/// 無資料時的空狀態訊息
pub const EMPTY_MESSAGE: &str = "No records found";
/// 載入中的佔位訊息
pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Loading,
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// 此欄為當前排序鍵時的方向指示
    pub indicator: Option<SortDirection>,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyCell {
    pub text: String,
    pub class_name: Option<String>,
}

/// 表格顯示結果;本身不持有任何狀態,SortConfig 由呼叫端擁有
#[derive(Debug, Clone)]
pub struct TableView {
    pub state: TableState,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<Vec<BodyCell>>,
}

impl TableView {
    /// 由欄位宣告逐欄、記錄逐列展開成顯示網格
    ///
    /// `loading` 優先於空狀態;兩者皆不渲染資料列。
    pub fn build(
        columns: &[ColumnSpec],
        rows: &[Record],
        sort: &SortConfig,
        loading: bool,
    ) -> TableView {
        let header = columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                indicator: match &sort.key {
                    Some(active) if *active == column.key => Some(sort.direction),
                    _ => None,
                },
                class_name: column.header_class_name.clone(),
            })
            .collect();

        if loading {
            return TableView {
                state: TableState::Loading,
                header,
                rows: Vec::new(),
            };
        }

        if rows.is_empty() {
            return TableView {
                state: TableState::Empty,
                header,
                rows: Vec::new(),
            };
        }

        let body = rows
            .iter()
            .enumerate()
            .map(|(index, record)| {
                columns
                    .iter()
                    .map(|column| BodyCell {
                        text: cell_text(column, record, index),
                        class_name: column.class_name.clone(),
                    })
                    .collect()
            })
            .collect();

        TableView {
            state: TableState::Ready,
            header,
            rows: body,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            TableState::Loading => Some(LOADING_MESSAGE),
            TableState::Empty => Some(EMPTY_MESSAGE),
            TableState::Ready => None,
        }
    }
}

/// 點擊表頭:可排序欄位回傳下一個排序設定,其餘回傳 None
pub fn header_click(
    columns: &[ColumnSpec],
    sort: &SortConfig,
    key: &str,
) -> Option<SortConfig> {
    let column = columns.iter().find(|column| column.key == key)?;
    if !column.sortable {
        return None;
    }
    Some(sort.toggled(key))
}

/// 單一儲存格文字;匯出端共用同一套渲染,輸出才會與畫面一致
pub fn cell_text(column: &ColumnSpec, record: &Record, index: usize) -> String {
    match &column.render {
        Some(render) => render(record, index),
        None => record
            .resolve(&column.key)
            .map(display_value)
            .unwrap_or_else(|| MISSING_PLACEHOLDER.to_string()),
    }
}

/// 預設的值顯示:字串原樣、清單以逗號接合、物件序列化
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("organizationProfile.orgName", "Organization"),
            ColumnSpec::new("status", "Status"),
            ColumnSpec::new("actions", "Actions").not_sortable(),
        ]
    }

    fn rows() -> Vec<Record> {
        vec![
            Record::from_value(serde_json::json!({
                "organizationProfile": {"orgName": "Science Club"},
                "status": "Active"
            }))
            .unwrap(),
            Record::from_value(serde_json::json!({
                "organizationProfile": {"orgName": "Chess Club"}
            }))
            .unwrap(),
        ]
    }

    #[test]
    fn test_missing_field_renders_dash() {
        let view = TableView::build(&columns(), &rows(), &SortConfig::none(), false);
        assert_eq!(view.state, TableState::Ready);
        // 第二列沒有 status 欄位
        assert_eq!(view.rows[1][1].text, "-");
        assert_eq!(view.rows[0][1].text, "Active");
    }

    #[test]
    fn test_custom_render_takes_precedence() {
        let columns = vec![ColumnSpec::new("status", "Status")
            .with_render(|record, index| {
                let status = record
                    .resolve("status")
                    .and_then(|v| v.as_str())
                    .unwrap_or("none");
                format!("{}:{}", index, status)
            })];
        let view = TableView::build(&columns, &rows(), &SortConfig::none(), false);
        assert_eq!(view.rows[0][0].text, "0:Active");
        assert_eq!(view.rows[1][0].text, "1:none");
    }

    #[test]
    fn test_sort_indicator_on_active_column_only() {
        let sort = SortConfig::new("status", SortDirection::Desc);
        let view = TableView::build(&columns(), &rows(), &sort, false);
        assert_eq!(view.header[0].indicator, None);
        assert_eq!(view.header[1].indicator, Some(SortDirection::Desc));
    }

    #[test]
    fn test_empty_state() {
        let view = TableView::build(&columns(), &[], &SortConfig::none(), false);
        assert_eq!(view.state, TableState::Empty);
        assert_eq!(view.message(), Some(EMPTY_MESSAGE));
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_loading_takes_precedence_over_empty() {
        let view = TableView::build(&columns(), &[], &SortConfig::none(), true);
        assert_eq!(view.state, TableState::Loading);
        assert_eq!(view.message(), Some(LOADING_MESSAGE));

        // 即使有資料,載入中也不渲染列
        let view = TableView::build(&columns(), &rows(), &SortConfig::none(), true);
        assert_eq!(view.state, TableState::Loading);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_header_click_toggle() {
        let columns = columns();
        let sort = SortConfig::new("organizationProfile.orgName", SortDirection::Asc);

        // 同欄位 asc → desc
        let next = header_click(&columns, &sort, "organizationProfile.orgName").unwrap();
        assert_eq!(
            next,
            SortConfig::new("organizationProfile.orgName", SortDirection::Desc)
        );

        // 換欄位一律回到 asc
        let other = header_click(&columns, &sort, "status").unwrap();
        assert_eq!(other, SortConfig::new("status", SortDirection::Asc));

        // 不可排序欄位與未知欄位不產生新設定
        assert!(header_click(&columns, &sort, "actions").is_none());
        assert!(header_click(&columns, &sort, "missing").is_none());
    }

    #[test]
    fn test_list_value_display() {
        let rows = vec![Record::from_value(serde_json::json!({
            "sdg": ["4", "13"]
        }))
        .unwrap()];
        let columns = vec![ColumnSpec::new("sdg", "SDGs")];
        let view = TableView::build(&columns, &rows, &SortConfig::none(), false);
        assert_eq!(view.rows[0][0].text, "4, 13");
    }
}
