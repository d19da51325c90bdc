use crate::core::{
    filter::matches, sort::sort_records, stats::summarize, table::TableView, AggregateStats,
    ColumnSpec, FilterState, Record, SortConfig, StatSpec,
};

/// 一份報表的宣告:欄位與統計項目
///
/// 各角色視圖(adviser/dean/SDU)只需各自提供欄位與統計宣告,
/// 共用同一條轉換管線,不再各自複製貼上。
pub struct ReportPipeline {
    columns: Vec<ColumnSpec>,
    stats: Vec<StatSpec>,
}

/// 一次報表運算的完整輸出
pub struct ReportView {
    /// 篩選並排序後的序列;表格顯示的就是這個順序,
    /// 匯出端拿到的也保證是同一個序列
    pub rows: Vec<Record>,
    pub table: TableView,
    pub stats: AggregateStats,
}

impl ReportPipeline {
    pub fn new(columns: Vec<ColumnSpec>, stats: Vec<StatSpec>) -> Self {
        Self { columns, stats }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// 原始記錄 → 篩選 → 排序 → (統計 ∥ 表格)
    ///
    /// 統計一律以篩選後的集合計算,摘要卡片永遠與表格一致。
    pub fn run(
        &self,
        records: &[Record],
        filters: &FilterState,
        sort: &SortConfig,
        loading: bool,
    ) -> ReportView {
        let filtered: Vec<Record> = records
            .iter()
            .filter(|record| matches(record, filters))
            .cloned()
            .collect();

        let rows = sort_records(&filtered, sort);
        let stats = summarize(&rows, &self.stats);
        let table = TableView::build(&self.columns, &rows, sort, loading);

        tracing::debug!(
            "📊 Report run: {} raw → {} displayed ({} active filters)",
            records.len(),
            rows.len(),
            filters.active_count()
        );

        ReportView { rows, table, stats }
    }
}
