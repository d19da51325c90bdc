use crate::core::table::cell_text;
use crate::core::{ColumnSpec, Exporter, FilterState, Record, Result, Storage};
use crate::utils::error::ReportError;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// 報表匯出:CSV/TSV 加上當前篩選狀態快照,打包成 ZIP
///
/// 收到的序列就是表格正在顯示的序列;這裡只負責格式化,
/// 不做任何重新篩選或排序。
pub struct ReportExporter<S: Storage> {
    storage: S,
    columns: Vec<ColumnSpec>,
    filename: String,
}

impl<S: Storage> ReportExporter<S> {
    pub fn new(storage: S, columns: Vec<ColumnSpec>, filename: impl Into<String>) -> Self {
        Self {
            storage,
            columns,
            filename: filename.into(),
        }
    }

    fn delimited(&self, rows: &[Record], delimiter: u8) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer.write_record(self.columns.iter().map(|column| column.label.as_str()))?;
        for (index, record) in rows.iter().enumerate() {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|column| cell_text(column, record, index))
                .collect();
            writer.write_record(&cells)?;
        }

        writer.into_inner().map_err(|e| ReportError::ProcessingError {
            message: format!("Failed to finish delimited output: {}", e),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage> Exporter for ReportExporter<S> {
    async fn export(&self, rows: &[Record], filters: &FilterState) -> Result<String> {
        tracing::info!("💾 Exporting {} displayed rows to {}", rows.len(), self.filename);

        let csv_output = self.delimited(rows, b',')?;
        let tsv_output = self.delimited(rows, b'\t')?;

        // 創建 ZIP 文件
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("report.csv", FileOptions::default())?;
            zip.write_all(&csv_output)?;

            zip.start_file::<_, ()>("report.tsv", FileOptions::default())?;
            zip.write_all(&tsv_output)?;

            // 匯出文件要能對回當時的篩選條件
            zip.start_file::<_, ()>("filters.json", FileOptions::default())?;
            let filters_json = serde_json::to_string_pretty(filters)?;
            zip.write_all(filters_json.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        self.storage.write_file(&self.filename, &zip_data).await?;
        tracing::info!("💾 Export bundle written successfully");
        Ok(self.filename.clone())
    }
}
