use crate::adapters::api::SourceConfig;
use crate::core::pipeline::ReportPipeline;
use crate::domain::model::{
    ColumnSpec, DateRange, FilterState, FilterValue, SortConfig, SortDirection, StatSpec,
};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_unique, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 一份報表視圖的完整宣告:來源、欄位、預設篩選、統計與匯出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub report: ReportInfo,
    pub source: Option<SourceConfig>,
    pub columns: Vec<ColumnConfig>,
    pub filters: Option<FiltersConfig>,
    pub sort: Option<SortDefault>,
    #[serde(default)]
    pub stats: Vec<StatSpec>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub key: String,
    pub label: String,
    pub sortable: Option<bool>, // 預設可排序
    pub class_name: Option<String>,
    pub header_class_name: Option<String>,
}

impl ColumnConfig {
    pub fn to_spec(&self) -> ColumnSpec {
        let mut spec = ColumnSpec::new(&self.key, &self.label);
        if self.sortable == Some(false) {
            spec = spec.not_sortable();
        }
        if let Some(class_name) = &self.class_name {
            spec = spec.with_class(class_name);
        }
        if let Some(class_name) = &self.header_class_name {
            spec = spec.with_header_class(class_name);
        }
        spec
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// 日期範圍篩選針對的記錄欄位
    pub date_field: Option<String>,
    pub date_fallback_field: Option<String>,
    /// 開啟報表時預先套用的選擇
    #[serde(default)]
    pub defaults: HashMap<String, FilterValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortDefault {
    pub key: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub filename: Option<String>,
}

impl ReportConfig {
    /// 從 TOML 檔案載入報表宣告
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml(&content)
    }

    /// 從 TOML 字串解析報表宣告
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReportError::ConfigError {
            message: format!("Report TOML parsing error: {}", e),
        })
    }

    /// 建立此報表的轉換管線
    pub fn pipeline(&self) -> ReportPipeline {
        let columns = self.columns.iter().map(ColumnConfig::to_spec).collect();
        ReportPipeline::new(columns, self.stats.clone())
    }

    pub fn column_specs(&self) -> Vec<ColumnSpec> {
        self.columns.iter().map(ColumnConfig::to_spec).collect()
    }

    /// 報表開啟時的初始篩選狀態
    pub fn initial_filters(&self) -> FilterState {
        let Some(filters) = &self.filters else {
            return FilterState::new();
        };

        let mut state = FilterState::new();
        for (key, value) in &filters.defaults {
            state.selections.insert(key.clone(), value.clone());
        }
        if let Some(field) = &filters.date_field {
            state.date = Some(DateRange {
                field: field.clone(),
                fallback_field: filters.date_fallback_field.clone(),
                from: None,
                to: None,
            });
        }
        state
    }

    pub fn initial_sort(&self) -> SortConfig {
        match &self.sort {
            Some(sort) => SortConfig::new(&sort.key, sort.direction),
            None => SortConfig::none(),
        }
    }

    pub fn export_filename(&self) -> String {
        self.export
            .as_ref()
            .and_then(|export| export.filename.clone())
            .unwrap_or_else(|| format!("{}_report.zip", self.report.name))
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("report.name", &self.report.name)?;

        if let Some(source) = &self.source {
            validate_url("source.endpoint", &source.endpoint)?;
        }

        if self.columns.is_empty() {
            return Err(ReportError::MissingConfigError {
                field: "columns".to_string(),
            });
        }
        validate_unique("columns", self.columns.iter().map(|column| column.key.as_str()))?;
        for column in &self.columns {
            validate_non_empty_string("columns.key", &column.key)?;
            validate_non_empty_string("columns.label", &column.label)?;
        }

        // 預設排序鍵必須指到已宣告且可排序的欄位
        if let Some(sort) = &self.sort {
            let column = self.columns.iter().find(|column| column.key == sort.key);
            match column {
                None => {
                    return Err(ReportError::InvalidConfigValueError {
                        field: "sort.key".to_string(),
                        value: sort.key.clone(),
                        reason: "Sort key does not match any declared column".to_string(),
                    })
                }
                Some(column) if column.sortable == Some(false) => {
                    return Err(ReportError::InvalidConfigValueError {
                        field: "sort.key".to_string(),
                        value: sort.key.clone(),
                        reason: "Column is not sortable".to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        validate_unique("stats", self.stats.iter().map(|stat| stat.name.as_str()))?;

        if let Some(export) = &self.export {
            validate_path("export.output_path", &export.output_path)?;
        }

        Ok(())
    }
}
