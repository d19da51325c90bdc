use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 一筆報表記錄：欄位集合因報表類型而異，以結構化 map 表示
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// 從 JSON 物件建立記錄；非物件回傳 None
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(obj) => {
                let mut data = HashMap::new();
                for (key, value) in obj {
                    data.insert(key, value);
                }
                Some(Record { data })
            }
            _ => None,
        }
    }

    /// Resolves a field by direct key or dot-path (`"organizationProfile.orgName"`).
    /// A JSON `null` resolves to `None`, same as a missing field.
    pub fn resolve(&self, path: &str) -> Option<&serde_json::Value> {
        let found = match self.data.get(path) {
            Some(value) => Some(value),
            None => {
                let mut segments = path.split('.');
                let first = segments.next()?;
                let mut current = self.data.get(first)?;
                for segment in segments {
                    current = current.as_object()?.get(segment)?;
                }
                Some(current)
            }
        };
        found.filter(|v| !v.is_null())
    }
}

/// 單一篩選條件的值:單選或多選
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    /// Empty string / empty list means "no constraint".
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::One(value) => !value.is_empty(),
            FilterValue::Many(values) => !values.is_empty(),
        }
    }
}

/// 日期範圍篩選:指定記錄上的日期欄位與可選的備援欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub field: String,
    pub fallback_field: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}

/// 當前的篩選狀態;缺少或空白的選擇一律視為「全部符合」
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub selections: HashMap<String, FilterValue>,
    pub date: Option<DateRange>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.selections
            .insert(key.into(), FilterValue::One(value.into()));
    }

    pub fn set_many(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.selections.insert(key.into(), FilterValue::Many(values));
    }

    pub fn clear(&mut self, key: &str) {
        self.selections.remove(key);
    }

    pub fn clear_all(&mut self) {
        self.selections.clear();
        self.date = None;
    }

    /// 有效篩選數:非空的單選/多選各計一,日期範圍啟用時再計一
    pub fn active_count(&self) -> usize {
        let selected = self
            .selections
            .values()
            .filter(|value| value.is_active())
            .count();
        let date_active = self.date.as_ref().is_some_and(|range| range.is_active());
        selected + usize::from(date_active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// 當前排序設定;`key == None` 表示保留輸入順序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::none()
    }
}

impl SortConfig {
    pub fn none() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }

    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Header-click cycle: clicking the active ascending column flips it to
    /// descending; every other case resets to ascending on the clicked key.
    pub fn toggled(&self, key: &str) -> SortConfig {
        let direction = match (&self.key, self.direction) {
            (Some(active), SortDirection::Asc) if active == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        SortConfig::new(key, direction)
    }
}

/// 欄位自訂渲染函式:以記錄與列索引產生顯示文字
pub type CellRender = Box<dyn Fn(&Record, usize) -> String + Send + Sync>;

/// 表格欄位宣告
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub render: Option<CellRender>,
    pub class_name: Option<String>,
    pub header_class_name: Option<String>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            render: None,
            class_name: None,
            header_class_name: None,
        }
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record, usize) -> String + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_header_class(mut self, class_name: impl Into<String>) -> Self {
        self.header_class_name = Some(class_name.into());
        self
    }
}

impl std::fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// 統計項目種類
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatKind {
    Count,
    Sum { field: String },
    Ratio { numerator: String, denominator: String },
    GroupCount { field: String },
}

/// 具名統計項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: StatKind,
}

impl StatSpec {
    pub fn new(name: impl Into<String>, kind: StatKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Groups(BTreeMap<String, u64>),
}

/// 彙總統計結果:一律以「篩選後」的記錄集合計算
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub values: BTreeMap<String, StatValue>,
}

impl AggregateStats {
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(StatValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn groups(&self, name: &str) -> Option<&BTreeMap<String, u64>> {
        match self.values.get(name) {
            Some(StatValue::Groups(groups)) => Some(groups),
            _ => None,
        }
    }
}
