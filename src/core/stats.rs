use crate::core::{AggregateStats, Record, StatKind, StatSpec, StatValue};
use std::collections::BTreeMap;

/// 依統計宣告對「篩選後」的記錄集合計算彙總
///
/// 每次呼叫都從頭重算,不做增量或快取——記錄量在數百筆的等級,
/// 這是刻意的簡化而非疏漏。
pub fn summarize(records: &[Record], specs: &[StatSpec]) -> AggregateStats {
    let mut values = BTreeMap::new();

    for spec in specs {
        let value = match &spec.kind {
            StatKind::Count => StatValue::Number(records.len() as f64),
            StatKind::Sum { field } => StatValue::Number(sum_field(records, field)),
            StatKind::Ratio {
                numerator,
                denominator,
            } => {
                let denominator = sum_field(records, denominator);
                // 分母為零回傳 0,絕不產生 NaN/Infinity
                let percentage = if denominator == 0.0 {
                    0.0
                } else {
                    sum_field(records, numerator) / denominator * 100.0
                };
                StatValue::Number(percentage)
            }
            StatKind::GroupCount { field } => {
                let mut groups: BTreeMap<String, u64> = BTreeMap::new();
                for record in records {
                    if let Some(value) = record.resolve(field) {
                        *groups.entry(group_key(value)).or_insert(0) += 1;
                    }
                }
                StatValue::Groups(groups)
            }
        };
        values.insert(spec.name.clone(), value);
    }

    AggregateStats { values }
}

fn sum_field(records: &[Record], field: &str) -> f64 {
    records.iter().map(|record| numeric(record, field)).sum()
}

/// 缺漏或非數值欄位以 0 計
fn numeric(record: &Record, field: &str) -> f64 {
    match record.resolve(field) {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn group_key(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
