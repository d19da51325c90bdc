use crate::core::{DateRange, FilterState, FilterValue, Record};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// 篩選判斷:每個啟用的條件都通過才納入;任一條件失敗立即排除
///
/// Pure over its inputs. Inactive selections (empty string / empty list)
/// never constrain anything.
pub fn matches(record: &Record, filters: &FilterState) -> bool {
    for (key, selection) in &filters.selections {
        if !selection.is_active() {
            continue;
        }

        let field = record.resolve(key);
        let passed = match selection {
            FilterValue::One(wanted) => value_matches(field, wanted),
            FilterValue::Many(options) => options.iter().any(|wanted| value_matches(field, wanted)),
        };

        if !passed {
            return false;
        }
    }

    if let Some(range) = &filters.date {
        if range.is_active() && !date_in_range(record, range) {
            return false;
        }
    }

    true
}

/// 純量條件與記錄欄位比對;欄位是清單時改採成員比對
fn value_matches(field: Option<&serde_json::Value>, wanted: &str) -> bool {
    match field {
        None => false,
        Some(serde_json::Value::Array(items)) => {
            items.iter().any(|item| element_matches(item, wanted))
        }
        Some(value) => scalar_eq(value, wanted),
    }
}

/// 精確、區分大小寫的相等比對
fn scalar_eq(value: &serde_json::Value, wanted: &str) -> bool {
    match value {
        serde_json::Value::String(s) => s == wanted,
        serde_json::Value::Number(n) => n.to_string() == wanted,
        serde_json::Value::Bool(b) => b.to_string() == wanted,
        _ => false,
    }
}

/// 清單元素比對。上游偶爾把元素存成 JSON 編碼字串(例如
/// `"[\"4\",\"13\"]"`),這裡盡力解碼;解碼失敗就把原字串當成
/// 單一元素,絕不報錯。
fn element_matches(item: &serde_json::Value, wanted: &str) -> bool {
    match item {
        serde_json::Value::String(s) => {
            if s == wanted {
                return true;
            }
            if s.starts_with('[') {
                match serde_json::from_str::<serde_json::Value>(s) {
                    Ok(serde_json::Value::Array(inner)) => {
                        // 保留上游資料不一致的能見度,不要默默吞掉
                        tracing::warn!("🔶 Decoded JSON-in-string list element: {}", s);
                        return inner.iter().any(|value| scalar_eq(value, wanted));
                    }
                    Ok(other) => {
                        tracing::warn!("🔶 Decoded JSON-in-string list element: {}", s);
                        return scalar_eq(&other, wanted);
                    }
                    Err(_) => {
                        tracing::warn!("🔶 Unparseable list element, treating as scalar: {}", s);
                        return false;
                    }
                }
            }
            false
        }
        other => scalar_eq(other, wanted),
    }
}

/// 日期範圍比對:`from` 自當日 00:00 起含,`to` 含當日 23:59:59.999
///
/// 主要欄位缺漏時退回備援欄位;兩者皆無才排除。
fn date_in_range(record: &Record, range: &DateRange) -> bool {
    let Some(datetime) = record_date(record, range) else {
        return false;
    };

    let date = datetime.date();
    let after_from = range.from.map_or(true, |from| date >= from);
    let before_to = range.to.map_or(true, |to| date <= to);
    after_from && before_to
}

fn record_date(record: &Record, range: &DateRange) -> Option<NaiveDateTime> {
    record
        .resolve(&range.field)
        .and_then(parse_datetime)
        .or_else(|| {
            range
                .fallback_field
                .as_deref()
                .and_then(|field| record.resolve(field))
                .and_then(parse_datetime)
        })
}

/// 盡力解析記錄上的日期值;認不得的格式當作缺漏,不報錯
fn parse_datetime(value: &serde_json::Value) -> Option<NaiveDateTime> {
    match value {
        serde_json::Value::String(s) => {
            if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(s) {
                return Some(datetime.naive_utc());
            }
            if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(datetime);
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(date.and_time(NaiveTime::MIN));
            }
            None
        }
        serde_json::Value::Number(n) => {
            // epoch 毫秒
            let millis = n.as_i64()?;
            Some(chrono::DateTime::from_timestamp_millis(millis)?.naive_utc())
        }
        _ => None,
    }
}
