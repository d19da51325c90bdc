use crate::core::{Record, SortConfig, SortDirection};
use std::cmp::Ordering;

/// 依排序設定產生新的記錄序列;不動到輸入
///
/// `key == None` 時原樣通過。排序使用穩定演算法,同值保留輸入相對順序;
/// 解析不到排序欄位的記錄一律排在最後,與方向無關。
pub fn sort_records(records: &[Record], sort: &SortConfig) -> Vec<Record> {
    let Some(key) = sort.key.as_deref() else {
        return records.to_vec();
    };

    let mut ordered = records.to_vec();
    // slice::sort_by 是穩定排序
    ordered.sort_by(|a, b| {
        match (a.resolve(key), b.resolve(key)) {
            (Some(left), Some(right)) => {
                let comparison = compare_values(left, right);
                // desc 只反轉比較子的符號,null-last 與穩定性不受影響
                match sort.direction {
                    SortDirection::Asc => comparison,
                    SortDirection::Desc => comparison.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    ordered
}

/// 同型別各走各的比較,跨型別以型別序位決定,整體維持全序
///
/// 先比 (序位, 型別內鍵):數值只跟數值比大小,字串走折疊比較,
/// 其餘型別強制轉字串再比。混型欄位因此不會出現循環比較。
fn compare_values(a: &serde_json::Value, b: &serde_json::Value) -> Ordering {
    match (a, b) {
        (serde_json::Value::Number(x), serde_json::Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (serde_json::Value::String(x), serde_json::Value::String(y)) => compare_strings(x, y),
        _ => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| compare_strings(&coerce(a), &coerce(b))),
    }
}

fn type_rank(value: &serde_json::Value) -> u8 {
    match value {
        serde_json::Value::Number(_) => 0,
        serde_json::Value::String(_) => 1,
        _ => 2,
    }
}

/// 以 Unicode 小寫折疊近似 locale 排序,再以原字串決勝保持全序
fn compare_strings(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    if folded == Ordering::Equal {
        a.cmp(b)
    } else {
        folded
    }
}

fn coerce(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[serde_json::Value]) -> Vec<Record> {
        values
            .iter()
            .map(|v| Record::from_value(v.clone()).unwrap())
            .collect()
    }

    fn ids(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| {
                r.resolve("id")
                    .and_then(|v| v.as_str())
                    .unwrap_or("?")
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_no_key_preserves_order() {
        let input = records(&[
            serde_json::json!({"id": "b", "k": 2}),
            serde_json::json!({"id": "a", "k": 1}),
        ]);
        let sorted = sort_records(&input, &SortConfig::none());
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_stable_ties() {
        let input = records(&[
            serde_json::json!({"k": 1, "id": "a"}),
            serde_json::json!({"k": 1, "id": "b"}),
            serde_json::json!({"k": 2, "id": "c"}),
        ]);

        let asc = sort_records(&input, &SortConfig::new("k", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["a", "b", "c"]);

        // desc 反轉比較子而非結果順序,同值仍保留輸入順序
        let desc = sort_records(&input, &SortConfig::new("k", SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_nulls_sort_last_both_directions() {
        let input = records(&[
            serde_json::json!({"id": "n1", "k": null}),
            serde_json::json!({"id": "five", "k": 5}),
            serde_json::json!({"id": "n2"}),
            serde_json::json!({"id": "one", "k": 1}),
        ]);

        let asc = sort_records(&input, &SortConfig::new("k", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["one", "five", "n1", "n2"]);

        let desc = sort_records(&input, &SortConfig::new("k", SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["five", "one", "n1", "n2"]);
    }

    #[test]
    fn test_string_ordering_case_insensitive() {
        let input = records(&[
            serde_json::json!({"id": "z", "name": "zeta org"}),
            serde_json::json!({"id": "A", "name": "Alpha Org"}),
            serde_json::json!({"id": "b", "name": "beta org"}),
        ]);
        let asc = sort_records(&input, &SortConfig::new("name", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["A", "b", "z"]);
    }

    #[test]
    fn test_nested_sort_key() {
        let input = records(&[
            serde_json::json!({"id": "b", "organizationProfile": {"orgName": "Robotics"}}),
            serde_json::json!({"id": "a", "organizationProfile": {"orgName": "Chess"}}),
        ]);
        let asc = sort_records(
            &input,
            &SortConfig::new("organizationProfile.orgName", SortDirection::Asc),
        );
        assert_eq!(ids(&asc), vec!["a", "b"]);
    }

    #[test]
    fn test_unsupported_types_coerce_without_panic() {
        let input = records(&[
            serde_json::json!({"id": "obj", "k": {"x": 1}}),
            serde_json::json!({"id": "num", "k": 3}),
            serde_json::json!({"id": "str", "k": "abc"}),
        ]);
        // 順序本身無意義,但不得 panic 且必須是全序
        let sorted = sort_records(&input, &SortConfig::new("k", SortDirection::Asc));
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn test_mixed_numbers_and_numeric_strings_total_order() {
        // 數字與長得像數字的字串混在同一欄時,型別序位保證比較子不循環
        let input = records(&[
            serde_json::json!({"id": "ten", "k": 10}),
            serde_json::json!({"id": "s15", "k": "15"}),
            serde_json::json!({"id": "two", "k": 2}),
            serde_json::json!({"id": "s7", "k": "7"}),
        ]);

        let asc = sort_records(&input, &SortConfig::new("k", SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["two", "ten", "s15", "s7"]);

        let desc = sort_records(&input, &SortConfig::new("k", SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["s7", "s15", "ten", "two"]);

        // 任何輸入排列都收斂到同一順序
        let rotated: Vec<Record> = input[2..].iter().chain(&input[..2]).cloned().collect();
        let asc_rotated = sort_records(&rotated, &SortConfig::new("k", SortDirection::Asc));
        assert_eq!(ids(&asc_rotated), ids(&asc));
    }

    #[test]
    fn test_input_untouched() {
        let input = records(&[
            serde_json::json!({"id": "b", "k": 2}),
            serde_json::json!({"id": "a", "k": 1}),
        ]);
        let _ = sort_records(&input, &SortConfig::new("k", SortDirection::Asc));
        assert_eq!(ids(&input), vec!["b", "a"]);
    }
}
