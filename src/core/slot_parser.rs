use crate::domain::model::ScheduleSlot;
use serde_json::Value;
use std::collections::HashSet;

/// 從原始時間表 JSON 取出不重複的科目名稱（保留首次出現順序）。
/// 非陣列輸入回傳空結果。
pub fn parse_subject_names(slots: &Value) -> Vec<String> {
    let Some(items) = slots.as_array() else {
        tracing::debug!("Timetable slots are not an array, no subjects extracted");
        return Vec::new();
    };

    let typed: Vec<ScheduleSlot> = items.iter().filter_map(ScheduleSlot::from_value).collect();
    parse_slots(&typed)
}

pub fn parse_slots(slots: &[ScheduleSlot]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for name in slots.iter().filter_map(ScheduleSlot::class_name) {
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }

    tracing::debug!(
        "Extracted {} unique subjects from {} slots",
        names.len(),
        slots.len()
    );
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicates_collapse_to_first_occurrence() {
        let slots = json!([["수업", "Math"], ["수업", "Math"], ["수업", "Bio"]]);
        assert_eq!(parse_subject_names(&slots), vec!["Math", "Bio"]);
    }

    #[test]
    fn test_only_class_slots_with_names_are_kept() {
        let slots = json!([
            ["공강", "", "월요일", "09:00", "10:00"],
            ["수업", "  자료구조  ", "월요일", "10:00", "11:30"],
            ["수업", "   ", "화요일", "09:00", "10:00"],
            ["수업", 42, "화요일", "11:00", "12:00"],
            ["수업"],
            "수업",
            null,
            ["수업", "자료구조", "수요일", "10:00", "11:30"],
            ["수업", "알고리즘", "목요일", "13:00", "14:30"]
        ]);
        assert_eq!(parse_subject_names(&slots), vec!["자료구조", "알고리즘"]);
    }

    #[test]
    fn test_trimmed_names_deduplicate() {
        let slots = json!([["수업", "OS "], ["수업", " OS"]]);
        assert_eq!(parse_subject_names(&slots), vec!["OS"]);
    }

    #[test]
    fn test_malformed_input_yields_empty() {
        assert!(parse_subject_names(&json!({"timetable_slots": []})).is_empty());
        assert!(parse_subject_names(&json!("not a list")).is_empty());
        assert!(parse_subject_names(&Value::Null).is_empty());
        assert!(parse_subject_names(&json!([])).is_empty());
    }
}
