use crate::domain::model::{is_truthy, ScheduleSubject, StoredSubject};
use crate::domain::ports::RawResponse;
use serde_json::{Map, Value};

pub const NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ProcessTimetable,
    StoredTimetable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubjectsPayload {
    /// `{name, weight, major}` records saved by the planner.
    Saved(Vec<StoredSubject>),
    /// `{name, professor, info}` records from schedule ingestion.
    Metadata(Vec<ScheduleSubject>),
    Absent,
}

/// A backend response, decoded once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleResponse {
    Success {
        slots: Value,
        subjects: SubjectsPayload,
        message: Option<String>,
        total_hours: Option<Value>,
    },
    NotFound {
        message: Option<String>,
    },
    /// Server-supplied error text.
    Error {
        message: String,
    },
    /// Non-success status whose body carried no readable error.
    Status {
        status: u16,
    },
    Malformed,
}

pub fn decode(endpoint: Endpoint, raw: &RawResponse) -> ScheduleResponse {
    let body = serde_json::from_str::<Value>(&raw.body).ok();
    let object = body.as_ref().and_then(Value::as_object);

    if !raw.is_success() {
        if raw.status == NOT_FOUND && endpoint == Endpoint::StoredTimetable {
            return ScheduleResponse::NotFound {
                message: object.and_then(|o| string_field(o, "message")),
            };
        }
        // 已儲存時間表的失敗狀態只回報狀態碼，不讀取錯誤內容
        if endpoint == Endpoint::StoredTimetable {
            return ScheduleResponse::Status { status: raw.status };
        }
        return match object.and_then(error_message) {
            Some(message) => ScheduleResponse::Error { message },
            None => ScheduleResponse::Status { status: raw.status },
        };
    }

    let Some(object) = object else {
        tracing::debug!("Response body from {:?} is not a JSON object", endpoint);
        return ScheduleResponse::Malformed;
    };

    if let Some(message) = error_message(object) {
        return ScheduleResponse::Error { message };
    }

    match object.get("timetable_slots") {
        Some(slots @ Value::Array(_)) => ScheduleResponse::Success {
            slots: slots.clone(),
            subjects: decode_subjects(object.get("subjects")),
            message: string_field(object, "message"),
            total_hours: object.get("total_hours").filter(|v| !v.is_null()).cloned(),
        },
        _ => ScheduleResponse::Malformed,
    }
}

/// 第一筆帶有 `weight` 欄位才視為已儲存的科目設定
fn decode_subjects(value: Option<&Value>) -> SubjectsPayload {
    let Some(items) = value.and_then(Value::as_array).filter(|items| !items.is_empty()) else {
        return SubjectsPayload::Absent;
    };

    let has_weight = items[0]
        .as_object()
        .is_some_and(|first| first.contains_key("weight"));

    if has_weight {
        SubjectsPayload::Saved(decode_records(items, "saved subject"))
    } else {
        SubjectsPayload::Metadata(decode_records(items, "subject metadata"))
    }
}

fn decode_records<T: serde::de::DeserializeOwned>(items: &[Value], kind: &str) -> Vec<T> {
    let records: Vec<T> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    let dropped = items.len() - records.len();
    if dropped > 0 {
        tracing::warn!("⚠️ Dropped {} unreadable {} records", dropped, kind);
    }
    records
}

fn error_message(object: &Map<String, Value>) -> Option<String> {
    let error = object.get("error").filter(|v| is_truthy(v))?;
    Some(match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
