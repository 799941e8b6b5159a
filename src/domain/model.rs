use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_WEIGHT: u8 = 50;
pub const MAX_WEIGHT: u8 = 100;

/// 時間表中「上課」與「空堂」的原始標籤
pub const CLASS_LABEL: &str = "수업";
pub const FREE_PERIOD_LABEL: &str = "공강";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub weight: u8,
    pub major: bool,
}

impl Subject {
    pub fn new(name: impl Into<String>, weight: u8, major: bool) -> Self {
        Self {
            name: name.into(),
            weight: weight.min(MAX_WEIGHT),
            major,
        }
    }

    pub fn blank() -> Self {
        Self::new("", DEFAULT_WEIGHT, false)
    }
}

impl Default for Subject {
    fn default() -> Self {
        Self::blank()
    }
}

/// Opaque handle for one entry of the subject list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryHandle(pub(crate) u64);

impl EntryHandle {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotCategory {
    Class,
    FreePeriod,
    Other(String),
}

impl SlotCategory {
    pub fn from_label(label: &str) -> Self {
        match label {
            CLASS_LABEL => SlotCategory::Class,
            FREE_PERIOD_LABEL => SlotCategory::FreePeriod,
            other => SlotCategory::Other(other.to_string()),
        }
    }
}

/// One `[category, name, day, start, end, ...]` tuple of a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSlot {
    pub category: SlotCategory,
    pub name: Option<String>,
    pub rest: Vec<Value>,
}

impl ScheduleSlot {
    /// 非陣列或長度不足 2 的項目回傳 None
    pub fn from_value(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        if items.len() < 2 {
            return None;
        }
        let category = SlotCategory::from_label(items[0].as_str()?);
        let name = items[1].as_str().map(str::to_string);
        Some(Self {
            category,
            name,
            rest: items[2..].to_vec(),
        })
    }

    pub fn class_name(&self) -> Option<&str> {
        match self.category {
            SlotCategory::Class => self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty()),
            _ => None,
        }
    }
}

/// A saved subject as the backend returns it. Every field is loosely typed on the wire.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StoredSubject {
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_weight")]
    pub weight: Option<u8>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub major: bool,
}

impl StoredSubject {
    pub fn to_subject(&self) -> Subject {
        Subject::new(
            self.name.clone(),
            self.weight.unwrap_or(DEFAULT_WEIGHT),
            self.major,
        )
    }
}

/// Subject metadata from the schedule-ingestion endpoint. Not used to fill the list.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ScheduleSubject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub professor: Option<String>,
    #[serde(default)]
    pub info: Value,
}

/// The serialized form of one subject inside `subjects_json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedSubject {
    pub name: String,
    pub weight: u8,
    pub major: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-visible notice (the page's blocking alert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// JavaScript 風格的真值判斷
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_weight(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if number.is_nan() {
        return None;
    }
    Some(number.round().clamp(0.0, f64::from(MAX_WEIGHT)) as u8)
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn loose_weight<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_weight(&value))
}

fn loose_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}
