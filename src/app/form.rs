use crate::core::subject_list::SubjectList;
use crate::domain::model::SubmittedSubject;
use crate::utils::error::Result;

pub const SUBJECTS_JSON_FIELD: &str = "subjects_json";
pub const TIMETABLE_SLOTS_FIELD: &str = "timetable_slots";
pub const TOTAL_HOURS_FIELD: &str = "total_hours";

/// Hidden inputs attached to the planning form, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenFields {
    fields: Vec<(String, String)>,
}

impl HiddenFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// 先移除同名欄位再附加，避免重複送出
    pub fn replace(&mut self, name: &str, value: impl Into<String>) {
        self.fields.retain(|(field, _)| field != name);
        self.fields.push((name.to_string(), value.into()));
    }

    pub fn count(&self, name: &str) -> usize {
        self.fields.iter().filter(|(field, _)| field == name).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Trims names and drops entries whose trimmed name is empty.
pub fn collect_subjects(list: &SubjectList) -> Vec<SubmittedSubject> {
    list.iter()
        .filter_map(|entry| {
            let name = entry.subject.name.trim();
            if name.is_empty() {
                return None;
            }
            Some(SubmittedSubject {
                name: name.to_string(),
                weight: entry.subject.weight,
                major: entry.subject.major,
            })
        })
        .collect()
}

pub fn attach_subjects_json(list: &SubjectList, hidden: &mut HiddenFields) -> Result<usize> {
    let subjects = collect_subjects(list);
    let json = serde_json::to_string(&subjects)?;
    tracing::debug!("Serialized {} subjects into {}", subjects.len(), SUBJECTS_JSON_FIELD);
    hidden.replace(SUBJECTS_JSON_FIELD, json);
    Ok(subjects.len())
}
