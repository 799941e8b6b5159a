use crate::core::subject_list::SubjectList;
use crate::domain::model::EntryHandle;
use std::fmt::Write;

const SLIDER_VALUE_PREFIX: &str = "sliderValue";

/// Element ids of one rendered entry, derived from its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIds {
    pub item: String,
    pub name: String,
    pub major: String,
    pub weight: String,
    pub slider_value: String,
}

impl EntryIds {
    pub fn for_handle(handle: EntryHandle) -> Self {
        let n = handle.value();
        Self {
            item: format!("subjectItem{}", n),
            name: format!("name{}", n),
            major: format!("major{}", n),
            weight: format!("weight{}", n),
            slider_value: format!("{}{}", SLIDER_VALUE_PREFIX, n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectView {
    pub handle: EntryHandle,
    pub ids: EntryIds,
    pub name: String,
    pub weight: u8,
    pub readout: String,
    pub major: bool,
}

pub fn render(list: &SubjectList) -> Vec<SubjectView> {
    list.iter()
        .map(|entry| SubjectView {
            handle: entry.handle,
            ids: EntryIds::for_handle(entry.handle),
            name: entry.subject.name.clone(),
            weight: entry.subject.weight,
            readout: entry.readout.clone(),
            major: entry.subject.major,
        })
        .collect()
}

/// 終端機用的純文字清單
pub fn render_text(list: &SubjectList) -> String {
    let mut out = String::new();
    for view in render(list) {
        let name = if view.name.is_empty() {
            "(blank)"
        } else {
            view.name.as_str()
        };
        let _ = writeln!(
            out,
            "[{:>2}] {:<24} importance {:>3}  major {}",
            view.handle.value(),
            name,
            view.readout,
            if view.major { "yes" } else { "no" }
        );
    }
    out
}

pub fn handle_from_display_id(display_id: &str) -> Option<EntryHandle> {
    display_id
        .strip_prefix(SLIDER_VALUE_PREFIX)?
        .parse::<u64>()
        .ok()
        .map(EntryHandle)
}
