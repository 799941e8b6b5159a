use crate::app::form::TIMETABLE_SLOTS_FIELD;
use crate::app::page::PageState;
use crate::core::response::{decode, Endpoint, ScheduleResponse, SubjectsPayload};
use crate::core::slot_parser::parse_subject_names;
use crate::domain::model::Notice;
use crate::domain::ports::RawResponse;
use crate::utils::error::Result;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Stored timetable loaded successfully!";
pub const NO_DATA_MESSAGE: &str = "No stored timetable data.";
pub const MALFORMED_MESSAGE: &str = "Could not load the stored timetable or its format is invalid.";

/// Applies one `/load_stored_timetable` outcome to the page and returns the notice to show.
pub fn apply_response(state: &mut PageState, outcome: Result<RawResponse>) -> Notice {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("❌ Stored timetable request failed: {}", e);
            return Notice::error(format!(
                "An error occurred while loading the stored timetable: {}",
                e.user_friendly_message()
            ));
        }
    };

    tracing::debug!("load_stored_timetable responded with status {}", raw.status);

    match decode(Endpoint::StoredTimetable, &raw) {
        ScheduleResponse::Success {
            slots,
            subjects,
            message,
            ..
        } => {
            state.hidden.replace(TIMETABLE_SLOTS_FIELD, slots.to_string());

            match subjects {
                SubjectsPayload::Saved(saved) => {
                    tracing::info!("✅ Restored {} saved subjects", saved.len());
                    state.subjects.populate_from_subjects(&saved);
                }
                SubjectsPayload::Metadata(_) | SubjectsPayload::Absent => {
                    let names = parse_subject_names(&slots);
                    tracing::info!("✅ Restored {} subjects from stored timetable", names.len());
                    state.subjects.populate_from_names(&names);
                }
            }

            Notice::success(message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()))
        }
        ScheduleResponse::NotFound { message } => {
            tracing::info!("No stored timetable on the server");
            state.subjects.ensure_non_empty();
            Notice::info(message.unwrap_or_else(|| NO_DATA_MESSAGE.to_string()))
        }
        ScheduleResponse::Error { message } => {
            tracing::warn!("⚠️ Stored timetable loading error: {}", message);
            Notice::error(format!("Stored timetable loading error: {}", message))
        }
        ScheduleResponse::Status { status } => {
            tracing::warn!("⚠️ load_stored_timetable returned status {}", status);
            Notice::error(format!("Server responded with status {}", status))
        }
        ScheduleResponse::Malformed => {
            tracing::warn!("⚠️ Unexpected stored timetable response shape");
            state.subjects.ensure_non_empty();
            Notice::error(MALFORMED_MESSAGE)
        }
    }
}
