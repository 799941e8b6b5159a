use crate::app::form::TIMETABLE_SLOTS_FIELD;
use crate::app::page::PageState;
use crate::core::response::{decode, Endpoint, ScheduleResponse, SubjectsPayload};
use crate::core::slot_parser::parse_subject_names;
use crate::domain::model::Notice;
use crate::domain::ports::RawResponse;
use crate::utils::error::Result;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Timetable loaded successfully!";
pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL.";
pub const MALFORMED_MESSAGE: &str = "Could not load the timetable or its format is invalid.";

/// 空字串直接拒絕，不送出請求
pub fn prepare_url(url: &str) -> std::result::Result<String, Notice> {
    if url.is_empty() {
        return Err(Notice::warning(EMPTY_URL_MESSAGE));
    }
    Ok(url.to_string())
}

/// Applies one `/process_timetable` outcome to the page and returns the notice to show.
pub fn apply_response(state: &mut PageState, outcome: Result<RawResponse>) -> Notice {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("❌ Timetable request failed: {}", e);
            return Notice::error(format!(
                "An error occurred while processing the timetable: {}",
                e.user_friendly_message()
            ));
        }
    };

    tracing::debug!("process_timetable responded with status {}", raw.status);

    match decode(Endpoint::ProcessTimetable, &raw) {
        ScheduleResponse::Success {
            slots,
            subjects,
            message,
            total_hours,
        } => {
            state.hidden.replace(TIMETABLE_SLOTS_FIELD, slots.to_string());

            let names = parse_subject_names(&slots);
            state.subjects.populate_from_names(&names);
            state.modal.close();

            if let SubjectsPayload::Metadata(meta) = &subjects {
                tracing::debug!("Ignoring {} subject metadata records", meta.len());
            }
            if let Some(hours) = total_hours {
                tracing::debug!("Server reported total_hours = {}", hours);
            }
            tracing::info!("✅ Loaded timetable with {} subjects", names.len());

            Notice::success(message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()))
        }
        ScheduleResponse::Error { message } => {
            tracing::warn!("⚠️ Timetable loading error: {}", message);
            Notice::error(format!("Timetable loading error: {}", message))
        }
        ScheduleResponse::Status { status } => {
            tracing::warn!("⚠️ process_timetable returned status {}", status);
            Notice::error(format!("Server error: {}", status))
        }
        ScheduleResponse::NotFound { .. } | ScheduleResponse::Malformed => {
            tracing::warn!("⚠️ Unexpected timetable response shape");
            Notice::error(MALFORMED_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{NoticeLevel, Subject};
    use crate::utils::error::PlannerError;
    use serde_json::json;

    fn loaded_state() -> PageState {
        let mut state = PageState::default();
        state.subjects.add(None, "Existing", 30, true);
        state.modal.open();
        state.modal.set_url("https://everytime.kr/@abc");
        state
    }

    #[test]
    fn test_prepare_url_rejects_empty() {
        assert_eq!(prepare_url(""), Err(Notice::warning(EMPTY_URL_MESSAGE)));
        assert_eq!(prepare_url("https://x").unwrap(), "https://x");
    }

    #[test]
    fn test_success_populates_and_closes_modal() {
        let mut state = loaded_state();
        let body = json!({
            "timetable_slots": [["수업", "OS"], ["공강", ""], ["수업", "OS"], ["수업", "DB"]],
            "message": "Everytime loaded"
        });

        let notice = apply_response(&mut state, Ok(RawResponse::new(200, body.to_string())));

        assert_eq!(notice, Notice::success("Everytime loaded"));
        assert_eq!(
            state.subjects.subjects(),
            vec![Subject::new("OS", 50, false), Subject::new("DB", 50, false)]
        );
        assert!(!state.modal.is_visible());
        assert_eq!(state.modal.url(), "");
        let stored: serde_json::Value =
            serde_json::from_str(state.hidden.get(TIMETABLE_SLOTS_FIELD).unwrap()).unwrap();
        assert_eq!(stored, body["timetable_slots"]);
    }

    #[test]
    fn test_success_default_message_and_blank_fallback() {
        let mut state = loaded_state();
        let body = json!({"timetable_slots": [["공강", "", "월요일", "09:00", "10:00"]]});
        let notice = apply_response(&mut state, Ok(RawResponse::new(200, body.to_string())));

        assert_eq!(notice.message, DEFAULT_SUCCESS_MESSAGE);
        assert_eq!(state.subjects.subjects(), vec![Subject::blank()]);
    }

    #[test]
    fn test_error_status_leaves_list_untouched() {
        let mut state = loaded_state();
        let notice = apply_response(
            &mut state,
            Ok(RawResponse::new(400, json!({"error": "invalid url"}).to_string())),
        );

        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("invalid url"));
        assert_eq!(state.subjects.subjects(), vec![Subject::new("Existing", 30, true)]);
        assert!(state.modal.is_visible());
        assert_eq!(state.hidden.get(TIMETABLE_SLOTS_FIELD), None);
    }

    #[test]
    fn test_unparseable_error_body_uses_status() {
        let mut state = loaded_state();
        let notice = apply_response(&mut state, Ok(RawResponse::new(500, "Internal Server Error")));
        assert_eq!(notice.message, "Server error: 500");
    }

    #[test]
    fn test_missing_slots_is_malformed() {
        let mut state = loaded_state();
        let notice = apply_response(
            &mut state,
            Ok(RawResponse::new(200, json!({"message": "ok"}).to_string())),
        );
        assert_eq!(notice, Notice::error(MALFORMED_MESSAGE));
        assert_eq!(state.subjects.len(), 1);
    }

    #[test]
    fn test_transport_error_becomes_notice() {
        let mut state = loaded_state();
        let err = PlannerError::ResponseError {
            endpoint: "/process_timetable".to_string(),
            message: "connection reset".to_string(),
        };
        let notice = apply_response(&mut state, Err(err));
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("connection reset"));
        assert_eq!(state.subjects.len(), 1);
    }
}
