use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, parse, require_date, require_time, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{ExamCategory, ExamPatch, ExamStatus, NewExam, SessionStore};
use serde_json::json;

fn exams_list(store: &SessionStore, params: &serde_json::Value) -> serde_json::Value {
    let department = params.get("department").and_then(|v| v.as_str());
    let exams: Vec<&_> = store
        .exams()
        .iter()
        .filter(|e| department.map(|d| e.department == d).unwrap_or(true))
        .collect();
    json!({ "exams": exams })
}

fn exams_create(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let new: NewExam = parse(params)?;
    if new.subject.trim().is_empty() {
        return Err(HandlerErr::bad_params("subject must not be empty"));
    }
    require_date(&new.date)?;
    require_time(&new.time)?;
    let exam = store.add_exam(new);
    Ok(json!({ "exam": exam }))
}

fn exams_update(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let exam_id = get_required_str(params, "examId")?;
    let patch: ExamPatch = match params.get("patch") {
        Some(p) => parse(p)?,
        None => return Err(HandlerErr::bad_params("missing patch")),
    };
    if let Some(date) = &patch.date {
        require_date(date)?;
    }
    if let Some(time) = &patch.time {
        require_time(time)?;
    }
    let exam = store.update_exam(&exam_id, patch)?;
    Ok(json!({ "exam": exam }))
}

fn exams_delete(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let exam_id = get_required_str(params, "examId")?;
    store.delete_exam(&exam_id)?;
    Ok(json!({ "ok": true }))
}

/// Bulk rows from a pre-parsed exam timetable. Category strings that do
/// not match a known type fall back to CAT-1, mirroring the portal.
fn exams_import(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let Some(rows) = params.get("rows").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("missing rows"));
    };
    // Validate every row before storing any of them.
    let mut pending: Vec<NewExam> = Vec::with_capacity(rows.len());
    for row in rows {
        let subject = row
            .get("Subject")
            .and_then(|v| v.as_str())
            .unwrap_or("New Exam")
            .to_string();
        let code = row
            .get("Code")
            .and_then(|v| v.as_str())
            .unwrap_or("CS000")
            .to_string();
        let category = row
            .get("Type")
            .and_then(|v| v.as_str())
            .and_then(|s| {
                ExamCategory::ALL
                    .iter()
                    .copied()
                    .find(|c| c.label() == s)
            })
            .unwrap_or(ExamCategory::Cat1);
        let date = row
            .get("Date")
            .and_then(|v| v.as_str())
            .unwrap_or("2024-12-25")
            .to_string();
        let time = row
            .get("Time")
            .and_then(|v| v.as_str())
            .unwrap_or("10:00")
            .to_string();
        let venue = row
            .get("Venue")
            .and_then(|v| v.as_str())
            .unwrap_or("Exam Hall")
            .to_string();
        require_date(&date)?;
        require_time(&time)?;
        pending.push(NewExam {
            subject,
            code,
            date,
            time,
            venue,
            category,
            status: ExamStatus::Scheduled,
            department: "CSBS".to_string(),
        });
    }
    let created = pending.len();
    for new in pending {
        store.add_exam(new);
    }
    Ok(json!({ "created": created }))
}

fn handle(
    state: &mut AppState,
    req: &Request,
    f: impl FnOnce(&mut SessionStore, &serde_json::Value) -> Result<serde_json::Value, HandlerErr>,
) -> serde_json::Value {
    match f(&mut state.store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "exams.list" => Some(ok(&req.id, exams_list(&state.store, &req.params))),
        "exams.create" => Some(handle(state, req, exams_create)),
        "exams.update" => Some(handle(state, req, exams_update)),
        "exams.delete" => Some(handle(state, req, exams_delete)),
        "exams.import" => Some(handle(state, req, exams_import)),
        _ => None,
    }
}
