use crate::analysis;
use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, parse, require_date, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{AttendanceRecord, AttendanceStatus, SessionStore};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttendanceRow {
    student_id: String,
    student_name: String,
    student_roll_no: String,
    subject_code: String,
    date: String,
    status: AttendanceStatus,
}

fn attendance_list(
    store: &SessionStore,
    params: &serde_json::Value,
) -> serde_json::Value {
    let student_id = params.get("studentId").and_then(|v| v.as_str());
    let subject_code = params.get("subjectCode").and_then(|v| v.as_str());
    let records: Vec<&_> = store
        .attendance()
        .iter()
        .filter(|r| student_id.map(|s| r.student_id == s).unwrap_or(true))
        .filter(|r| subject_code.map(|s| r.subject_code == s).unwrap_or(true))
        .collect();
    json!({ "attendance": records })
}

/// One batch per marking session, every row validated before any is
/// stored.
fn attendance_bulk_mark(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let Some(rows_json) = params.get("rows").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("missing rows"));
    };
    let mut rows: Vec<AttendanceRow> = Vec::with_capacity(rows_json.len());
    for row in rows_json {
        let parsed: AttendanceRow = parse(row)?;
        require_date(&parsed.date)?;
        rows.push(parsed);
    }
    let created = rows.len();
    for row in rows {
        store.add_attendance(AttendanceRecord {
            id: String::new(),
            student_id: row.student_id,
            student_name: row.student_name,
            student_roll_no: row.student_roll_no,
            subject_code: row.subject_code,
            date: row.date,
            status: row.status,
        });
    }
    Ok(json!({ "created": created }))
}

fn attendance_summary(
    store: &SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let summary = analysis::attendance_summary(store.attendance(), &student_id);
    Ok(json!({ "summary": summary }))
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
        "attendance.list" => Some(ok(&req.id, attendance_list(&state.store, &req.params))),
        "attendance.bulkMark" => Some(handle(state, req, attendance_bulk_mark)),
        "attendance.summary" => Some(match attendance_summary(&state.store, &req.params) {
            Ok(result) => ok(&req.id, result),
            Err(error) => error.response(&req.id),
        }),
        _ => None,
    }
}
