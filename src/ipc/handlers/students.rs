use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, parse, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{NewStudent, PersonStatus, SessionStore, StudentPatch};
use serde_json::json;

fn students_list(store: &SessionStore, params: &serde_json::Value) -> serde_json::Value {
    let department = params.get("department").and_then(|v| v.as_str());
    let students: Vec<&_> = store
        .students()
        .iter()
        .filter(|s| department.map(|d| s.department == d).unwrap_or(true))
        .collect();
    json!({ "students": students })
}

fn students_create(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let new: NewStudent = parse(params)?;
    if new.name.trim().is_empty() {
        return Err(HandlerErr::bad_params("name must not be empty"));
    }
    if new.roll_no.trim().is_empty() {
        return Err(HandlerErr::bad_params("rollNo must not be empty"));
    }
    let student = store.add_student(new);
    Ok(json!({ "student": student }))
}

fn students_update(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let patch: StudentPatch = match params.get("patch") {
        Some(p) => parse(p)?,
        None => return Err(HandlerErr::bad_params("missing patch")),
    };
    let student = store.update_student(&student_id, patch)?;
    Ok(json!({ "student": student }))
}

/// Halls that reference the deleted student's roll number are left alone;
/// the roster entry dangles (see design notes).
fn students_delete(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    store.delete_student(&student_id)?;
    Ok(json!({ "ok": true }))
}

/// Bulk rows from a pre-parsed roster sheet. Missing cells fall back to
/// the portal defaults.
fn students_import(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let Some(rows) = params.get("rows").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("missing rows"));
    };
    let mut created = 0usize;
    for row in rows {
        let name = row
            .get("Name")
            .and_then(|v| v.as_str())
            .unwrap_or("New Student")
            .to_string();
        let email = row
            .get("Email")
            .and_then(|v| v.as_str())
            .unwrap_or("student@tce.edu")
            .to_string();
        let roll_no = row
            .get("RollNo")
            .and_then(|v| v.as_str())
            .unwrap_or("N/A")
            .to_string();
        store.add_student(NewStudent {
            name,
            email,
            roll_no,
            department: "CSBS".to_string(),
            year: 1,
            status: PersonStatus::Active,
        });
        created += 1;
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
        "students.list" => Some(ok(&req.id, students_list(&state.store, &req.params))),
        "students.create" => Some(handle(state, req, students_create)),
        "students.update" => Some(handle(state, req, students_update)),
        "students.delete" => Some(handle(state, req, students_delete)),
        "students.import" => Some(handle(state, req, students_import)),
        _ => None,
    }
}
