use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, parse, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{FacultyPatch, NewFaculty, PersonStatus, SessionStore};
use serde_json::json;

fn faculty_list(store: &SessionStore, params: &serde_json::Value) -> serde_json::Value {
    let department = params.get("department").and_then(|v| v.as_str());
    let faculty: Vec<&_> = store
        .faculty()
        .iter()
        .filter(|f| department.map(|d| f.department == d).unwrap_or(true))
        .collect();
    json!({ "faculty": faculty })
}

fn faculty_create(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let new: NewFaculty = parse(params)?;
    if new.name.trim().is_empty() {
        return Err(HandlerErr::bad_params("name must not be empty"));
    }
    if new.emp_id.trim().is_empty() {
        return Err(HandlerErr::bad_params("empId must not be empty"));
    }
    let member = store.add_faculty(new);
    Ok(json!({ "faculty": member }))
}

fn faculty_update(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let faculty_id = get_required_str(params, "facultyId")?;
    let patch: FacultyPatch = match params.get("patch") {
        Some(p) => parse(p)?,
        None => return Err(HandlerErr::bad_params("missing patch")),
    };
    let member = store.update_faculty(&faculty_id, patch)?;
    Ok(json!({ "faculty": member }))
}

fn faculty_delete(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let faculty_id = get_required_str(params, "facultyId")?;
    store.delete_faculty(&faculty_id)?;
    Ok(json!({ "ok": true }))
}

fn faculty_import(
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
            .unwrap_or("New Faculty")
            .to_string();
        let email = row
            .get("Email")
            .and_then(|v| v.as_str())
            .unwrap_or("faculty@tce.edu")
            .to_string();
        let emp_id = row
            .get("EmpID")
            .and_then(|v| v.as_str())
            .unwrap_or("N/A")
            .to_string();
        store.add_faculty(NewFaculty {
            name,
            email,
            emp_id,
            department: "CSBS".to_string(),
            subjects: Vec::new(),
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
        "faculty.list" => Some(ok(&req.id, faculty_list(&state.store, &req.params))),
        "faculty.create" => Some(handle(state, req, faculty_create)),
        "faculty.update" => Some(handle(state, req, faculty_update)),
        "faculty.delete" => Some(handle(state, req, faculty_delete)),
        "faculty.import" => Some(handle(state, req, faculty_import)),
        _ => None,
    }
}
