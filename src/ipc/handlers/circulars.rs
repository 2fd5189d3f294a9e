use crate::ipc::error::{err, ok};
use crate::ipc::helpers::today;
use crate::ipc::types::{AppState, Request};
use crate::store::{Circular, CircularPatch};
use serde_json::json;

fn handle_circulars_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    // The student view only sees approved circulars flagged for students.
    let student_view = req
        .params
        .get("studentView")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let circulars: Vec<&Circular> = state
        .store
        .circulars()
        .iter()
        .filter(|c| !student_view || (c.is_approved && c.show_to_students))
        .collect();
    ok(&req.id, json!({ "circulars": circulars }))
}

fn handle_circulars_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let title = match req.params.get("title").and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => return err(&req.id, "bad_params", "missing title", None),
    };
    let body = match req.params.get("body").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing body", None),
    };
    let created_by = req
        .params
        .get("createdBy")
        .and_then(|v| v.as_str())
        .unwrap_or("Admin")
        .to_string();
    let date = req
        .params
        .get("date")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(today);
    let is_approved = req
        .params
        .get("isApproved")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let show_to_students = req
        .params
        .get("showToStudents")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let circular = state.store.add_circular(Circular {
        id: String::new(),
        title,
        body,
        date,
        created_by,
        is_approved,
        show_to_students,
    });
    ok(&req.id, json!({ "circular": circular }))
}

fn handle_circulars_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match req.params.get("circularId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing circularId", None),
    };
    let patch: CircularPatch = match req.params.get("patch") {
        Some(p) => match serde_json::from_value(p.clone()) {
            Ok(v) => v,
            Err(e) => return err(&req.id, "bad_params", format!("invalid patch: {}", e), None),
        },
        None => return err(&req.id, "bad_params", "missing patch", None),
    };
    match state.store.update_circular(&id, patch) {
        Ok(c) => ok(&req.id, json!({ "circular": c })),
        Err(e) => err(&req.id, e.code(), e.to_string(), None),
    }
}

fn handle_circulars_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match req.params.get("circularId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing circularId", None),
    };
    match state.store.delete_circular(&id) {
        Ok(()) => ok(&req.id, json!({ "ok": true })),
        Err(e) => err(&req.id, e.code(), e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "circulars.list" => Some(handle_circulars_list(state, req)),
        "circulars.add" => Some(handle_circulars_add(state, req)),
        "circulars.update" => Some(handle_circulars_update(state, req)),
        "circulars.delete" => Some(handle_circulars_delete(state, req)),
        _ => None,
    }
}
