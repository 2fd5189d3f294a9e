use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::Syllabus;
use serde_json::json;

fn handle_syllabus_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let year = req.params.get("year").and_then(|v| v.as_i64());
    let semester = req.params.get("semester").and_then(|v| v.as_i64());
    let syllabi: Vec<&Syllabus> = state
        .store
        .syllabi()
        .iter()
        .filter(|s| year.map(|y| s.year == y).unwrap_or(true))
        .filter(|s| semester.map(|m| s.semester == m).unwrap_or(true))
        .collect();
    ok(&req.id, json!({ "syllabi": syllabi }))
}

fn handle_syllabus_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subject_code = match req.params.get("subjectCode").and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => return err(&req.id, "bad_params", "missing subjectCode", None),
    };
    let subject_name = match req.params.get("subjectName").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing subjectName", None),
    };
    let year = req.params.get("year").and_then(|v| v.as_i64()).unwrap_or(1);
    let semester = req
        .params
        .get("semester")
        .and_then(|v| v.as_i64())
        .unwrap_or(1);
    let content = req
        .params
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let file_url = req
        .params
        .get("fileUrl")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let syllabus = state.store.add_syllabus(Syllabus {
        id: String::new(),
        subject_code,
        subject_name,
        year,
        semester,
        content,
        file_url,
    });
    ok(&req.id, json!({ "syllabus": syllabus }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "syllabus.list" => Some(handle_syllabus_list(state, req)),
        "syllabus.add" => Some(handle_syllabus_add(state, req)),
        _ => None,
    }
}
