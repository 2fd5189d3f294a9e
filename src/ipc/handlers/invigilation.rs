use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{DutyRole, InvigilationDuty, SessionStore};
use serde_json::json;

fn invigilation_list(store: &SessionStore, params: &serde_json::Value) -> serde_json::Value {
    let faculty_id = params.get("facultyId").and_then(|v| v.as_str());
    let duties: Vec<&InvigilationDuty> = store
        .invigilation()
        .iter()
        .filter(|d| faculty_id.map(|f| d.faculty_id == f).unwrap_or(true))
        .collect();
    json!({ "duties": duties })
}

/// Faculty, exam, and hall must all exist; names are denormalized into
/// the duty record the way the portal keeps them.
fn invigilation_assign(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let faculty_id = get_required_str(params, "facultyId")?;
    let exam_id = get_required_str(params, "examId")?;
    let hall_id = get_required_str(params, "hallId")?;
    let role: DutyRole = match params.get("role") {
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|_| HandlerErr::bad_params("invalid role"))?,
        None => DutyRole::Invigilator,
    };

    let faculty_name = store
        .faculty_member(&faculty_id)
        .map(|f| f.name.clone())
        .ok_or_else(|| HandlerErr::not_found("faculty not found"))?;
    let exam_name = store
        .exam(&exam_id)
        .map(|e| e.subject.clone())
        .ok_or_else(|| HandlerErr::not_found("exam not found"))?;
    let hall_name = store
        .hall(&hall_id)
        .map(|h| h.name.clone())
        .ok_or_else(|| HandlerErr::not_found("hall not found"))?;

    let duty = store.add_invigilation(InvigilationDuty {
        id: String::new(),
        faculty_id,
        faculty_name,
        exam_id,
        exam_name,
        hall_name,
        role,
    });
    Ok(json!({ "duty": duty }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "invigilation.list" => Some(ok(&req.id, invigilation_list(&state.store, &req.params))),
        "invigilation.assign" => Some(match invigilation_assign(&mut state.store, &req.params) {
            Ok(result) => ok(&req.id, result),
            Err(error) => error.response(&req.id),
        }),
        _ => None,
    }
}
