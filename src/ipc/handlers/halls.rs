use crate::alloc::{self, HallOverride};
use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, parse, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::SessionStore;
use serde_json::json;

fn halls_list(store: &SessionStore) -> serde_json::Value {
    json!({ "halls": store.halls() })
}

fn halls_create(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_str(params, "name")?;
    if name.trim().is_empty() {
        return Err(HandlerErr::bad_params("name must not be empty"));
    }
    let capacity = params
        .get("capacity")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| HandlerErr::bad_params("missing capacity"))?;
    if capacity == 0 || capacity > u32::MAX as u64 {
        return Err(HandlerErr::bad_params("capacity must be a positive integer"));
    }
    let hall = store.add_hall(name, capacity as u32);
    Ok(json!({ "hall": hall }))
}

/// Operator override of invigilators and occupancy. All clamping and
/// roster checks happen in the engine, never in the caller.
fn halls_update(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let hall_id = get_required_str(params, "hallId")?;
    let patch: HallOverride = match params.get("patch") {
        Some(p) => parse(p)?,
        None => return Err(HandlerErr::bad_params("missing patch")),
    };
    if patch.capacity == Some(0) {
        return Err(HandlerErr::bad_params("capacity must be a positive integer"));
    }
    let hall = alloc::manual_update(store, &hall_id, patch)?;
    Ok(json!({ "hall": hall }))
}

fn halls_delete(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let hall_id = get_required_str(params, "hallId")?;
    store.delete_hall(&hall_id)?;
    Ok(json!({ "ok": true }))
}

fn halls_auto_allocate(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let exam_id = get_required_str(params, "examId")?;
    let outcome = alloc::auto_allocate(store, &exam_id)?;
    let hall = store.hall(&outcome.hall_id).cloned();
    Ok(json!({ "allocation": outcome, "hall": hall }))
}

fn halls_release(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let hall_id = get_required_str(params, "hallId")?;
    let hall = alloc::release(store, &hall_id)?;
    Ok(json!({ "hall": hall }))
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
        "halls.list" => Some(ok(&req.id, halls_list(&state.store))),
        "halls.create" => Some(handle(state, req, halls_create)),
        "halls.update" => Some(handle(state, req, halls_update)),
        "halls.delete" => Some(handle(state, req, halls_delete)),
        "halls.autoAllocate" => Some(handle(state, req, halls_auto_allocate)),
        "halls.release" => Some(handle(state, req, halls_release)),
        _ => None,
    }
}
