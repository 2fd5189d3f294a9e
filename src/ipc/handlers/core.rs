use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "counts": state.store.counts()
        }),
    )
}

fn handle_session_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.store.reset();
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "session.reset" => Some(handle_session_reset(state, req)),
        _ => None,
    }
}
