use crate::backup;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn handle_session_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    let out_path = match req.params.get("path").and_then(|v| v.as_str()) {
        Some(v) => PathBuf::from(v),
        None => return err(&req.id, "bad_params", "missing params.path", None),
    };

    let dataset = state.store.snapshot();
    match backup::export_session_bundle(&dataset, &out_path) {
        Ok(summary) => {
            log::info!("exported session bundle to {}", out_path.to_string_lossy());
            ok(
                &req.id,
                json!({
                    "path": out_path.to_string_lossy(),
                    "bundleFormat": summary.bundle_format,
                    "entryCount": summary.entry_count,
                    "datasetSha256": summary.dataset_sha256,
                    "counts": state.store.counts()
                }),
            )
        }
        Err(e) => err(&req.id, "export_failed", format!("{e:#}"), None),
    }
}

/// Replaces the whole store with the bundle contents. Nothing is touched
/// unless the bundle verifies.
fn handle_session_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let in_path = match req.params.get("path").and_then(|v| v.as_str()) {
        Some(v) => PathBuf::from(v),
        None => return err(&req.id, "bad_params", "missing params.path", None),
    };

    match backup::import_session_bundle(&in_path) {
        Ok((dataset, summary)) => {
            state.store.restore(dataset);
            log::info!(
                "imported session bundle from {}",
                in_path.to_string_lossy()
            );
            ok(
                &req.id,
                json!({
                    "bundleFormatDetected": summary.bundle_format_detected,
                    "counts": state.store.counts()
                }),
            )
        }
        Err(e) => err(&req.id, "bundle_invalid", format!("{e:#}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.export" => Some(handle_session_export(state, req)),
        "session.import" => Some(handle_session_import(state, req)),
        _ => None,
    }
}
