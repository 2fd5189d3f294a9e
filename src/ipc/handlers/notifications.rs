use crate::ipc::error::{err, ok};
use crate::ipc::helpers::today;
use crate::ipc::types::{AppState, Request};
use crate::store::{Audience, NoticeKind, Notification};
use serde_json::json;

fn handle_notifications_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let role: Option<Audience> = req
        .params
        .get("role")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok());
    let notifications: Vec<&Notification> = state
        .store
        .notifications()
        .iter()
        .filter(|n| role.map(|r| n.for_roles.contains(&r)).unwrap_or(true))
        .collect();
    ok(&req.id, json!({ "notifications": notifications }))
}

fn handle_notifications_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let title = match req.params.get("title").and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => return err(&req.id, "bad_params", "missing title", None),
    };
    let message = match req.params.get("message").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing message", None),
    };
    let kind: NoticeKind = match req
        .params
        .get("type")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
    {
        Ok(v) => v.unwrap_or(NoticeKind::Info),
        Err(_) => return err(&req.id, "bad_params", "invalid type", None),
    };
    let for_roles: Vec<Audience> = match req
        .params
        .get("forRoles")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
    {
        Ok(v) => v.unwrap_or_else(|| {
            vec![Audience::Student, Audience::Faculty, Audience::Admin]
        }),
        Err(_) => return err(&req.id, "bad_params", "invalid forRoles", None),
    };
    let date = req
        .params
        .get("date")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(today);

    let notification = state.store.add_notification(Notification {
        id: String::new(),
        title,
        message,
        kind,
        date,
        read: false,
        for_roles,
    });
    ok(&req.id, json!({ "notification": notification }))
}

fn handle_notifications_mark_read(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match req.params.get("notificationId").and_then(|v| v.as_str()) {
        Some(v) => v.to_string(),
        None => return err(&req.id, "bad_params", "missing notificationId", None),
    };
    match state.store.mark_notification_read(&id) {
        Ok(n) => ok(&req.id, json!({ "notification": n })),
        Err(e) => err(&req.id, e.code(), e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "notifications.list" => Some(handle_notifications_list(state, req)),
        "notifications.add" => Some(handle_notifications_add(state, req)),
        "notifications.markRead" => Some(handle_notifications_mark_read(state, req)),
        _ => None,
    }
}
