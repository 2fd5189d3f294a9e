use crate::store::SessionStore;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub store: SessionStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: SessionStore::new(),
        }
    }
}
