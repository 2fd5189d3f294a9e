use crate::alloc::AllocError;
use crate::ipc::error::err;
use crate::store::StoreError;
use serde::de::DeserializeOwned;
use serde_json::json;

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        HandlerErr {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HandlerErr {
            code: "not_found",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<StoreError> for HandlerErr {
    fn from(e: StoreError) -> Self {
        HandlerErr {
            code: e.code(),
            message: e.to_string(),
            details: None,
        }
    }
}

impl From<AllocError> for HandlerErr {
    fn from(e: AllocError) -> Self {
        let details = match &e {
            AllocError::CapacityExceeded {
                capacity,
                requested,
            } => Some(json!({ "capacity": capacity, "requested": requested })),
            AllocError::RosterMismatch { requested, roster } => {
                Some(json!({ "requested": requested, "roster": roster }))
            }
            _ => None,
        };
        HandlerErr {
            code: e.code(),
            message: e.to_string(),
            details,
        }
    }
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

/// Deserializes `params` (or a sub-object of it) into a typed shape,
/// mapping any shape error to `bad_params`.
pub fn parse<T: DeserializeOwned>(value: &serde_json::Value) -> Result<T, HandlerErr> {
    serde_json::from_value(value.clone())
        .map_err(|e| HandlerErr::bad_params(format!("invalid params: {}", e)))
}

pub fn require_date(value: &str) -> Result<(), HandlerErr> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| HandlerErr::bad_params(format!("date must be YYYY-MM-DD, got {:?}", value)))
}

pub fn require_time(value: &str) -> Result<(), HandlerErr> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| HandlerErr::bad_params(format!("time must be HH:MM, got {:?}", value)))
}

pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
