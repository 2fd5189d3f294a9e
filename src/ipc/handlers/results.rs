use crate::analysis::{self, ResultFilters};
use crate::ipc::error::ok;
use crate::ipc::helpers::{parse, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{ExamResult, SessionStore};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewResult {
    student_id: String,
    student_name: String,
    student_roll_no: String,
    subject_code: String,
    subject_name: String,
    exam_type: String,
    obtained_marks: f64,
    #[serde(default = "default_max_marks")]
    max_marks: f64,
    #[serde(default = "default_year")]
    year: i64,
}

fn default_max_marks() -> f64 {
    100.0
}

fn default_year() -> i64 {
    1
}

/// Pass flag and grade are derived here, never trusted from the caller.
fn to_record(new: NewResult) -> Result<ExamResult, HandlerErr> {
    if new.max_marks <= 0.0 {
        return Err(HandlerErr::bad_params("maxMarks must be positive"));
    }
    if new.obtained_marks < 0.0 || new.obtained_marks > new.max_marks {
        return Err(HandlerErr::bad_params(
            "obtainedMarks must be within 0..=maxMarks",
        ));
    }
    Ok(ExamResult {
        id: String::new(),
        is_pass: analysis::is_pass(new.obtained_marks, new.max_marks),
        grade: analysis::grade_for_marks(new.obtained_marks, new.max_marks).to_string(),
        student_id: new.student_id,
        student_name: new.student_name,
        student_roll_no: new.student_roll_no,
        subject_code: new.subject_code,
        subject_name: new.subject_name,
        exam_type: new.exam_type,
        obtained_marks: new.obtained_marks,
        max_marks: new.max_marks,
        year: new.year,
    })
}

fn results_list(
    store: &SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let filters: ResultFilters = parse(params)?;
    let results = analysis::filter_results(store.results(), &filters);
    Ok(json!({ "results": results }))
}

fn results_add(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let new: NewResult = parse(params)?;
    let record = store.add_result(to_record(new)?);
    Ok(json!({ "result": record }))
}

/// Bulk rows from a pre-parsed mark sheet, with the portal's defaulting:
/// unparseable marks count as 0 out of 100.
fn results_import(
    store: &mut SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let Some(rows) = params.get("rows").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("missing rows"));
    };
    let mut created = 0usize;
    for row in rows {
        let marks = row
            .get("marks")
            .and_then(|v| {
                v.as_f64()
                    .or_else(|| v.as_str().and_then(|s| s.parse::<f64>().ok()))
            })
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);
        let record = ExamResult {
            id: String::new(),
            student_id: row
                .get("studentId")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string(),
            student_name: row
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown")
                .to_string(),
            student_roll_no: row
                .get("rollNo")
                .and_then(|v| v.as_str())
                .unwrap_or("N/A")
                .to_string(),
            subject_code: row
                .get("code")
                .and_then(|v| v.as_str())
                .unwrap_or("N/A")
                .to_string(),
            subject_name: row
                .get("subject")
                .and_then(|v| v.as_str())
                .unwrap_or("N/A")
                .to_string(),
            exam_type: row
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("Terminal")
                .to_string(),
            obtained_marks: marks,
            max_marks: 100.0,
            is_pass: analysis::is_pass(marks, 100.0),
            year: 1,
            grade: analysis::grade_for_marks(marks, 100.0).to_string(),
        };
        store.add_result(record);
        created += 1;
    }
    Ok(json!({ "created": created }))
}

fn results_analyze(
    store: &SessionStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let filters: ResultFilters = parse(params)?;
    let filtered = analysis::filter_results(store.results(), &filters);
    let report = analysis::analyze(&filtered);
    Ok(json!({ "analysis": report }))
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
        "results.list" => Some(match results_list(&state.store, &req.params) {
            Ok(result) => ok(&req.id, result),
            Err(error) => error.response(&req.id),
        }),
        "results.add" => Some(handle(state, req, results_add)),
        "results.import" => Some(handle(state, req, results_import)),
        "results.analyze" => Some(match results_analyze(&state.store, &req.params) {
            Ok(result) => ok(&req.id, result),
            Err(error) => error.response(&req.id),
        }),
        _ => None,
    }
}
