mod test_support;

use serde_json::json;
use test_support::{add_exam, request_err, request_ok, spawn_sidecar};

#[test]
fn status_moves_forward_only() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let exam_id = add_exam(
        &mut stdin,
        &mut reader,
        "1",
        "DS",
        "CSBS",
        "2024-12-15",
        "10:00",
    );

    let ongoing = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "exams.update",
        json!({ "examId": exam_id, "patch": { "status": "Ongoing" } }),
    );
    assert_eq!(
        ongoing
            .get("exam")
            .and_then(|e| e.get("status"))
            .and_then(|v| v.as_str()),
        Some("Ongoing")
    );

    let completed = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "exams.update",
        json!({ "examId": exam_id, "patch": { "status": "Completed" } }),
    );
    assert_eq!(
        completed
            .get("exam")
            .and_then(|e| e.get("status"))
            .and_then(|v| v.as_str()),
        Some("Completed")
    );

    let error = request_err(
        &mut stdin,
        &mut reader,
        "4",
        "exams.update",
        json!({ "examId": exam_id, "patch": { "status": "Scheduled" } }),
    );
    assert_eq!(
        error.get("code").and_then(|v| v.as_str()),
        Some("bad_transition")
    );
}

#[test]
fn reasserting_the_current_status_is_allowed() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let exam_id = add_exam(
        &mut stdin,
        &mut reader,
        "1",
        "DS",
        "CSBS",
        "2024-12-15",
        "10:00",
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "exams.update",
        json!({ "examId": exam_id, "patch": { "status": "Scheduled", "venue": "Hall B" } }),
    );
}

#[test]
fn create_rejects_malformed_date_and_time() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let error = request_err(
        &mut stdin,
        &mut reader,
        "1",
        "exams.create",
        json!({
            "subject": "DS",
            "code": "CS102",
            "date": "15-12-2024",
            "time": "10:00",
            "venue": "Hall A",
            "type": "CAT-1",
            "status": "Scheduled",
            "department": "CSBS"
        }),
    );
    assert_eq!(
        error.get("code").and_then(|v| v.as_str()),
        Some("bad_params")
    );

    let error = request_err(
        &mut stdin,
        &mut reader,
        "2",
        "exams.create",
        json!({
            "subject": "DS",
            "code": "CS102",
            "date": "2024-12-15",
            "time": "10am",
            "venue": "Hall A",
            "type": "CAT-1",
            "status": "Scheduled",
            "department": "CSBS"
        }),
    );
    assert_eq!(
        error.get("code").and_then(|v| v.as_str()),
        Some("bad_params")
    );
}

#[test]
fn unknown_category_is_rejected() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let error = request_err(
        &mut stdin,
        &mut reader,
        "1",
        "exams.create",
        json!({
            "subject": "DS",
            "code": "CS102",
            "date": "2024-12-15",
            "time": "10:00",
            "venue": "Hall A",
            "type": "CAT-9",
            "status": "Scheduled",
            "department": "CSBS"
        }),
    );
    assert_eq!(
        error.get("code").and_then(|v| v.as_str()),
        Some("bad_params")
    );
}
