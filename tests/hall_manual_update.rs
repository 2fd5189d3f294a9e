mod test_support;

use serde_json::json;
use test_support::{add_exam, add_hall, add_student, request_err, request_ok, spawn_sidecar};

#[test]
fn override_sets_invigilators() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let hall_id = add_hall(&mut stdin, &mut reader, "1", "Hall A", 100);
    let result = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "halls.update",
        json!({
            "hallId": hall_id,
            "patch": { "invigilators": ["Dr. S. Ramesh"] }
        }),
    );
    let hall = result.get("hall").expect("hall");
    assert_eq!(
        hall.get("invigilators"),
        Some(&json!(["Dr. S. Ramesh"]))
    );
    assert_eq!(hall.get("allocated").and_then(|v| v.as_u64()), Some(0));
}

#[test]
fn override_rejects_count_beyond_capacity() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let hall_id = add_hall(&mut stdin, &mut reader, "1", "Hall A", 4);
    let error = request_err(
        &mut stdin,
        &mut reader,
        "2",
        "halls.update",
        json!({ "hallId": hall_id, "patch": { "allocated": 5 } }),
    );
    assert_eq!(
        error.get("code").and_then(|v| v.as_str()),
        Some("capacity_exceeded")
    );
    assert_eq!(
        error
            .get("details")
            .and_then(|d| d.get("capacity"))
            .and_then(|v| v.as_u64()),
        Some(4)
    );
}

#[test]
fn override_rejects_count_beyond_roster() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    add_student(&mut stdin, &mut reader, "1", "A1", "CSBS");
    add_student(&mut stdin, &mut reader, "2", "A2", "CSBS");
    let exam_id = add_exam(
        &mut stdin,
        &mut reader,
        "3",
        "DS",
        "CSBS",
        "2024-12-15",
        "10:00",
    );
    let hall_id = add_hall(&mut stdin, &mut reader, "4", "Hall A", 10);
    request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "halls.autoAllocate",
        json!({ "examId": exam_id }),
    );

    let error = request_err(
        &mut stdin,
        &mut reader,
        "6",
        "halls.update",
        json!({ "hallId": hall_id, "patch": { "allocated": 5 } }),
    );
    assert_eq!(
        error.get("code").and_then(|v| v.as_str()),
        Some("roster_mismatch")
    );
}

#[test]
fn override_shrink_keeps_roster_in_sync() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    add_student(&mut stdin, &mut reader, "1", "A1", "CSBS");
    add_student(&mut stdin, &mut reader, "2", "A2", "CSBS");
    let exam_id = add_exam(
        &mut stdin,
        &mut reader,
        "3",
        "DS",
        "CSBS",
        "2024-12-15",
        "10:00",
    );
    let hall_id = add_hall(&mut stdin, &mut reader, "4", "Hall A", 10);
    request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "halls.autoAllocate",
        json!({ "examId": exam_id }),
    );

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "halls.update",
        json!({ "hallId": hall_id, "patch": { "allocated": 1 } }),
    );
    let hall = result.get("hall").expect("hall");
    assert_eq!(hall.get("allocated").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(hall.get("students"), Some(&json!(["A1"])));
}

#[test]
fn override_missing_hall_is_not_found() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let error = request_err(
        &mut stdin,
        &mut reader,
        "1",
        "halls.update",
        json!({ "hallId": "nonexistent", "patch": { "allocated": 0 } }),
    );
    assert_eq!(
        error.get("code").and_then(|v| v.as_str()),
        Some("not_found")
    );
}

#[test]
fn release_unbinds_the_hall() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    add_student(&mut stdin, &mut reader, "1", "A1", "CSBS");
    let exam_id = add_exam(
        &mut stdin,
        &mut reader,
        "2",
        "DS",
        "CSBS",
        "2024-12-15",
        "10:00",
    );
    let hall_id = add_hall(&mut stdin, &mut reader, "3", "Hall A", 10);
    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "halls.autoAllocate",
        json!({ "examId": exam_id }),
    );

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "halls.release",
        json!({ "hallId": hall_id }),
    );
    let hall = result.get("hall").expect("hall");
    assert_eq!(hall.get("exam").and_then(|v| v.as_str()), Some(""));
    assert_eq!(hall.get("allocated").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(hall.get("students"), Some(&json!([])));
}
