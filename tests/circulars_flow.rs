mod test_support;

use serde_json::json;
use test_support::{request_ok, spawn_sidecar};

#[test]
fn student_view_hides_unapproved_circulars() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "circulars.add",
        json!({
            "title": "CAT-1 Exam Instructions",
            "body": "Be present 15 minutes before the exam.",
            "isApproved": true,
            "showToStudents": true
        }),
    );
    let draft = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "circulars.add",
        json!({
            "title": "Draft revaluation schedule",
            "body": "Not yet announced."
        }),
    );
    let draft_id = draft
        .get("circular")
        .and_then(|c| c.get("id"))
        .and_then(|v| v.as_str())
        .expect("id")
        .to_string();

    let student_view = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "circulars.list",
        json!({ "studentView": true }),
    );
    let circulars = student_view
        .get("circulars")
        .and_then(|v| v.as_array())
        .expect("circulars");
    assert_eq!(circulars.len(), 1);
    assert_eq!(
        circulars[0].get("title").and_then(|v| v.as_str()),
        Some("CAT-1 Exam Instructions")
    );

    // Approving the draft makes it visible.
    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "circulars.update",
        json!({
            "circularId": draft_id,
            "patch": { "isApproved": true, "showToStudents": true }
        }),
    );
    let student_view = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "circulars.list",
        json!({ "studentView": true }),
    );
    assert_eq!(
        student_view
            .get("circulars")
            .and_then(|v| v.as_array())
            .map(|v| v.len()),
        Some(2)
    );
}

#[test]
fn delete_removes_the_circular() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let added = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "circulars.add",
        json!({ "title": "Obsolete", "body": "..." }),
    );
    let id = added
        .get("circular")
        .and_then(|c| c.get("id"))
        .and_then(|v| v.as_str())
        .expect("id")
        .to_string();

    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "circulars.delete",
        json!({ "circularId": id }),
    );
    let listed = request_ok(&mut stdin, &mut reader, "3", "circulars.list", json!({}));
    assert_eq!(
        listed
            .get("circulars")
            .and_then(|v| v.as_array())
            .map(|v| v.len()),
        Some(0)
    );
}
