mod test_support;

use serde_json::json;
use test_support::{request_ok, spawn_sidecar};

fn add_result(
    stdin: &mut std::process::ChildStdin,
    reader: &mut std::io::BufReader<std::process::ChildStdout>,
    id: &str,
    student_id: &str,
    subject_code: &str,
    exam_type: &str,
    obtained: f64,
    max: f64,
) -> serde_json::Value {
    request_ok(
        stdin,
        reader,
        id,
        "results.add",
        json!({
            "studentId": student_id,
            "studentName": format!("Student {}", student_id),
            "studentRollNo": format!("CS2021{}", student_id),
            "subjectCode": subject_code,
            "subjectName": subject_code,
            "examType": exam_type,
            "obtainedMarks": obtained,
            "maxMarks": max,
            "year": 2
        }),
    )
}

#[test]
fn grade_and_pass_flag_are_derived_server_side() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let added = add_result(&mut stdin, &mut reader, "1", "s1", "CS201", "CAT-1", 45.0, 50.0);
    let record = added.get("result").expect("result");
    assert_eq!(record.get("grade").and_then(|v| v.as_str()), Some("O"));
    assert_eq!(record.get("isPass").and_then(|v| v.as_bool()), Some(true));

    let failed = add_result(&mut stdin, &mut reader, "2", "s2", "CS201", "CAT-1", 10.0, 50.0);
    let record = failed.get("result").expect("result");
    assert_eq!(record.get("grade").and_then(|v| v.as_str()), Some("F"));
    assert_eq!(record.get("isPass").and_then(|v| v.as_bool()), Some(false));
}

#[test]
fn analyze_reports_overall_and_groupings() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    add_result(&mut stdin, &mut reader, "1", "s1", "CS201", "CAT-1", 45.0, 50.0);
    add_result(&mut stdin, &mut reader, "2", "s2", "CS201", "CAT-1", 42.0, 50.0);
    add_result(&mut stdin, &mut reader, "3", "s1", "CS102", "Semester", 10.0, 100.0);

    let analyzed = request_ok(&mut stdin, &mut reader, "4", "results.analyze", json!({}));
    let analysis = analyzed.get("analysis").expect("analysis");

    let overall = analysis.get("overall").expect("overall");
    assert_eq!(overall.get("total").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(overall.get("average").and_then(|v| v.as_f64()), Some(32.33));
    assert_eq!(
        overall.get("passPercent").and_then(|v| v.as_f64()),
        Some(66.67)
    );
    assert_eq!(overall.get("highest").and_then(|v| v.as_f64()), Some(45.0));
    assert_eq!(overall.get("lowest").and_then(|v| v.as_f64()), Some(10.0));

    let by_subject = analysis
        .get("bySubject")
        .and_then(|v| v.as_array())
        .expect("bySubject");
    assert_eq!(by_subject.len(), 2);
    assert_eq!(
        by_subject[0].get("subjectCode").and_then(|v| v.as_str()),
        Some("CS201")
    );
    assert_eq!(
        by_subject[0].get("avg").and_then(|v| v.as_f64()),
        Some(43.5)
    );

    let by_student = analysis
        .get("byStudent")
        .and_then(|v| v.as_array())
        .expect("byStudent");
    assert_eq!(
        by_student[0].get("studentId").and_then(|v| v.as_str()),
        Some("s2")
    );

    let by_type = analysis
        .get("byType")
        .and_then(|v| v.as_array())
        .expect("byType");
    assert_eq!(by_type.len(), 4);
    assert_eq!(
        by_type[0].get("period").and_then(|v| v.as_str()),
        Some("CAT-1")
    );
    assert_eq!(by_type[0].get("avg").and_then(|v| v.as_f64()), Some(43.5));
}

#[test]
fn analyze_honors_filters() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    add_result(&mut stdin, &mut reader, "1", "s1", "CS201", "CAT-1", 45.0, 50.0);
    add_result(&mut stdin, &mut reader, "2", "s2", "CS102", "Semester", 80.0, 100.0);

    let analyzed = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "results.analyze",
        json!({ "studentId": "s1" }),
    );
    let overall = analyzed
        .get("analysis")
        .and_then(|a| a.get("overall"))
        .expect("overall");
    assert_eq!(overall.get("total").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(overall.get("average").and_then(|v| v.as_f64()), Some(45.0));
}

#[test]
fn import_applies_mark_sheet_defaults() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let imported = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "results.import",
        json!({
            "rows": [
                { "studentId": "s1", "name": "Arun", "rollNo": "CS2021001", "code": "CS201", "subject": "DBMS", "type": "CAT-1", "marks": "78" },
                { "studentId": "s2", "marks": "not-a-number" }
            ]
        }),
    );
    assert_eq!(imported.get("created").and_then(|v| v.as_u64()), Some(2));

    let listed = request_ok(&mut stdin, &mut reader, "2", "results.list", json!({}));
    let results = listed
        .get("results")
        .and_then(|v| v.as_array())
        .expect("results");

    let first = &results[0];
    assert_eq!(
        first.get("obtainedMarks").and_then(|v| v.as_f64()),
        Some(78.0)
    );
    assert_eq!(first.get("maxMarks").and_then(|v| v.as_f64()), Some(100.0));
    assert_eq!(first.get("grade").and_then(|v| v.as_str()), Some("A"));
    assert_eq!(first.get("isPass").and_then(|v| v.as_bool()), Some(true));

    let second = &results[1];
    assert_eq!(
        second.get("obtainedMarks").and_then(|v| v.as_f64()),
        Some(0.0)
    );
    assert_eq!(
        second.get("examType").and_then(|v| v.as_str()),
        Some("Terminal")
    );
    assert_eq!(second.get("name").and_then(|v| v.as_str()), None);
    assert_eq!(
        second.get("studentName").and_then(|v| v.as_str()),
        Some("Unknown")
    );
    assert_eq!(second.get("isPass").and_then(|v| v.as_bool()), Some(false));
}
