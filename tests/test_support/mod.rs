#![allow(dead_code)]

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

pub fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_examd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn examd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

pub fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

pub fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

/// Sends a request expected to fail and returns its error object.
pub fn request_err(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(false),
        "{} unexpectedly succeeded: {}",
        method,
        value
    );
    value.get("error").cloned().unwrap_or_else(|| json!({}))
}

pub fn add_student(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    roll_no: &str,
    department: &str,
) -> String {
    let result = request_ok(
        stdin,
        reader,
        id,
        "students.create",
        json!({
            "name": format!("Student {}", roll_no),
            "email": format!("{}@student.edu", roll_no.to_lowercase()),
            "rollNo": roll_no,
            "department": department,
            "year": 3,
            "status": "Active"
        }),
    );
    result
        .get("student")
        .and_then(|s| s.get("id"))
        .and_then(|v| v.as_str())
        .expect("student id")
        .to_string()
}

pub fn add_exam(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    subject: &str,
    department: &str,
    date: &str,
    time: &str,
) -> String {
    let result = request_ok(
        stdin,
        reader,
        id,
        "exams.create",
        json!({
            "subject": subject,
            "code": "CS102",
            "date": date,
            "time": time,
            "venue": "Hall A",
            "type": "CAT-1",
            "status": "Scheduled",
            "department": department
        }),
    );
    result
        .get("exam")
        .and_then(|e| e.get("id"))
        .and_then(|v| v.as_str())
        .expect("exam id")
        .to_string()
}

pub fn add_hall(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    name: &str,
    capacity: u32,
) -> String {
    let result = request_ok(
        stdin,
        reader,
        id,
        "halls.create",
        json!({ "name": name, "capacity": capacity }),
    );
    result
        .get("hall")
        .and_then(|h| h.get("id"))
        .and_then(|v| v.as_str())
        .expect("hall id")
        .to_string()
}
