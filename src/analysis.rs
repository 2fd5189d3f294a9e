use crate::store::{AttendanceRecord, AttendanceStatus, ExamCategory, ExamResult};
use serde::{Deserialize, Serialize};

/// Pass threshold used throughout the portal: 40% of max marks.
pub fn is_pass(obtained: f64, max: f64) -> bool {
    max > 0.0 && obtained >= max * 0.4
}

pub fn grade_for_percent(percent: f64) -> &'static str {
    if percent >= 90.0 {
        "O"
    } else if percent >= 80.0 {
        "A+"
    } else if percent >= 70.0 {
        "A"
    } else if percent >= 60.0 {
        "B+"
    } else if percent >= 50.0 {
        "B"
    } else if percent >= 40.0 {
        "C"
    } else {
        "F"
    }
}

pub fn grade_for_marks(obtained: f64, max: f64) -> &'static str {
    if max <= 0.0 {
        return "F";
    }
    grade_for_percent(100.0 * obtained / max)
}

/// Two-decimal rounding used by every reported aggregate.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultFilters {
    pub student_id: Option<String>,
    pub year: Option<i64>,
    pub exam_type: Option<String>,
    pub subject_code: Option<String>,
}

pub fn filter_results<'a>(results: &'a [ExamResult], filters: &ResultFilters) -> Vec<&'a ExamResult> {
    results
        .iter()
        .filter(|r| {
            filters
                .student_id
                .as_ref()
                .map(|v| r.student_id == *v)
                .unwrap_or(true)
                && filters.year.map(|v| r.year == v).unwrap_or(true)
                && filters
                    .exam_type
                    .as_ref()
                    .map(|v| r.exam_type == *v)
                    .unwrap_or(true)
                && filters
                    .subject_code
                    .as_ref()
                    .map(|v| r.subject_code == *v)
                    .unwrap_or(true)
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total: usize,
    pub average: f64,
    pub pass_percent: f64,
    pub highest: f64,
    pub lowest: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStat {
    pub subject_code: String,
    pub subject_name: String,
    pub avg: f64,
    pub pass_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStat {
    pub student_id: String,
    pub name: String,
    pub roll_no: String,
    pub avg: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStat {
    pub period: String,
    pub avg: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultAnalysis {
    pub overall: OverallStats,
    pub by_subject: Vec<SubjectStat>,
    pub by_student: Vec<StudentStat>,
    pub by_type: Vec<TypeStat>,
}

/// Client-side aggregation from the reference portal, reproduced over the
/// filtered result set: overall totals, per-subject and per-student
/// averages (subjects in first-seen order, students by descending
/// average), and one average per exam category.
pub fn analyze(results: &[&ExamResult]) -> ResultAnalysis {
    let total = results.len();
    let overall = if total == 0 {
        OverallStats {
            total: 0,
            average: 0.0,
            pass_percent: 0.0,
            highest: 0.0,
            lowest: 0.0,
        }
    } else {
        let sum: f64 = results.iter().map(|r| r.obtained_marks).sum();
        let pass_count = results.iter().filter(|r| r.is_pass).count();
        let highest = results
            .iter()
            .map(|r| r.obtained_marks)
            .fold(f64::MIN, f64::max);
        let lowest = results
            .iter()
            .map(|r| r.obtained_marks)
            .fold(f64::MAX, f64::min);
        OverallStats {
            total,
            average: round2(sum / total as f64),
            pass_percent: round2(100.0 * pass_count as f64 / total as f64),
            highest,
            lowest,
        }
    };

    struct SubjectAcc {
        code: String,
        name: String,
        sum: f64,
        pass: usize,
        count: usize,
    }
    let mut subjects: Vec<SubjectAcc> = Vec::new();
    for r in results {
        match subjects.iter_mut().find(|s| s.code == r.subject_code) {
            Some(acc) => {
                acc.sum += r.obtained_marks;
                acc.count += 1;
                if r.is_pass {
                    acc.pass += 1;
                }
            }
            None => subjects.push(SubjectAcc {
                code: r.subject_code.clone(),
                name: r.subject_name.clone(),
                sum: r.obtained_marks,
                pass: usize::from(r.is_pass),
                count: 1,
            }),
        }
    }
    let by_subject = subjects
        .into_iter()
        .map(|s| SubjectStat {
            subject_code: s.code,
            subject_name: s.name,
            avg: round2(s.sum / s.count as f64),
            pass_percent: round2(100.0 * s.pass as f64 / s.count as f64),
        })
        .collect();

    struct StudentAcc {
        id: String,
        name: String,
        roll_no: String,
        sum: f64,
        count: usize,
    }
    let mut students: Vec<StudentAcc> = Vec::new();
    for r in results {
        match students.iter_mut().find(|s| s.id == r.student_id) {
            Some(acc) => {
                acc.sum += r.obtained_marks;
                acc.count += 1;
            }
            None => students.push(StudentAcc {
                id: r.student_id.clone(),
                name: r.student_name.clone(),
                roll_no: r.student_roll_no.clone(),
                sum: r.obtained_marks,
                count: 1,
            }),
        }
    }
    let mut by_student: Vec<StudentStat> = students
        .into_iter()
        .map(|s| StudentStat {
            student_id: s.id,
            name: s.name,
            roll_no: s.roll_no,
            avg: round2(s.sum / s.count as f64),
        })
        .collect();
    by_student.sort_by(|a, b| b.avg.partial_cmp(&a.avg).unwrap_or(std::cmp::Ordering::Equal));

    let by_type = ExamCategory::ALL
        .iter()
        .map(|cat| {
            let marks: Vec<f64> = results
                .iter()
                .filter(|r| r.exam_type == cat.label())
                .map(|r| r.obtained_marks)
                .collect();
            let avg = if marks.is_empty() {
                0.0
            } else {
                round2(marks.iter().sum::<f64>() / marks.len() as f64)
            };
            TypeStat {
                period: cat.label().to_string(),
                avg,
            }
        })
        .collect();

    ResultAnalysis {
        overall,
        by_subject,
        by_student,
        by_type,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSubjectRow {
    pub subject_code: String,
    pub present: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub rows: Vec<AttendanceSubjectRow>,
    pub overall_percent: f64,
}

/// Per-subject present/total counts for one student, subjects in
/// first-seen order.
pub fn attendance_summary(records: &[AttendanceRecord], student_id: &str) -> AttendanceSummary {
    struct Acc {
        code: String,
        present: usize,
        total: usize,
    }
    let mut accs: Vec<Acc> = Vec::new();
    for r in records.iter().filter(|r| r.student_id == student_id) {
        let idx = match accs.iter().position(|a| a.code == r.subject_code) {
            Some(i) => i,
            None => {
                accs.push(Acc {
                    code: r.subject_code.clone(),
                    present: 0,
                    total: 0,
                });
                accs.len() - 1
            }
        };
        let acc = &mut accs[idx];
        acc.total += 1;
        if r.status == AttendanceStatus::Present {
            acc.present += 1;
        }
    }

    let rows: Vec<AttendanceSubjectRow> = accs
        .into_iter()
        .map(|a| AttendanceSubjectRow {
            subject_code: a.code,
            percentage: round2(100.0 * a.present as f64 / a.total as f64),
            present: a.present,
            total: a.total,
        })
        .collect();
    let overall_percent = if rows.is_empty() {
        0.0
    } else {
        round2(rows.iter().map(|r| r.percentage).sum::<f64>() / rows.len() as f64)
    };
    AttendanceSummary {
        rows,
        overall_percent,
    }
}
