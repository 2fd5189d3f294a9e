use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamCategory {
    #[serde(rename = "CAT-1")]
    Cat1,
    #[serde(rename = "CAT-2")]
    Cat2,
    Semester,
    Lab,
}

impl ExamCategory {
    pub const ALL: [ExamCategory; 4] = [
        ExamCategory::Cat1,
        ExamCategory::Cat2,
        ExamCategory::Semester,
        ExamCategory::Lab,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExamCategory::Cat1 => "CAT-1",
            ExamCategory::Cat2 => "CAT-2",
            ExamCategory::Semester => "Semester",
            ExamCategory::Lab => "Lab",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamStatus {
    Scheduled,
    Ongoing,
    Completed,
}

impl ExamStatus {
    /// Lifecycle position. Transitions may never decrease.
    fn rank(self) -> u8 {
        match self {
            ExamStatus::Scheduled => 0,
            ExamStatus::Ongoing => 1,
            ExamStatus::Completed => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExamStatus::Scheduled => "Scheduled",
            ExamStatus::Ongoing => "Ongoing",
            ExamStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Student,
    Faculty,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyRole {
    Invigilator,
    Reliever,
    #[serde(rename = "Hall Superintendent")]
    HallSuperintendent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub roll_no: String,
    pub department: String,
    pub year: i64,
    pub status: PersonStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub roll_no: String,
    pub department: String,
    pub year: i64,
    pub status: PersonStatus,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub roll_no: Option<String>,
    pub department: Option<String>,
    pub year: Option<i64>,
    pub status: Option<PersonStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub email: String,
    pub emp_id: String,
    pub department: String,
    pub subjects: Vec<String>,
    pub status: PersonStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFaculty {
    pub name: String,
    pub email: String,
    pub emp_id: String,
    pub department: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub status: PersonStatus,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacultyPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub emp_id: Option<String>,
    pub department: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub status: Option<PersonStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub subject: String,
    pub code: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    #[serde(rename = "type")]
    pub category: ExamCategory,
    pub status: ExamStatus,
    pub department: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExam {
    pub subject: String,
    pub code: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    #[serde(rename = "type")]
    pub category: ExamCategory,
    pub status: ExamStatus,
    pub department: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExamPatch {
    pub subject: Option<String>,
    pub code: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<ExamCategory>,
    pub status: Option<ExamStatus>,
    pub department: Option<String>,
}

/// A hall is bound to at most one exam at a time, identified by subject
/// name. Invariants after every mutation: `allocated == students.len()`
/// and `allocated <= capacity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub allocated: u32,
    pub exam: String,
    pub invigilators: Vec<String>,
    pub students: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_roll_no: String,
    pub subject_code: String,
    pub subject_name: String,
    pub exam_type: String,
    pub obtained_marks: f64,
    pub max_marks: f64,
    pub is_pass: bool,
    pub year: i64,
    pub grade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_roll_no: String,
    pub subject_code: String,
    pub date: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NoticeKind,
    pub date: String,
    pub read: bool,
    pub for_roles: Vec<Audience>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circular {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: String,
    pub created_by: String,
    pub is_approved: bool,
    pub show_to_students: bool,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CircularPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub date: Option<String>,
    pub created_by: Option<String>,
    pub is_approved: Option<bool>,
    pub show_to_students: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Syllabus {
    pub id: String,
    pub subject_code: String,
    pub subject_name: String,
    pub year: i64,
    pub semester: i64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvigilationDuty {
    pub id: String,
    pub faculty_id: String,
    pub faculty_name: String,
    pub exam_id: String,
    pub exam_name: String,
    pub hall_name: String,
    pub role: DutyRole,
}

/// Serializable snapshot of every collection, used by session bundles.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionDataset {
    pub students: Vec<Student>,
    pub faculty: Vec<Faculty>,
    pub exams: Vec<Exam>,
    pub halls: Vec<Hall>,
    pub results: Vec<ExamResult>,
    pub attendance: Vec<AttendanceRecord>,
    pub notifications: Vec<Notification>,
    pub circulars: Vec<Circular>,
    pub syllabi: Vec<Syllabus>,
    pub invigilation: Vec<InvigilationDuty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(&'static str),
    BadTransition {
        from: ExamStatus,
        to: ExamStatus,
    },
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not_found",
            StoreError::BadTransition { .. } => "bad_transition",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(what) => write!(f, "{} not found", what),
            StoreError::BadTransition { from, to } => write!(
                f,
                "exam status cannot move backwards ({} -> {})",
                from.label(),
                to.label()
            ),
        }
    }
}

/// Canonical mutable collections for the active session. Owns identity
/// generation; all mutation goes through these methods. Single-threaded by
/// construction: every operation runs to completion before returning.
#[derive(Debug, Default)]
pub struct SessionStore {
    students: Vec<Student>,
    faculty: Vec<Faculty>,
    exams: Vec<Exam>,
    halls: Vec<Hall>,
    results: Vec<ExamResult>,
    attendance: Vec<AttendanceRecord>,
    notifications: Vec<Notification>,
    circulars: Vec<Circular>,
    syllabi: Vec<Syllabus>,
    invigilation: Vec<InvigilationDuty>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- students ----

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn add_student(&mut self, new: NewStudent) -> Student {
        let student = Student {
            id: new_id(),
            name: new.name,
            email: new.email,
            roll_no: new.roll_no,
            department: new.department,
            year: new.year,
            status: new.status,
        };
        self.students.push(student.clone());
        student
    }

    pub fn update_student(&mut self, id: &str, patch: StudentPatch) -> Result<&Student, StoreError> {
        let s = self
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound("student"))?;
        if let Some(v) = patch.name {
            s.name = v;
        }
        if let Some(v) = patch.email {
            s.email = v;
        }
        if let Some(v) = patch.roll_no {
            s.roll_no = v;
        }
        if let Some(v) = patch.department {
            s.department = v;
        }
        if let Some(v) = patch.year {
            s.year = v;
        }
        if let Some(v) = patch.status {
            s.status = v;
        }
        Ok(s)
    }

    /// Removes the student record only. Halls that reference the roll
    /// number keep their roster entry (documented dangling-reference
    /// limitation).
    pub fn delete_student(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        if self.students.len() == before {
            return Err(StoreError::NotFound("student"));
        }
        Ok(())
    }

    // ---- faculty ----

    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    pub fn faculty_member(&self, id: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.id == id)
    }

    pub fn add_faculty(&mut self, new: NewFaculty) -> Faculty {
        let member = Faculty {
            id: new_id(),
            name: new.name,
            email: new.email,
            emp_id: new.emp_id,
            department: new.department,
            subjects: new.subjects,
            status: new.status,
        };
        self.faculty.push(member.clone());
        member
    }

    pub fn update_faculty(&mut self, id: &str, patch: FacultyPatch) -> Result<&Faculty, StoreError> {
        let m = self
            .faculty
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound("faculty"))?;
        if let Some(v) = patch.name {
            m.name = v;
        }
        if let Some(v) = patch.email {
            m.email = v;
        }
        if let Some(v) = patch.emp_id {
            m.emp_id = v;
        }
        if let Some(v) = patch.department {
            m.department = v;
        }
        if let Some(v) = patch.subjects {
            m.subjects = v;
        }
        if let Some(v) = patch.status {
            m.status = v;
        }
        Ok(m)
    }

    pub fn delete_faculty(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.faculty.len();
        self.faculty.retain(|f| f.id != id);
        if self.faculty.len() == before {
            return Err(StoreError::NotFound("faculty"));
        }
        Ok(())
    }

    // ---- exams ----

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    pub fn exam(&self, id: &str) -> Option<&Exam> {
        self.exams.iter().find(|e| e.id == id)
    }

    pub fn add_exam(&mut self, new: NewExam) -> Exam {
        let exam = Exam {
            id: new_id(),
            subject: new.subject,
            code: new.code,
            date: new.date,
            time: new.time,
            venue: new.venue,
            category: new.category,
            status: new.status,
            department: new.department,
        };
        self.exams.push(exam.clone());
        exam
    }

    /// Merges the patch. Status changes are checked against the lifecycle:
    /// Scheduled -> Ongoing -> Completed, forward-only (re-asserting the
    /// current status is allowed).
    pub fn update_exam(&mut self, id: &str, patch: ExamPatch) -> Result<&Exam, StoreError> {
        let e = self
            .exams
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound("exam"))?;
        if let Some(to) = patch.status {
            if to.rank() < e.status.rank() {
                return Err(StoreError::BadTransition {
                    from: e.status,
                    to,
                });
            }
            e.status = to;
        }
        if let Some(v) = patch.subject {
            e.subject = v;
        }
        if let Some(v) = patch.code {
            e.code = v;
        }
        if let Some(v) = patch.date {
            e.date = v;
        }
        if let Some(v) = patch.time {
            e.time = v;
        }
        if let Some(v) = patch.venue {
            e.venue = v;
        }
        if let Some(v) = patch.category {
            e.category = v;
        }
        if let Some(v) = patch.department {
            e.department = v;
        }
        Ok(e)
    }

    pub fn delete_exam(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.exams.len();
        self.exams.retain(|e| e.id != id);
        if self.exams.len() == before {
            return Err(StoreError::NotFound("exam"));
        }
        Ok(())
    }

    // ---- halls ----

    pub fn halls(&self) -> &[Hall] {
        &self.halls
    }

    pub fn hall(&self, id: &str) -> Option<&Hall> {
        self.halls.iter().find(|h| h.id == id)
    }

    pub(crate) fn hall_mut(&mut self, id: &str) -> Option<&mut Hall> {
        self.halls.iter_mut().find(|h| h.id == id)
    }

    pub fn add_hall(&mut self, name: String, capacity: u32) -> Hall {
        let hall = Hall {
            id: new_id(),
            name,
            capacity,
            allocated: 0,
            exam: String::new(),
            invigilators: Vec::new(),
            students: Vec::new(),
        };
        self.halls.push(hall.clone());
        hall
    }

    pub fn delete_hall(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.halls.len();
        self.halls.retain(|h| h.id != id);
        if self.halls.len() == before {
            return Err(StoreError::NotFound("hall"));
        }
        Ok(())
    }

    /// Binds an exam and roster to one hall. The caller (allocation
    /// engine) has already checked capacity; both hall invariants hold on
    /// return.
    pub(crate) fn bind_hall(
        &mut self,
        id: &str,
        subject: &str,
        rolls: Vec<String>,
    ) -> Result<&Hall, StoreError> {
        let h = self
            .halls
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StoreError::NotFound("hall"))?;
        h.exam = subject.to_string();
        h.allocated = rolls.len() as u32;
        h.students = rolls;
        Ok(h)
    }

    // ---- results ----

    pub fn results(&self) -> &[ExamResult] {
        &self.results
    }

    pub fn add_result(&mut self, mut result: ExamResult) -> ExamResult {
        result.id = new_id();
        self.results.push(result.clone());
        result
    }

    // ---- attendance ----

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn add_attendance(&mut self, mut record: AttendanceRecord) -> AttendanceRecord {
        record.id = new_id();
        self.attendance.push(record.clone());
        record
    }

    // ---- notifications ----

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Newest first, matching the reference feed.
    pub fn add_notification(&mut self, mut notification: Notification) -> Notification {
        notification.id = new_id();
        self.notifications.insert(0, notification.clone());
        notification
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<&Notification, StoreError> {
        let n = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound("notification"))?;
        n.read = true;
        Ok(n)
    }

    // ---- circulars ----

    pub fn circulars(&self) -> &[Circular] {
        &self.circulars
    }

    pub fn add_circular(&mut self, mut circular: Circular) -> Circular {
        circular.id = new_id();
        self.circulars.push(circular.clone());
        circular
    }

    pub fn update_circular(&mut self, id: &str, patch: CircularPatch) -> Result<&Circular, StoreError> {
        let c = self
            .circulars
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound("circular"))?;
        if let Some(v) = patch.title {
            c.title = v;
        }
        if let Some(v) = patch.body {
            c.body = v;
        }
        if let Some(v) = patch.date {
            c.date = v;
        }
        if let Some(v) = patch.created_by {
            c.created_by = v;
        }
        if let Some(v) = patch.is_approved {
            c.is_approved = v;
        }
        if let Some(v) = patch.show_to_students {
            c.show_to_students = v;
        }
        Ok(c)
    }

    pub fn delete_circular(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.circulars.len();
        self.circulars.retain(|c| c.id != id);
        if self.circulars.len() == before {
            return Err(StoreError::NotFound("circular"));
        }
        Ok(())
    }

    // ---- syllabi ----

    pub fn syllabi(&self) -> &[Syllabus] {
        &self.syllabi
    }

    pub fn add_syllabus(&mut self, mut syllabus: Syllabus) -> Syllabus {
        syllabus.id = new_id();
        self.syllabi.push(syllabus.clone());
        syllabus
    }

    // ---- invigilation ----

    pub fn invigilation(&self) -> &[InvigilationDuty] {
        &self.invigilation
    }

    pub fn add_invigilation(&mut self, mut duty: InvigilationDuty) -> InvigilationDuty {
        duty.id = new_id();
        self.invigilation.push(duty.clone());
        duty
    }

    // ---- session snapshot ----

    pub fn snapshot(&self) -> SessionDataset {
        SessionDataset {
            students: self.students.clone(),
            faculty: self.faculty.clone(),
            exams: self.exams.clone(),
            halls: self.halls.clone(),
            results: self.results.clone(),
            attendance: self.attendance.clone(),
            notifications: self.notifications.clone(),
            circulars: self.circulars.clone(),
            syllabi: self.syllabi.clone(),
            invigilation: self.invigilation.clone(),
        }
    }

    /// Replaces every collection with the dataset's contents.
    pub fn restore(&mut self, dataset: SessionDataset) {
        self.students = dataset.students;
        self.faculty = dataset.faculty;
        self.exams = dataset.exams;
        self.halls = dataset.halls;
        self.results = dataset.results;
        self.attendance = dataset.attendance;
        self.notifications = dataset.notifications;
        self.circulars = dataset.circulars;
        self.syllabi = dataset.syllabi;
        self.invigilation = dataset.invigilation;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn counts(&self) -> SessionCounts {
        SessionCounts {
            students: self.students.len(),
            faculty: self.faculty.len(),
            exams: self.exams.len(),
            halls: self.halls.len(),
            results: self.results.len(),
            attendance: self.attendance.len(),
            notifications: self.notifications.len(),
            circulars: self.circulars.len(),
            syllabi: self.syllabi.len(),
            invigilation: self.invigilation.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCounts {
    pub students: usize,
    pub faculty: usize,
    pub exams: usize,
    pub halls: usize,
    pub results: usize,
    pub attendance: usize,
    pub notifications: usize,
    pub circulars: usize,
    pub syllabi: usize,
    pub invigilation: usize,
}
