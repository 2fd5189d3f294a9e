use crate::store::{Exam, Hall, SessionStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    ExamNotFound,
    HallNotFound,
    NoHallAvailable,
    CapacityExceeded { capacity: u32, requested: u32 },
    RosterMismatch { requested: u32, roster: u32 },
}

impl AllocError {
    pub fn code(&self) -> &'static str {
        match self {
            AllocError::ExamNotFound | AllocError::HallNotFound => "not_found",
            AllocError::NoHallAvailable => "no_hall_available",
            AllocError::CapacityExceeded { .. } => "capacity_exceeded",
            AllocError::RosterMismatch { .. } => "roster_mismatch",
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::ExamNotFound => write!(f, "exam not found"),
            AllocError::HallNotFound => write!(f, "hall not found"),
            AllocError::NoHallAvailable => write!(f, "no hall available for allocation"),
            AllocError::CapacityExceeded {
                capacity,
                requested,
            } => write!(
                f,
                "allocated count {} exceeds hall capacity {}",
                requested, capacity
            ),
            AllocError::RosterMismatch { requested, roster } => write!(
                f,
                "allocated count {} exceeds roster length {}",
                requested, roster
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOutcome {
    pub hall_id: String,
    pub hall_name: String,
    pub exam_subject: String,
    pub seated: Vec<String>,
    pub unseated: Vec<String>,
}

/// Manual override patch. `allocated` may only shrink the roster; growing
/// it past the roster length is rejected, the engine cannot invent
/// students.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HallOverride {
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub invigilators: Option<Vec<String>>,
    pub allocated: Option<u32>,
}

/// Selects the students eligible for `exam_id` and binds them to the
/// best-fitting hall.
///
/// Eligibility is department equality, in stable store order, minus roll
/// numbers already committed to another hall whose exam occupies the same
/// date+time window. Hall choice: the smallest hall (unbound, or already
/// bound to this exam) that seats every eligible student; if none fits
/// them all, the largest such hall, with the selection capped to its
/// capacity and the remainder reported as unseated. Re-running with
/// unchanged inputs rebinds the same hall with the same roster.
pub fn auto_allocate(
    store: &mut SessionStore,
    exam_id: &str,
) -> Result<AllocationOutcome, AllocError> {
    let exam = store.exam(exam_id).cloned().ok_or(AllocError::ExamNotFound)?;
    let committed = committed_rolls(store, &exam);

    let eligible: Vec<String> = store
        .students()
        .iter()
        .filter(|s| s.department == exam.department)
        .map(|s| s.roll_no.clone())
        .filter(|roll| !committed.contains(roll))
        .collect();

    let (hall_id, hall_name, capacity) = {
        let hall = pick_hall(store.halls(), &exam.subject, eligible.len())?;
        (hall.id.clone(), hall.name.clone(), hall.capacity as usize)
    };

    let seat_count = eligible.len().min(capacity);
    let mut seated = eligible;
    let unseated = seated.split_off(seat_count);

    store
        .bind_hall(&hall_id, &exam.subject, seated.clone())
        .map_err(|_| AllocError::HallNotFound)?;

    Ok(AllocationOutcome {
        hall_id,
        hall_name,
        exam_subject: exam.subject,
        seated,
        unseated,
    })
}

/// Roll numbers already seated for an exam in the same date+time window.
/// Halls bound to the target exam's own subject are skipped: re-running
/// the allocation overwrites them.
fn committed_rolls(store: &SessionStore, exam: &Exam) -> HashSet<String> {
    let mut rolls = HashSet::new();
    for hall in store.halls() {
        if hall.exam.is_empty() || hall.exam == exam.subject {
            continue;
        }
        let clashes = store
            .exams()
            .iter()
            .any(|e| e.subject == hall.exam && e.date == exam.date && e.time == exam.time);
        if clashes {
            for roll in &hall.students {
                rolls.insert(roll.clone());
            }
        }
    }
    rolls
}

fn pick_hall<'a>(
    halls: &'a [Hall],
    subject: &str,
    needed: usize,
) -> Result<&'a Hall, AllocError> {
    let mut candidates: Vec<&Hall> = halls
        .iter()
        .filter(|h| h.exam.is_empty() || h.exam == subject)
        .collect();
    candidates.sort_by_key(|h| h.capacity);
    candidates
        .iter()
        .find(|h| h.capacity as usize >= needed)
        .or(candidates.last())
        .copied()
        .ok_or(AllocError::NoHallAvailable)
}

/// Operator override of one hall's fields. All validation lives here, not
/// in the caller: `allocated` is checked against capacity and roster
/// length, and shrinking truncates the roster so the hall invariants hold
/// on return.
pub fn manual_update(
    store: &mut SessionStore,
    hall_id: &str,
    patch: HallOverride,
) -> Result<Hall, AllocError> {
    let hall = store.hall_mut(hall_id).ok_or(AllocError::HallNotFound)?;

    let capacity = patch.capacity.unwrap_or(hall.capacity);
    let target = patch.allocated.unwrap_or(hall.allocated);
    if target > capacity {
        return Err(AllocError::CapacityExceeded {
            capacity,
            requested: target,
        });
    }
    let roster = hall.students.len() as u32;
    if target > roster {
        return Err(AllocError::RosterMismatch {
            requested: target,
            roster,
        });
    }

    hall.capacity = capacity;
    hall.students.truncate(target as usize);
    hall.allocated = target;
    if let Some(name) = patch.name {
        hall.name = name;
    }
    if let Some(invigilators) = patch.invigilators {
        hall.invigilators = invigilators;
    }
    Ok(hall.clone())
}

/// Unbinds a hall: clears the exam and roster, keeps the invigilator
/// list.
pub fn release(store: &mut SessionStore, hall_id: &str) -> Result<Hall, AllocError> {
    let hall = store.hall_mut(hall_id).ok_or(AllocError::HallNotFound)?;
    hall.exam.clear();
    hall.students.clear();
    hall.allocated = 0;
    Ok(hall.clone())
}
