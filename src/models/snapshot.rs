//! Immutable input snapshot for one synthesis run.
//!
//! The snapshot is assembled once by the data-access collaborator before
//! the search starts and is read-only for the whole run, so it can be
//! shared across evaluation workers without locking. Nothing in it
//! persists beyond the run.

use serde::{Deserialize, Serialize};

use super::course::{Course, Student, Teacher};
use super::room::Room;
use super::slot::Slot;

/// A schedule entry already committed in a previous run.
///
/// New candidate schedules are penalized for colliding with these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingEntry {
    /// Committed course.
    pub course_id: String,
    /// Teacher delivering the committed entry.
    pub teacher_id: String,
    /// Room the committed entry occupies.
    pub room_id: String,
    /// Committed weekly slot.
    pub slot: Slot,
}

/// The immutable input to one synthesis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Enrolled students (validation/enrollment context).
    pub students: Vec<Student>,
    /// Available teachers.
    pub teachers: Vec<Teacher>,
    /// Courses to place.
    pub courses: Vec<Course>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Already-committed schedule entries for the term. May be empty.
    pub existing: Vec<ExistingEntry>,
}

impl ExistingEntry {
    /// Creates a committed entry.
    pub fn new(
        course_id: impl Into<String>,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
        slot: Slot,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
            slot,
        }
    }
}

impl Snapshot {
    /// Creates a snapshot from the four input collections.
    pub fn new(
        students: Vec<Student>,
        teachers: Vec<Teacher>,
        courses: Vec<Course>,
        rooms: Vec<Room>,
    ) -> Self {
        Self {
            students,
            teachers,
            courses,
            rooms,
            existing: Vec::new(),
        }
    }

    /// Sets the committed schedule entries.
    pub fn with_existing(mut self, existing: Vec<ExistingEntry>) -> Self {
        self.existing = existing;
        self
    }

    /// Finds a teacher by id.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Finds a course by id.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Finds a room by id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Narrows the snapshot to the requested id lists.
    ///
    /// A `None` list means "all records"; an empty list filters everything
    /// of that category out (and is then caught by validation). Rooms and
    /// committed entries are never filtered.
    pub fn scoped(
        &self,
        student_ids: Option<&[String]>,
        teacher_ids: Option<&[String]>,
        course_ids: Option<&[String]>,
    ) -> Snapshot {
        let keep = |wanted: Option<&[String]>, id: &str| match wanted {
            None => true,
            Some(ids) => ids.iter().any(|w| w == id),
        };
        Snapshot {
            students: self
                .students
                .iter()
                .filter(|s| keep(student_ids, &s.id))
                .cloned()
                .collect(),
            teachers: self
                .teachers
                .iter()
                .filter(|t| keep(teacher_ids, &t.id))
                .cloned()
                .collect(),
            courses: self
                .courses
                .iter()
                .filter(|c| keep(course_ids, &c.id))
                .cloned()
                .collect(),
            rooms: self.rooms.clone(),
            existing: self.existing.clone(),
        }
    }
}
