//! Timetable artifact, conflicts, and repair suggestions.
//!
//! A `Timetable` is the finished product of a synthesis run: the best
//! candidate's assignments joined with full course/teacher/room records,
//! plus every residual conflict and the suggestions proposed for them.
//! Residual conflicts are reported, never hidden — an exhausted search
//! budget yields a degraded timetable, not an error.

use serde::{Deserialize, Serialize};

use super::course::{Course, Teacher};
use super::room::Room;
use super::slot::Slot;

/// A detected violation within a candidate schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// Conflict classification.
    pub kind: ConflictKind,
    /// Offending course ids, first-gene-of-the-pair first.
    pub course_ids: Vec<String>,
    /// Human-readable description.
    pub message: String,
    /// Informational severity; the fitness penalty this conflict carried.
    pub severity: f64,
}

/// Classification of schedule conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// A teacher is double-booked within the candidate schedule.
    TeacherConflict,
    /// A room is double-booked within the candidate schedule.
    RoomConflict,
    /// A candidate entry collides with an already-committed entry.
    ExistingConflict,
    /// A teacher's weekly workload exceeds their maximum.
    WorkloadExceeded,
    /// A course's enrollment exceeds its assigned room's capacity.
    CapacityExceeded,
}

impl Conflict {
    /// Creates a teacher double-booking conflict.
    pub fn teacher_conflict(teacher_id: &str, course_a: &str, course_b: &str) -> Self {
        Self {
            kind: ConflictKind::TeacherConflict,
            course_ids: vec![course_a.to_string(), course_b.to_string()],
            message: format!("teacher '{teacher_id}' double-booked for '{course_a}' and '{course_b}'"),
            severity: 0.3,
        }
    }

    /// Creates a room double-booking conflict.
    pub fn room_conflict(room_id: &str, course_a: &str, course_b: &str) -> Self {
        Self {
            kind: ConflictKind::RoomConflict,
            course_ids: vec![course_a.to_string(), course_b.to_string()],
            message: format!("room '{room_id}' double-booked for '{course_a}' and '{course_b}'"),
            severity: 0.4,
        }
    }

    /// Creates a collision with a committed schedule entry.
    pub fn existing_conflict(teacher_id: &str, course_id: &str, committed_course: &str) -> Self {
        Self {
            kind: ConflictKind::ExistingConflict,
            course_ids: vec![course_id.to_string()],
            message: format!(
                "teacher '{teacher_id}' busy with committed '{committed_course}' during '{course_id}'"
            ),
            severity: 0.2,
        }
    }

    /// Creates a workload-overage conflict for a teacher.
    pub fn workload_exceeded(teacher_id: &str, course_ids: Vec<String>, overage_hours: f64) -> Self {
        Self {
            kind: ConflictKind::WorkloadExceeded,
            course_ids,
            message: format!(
                "teacher '{teacher_id}' exceeds weekly workload by {overage_hours:.1} hours"
            ),
            severity: 0.1 * overage_hours,
        }
    }

    /// Creates an over-capacity conflict for a course/room pairing.
    pub fn capacity_exceeded(course_id: &str, room_id: &str) -> Self {
        Self {
            kind: ConflictKind::CapacityExceeded,
            course_ids: vec![course_id.to_string()],
            message: format!("room '{room_id}' too small for course '{course_id}'"),
            severity: 0.1,
        }
    }
}

/// A proposed fix for a residual conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// What change is proposed.
    pub kind: SuggestionKind,
    /// The course the change applies to.
    pub course_id: String,
    /// Why the change is proposed.
    pub reason: String,
}

/// The proposed change, one tagged variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionKind {
    /// Move the course to a different room.
    RoomChange {
        /// Proposed replacement room.
        room_id: String,
    },
    /// Move the course to a different slot.
    TimeChange {
        /// Up to three alternative slots, in catalog scan order.
        alternatives: Vec<Slot>,
    },
}

impl Suggestion {
    /// Creates a room-change suggestion.
    pub fn room_change(
        course_id: impl Into<String>,
        room_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: SuggestionKind::RoomChange {
                room_id: room_id.into(),
            },
            course_id: course_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a time-change suggestion.
    pub fn time_change(
        course_id: impl Into<String>,
        alternatives: Vec<Slot>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: SuggestionKind::TimeChange { alternatives },
            course_id: course_id.into(),
            reason: reason.into(),
        }
    }
}

/// One placed course on the finished timetable.
///
/// Denormalized join of the assignment with its full records, so the
/// caller never has to re-query the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSlot {
    /// The placed course.
    pub course: Course,
    /// The delivering teacher.
    pub teacher: Teacher,
    /// The assigned room.
    pub room: Room,
    /// The assigned weekly slot.
    pub slot: Slot,
}

/// The finished timetable artifact for one synthesis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    /// Requested semester.
    pub semester: i32,
    /// Requested academic year, e.g. `"2026/2027"`.
    pub academic_year: String,
    /// Placed courses with joined detail records.
    pub slots: Vec<ScheduledSlot>,
    /// Residual conflicts of the best candidate.
    pub conflicts: Vec<Conflict>,
    /// Proposed fixes for the residual conflicts.
    pub suggestions: Vec<Suggestion>,
    /// Fitness of the best candidate, in `[0, 1]`.
    pub fitness: f64,
}

impl Timetable {
    /// Whether the schedule has no residual conflicts.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// All placements for a given teacher.
    pub fn slots_for_teacher(&self, teacher_id: &str) -> Vec<&ScheduledSlot> {
        self.slots
            .iter()
            .filter(|s| s.teacher.id == teacher_id)
            .collect()
    }

    /// All placements in a given room.
    pub fn slots_for_room(&self, room_id: &str) -> Vec<&ScheduledSlot> {
        self.slots.iter().filter(|s| s.room.id == room_id).collect()
    }
}
