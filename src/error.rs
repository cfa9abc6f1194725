//! Error types for timetable synthesis.
//!
//! Validation failures abort a run before any search work happens.
//! Cancellation is deliberately *not* an error: a cancelled run still
//! yields the best schedule evaluated so far.

use std::fmt;

use thiserror::Error;

/// Errors raised by the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// One of the four required input collections is empty.
    #[error("no {0} in snapshot; timetable synthesis needs at least one")]
    EmptyInput(InputCategory),

    /// A course references a teacher that is absent from the snapshot.
    ///
    /// The engine itself drops such courses with a warning; this variant
    /// exists for callers that pre-validate references strictly.
    #[error("course '{course_id}' references unknown teacher '{teacher_id}'")]
    UnresolvedReference {
        /// Course holding the dangling reference.
        course_id: String,
        /// The referenced, missing teacher.
        teacher_id: String,
    },

    /// A time-of-day string could not be parsed.
    #[error("invalid time of day '{0}': expected HH:MM")]
    InvalidTime(String),

    /// The slot catalog defines no periods, so no assignment can be drawn.
    #[error("slot catalog defines no periods")]
    EmptyCatalog,
}

/// The input collections a snapshot must populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCategory {
    /// Enrolled students.
    Students,
    /// Available teachers.
    Teachers,
    /// Courses to place.
    Courses,
    /// Available rooms.
    Rooms,
}

impl fmt::Display for InputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputCategory::Students => "students",
            InputCategory::Teachers => "teachers",
            InputCategory::Courses => "courses",
            InputCategory::Rooms => "rooms",
        };
        f.write_str(name)
    }
}
