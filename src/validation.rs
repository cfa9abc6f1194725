//! Input validation for timetable synthesis.
//!
//! The snapshot is checked before any population is built; a failed
//! check aborts the run with no partial processing. The committed
//! schedule may legitimately be empty — only the four live collections
//! are required.

use crate::error::{InputCategory, SynthesisError};
use crate::models::Snapshot;

/// Validates the snapshot's four required collections.
///
/// Checks, in order: students, teachers, courses, rooms. Fails with
/// [`SynthesisError::EmptyInput`] naming the first empty category.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), SynthesisError> {
    if snapshot.students.is_empty() {
        return Err(SynthesisError::EmptyInput(InputCategory::Students));
    }
    if snapshot.teachers.is_empty() {
        return Err(SynthesisError::EmptyInput(InputCategory::Teachers));
    }
    if snapshot.courses.is_empty() {
        return Err(SynthesisError::EmptyInput(InputCategory::Courses));
    }
    if snapshot.rooms.is_empty() {
        return Err(SynthesisError::EmptyInput(InputCategory::Rooms));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Room, Student, Teacher};

    fn full_snapshot() -> Snapshot {
        Snapshot::new(
            vec![Student::new("S1")],
            vec![Teacher::new("T1")],
            vec![Course::new("C1", "T1")],
            vec![Room::classroom("R1").with_capacity(30)],
        )
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(validate_snapshot(&full_snapshot()).is_ok());
    }

    #[test]
    fn test_empty_existing_is_fine() {
        let snap = full_snapshot().with_existing(Vec::new());
        assert!(validate_snapshot(&snap).is_ok());
    }

    #[test]
    fn test_each_empty_category_is_named() {
        let mut snap = full_snapshot();
        snap.students.clear();
        assert_eq!(
            validate_snapshot(&snap),
            Err(SynthesisError::EmptyInput(InputCategory::Students))
        );

        let mut snap = full_snapshot();
        snap.teachers.clear();
        assert_eq!(
            validate_snapshot(&snap),
            Err(SynthesisError::EmptyInput(InputCategory::Teachers))
        );

        let mut snap = full_snapshot();
        snap.courses.clear();
        assert_eq!(
            validate_snapshot(&snap),
            Err(SynthesisError::EmptyInput(InputCategory::Courses))
        );

        let mut snap = full_snapshot();
        snap.rooms.clear();
        assert_eq!(
            validate_snapshot(&snap),
            Err(SynthesisError::EmptyInput(InputCategory::Rooms))
        );
    }
}
