//! Repair suggestions for residual conflicts.
//!
//! Operates on the best individual after the search ends. Suggestions
//! are advisory: they are not re-optimized, and alternative time slots
//! are only checked against the same teacher's other placements — room
//! availability at the alternative time is not re-verified.

use crate::ga::Individual;
use crate::models::{ConflictKind, RoomType, SlotCatalog, Snapshot, Suggestion};

/// Maximum alternative slots proposed per time-change suggestion.
const MAX_ALTERNATIVES: usize = 3;

/// Proposes fixes for the best individual's recorded conflicts.
///
/// - `CapacityExceeded` → the first classroom (stable snapshot order)
///   large enough for the course's enrollment; omitted when none fits.
/// - `TeacherConflict` / `RoomConflict` → up to three alternative slots
///   for the first course of the pair, scanning the catalog day-major
///   and skipping any slot overlapping another placement of the same
///   teacher; omitted when no alternative exists.
/// - Other kinds carry no actionable single-course fix.
pub fn generate_suggestions(
    best: &Individual,
    snapshot: &Snapshot,
    catalog: &SlotCatalog,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for conflict in &best.conflicts {
        let Some(course_id) = conflict.course_ids.first() else {
            continue;
        };
        match conflict.kind {
            ConflictKind::CapacityExceeded => {
                if let Some(s) = room_change(course_id, snapshot) {
                    suggestions.push(s);
                }
            }
            ConflictKind::TeacherConflict | ConflictKind::RoomConflict => {
                if let Some(s) = time_change(course_id, best, catalog, &conflict.message) {
                    suggestions.push(s);
                }
            }
            ConflictKind::ExistingConflict | ConflictKind::WorkloadExceeded => {}
        }
    }

    suggestions
}

fn room_change(course_id: &str, snapshot: &Snapshot) -> Option<Suggestion> {
    let course = snapshot.course(course_id)?;
    let room = snapshot
        .rooms
        .iter()
        .find(|r| r.room_type == RoomType::Classroom && r.capacity >= course.max_students)?;
    Some(Suggestion::room_change(
        course_id,
        &room.id,
        format!(
            "room '{}' seats {}, enough for {} students",
            room.id, room.capacity, course.max_students
        ),
    ))
}

fn time_change(
    course_id: &str,
    best: &Individual,
    catalog: &SlotCatalog,
    reason: &str,
) -> Option<Suggestion> {
    let gene = best.gene_for_course(course_id)?;
    let mut alternatives = Vec::new();

    for candidate in catalog.iter_slots() {
        let busy = best.genes.iter().any(|other| {
            other.course_id != gene.course_id
                && other.teacher_id == gene.teacher_id
                && candidate.overlaps(&other.slot)
        });
        if !busy {
            alternatives.push(candidate);
            if alternatives.len() == MAX_ALTERNATIVES {
                break;
            }
        }
    }

    if alternatives.is_empty() {
        return None;
    }
    Some(Suggestion::time_change(course_id, alternatives, reason))
}
