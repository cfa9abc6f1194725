//! Timetabling domain models.
//!
//! Core data types for one synthesis run: the read-only input
//! ([`Snapshot`]), the weekly time grid ([`Slot`], [`SlotCatalog`]), and
//! the output artifact ([`Timetable`]) with its conflicts and repair
//! suggestions.

mod course;
mod room;
mod slot;
mod snapshot;
mod timetable;

pub use course::{Course, Student, Teacher};
pub use room::{Room, RoomType};
pub use slot::{format_hhmm, hhmm, parse_hhmm, Period, Slot, SlotCatalog};
pub use snapshot::{ExistingEntry, Snapshot};
pub use timetable::{
    Conflict, ConflictKind, ScheduledSlot, Suggestion, SuggestionKind, Timetable,
};
