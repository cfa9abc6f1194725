//! Candidate schedule encoding.
//!
//! # Encoding
//!
//! An [`Individual`] is one candidate full-term schedule: an ordered
//! sequence of [`Gene`]s, exactly one per course in the candidate set.
//! A gene is one course's complete assignment — teacher, room, and
//! weekly slot. Fitness and conflicts are computed by the evaluator and
//! stored back on the individual.
//!
//! The one-gene-per-course invariant holds by construction; the single
//! documented exception is a course whose declared teacher is absent
//! from the snapshot, which is dropped at initialization with a warning.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Conflict, Course, Room, Slot, SlotCatalog, Snapshot};

/// One course's assignment within a candidate schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    /// The placed course.
    pub course_id: String,
    /// The delivering teacher (the course's declared teacher).
    pub teacher_id: String,
    /// The assigned room.
    pub room_id: String,
    /// The assigned weekly slot.
    pub slot: Slot,
    /// Weekly credit hours, denormalized from the course.
    pub credit_hours: u32,
}

/// One candidate full-term schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    /// One gene per course in the candidate set.
    pub genes: Vec<Gene>,
    /// Fitness in `[0, 1]`; [`Individual::UNEVALUATED`] until scored.
    pub fitness: f64,
    /// Conflicts recorded by the last evaluation.
    pub conflicts: Vec<Conflict>,
}

impl Gene {
    /// Draws a uniformly random assignment for a course.
    ///
    /// Day, period, and room are drawn independently of capacity or room
    /// type; the fitness evaluator penalizes bad draws instead. Returns
    /// `None` when the room list or catalog is empty.
    pub fn random<R: Rng>(
        course: &Course,
        rooms: &[Room],
        catalog: &SlotCatalog,
        rng: &mut R,
    ) -> Option<Self> {
        if rooms.is_empty() {
            return None;
        }
        let slot = catalog.random_slot(rng)?;
        let room = &rooms[rng.random_range(0..rooms.len())];
        Some(Self {
            course_id: course.id.clone(),
            teacher_id: course.teacher_id.clone(),
            room_id: room.id.clone(),
            slot,
            credit_hours: course.credit_hours,
        })
    }
}

impl Individual {
    /// Fitness marker for individuals that have not been evaluated yet.
    pub const UNEVALUATED: f64 = f64::NEG_INFINITY;

    /// Creates an unevaluated individual from genes.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: Self::UNEVALUATED,
            conflicts: Vec::new(),
        }
    }

    /// Creates a random individual: one random gene per course.
    ///
    /// A course whose declared teacher is not in the snapshot is omitted
    /// from the individual.
    pub fn random<R: Rng>(snapshot: &Snapshot, catalog: &SlotCatalog, rng: &mut R) -> Self {
        let mut genes = Vec::with_capacity(snapshot.courses.len());
        for course in &snapshot.courses {
            if snapshot.teacher(&course.teacher_id).is_none() {
                warn!(
                    course_id = %course.id,
                    teacher_id = %course.teacher_id,
                    "dropping course with unresolved teacher from candidate schedule"
                );
                continue;
            }
            if let Some(gene) = Gene::random(course, &snapshot.rooms, catalog, rng) {
                genes.push(gene);
            }
        }
        Self::new(genes)
    }

    /// Finds the gene placing a given course.
    pub fn gene_for_course(&self, course_id: &str) -> Option<&Gene> {
        self.genes.iter().find(|g| g.course_id == course_id)
    }

    /// Whether the individual has been evaluated.
    pub fn is_evaluated(&self) -> bool {
        self.fitness != Self::UNEVALUATED
    }
}

/// Builds the starting population: `size` random individuals.
///
/// Fitness and conflicts are left unset; the driver evaluates them.
pub fn init_population<R: Rng>(
    snapshot: &Snapshot,
    catalog: &SlotCatalog,
    size: usize,
    rng: &mut R,
) -> Vec<Individual> {
    (0..size)
        .map(|_| Individual::random(snapshot, catalog, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, Student, Teacher};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_snapshot() -> Snapshot {
        Snapshot::new(
            vec![Student::new("S1")],
            vec![Teacher::new("T1"), Teacher::new("T2")],
            vec![
                Course::new("C1", "T1").with_capacity(0, 30),
                Course::new("C2", "T2").with_capacity(0, 30),
                Course::new("C3", "T1").with_capacity(0, 30),
            ],
            vec![
                Room::classroom("R1").with_capacity(40),
                Room::lab("R2").with_capacity(20),
            ],
        )
    }

    #[test]
    fn test_one_gene_per_course() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let ind = Individual::random(&snap, &catalog, &mut rng);
        assert_eq!(ind.genes.len(), 3);
        for course in &snap.courses {
            let matching = ind.genes.iter().filter(|g| g.course_id == course.id).count();
            assert_eq!(matching, 1, "course {} must appear exactly once", course.id);
        }
        assert!(!ind.is_evaluated());
    }

    #[test]
    fn test_gene_fields_come_from_course() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let ind = Individual::random(&snap, &catalog, &mut rng);
        let gene = ind.gene_for_course("C2").unwrap();
        assert_eq!(gene.teacher_id, "T2");
        assert_eq!(gene.credit_hours, 3);
        assert!(snap.room(&gene.room_id).is_some());
        assert!((1..=5).contains(&gene.slot.day));
    }

    #[test]
    fn test_unresolved_teacher_drops_course() {
        let mut snap = sample_snapshot();
        snap.courses.push(Course::new("C4", "NOBODY"));
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let ind = Individual::random(&snap, &catalog, &mut rng);
        assert_eq!(ind.genes.len(), 3);
        assert!(ind.gene_for_course("C4").is_none());
    }

    #[test]
    fn test_init_population_size() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let population = init_population(&snap, &catalog, 50, &mut rng);
        assert_eq!(population.len(), 50);
        assert!(population.iter().all(|ind| ind.genes.len() == 3));
    }

    #[test]
    fn test_gene_random_needs_rooms_and_periods() {
        let course = Course::new("C1", "T1");
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        assert!(Gene::random(&course, &[], &catalog, &mut rng).is_none());

        let rooms = vec![Room::classroom("R1")];
        let empty_catalog = SlotCatalog::new(5);
        assert!(Gene::random(&course, &rooms, &empty_catalog, &mut rng).is_none());
    }
}
