//! Fitness and conflict evaluation.
//!
//! # Scoring
//!
//! Fitness starts at a 1.0 baseline and only penalties apply, so a
//! conflict-free, workload-respecting schedule scores 1.0 and nothing
//! scores higher. Penalties:
//!
//! | Conflict | Penalty |
//! |---|---|
//! | Teacher double-booked (within candidate) | 0.3 per pair |
//! | Room double-booked (within candidate) | 0.4 per pair |
//! | Collision with committed entry (teacher) | 0.2 per pair |
//! | Weekly workload overage | 0.1 × overage hours (uncapped) |
//! | Course enrollment over room capacity | 0.1 per gene |
//!
//! The result is clamped to `max(0, fitness)`.
//!
//! Evaluation is a pure function of the genes and the snapshot — no
//! hidden state, no randomness — so individuals can be scored on any
//! worker in any order without perturbing a seeded run.

use rayon::prelude::*;

use super::individual::{Gene, Individual};
use crate::models::{Conflict, Snapshot};

/// Evaluates one candidate schedule.
///
/// Returns the clamped fitness and every recorded conflict. A gene pair
/// can record both a teacher and a room conflict.
pub fn evaluate(genes: &[Gene], snapshot: &Snapshot) -> (f64, Vec<Conflict>) {
    let mut fitness = 1.0;
    let mut conflicts = Vec::new();

    // Pairwise double-booking within the candidate.
    for i in 0..genes.len() {
        for j in (i + 1)..genes.len() {
            let (a, b) = (&genes[i], &genes[j]);
            if !a.slot.overlaps(&b.slot) {
                continue;
            }
            if a.teacher_id == b.teacher_id {
                conflicts.push(Conflict::teacher_conflict(
                    &a.teacher_id,
                    &a.course_id,
                    &b.course_id,
                ));
                fitness -= 0.3;
            }
            if a.room_id == b.room_id {
                conflicts.push(Conflict::room_conflict(&a.room_id, &a.course_id, &b.course_id));
                fitness -= 0.4;
            }
        }
    }

    // Collisions with already-committed entries.
    for gene in genes {
        for entry in &snapshot.existing {
            if gene.teacher_id == entry.teacher_id && gene.slot.overlaps(&entry.slot) {
                conflicts.push(Conflict::existing_conflict(
                    &gene.teacher_id,
                    &gene.course_id,
                    &entry.course_id,
                ));
                fitness -= 0.2;
            }
        }
    }

    // Weekly workload per teacher, in snapshot order for stable output.
    for teacher in &snapshot.teachers {
        let mut hours = 0.0;
        let mut course_ids = Vec::new();
        for gene in genes.iter().filter(|g| g.teacher_id == teacher.id) {
            hours += gene.slot.duration_hours();
            course_ids.push(gene.course_id.clone());
        }
        if hours > teacher.max_workload_hours {
            let overage = hours - teacher.max_workload_hours;
            conflicts.push(Conflict::workload_exceeded(&teacher.id, course_ids, overage));
            fitness -= 0.1 * overage;
        }
    }

    // Room capacity vs course enrollment.
    for gene in genes {
        let course = snapshot.course(&gene.course_id);
        let room = snapshot.room(&gene.room_id);
        if let (Some(course), Some(room)) = (course, room) {
            if course.max_students > room.capacity {
                conflicts.push(Conflict::capacity_exceeded(&gene.course_id, &gene.room_id));
                fitness -= 0.1;
            }
        }
    }

    (fitness.max(0.0), conflicts)
}

/// Scores a whole generation in parallel.
///
/// One rayon task per individual; each task touches only its own
/// fitness/conflict fields, and the implicit join means breeding never
/// sees a half-evaluated generation.
pub fn evaluate_population(population: &mut [Individual], snapshot: &Snapshot) {
    population.par_iter_mut().for_each(|individual| {
        let (fitness, conflicts) = evaluate(&individual.genes, snapshot);
        individual.fitness = fitness;
        individual.conflicts = conflicts;
    });
}
