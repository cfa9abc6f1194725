//! Selection, crossover, and mutation operators.
//!
//! Free functions over [`Individual`]s taking an explicit `&mut R: Rng`,
//! so a seeded run replays exactly.

use rand::Rng;
use tracing::warn;

use super::individual::{Gene, Individual};
use crate::models::{SlotCatalog, Snapshot};

/// Tournament selection.
///
/// Draws `k` individuals uniformly at random with replacement and
/// returns the fittest. Ties break toward the first-encountered
/// candidate (strict comparison), which keeps seeded runs reproducible.
pub fn tournament_select<'a, R: Rng>(
    population: &'a [Individual],
    k: usize,
    rng: &mut R,
) -> &'a Individual {
    debug_assert!(!population.is_empty() && k >= 1);
    let mut best = &population[rng.random_range(0..population.len())];
    for _ in 1..k {
        let candidate = &population[rng.random_range(0..population.len())];
        if candidate.fitness > best.fitness {
            best = candidate;
        }
    }
    best
}

/// Uniform per-gene crossover.
///
/// For each index up to the longer parent's length: both parents present
/// → pick one uniformly; only one present → take it unconditionally.
/// The child always has the longer parent's length, so courses present
/// in only one parent are never silently dropped.
pub fn uniform_crossover<R: Rng>(p1: &Individual, p2: &Individual, rng: &mut R) -> Individual {
    let len = p1.genes.len().max(p2.genes.len());
    let mut genes = Vec::with_capacity(len);
    for i in 0..len {
        let gene = match (p1.genes.get(i), p2.genes.get(i)) {
            (Some(a), Some(b)) => {
                if rng.random_bool(0.5) {
                    a.clone()
                } else {
                    b.clone()
                }
            }
            (Some(a), None) => a.clone(),
            (None, Some(b)) => b.clone(),
            (None, None) => unreachable!("index bounded by max parent length"),
        };
        genes.push(gene);
    }
    Individual::new(genes)
}

/// Per-gene mutation.
///
/// Each gene is independently re-drawn with probability `rate`, using
/// the same uniform day/period/room draw as initialization. A gene
/// whose course or teacher can no longer be resolved from the snapshot
/// is left unchanged with a warning rather than failing the run.
pub fn mutate<R: Rng>(
    individual: &mut Individual,
    snapshot: &Snapshot,
    catalog: &SlotCatalog,
    rate: f64,
    rng: &mut R,
) {
    for gene in &mut individual.genes {
        if !rng.random_bool(rate) {
            continue;
        }
        let Some(course) = snapshot.course(&gene.course_id) else {
            warn!(course_id = %gene.course_id, "mutation skipped: course not in snapshot");
            continue;
        };
        if snapshot.teacher(&course.teacher_id).is_none() {
            warn!(
                course_id = %course.id,
                teacher_id = %course.teacher_id,
                "mutation skipped: teacher not in snapshot"
            );
            continue;
        }
        if let Some(fresh) = Gene::random(course, &snapshot.rooms, catalog, rng) {
            *gene = fresh;
        }
    }
    // A mutated individual must be re-evaluated.
    individual.fitness = Individual::UNEVALUATED;
    individual.conflicts.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Room, Student, Teacher};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_snapshot() -> Snapshot {
        Snapshot::new(
            vec![Student::new("S1")],
            vec![Teacher::new("T1")],
            vec![
                Course::new("C1", "T1"),
                Course::new("C2", "T1"),
                Course::new("C3", "T1"),
                Course::new("C4", "T1"),
                Course::new("C5", "T1"),
            ],
            vec![
                Room::classroom("R1").with_capacity(30),
                Room::classroom("R2").with_capacity(30),
            ],
        )
    }

    fn evaluated(genes_from: &Individual, fitness: f64) -> Individual {
        let mut ind = genes_from.clone();
        ind.fitness = fitness;
        ind
    }

    #[test]
    fn test_tournament_picks_fittest_of_sample() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let template = Individual::random(&snap, &catalog, &mut rng);
        let population = vec![evaluated(&template, 0.1), evaluated(&template, 0.9)];

        // A single member is always returned.
        let lone = vec![evaluated(&template, 0.4)];
        assert!((tournament_select(&lone, 3, &mut rng).fitness - 0.4).abs() < 1e-10);

        // With k=100 over two members the better one is in the sample.
        let winner = tournament_select(&population, 100, &mut rng);
        assert!((winner.fitness - 0.9).abs() < 1e-10);
    }

    #[test]
    fn test_tournament_tie_break_is_first_encountered() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let template = Individual::random(&snap, &catalog, &mut rng);
        // All tied: the winner must always be the first candidate drawn.
        let population: Vec<Individual> = (0..5).map(|_| evaluated(&template, 0.5)).collect();

        let mut draw_rng = SmallRng::seed_from_u64(7);
        let first_idx = draw_rng.random_range(0..population.len());
        let mut rng2 = SmallRng::seed_from_u64(7);
        let winner = tournament_select(&population, 3, &mut rng2);
        assert!(std::ptr::eq(winner, &population[first_idx]));
    }

    #[test]
    fn test_crossover_child_has_max_parent_length() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut p1 = Individual::random(&snap, &catalog, &mut rng);
        let mut p2 = Individual::random(&snap, &catalog, &mut rng);
        p1.genes.truncate(5);
        p2.genes.truncate(3);

        let child = uniform_crossover(&p1, &p2, &mut rng);
        assert_eq!(child.genes.len(), 5);
        // Tail genes past the shorter parent come from the longer one.
        assert_eq!(child.genes[3], p1.genes[3]);
        assert_eq!(child.genes[4], p1.genes[4]);
        assert!(!child.is_evaluated());
    }

    #[test]
    fn test_crossover_genes_come_from_parents() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let p1 = Individual::random(&snap, &catalog, &mut rng);
        let p2 = Individual::random(&snap, &catalog, &mut rng);
        let child = uniform_crossover(&p1, &p2, &mut rng);

        for (i, gene) in child.genes.iter().enumerate() {
            assert!(gene == &p1.genes[i] || gene == &p2.genes[i]);
        }
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut ind = Individual::random(&snap, &catalog, &mut rng);
        let original = ind.genes.clone();
        mutate(&mut ind, &snap, &catalog, 0.0, &mut rng);
        assert_eq!(ind.genes, original);
    }

    #[test]
    fn test_mutation_rate_one_redraws_but_keeps_courses() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut ind = Individual::random(&snap, &catalog, &mut rng);
        let courses_before: Vec<String> =
            ind.genes.iter().map(|g| g.course_id.clone()).collect();
        mutate(&mut ind, &snap, &catalog, 1.0, &mut rng);
        let courses_after: Vec<String> =
            ind.genes.iter().map(|g| g.course_id.clone()).collect();

        assert_eq!(courses_before, courses_after);
        assert!(!ind.is_evaluated());
        for gene in &ind.genes {
            assert_eq!(gene.teacher_id, "T1");
            assert!(snap.room(&gene.room_id).is_some());
        }
    }

    #[test]
    fn test_mutation_skips_unresolvable_gene() {
        let snap = sample_snapshot();
        let catalog = SlotCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut ind = Individual::random(&snap, &catalog, &mut rng);
        // Simulate a stale reference: the gene's course left the snapshot.
        ind.genes[0].course_id = "GONE".into();
        let stale = ind.genes[0].clone();

        mutate(&mut ind, &snap, &catalog, 1.0, &mut rng);
        assert_eq!(ind.genes[0], stale);
    }
}
