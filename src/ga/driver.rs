//! Generational search driver.
//!
//! Runs the evolutionary loop: evaluate → sort → elitism → breed, until
//! the best candidate clears the conflict threshold, the generation
//! budget runs out, or the caller cancels. Exhaustion and cancellation
//! are degraded-quality outcomes, not errors — the best individual
//! evaluated so far is always returned.
//!
//! # Reproducibility
//! One `SmallRng` seeded from the run-level seed drives initialization
//! and breeding sequentially. Fitness evaluation is pure and therefore
//! free to run on the rayon pool; the barrier before sorting means
//! breeding never observes a half-evaluated generation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::fitness::evaluate_population;
use super::individual::{init_population, Individual};
use super::operators::{mutate, tournament_select, uniform_crossover};
use crate::error::SynthesisError;
use crate::models::{SlotCatalog, Snapshot};

/// Search parameters, read once at engine construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generation budget; the loop stops after this many generations.
    pub max_generations: usize,
    /// Legacy iteration knob carried from the reference configuration.
    ///
    /// The generation loop does NOT consult this value — only
    /// `max_generations` bounds it. The two are kept as independent
    /// fields rather than silently unified because existing deployments
    /// set them separately.
    pub max_iterations: usize,
    /// Fitness at which the search stops early as converged.
    pub conflict_threshold: f64,
    /// Fraction of each generation carried over unchanged.
    pub elite_fraction: f64,
    /// Independent per-gene mutation probability.
    pub mutation_rate: f64,
    /// Tournament sample size for parent selection.
    pub tournament_size: usize,
    /// Run-level RNG seed; `None` draws a fresh one (logged).
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            max_iterations: 100,
            conflict_threshold: 0.8,
            elite_fraction: 0.2,
            mutation_rate: 0.1,
            tournament_size: 3,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the convergence threshold.
    pub fn with_conflict_threshold(mut self, threshold: f64) -> Self {
        self.conflict_threshold = threshold;
        self
    }

    /// Sets the elite fraction.
    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament sample size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Fixes the run-level RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// External cancellation signal with an optional deadline.
///
/// Checked only at the generation boundary — the one safe preemption
/// point — so a fired token yields the best individual evaluated so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Creates a token that never fires on its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a deadline the given duration from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested or the deadline passed.
    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    /// Best fitness reached the conflict threshold.
    Converged,
    /// Generation budget ran out before the threshold was reached.
    Exhausted,
    /// The caller cancelled or the deadline passed.
    Cancelled,
}

/// Result of one search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best individual found, evaluated and sorted to the front.
    pub best: Individual,
    /// Generations evaluated (at least one).
    pub generations: usize,
    /// Terminal state.
    pub state: SearchState,
}

/// The generational search loop over one snapshot.
#[derive(Debug, Clone)]
pub struct SearchDriver {
    config: GaConfig,
    catalog: SlotCatalog,
}

impl SearchDriver {
    /// Creates a driver with the given parameters and slot catalog.
    pub fn new(config: GaConfig, catalog: SlotCatalog) -> Self {
        Self { config, catalog }
    }

    /// Runs the search to a terminal state.
    pub fn run(
        &self,
        snapshot: &Snapshot,
        cancel: &CancelToken,
    ) -> Result<SearchOutcome, SynthesisError> {
        if self.catalog.is_empty() {
            return Err(SynthesisError::EmptyCatalog);
        }
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = SmallRng::seed_from_u64(seed);
        let size = self.config.population_size.max(1);
        info!(
            seed,
            population_size = size,
            max_generations = self.config.max_generations,
            "starting timetable search"
        );

        let mut population = init_population(snapshot, &self.catalog, size, &mut rng);
        let elite_count = self.elite_count(size);
        let mut generation = 0usize;

        loop {
            evaluate_population(&mut population, snapshot);
            population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
            let best_fitness = population[0].fitness;
            debug!(generation, best_fitness, "generation evaluated");

            if best_fitness >= self.config.conflict_threshold {
                info!(generation, best_fitness, "search converged");
                return Ok(self.finish(population, generation, SearchState::Converged));
            }
            if cancel.is_cancelled() {
                info!(generation, best_fitness, "search cancelled");
                return Ok(self.finish(population, generation, SearchState::Cancelled));
            }
            if generation + 1 >= self.config.max_generations {
                info!(generation, best_fitness, "generation budget exhausted");
                return Ok(self.finish(population, generation, SearchState::Exhausted));
            }

            let mut next = Vec::with_capacity(size);
            next.extend(population.iter().take(elite_count).cloned());
            while next.len() < size {
                let p1 = tournament_select(&population, self.config.tournament_size, &mut rng);
                let p2 = tournament_select(&population, self.config.tournament_size, &mut rng);
                let mut child = uniform_crossover(p1, p2, &mut rng);
                mutate(
                    &mut child,
                    snapshot,
                    &self.catalog,
                    self.config.mutation_rate,
                    &mut rng,
                );
                next.push(child);
            }
            population = next;
            generation += 1;
        }
    }

    fn finish(
        &self,
        mut population: Vec<Individual>,
        generation: usize,
        state: SearchState,
    ) -> SearchOutcome {
        SearchOutcome {
            best: population.swap_remove(0),
            generations: generation + 1,
            state,
        }
    }

    fn elite_count(&self, size: usize) -> usize {
        let count = (size as f64 * self.config.elite_fraction).floor() as usize;
        count.clamp(1, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Room, Student, Teacher};

    fn single_course_snapshot() -> Snapshot {
        Snapshot::new(
            vec![Student::new("S1")],
            vec![Teacher::new("T1")],
            vec![Course::new("C1", "T1").with_credit_hours(3).with_capacity(0, 20)],
            vec![Room::classroom("R1").with_capacity(30)],
        )
    }

    fn crowded_snapshot() -> Snapshot {
        // Six courses for one teacher in two rooms: enough contention to
        // produce conflicts in early generations.
        let courses = (0..6)
            .map(|i| Course::new(format!("C{i}"), "T1").with_capacity(0, 20))
            .collect();
        Snapshot::new(
            vec![Student::new("S1")],
            vec![Teacher::new("T1")],
            courses,
            vec![
                Room::classroom("R1").with_capacity(30),
                Room::classroom("R2").with_capacity(30),
            ],
        )
    }

    #[test]
    fn test_single_course_converges_immediately() {
        let driver = SearchDriver::new(GaConfig::default().with_seed(42), SlotCatalog::default());
        let outcome = driver.run(&single_course_snapshot(), &CancelToken::new()).unwrap();

        assert_eq!(outcome.state, SearchState::Converged);
        assert_eq!(outcome.generations, 1);
        assert_eq!(outcome.best.genes.len(), 1);
        assert!((outcome.best.fitness - 1.0).abs() < 1e-10);
        assert!(outcome.best.conflicts.is_empty());
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let snap = crowded_snapshot();
        let config = GaConfig::default().with_seed(7).with_max_generations(10);
        let driver = SearchDriver::new(config, SlotCatalog::default());

        let a = driver.run(&snap, &CancelToken::new()).unwrap();
        let b = driver.run(&snap, &CancelToken::new()).unwrap();

        assert_eq!(a.best.fitness, b.best.fitness);
        assert_eq!(a.best.conflicts, b.best.conflicts);
        assert_eq!(a.best.genes, b.best.genes);
        assert_eq!(a.generations, b.generations);
        assert_eq!(a.state, b.state);
    }

    #[test]
    fn test_budget_exhaustion_returns_best_effort() {
        // Threshold above the 1.0 ceiling can never be reached.
        let config = GaConfig::default()
            .with_seed(42)
            .with_max_generations(3)
            .with_conflict_threshold(1.1);
        let driver = SearchDriver::new(config, SlotCatalog::default());
        let outcome = driver.run(&crowded_snapshot(), &CancelToken::new()).unwrap();

        assert_eq!(outcome.state, SearchState::Exhausted);
        assert_eq!(outcome.generations, 3);
        assert!(outcome.best.is_evaluated());
        assert_eq!(outcome.best.genes.len(), 6);
    }

    #[test]
    fn test_one_gene_per_course_across_generations() {
        let snap = crowded_snapshot();
        let config = GaConfig::default()
            .with_seed(9)
            .with_max_generations(8)
            .with_conflict_threshold(1.1);
        let driver = SearchDriver::new(config, SlotCatalog::default());
        let outcome = driver.run(&snap, &CancelToken::new()).unwrap();

        for course in &snap.courses {
            let count = outcome
                .best
                .genes
                .iter()
                .filter(|g| g.course_id == course.id)
                .count();
            assert_eq!(count, 1, "course {} must appear exactly once", course.id);
        }
    }

    #[test]
    fn test_cancellation_returns_best_so_far() {
        let token = CancelToken::new();
        token.cancel();
        let config = GaConfig::default().with_seed(42).with_conflict_threshold(1.1);
        let driver = SearchDriver::new(config, SlotCatalog::default());
        let outcome = driver.run(&crowded_snapshot(), &token).unwrap();

        assert_eq!(outcome.state, SearchState::Cancelled);
        assert_eq!(outcome.generations, 1);
        assert!(outcome.best.is_evaluated());
    }

    #[test]
    fn test_deadline_token() {
        let token = CancelToken::new().with_timeout(Duration::ZERO);
        assert!(token.is_cancelled());

        let fresh = CancelToken::new().with_timeout(Duration::from_secs(3600));
        assert!(!fresh.is_cancelled());
    }

    #[test]
    fn test_max_iterations_does_not_bound_the_loop() {
        // The legacy knob set to 1 must not stop the loop early.
        let mut config = GaConfig::default()
            .with_seed(42)
            .with_max_generations(3)
            .with_conflict_threshold(1.1);
        config.max_iterations = 1;
        let driver = SearchDriver::new(config, SlotCatalog::default());
        let outcome = driver.run(&crowded_snapshot(), &CancelToken::new()).unwrap();

        assert_eq!(outcome.generations, 3);
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let driver = SearchDriver::new(GaConfig::default(), SlotCatalog::new(5));
        let err = driver
            .run(&single_course_snapshot(), &CancelToken::new())
            .unwrap_err();
        assert_eq!(err, SynthesisError::EmptyCatalog);
    }

    #[test]
    fn test_default_config_matches_reference() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.max_iterations, 100);
        assert!((config.conflict_threshold - 0.8).abs() < 1e-10);
        assert!((config.elite_fraction - 0.2).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.tournament_size, 3);
    }
}
