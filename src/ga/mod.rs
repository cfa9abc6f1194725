//! Genetic-algorithm search over candidate timetables.
//!
//! # Encoding
//!
//! One [`Gene`] per course (teacher, room, weekly slot); an
//! [`Individual`] is a full candidate schedule. Fitness starts at a 1.0
//! baseline and only penalties apply — see [`fitness`].
//!
//! # Submodules
//!
//! - [`individual`]: encoding and random initialization
//! - [`fitness`]: deterministic scoring and conflict recording
//! - [`operators`]: tournament selection, uniform crossover, mutation
//! - [`driver`]: the generational loop with elitism and cancellation

pub mod driver;
pub mod fitness;
pub mod individual;
pub mod operators;

pub use driver::{CancelToken, GaConfig, SearchDriver, SearchOutcome, SearchState};
pub use fitness::{evaluate, evaluate_population};
pub use individual::{init_population, Gene, Individual};
pub use operators::{mutate, tournament_select, uniform_crossover};
