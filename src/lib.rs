//! Course timetable synthesis engine.
//!
//! Assigns course sections to weekly time slots, teachers, and rooms for
//! an academic term using a genetic algorithm. The search minimizes
//! resource conflicts — teacher and room double-booking, collisions with
//! already-committed entries, workload overage, over-capacity rooms —
//! within a bounded generation budget, and reports every residual
//! conflict together with repair suggestions.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Course`, `Teacher`, `Room`, `Slot`,
//!   `Snapshot`, `Timetable`, `Conflict`, `Suggestion`
//! - **`validation`**: Snapshot integrity checks before any search work
//! - **`ga`**: The search itself — encoding, fitness, operators, driver
//! - **`suggest`**: Repair suggestions for residual conflicts
//! - **`engine`**: The synthesis facade and operation-log boundary
//!
//! # Guarantees
//!
//! A run is best-effort, not optimal: it stops early when the best
//! candidate clears the conflict threshold, and otherwise returns the
//! best candidate found when the budget runs out or the caller cancels.
//! Given a fixed seed and snapshot, two runs produce identical results.
//!
//! # Example
//!
//! ```
//! use timetabler::engine::{SynthesisEngine, SynthesisRequest};
//! use timetabler::ga::{CancelToken, GaConfig};
//! use timetabler::models::{Course, Room, Snapshot, Student, Teacher};
//!
//! let snapshot = Snapshot::new(
//!     vec![Student::new("S1")],
//!     vec![Teacher::new("T1").with_name("Dr. Grace")],
//!     vec![Course::new("CS101", "T1").with_name("Algorithms").with_capacity(5, 20)],
//!     vec![Room::classroom("R1").with_capacity(30)],
//! );
//!
//! let engine = SynthesisEngine::new(GaConfig::default().with_seed(42));
//! let request = SynthesisRequest::new(1, "2026/2027");
//! let response = engine
//!     .synthesize(&snapshot, &request, &CancelToken::new())
//!     .unwrap();
//!
//! assert!(response.success);
//! assert!(response.timetable.is_conflict_free());
//! ```

pub mod engine;
pub mod error;
pub mod ga;
pub mod models;
pub mod suggest;
pub mod validation;

pub use engine::{SynthesisEngine, SynthesisRequest, SynthesisResponse};
pub use error::{InputCategory, SynthesisError};
pub use ga::{CancelToken, GaConfig};
pub use models::{Snapshot, Timetable};
