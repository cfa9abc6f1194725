//! Synthesis engine facade.
//!
//! Owns the full control flow of one run: scope the snapshot to the
//! request, validate, search, generate suggestions, assemble the
//! artifact, and hand exactly one operation record to the logging
//! collaborator. The engine holds no state between runs — configuration
//! is read once at construction and every run gets fresh search state,
//! so independent calls may proceed concurrently.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::SynthesisError;
use crate::ga::{CancelToken, GaConfig, Individual, SearchDriver, SearchOutcome, SearchState};
use crate::models::{
    Conflict, ScheduledSlot, SlotCatalog, Snapshot, Suggestion, Timetable,
};
use crate::suggest::generate_suggestions;
use crate::validation::validate_snapshot;

/// A timetable synthesis request.
///
/// Omitted id lists mean "all active records"; present lists narrow the
/// snapshot before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    /// Target semester.
    pub semester: i32,
    /// Target academic year, e.g. `"2026/2027"`.
    pub academic_year: String,
    /// Optional student scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_ids: Option<Vec<String>>,
    /// Optional teacher scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_ids: Option<Vec<String>>,
    /// Optional course scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_ids: Option<Vec<String>>,
}

impl SynthesisRequest {
    /// Creates a request covering all active records.
    pub fn new(semester: i32, academic_year: impl Into<String>) -> Self {
        Self {
            semester,
            academic_year: academic_year.into(),
            student_ids: None,
            teacher_ids: None,
            course_ids: None,
        }
    }

    /// Narrows the request to specific courses.
    pub fn with_course_ids(mut self, ids: Vec<String>) -> Self {
        self.course_ids = Some(ids);
        self
    }

    /// Narrows the request to specific teachers.
    pub fn with_teacher_ids(mut self, ids: Vec<String>) -> Self {
        self.teacher_ids = Some(ids);
        self
    }

    /// Narrows the request to specific students.
    pub fn with_student_ids(mut self, ids: Vec<String>) -> Self {
        self.student_ids = Some(ids);
        self
    }
}

/// The response returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResponse {
    /// Whether a timetable was produced (possibly with residual conflicts).
    pub success: bool,
    /// The assembled timetable artifact.
    pub timetable: Timetable,
    /// Residual conflicts, duplicated from the artifact for convenience.
    pub conflicts: Vec<Conflict>,
    /// Suggestions, duplicated from the artifact for convenience.
    pub suggestions: Vec<Suggestion>,
    /// Wall-clock duration of the run in milliseconds.
    pub execution_time_ms: u64,
}

/// Terminal status of a synthesis run, as recorded in the operation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// The run produced a timetable.
    Success,
    /// Validation or a fatal fault aborted the run.
    Failed,
    /// The caller cancelled; a best-effort timetable was still produced.
    Cancelled,
}

/// Kinds of logged operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    /// A timetable synthesis attempt.
    Generate,
}

/// One entry handed to the operation-log collaborator, once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    /// What was attempted.
    pub operation: OperationKind,
    /// The request as received.
    pub request: SynthesisRequest,
    /// The produced artifact; `None` for failed runs.
    pub output: Option<Timetable>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Terminal status.
    pub status: RunStatus,
    /// Error message for failed runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// The operation-log collaborator boundary.
///
/// Implementations own persistence and delivery; the engine only
/// guarantees exactly one record per synthesis attempt.
pub trait OperationLogger: Send + Sync {
    /// Receives the record of one synthesis attempt.
    fn log_operation(&self, record: OperationRecord);
}

/// Discards all records. The default logger.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl OperationLogger for NoopLogger {
    fn log_operation(&self, _record: OperationRecord) {}
}

/// Collects records in memory. Intended for tests.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<OperationRecord>>,
}

impl MemoryLogger {
    /// Creates an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all received records.
    pub fn records(&self) -> Vec<OperationRecord> {
        self.records.lock().expect("logger mutex poisoned").clone()
    }
}

impl OperationLogger for MemoryLogger {
    fn log_operation(&self, record: OperationRecord) {
        self.records.lock().expect("logger mutex poisoned").push(record);
    }
}

/// The timetable synthesis engine.
///
/// # Example
///
/// ```
/// use timetabler::engine::{SynthesisEngine, SynthesisRequest};
/// use timetabler::ga::{CancelToken, GaConfig};
/// use timetabler::models::{Course, Room, Snapshot, Student, Teacher};
///
/// let snapshot = Snapshot::new(
///     vec![Student::new("S1")],
///     vec![Teacher::new("T1")],
///     vec![Course::new("C1", "T1").with_capacity(0, 20)],
///     vec![Room::classroom("R1").with_capacity(30)],
/// );
/// let engine = SynthesisEngine::new(GaConfig::default().with_seed(42));
/// let request = SynthesisRequest::new(1, "2026/2027");
/// let response = engine
///     .synthesize(&snapshot, &request, &CancelToken::new())
///     .unwrap();
/// assert!(response.success);
/// assert_eq!(response.timetable.slots.len(), 1);
/// ```
pub struct SynthesisEngine {
    config: GaConfig,
    catalog: SlotCatalog,
    logger: Arc<dyn OperationLogger>,
}

impl SynthesisEngine {
    /// Creates an engine with the default slot catalog and a no-op logger.
    pub fn new(config: GaConfig) -> Self {
        Self {
            config,
            catalog: SlotCatalog::default(),
            logger: Arc::new(NoopLogger),
        }
    }

    /// Replaces the slot catalog.
    pub fn with_catalog(mut self, catalog: SlotCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Attaches an operation-log collaborator.
    pub fn with_logger(mut self, logger: Arc<dyn OperationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Runs one synthesis attempt end to end.
    ///
    /// Exactly one [`OperationRecord`] reaches the logger, whether the
    /// run succeeds, fails validation, or is cancelled mid-search.
    pub fn synthesize(
        &self,
        snapshot: &Snapshot,
        request: &SynthesisRequest,
        cancel: &CancelToken,
    ) -> Result<SynthesisResponse, SynthesisError> {
        let started = Instant::now();
        let scoped = snapshot.scoped(
            request.student_ids.as_deref(),
            request.teacher_ids.as_deref(),
            request.course_ids.as_deref(),
        );

        let outcome = match self.run_search(&scoped, cancel) {
            Ok(outcome) => outcome,
            Err(err) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                error!(%err, duration_ms, "timetable synthesis failed");
                self.logger.log_operation(OperationRecord {
                    operation: OperationKind::Generate,
                    request: request.clone(),
                    output: None,
                    duration_ms,
                    status: RunStatus::Failed,
                    error_message: Some(err.to_string()),
                });
                return Err(err);
            }
        };

        let suggestions = generate_suggestions(&outcome.best, &scoped, &self.catalog);
        let timetable = assemble_timetable(request, &outcome.best, suggestions, &scoped);
        let duration_ms = started.elapsed().as_millis() as u64;
        let status = if outcome.state == SearchState::Cancelled {
            RunStatus::Cancelled
        } else {
            RunStatus::Success
        };
        info!(
            fitness = timetable.fitness,
            conflicts = timetable.conflicts.len(),
            generations = outcome.generations,
            duration_ms,
            ?status,
            "timetable synthesis finished"
        );

        self.logger.log_operation(OperationRecord {
            operation: OperationKind::Generate,
            request: request.clone(),
            output: Some(timetable.clone()),
            duration_ms,
            status,
            error_message: None,
        });

        Ok(SynthesisResponse {
            success: true,
            conflicts: timetable.conflicts.clone(),
            suggestions: timetable.suggestions.clone(),
            timetable,
            execution_time_ms: duration_ms,
        })
    }

    fn run_search(
        &self,
        scoped: &Snapshot,
        cancel: &CancelToken,
    ) -> Result<SearchOutcome, SynthesisError> {
        validate_snapshot(scoped)?;
        SearchDriver::new(self.config.clone(), self.catalog.clone()).run(scoped, cancel)
    }
}

/// Joins the best individual with full snapshot records.
///
/// Genes whose records are missing from the snapshot cannot occur by
/// construction; they are skipped rather than panicking.
fn assemble_timetable(
    request: &SynthesisRequest,
    best: &Individual,
    suggestions: Vec<Suggestion>,
    snapshot: &Snapshot,
) -> Timetable {
    let slots = best
        .genes
        .iter()
        .filter_map(|gene| {
            let course = snapshot.course(&gene.course_id)?;
            let teacher = snapshot.teacher(&gene.teacher_id)?;
            let room = snapshot.room(&gene.room_id)?;
            Some(ScheduledSlot {
                course: course.clone(),
                teacher: teacher.clone(),
                room: room.clone(),
                slot: gene.slot,
            })
        })
        .collect();

    Timetable {
        semester: request.semester,
        academic_year: request.academic_year.clone(),
        slots,
        conflicts: best.conflicts.clone(),
        suggestions,
        fitness: best.fitness,
    }
}
