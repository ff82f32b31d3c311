//! Error types for dataset ingestion and navigation.

use thiserror::Error;

use crate::navigator::NavKind;

/// Result type alias for viewer operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised while building or driving a view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The dataset is structurally inconsistent.
    #[error("malformed dataset: {0}")]
    MalformedDataset(#[from] Malformed),

    /// Dual vertex centroids were requested but a face vertex has no position.
    #[error("missing layout: vertex {vertex} of face {face} has no position")]
    MissingLayout { face: usize, vertex: u32 },

    /// A navigation index escaped its collection. Never expected at runtime.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: NavKind,
        index: usize,
        len: usize,
    },

    /// An ingest cap was exceeded.
    #[error("dataset exceeds cap: {what} > {cap}")]
    CapsExceeded { what: &'static str, cap: usize },

    /// Payload is not valid JSON or does not have the expected shape.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// An event label that names no action.
    #[error("unknown action label: {0}")]
    UnknownAction(String),
}

/// Reasons a dataset is rejected at build time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Malformed {
    #[error("{owner} references missing {kind} {id}")]
    Dangling {
        owner: String,
        kind: &'static str,
        id: u32,
    },

    #[error("duplicate {kind} id {id}")]
    Duplicate { kind: &'static str, id: u32 },

    #[error("arc {arc} starts and ends at vertex {vertex}")]
    SelfLoop { arc: u32, vertex: u32 },

    #[error("{what} count {got} does not match face count {faces}")]
    CountMismatch {
        what: &'static str,
        got: usize,
        faces: usize,
    },

    #[error("arc {arc} belongs to both ring {first} and ring {second}")]
    RingOverlap {
        arc: u32,
        first: usize,
        second: usize,
    },

    #[error("layout coordinate for vertex {vertex} is not finite or out of bounds")]
    BadCoordinate { vertex: u32 },
}
