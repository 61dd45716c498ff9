//! Domain model for cover-letter authoring data.
//!
//! # Responsibility
//! - Define the canonical record shapes persisted by the repository layer.
//! - Own field-level validation shared by write paths.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil UUID.
//! - Owning-user ids are opaque strings supplied by the auth collaborator.
//! - Timestamps are Unix epoch milliseconds.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod letter;
pub mod template;

/// Opaque identifier of the owning user, issued by the auth collaborator.
///
/// Kept as a type alias: this layer never inspects its structure.
pub type UserId = String;

/// Field-level validation failure for letter/template records.
///
/// Messages match the caller-facing wording of the action surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NilUuid,
    EmptyTitle,
    EmptyJobTitle,
    EmptyContent,
    EmptyName,
    EmptyBody,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "Record id must not be the nil UUID"),
            Self::EmptyTitle => write!(f, "Title is required"),
            Self::EmptyJobTitle => write!(f, "Job title is required"),
            Self::EmptyContent => write!(f, "Content is required"),
            Self::EmptyName => write!(f, "Name is required"),
            Self::EmptyBody => write!(f, "Template body is required"),
        }
    }
}

impl Error for ValidationError {}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Used for server-side `created_at`/`updated_at` stamps.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
