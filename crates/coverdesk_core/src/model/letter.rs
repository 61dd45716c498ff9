//! Cover letter domain model.
//!
//! # Responsibility
//! - Define the canonical cover-letter record owned by exactly one user.
//! - Validate required fields before any persistence write.
//!
//! # Invariants
//! - `uuid` is stable, non-nil, and never reused for another letter.
//! - `user_id` identifies the single owner; reads and mutations are scoped
//!   to it by the repository layer.
//! - `updated_at >= created_at` after every successful mutation.

use crate::model::{now_epoch_ms, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a cover letter.
pub type LetterId = Uuid;

/// Canonical cover-letter record.
///
/// Optional fields stay `None` when the author never supplied them; the
/// wire shape is camelCase to match the external schema naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    /// Stable global ID used for linking and auditing.
    #[serde(rename = "id")]
    pub uuid: LetterId,
    /// Owning user; the ownership predicate pairs this with `uuid`.
    pub user_id: UserId,
    pub title: String,
    pub job_title: String,
    pub company_name: Option<String>,
    pub job_description: Option<String>,
    /// Free-form writing tone hint (e.g. "formal").
    pub tone: Option<String>,
    pub language: Option<String>,
    /// Letter body text.
    pub content: String,
    /// Free-form workflow marker (e.g. "draft", "submitted").
    pub status: Option<String>,
    /// Unix epoch milliseconds, set server-side at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every effective update.
    pub updated_at: i64,
}

impl CoverLetter {
    /// Creates a new letter with a generated stable ID and server timestamps.
    ///
    /// Optional fields are initialized to `None`.
    pub fn new(
        user_id: impl Into<UserId>,
        title: impl Into<String>,
        job_title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        // new_v4 never yields the nil UUID, so this cannot fail.
        Self::with_id(Uuid::new_v4(), user_id, title, job_title, content)
            .expect("generated uuid is non-nil")
    }

    /// Creates a letter with a caller-provided stable ID.
    ///
    /// Used when the client allocated the identity up front (offline draft,
    /// import). Rejects the nil UUID; other fields are validated on write.
    pub fn with_id(
        uuid: LetterId,
        user_id: impl Into<UserId>,
        title: impl Into<String>,
        job_title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        let now = now_epoch_ms();
        Ok(Self {
            uuid,
            user_id: user_id.into(),
            title: title.into(),
            job_title: job_title.into(),
            company_name: None,
            job_description: None,
            tone: None,
            language: None,
            content: content.into(),
            status: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks field-level invariants required before persistence.
    ///
    /// # Errors
    /// - `NilUuid` for a nil identity.
    /// - `EmptyTitle` / `EmptyJobTitle` / `EmptyContent` for blank
    ///   required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.job_title.is_empty() {
            return Err(ValidationError::EmptyJobTitle);
        }
        if self.content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(())
    }

    /// Returns whether `user` is the owner of this letter.
    pub fn owned_by(&self, user: &str) -> bool {
        self.user_id == user
    }
}
