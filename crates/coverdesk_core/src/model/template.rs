//! Reusable cover-letter template model.
//!
//! # Responsibility
//! - Define the template record shared between system and user scopes.
//! - Provide the accessibility predicate used by update/list use-cases.
//!
//! # Invariants
//! - `uuid` is stable, non-nil, and never reused for another template.
//! - `user_id == None` marks a system-wide template visible to all users.

use crate::model::{now_epoch_ms, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a template.
pub type TemplateId = Uuid;

/// Canonical template record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterTemplate {
    /// Stable global ID.
    #[serde(rename = "id")]
    pub uuid: TemplateId,
    /// Owner, or `None` for a system-wide template.
    pub user_id: Option<UserId>,
    pub name: String,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
    /// Template body text applied when drafting a letter.
    pub body: String,
    /// Marks templates shipped with the product rather than user-authored.
    pub is_system: bool,
    /// Unix epoch milliseconds, set server-side at creation.
    pub created_at: i64,
}

impl LetterTemplate {
    /// Creates a new template with a generated stable ID.
    ///
    /// `user_id == None` together with `is_system = true` denotes a
    /// system template; callers decide that pairing at the action layer.
    pub fn new(
        user_id: Option<UserId>,
        name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), user_id, name, body).expect("generated uuid is non-nil")
    }

    /// Creates a template with a caller-provided stable ID.
    pub fn with_id(
        uuid: TemplateId,
        user_id: Option<UserId>,
        name: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            user_id,
            name: name.into(),
            description: None,
            tone: None,
            language: None,
            body: body.into(),
            is_system: false,
            created_at: now_epoch_ms(),
        })
    }

    /// Checks field-level invariants required before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.body.is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(())
    }

    /// Returns whether `user` may see (and, as implemented, mutate) this
    /// template: unowned templates are accessible to everyone.
    pub fn accessible_by(&self, user: &str) -> bool {
        match self.user_id.as_deref() {
            None => true,
            Some(owner) => owner == user,
        }
    }
}
