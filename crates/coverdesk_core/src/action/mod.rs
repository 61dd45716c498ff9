//! Caller-facing action surface.
//!
//! # Responsibility
//! - Expose per-user CRUD handlers for letters and templates.
//! - Enforce authentication and ownership before any storage access.
//!
//! # Invariants
//! - The caller context is an explicit parameter, never ambient state.
//! - Every handler resolves `require_user` before touching a repository.
//! - "Does not exist" and "exists but not yours" both surface as
//!   `NOT_FOUND`, so handlers never leak record existence.

use crate::model::{UserId, ValidationError};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod letter_actions;
pub mod template_actions;

pub type ActionResult<T> = Result<T, ActionError>;

/// Authenticated principal attached to a request by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    /// Stable user identifier; this layer treats it as opaque.
    pub id: UserId,
}

/// Request-scoped caller context.
///
/// `user == None` models an unauthenticated request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user: Option<UserSession>,
}

impl RequestContext {
    /// Context for a signed-in caller.
    pub fn authenticated(user_id: impl Into<UserId>) -> Self {
        Self {
            user: Some(UserSession {
                id: user_id.into(),
            }),
        }
    }

    /// Context for an anonymous caller.
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

/// Resolves the caller or fails with `Unauthorized`.
///
/// Handlers call this before any storage access.
pub fn require_user(ctx: &RequestContext) -> ActionResult<&UserSession> {
    ctx.user.as_ref().ok_or(ActionError::Unauthorized)
}

/// Terminal handler outcome carrying a machine-readable code and a
/// human-readable message.
#[derive(Debug)]
pub enum ActionError {
    /// No caller identity was attached to the request.
    Unauthorized,
    /// Target record is absent or not accessible to the caller.
    NotFound { message: &'static str },
    /// Input failed a field-level constraint.
    InvalidInput(ValidationError),
    /// Storage-layer failure unrelated to the request semantics.
    Repo(RepoError),
}

impl ActionError {
    /// Machine-readable error code exposed to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidInput(_) => "BAD_REQUEST",
            Self::Repo(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => {
                write!(f, "You must be signed in to perform this action.")
            }
            Self::NotFound { message } => write!(f, "{message}"),
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ActionError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for ActionError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidInput(err),
            RepoError::NotFound(_) => Self::NotFound {
                message: "Record not found.",
            },
            other => Self::Repo(other),
        }
    }
}
