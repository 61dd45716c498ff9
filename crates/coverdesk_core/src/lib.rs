//! Data-access core for the coverdesk cover-letter authoring tool.
//! This crate is the single source of truth for ownership invariants.

pub mod action;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use action::letter_actions::{
    CoverLetterResponse, CoverLettersResponse, CreateCoverLetterInput, LetterActions,
    UpdateCoverLetterInput,
};
pub use action::template_actions::{
    CreateTemplateInput, TemplateActions, TemplateResponse, TemplatesResponse,
    UpdateTemplateInput,
};
pub use action::{ActionError, ActionResult, RequestContext, UserSession};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::letter::{CoverLetter, LetterId};
pub use model::template::{LetterTemplate, TemplateId};
pub use model::{UserId, ValidationError};
pub use repo::letter_repo::{LetterRepository, SqliteLetterRepository};
pub use repo::template_repo::{SqliteTemplateRepository, TemplateRepository};
pub use repo::{RepoError, RepoResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
