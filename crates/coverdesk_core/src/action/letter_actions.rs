//! Cover-letter action handlers.
//!
//! # Responsibility
//! - Provide create/update/list/delete entry points scoped to the caller.
//! - Apply the partial-update merge policy: only supplied fields overwrite
//!   stored values.
//!
//! # Invariants
//! - Ownership is enforced through the repository's id + owner predicate.
//! - An empty patch is a no-op: the stored row is returned unchanged and
//!   `updated_at` is not refreshed.

use crate::action::{require_user, ActionError, ActionResult, RequestContext};
use crate::model::letter::{CoverLetter, LetterId};
use crate::model::now_epoch_ms;
use crate::repo::letter_repo::LetterRepository;
use log::{debug, info};
use serde::{Deserialize, Serialize};

const LETTER_NOT_FOUND: &str = "Cover letter not found.";

/// Response envelope for single-letter operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: CoverLetter,
}

/// Response envelope for the list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLettersResponse {
    pub cover_letters: Vec<CoverLetter>,
}

/// Input for `create_cover_letter`.
///
/// `id` is optional: omitted ids are generated server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoverLetterInput {
    pub id: Option<LetterId>,
    pub title: String,
    pub job_title: String,
    pub company_name: Option<String>,
    pub job_description: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
    pub content: String,
    pub status: Option<String>,
}

/// Partial-update input for `update_cover_letter`.
///
/// `None` means "leave the stored value untouched".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoverLetterInput {
    pub id: LetterId,
    pub title: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_description: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
}

impl UpdateCoverLetterInput {
    /// True when no patch field was supplied.
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.job_title.is_none()
            && self.company_name.is_none()
            && self.job_description.is_none()
            && self.tone.is_none()
            && self.language.is_none()
            && self.content.is_none()
            && self.status.is_none()
    }

    /// Merges supplied fields into `letter`, leaving the rest untouched.
    fn apply_to(self, letter: &mut CoverLetter) {
        if let Some(title) = self.title {
            letter.title = title;
        }
        if let Some(job_title) = self.job_title {
            letter.job_title = job_title;
        }
        if let Some(company_name) = self.company_name {
            letter.company_name = Some(company_name);
        }
        if let Some(job_description) = self.job_description {
            letter.job_description = Some(job_description);
        }
        if let Some(tone) = self.tone {
            letter.tone = Some(tone);
        }
        if let Some(language) = self.language {
            letter.language = Some(language);
        }
        if let Some(content) = self.content {
            letter.content = content;
        }
        if let Some(status) = self.status {
            letter.status = Some(status);
        }
    }
}

/// Action handlers for cover letters over any repository implementation.
pub struct LetterActions<R: LetterRepository> {
    repo: R,
}

impl<R: LetterRepository> LetterActions<R> {
    /// Creates the handler set using the provided repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a letter owned by the caller with server timestamps.
    ///
    /// # Errors
    /// - `Unauthorized` for an anonymous caller.
    /// - `InvalidInput` for an empty title, job title, or content.
    pub fn create_cover_letter(
        &self,
        ctx: &RequestContext,
        input: CreateCoverLetterInput,
    ) -> ActionResult<CoverLetterResponse> {
        let user = require_user(ctx)?;

        let mut letter = match input.id {
            Some(id) => CoverLetter::with_id(
                id,
                user.id.clone(),
                input.title,
                input.job_title,
                input.content,
            )?,
            None => CoverLetter::new(user.id.clone(), input.title, input.job_title, input.content),
        };
        letter.company_name = input.company_name;
        letter.job_description = input.job_description;
        letter.tone = input.tone;
        letter.language = input.language;
        letter.status = input.status;

        self.repo.create_letter(&letter)?;
        info!(
            "event=letter_create module=action status=ok letter_id={} user_id={}",
            letter.uuid, user.id
        );

        Ok(CoverLetterResponse {
            cover_letter: letter,
        })
    }

    /// Merges supplied fields into the caller's letter.
    ///
    /// An empty patch returns the stored row unchanged; otherwise
    /// `updated_at` is refreshed alongside the merge.
    ///
    /// # Errors
    /// - `NotFound` when no letter matches id + caller.
    pub fn update_cover_letter(
        &self,
        ctx: &RequestContext,
        input: UpdateCoverLetterInput,
    ) -> ActionResult<CoverLetterResponse> {
        let user = require_user(ctx)?;

        let Some(mut letter) = self.repo.get_letter(input.id, &user.id)? else {
            return Err(ActionError::NotFound {
                message: LETTER_NOT_FOUND,
            });
        };

        if input.is_empty() {
            debug!(
                "event=letter_update module=action status=noop letter_id={} user_id={}",
                letter.uuid, user.id
            );
            return Ok(CoverLetterResponse {
                cover_letter: letter,
            });
        }

        input.apply_to(&mut letter);
        letter.updated_at = now_epoch_ms();
        // Ownership is re-checked by the repository predicate; a concurrent
        // delete between the read above and this write surfaces as NotFound.
        self.repo.update_letter(&letter)?;
        debug!(
            "event=letter_update module=action status=ok letter_id={} user_id={}",
            letter.uuid, user.id
        );

        Ok(CoverLetterResponse {
            cover_letter: letter,
        })
    }

    /// Lists every letter owned by the caller.
    pub fn list_cover_letters(&self, ctx: &RequestContext) -> ActionResult<CoverLettersResponse> {
        let user = require_user(ctx)?;
        let cover_letters = self.repo.list_letters(&user.id)?;
        Ok(CoverLettersResponse { cover_letters })
    }

    /// Deletes the caller's letter and returns the deleted row.
    ///
    /// # Errors
    /// - `NotFound` when no letter matches id + caller.
    pub fn delete_cover_letter(
        &self,
        ctx: &RequestContext,
        id: LetterId,
    ) -> ActionResult<CoverLetterResponse> {
        let user = require_user(ctx)?;

        let Some(letter) = self.repo.get_letter(id, &user.id)? else {
            return Err(ActionError::NotFound {
                message: LETTER_NOT_FOUND,
            });
        };

        self.repo.delete_letter(id, &user.id)?;
        info!(
            "event=letter_delete module=action status=ok letter_id={id} user_id={}",
            user.id
        );

        Ok(CoverLetterResponse {
            cover_letter: letter,
        })
    }
}
