//! Template action handlers.
//!
//! # Responsibility
//! - Provide create/update/list entry points for reusable templates.
//! - Resolve the system-vs-user ownership split at creation time.
//!
//! # Invariants
//! - A template created with `is_system` carries no owner and is visible
//!   to every caller.
//! - Accessibility for update/list is `LetterTemplate::accessible_by`:
//!   unowned templates pass for any authenticated caller, owned templates
//!   only for their owner. Inaccessible ids surface as `NotFound`.

use crate::action::{require_user, ActionError, ActionResult, RequestContext};
use crate::model::template::{LetterTemplate, TemplateId};
use crate::repo::template_repo::TemplateRepository;
use log::{debug, info};
use serde::{Deserialize, Serialize};

const TEMPLATE_NOT_FOUND: &str = "Template not found or not accessible.";

/// Response envelope for single-template operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub template: LetterTemplate,
}

/// Response envelope for the list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesResponse {
    pub templates: Vec<LetterTemplate>,
}

/// Input for `create_template`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateInput {
    pub id: Option<TemplateId>,
    pub name: String,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
    pub body: String,
    /// Defaults to `false`; `true` detaches the template from the caller.
    pub is_system: Option<bool>,
}

/// Partial-update input for `update_template`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateInput {
    pub id: TemplateId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
    pub body: Option<String>,
    pub is_system: Option<bool>,
}

impl UpdateTemplateInput {
    /// True when no patch field was supplied.
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.tone.is_none()
            && self.language.is_none()
            && self.body.is_none()
            && self.is_system.is_none()
    }

    /// Merges supplied fields into `template`, leaving the rest untouched.
    fn apply_to(self, template: &mut LetterTemplate) {
        if let Some(name) = self.name {
            template.name = name;
        }
        if let Some(description) = self.description {
            template.description = Some(description);
        }
        if let Some(tone) = self.tone {
            template.tone = Some(tone);
        }
        if let Some(language) = self.language {
            template.language = Some(language);
        }
        if let Some(body) = self.body {
            template.body = body;
        }
        if let Some(is_system) = self.is_system {
            template.is_system = is_system;
        }
    }
}

/// Action handlers for templates over any repository implementation.
pub struct TemplateActions<R: TemplateRepository> {
    repo: R,
}

impl<R: TemplateRepository> TemplateActions<R> {
    /// Creates the handler set using the provided repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a template; system templates carry no owner.
    ///
    /// # Errors
    /// - `Unauthorized` for an anonymous caller.
    /// - `InvalidInput` for an empty name or body.
    pub fn create_template(
        &self,
        ctx: &RequestContext,
        input: CreateTemplateInput,
    ) -> ActionResult<TemplateResponse> {
        let user = require_user(ctx)?;

        let is_system = input.is_system.unwrap_or(false);
        let owner = if is_system {
            None
        } else {
            Some(user.id.clone())
        };

        let mut template = match input.id {
            Some(id) => LetterTemplate::with_id(id, owner, input.name, input.body)?,
            None => LetterTemplate::new(owner, input.name, input.body),
        };
        template.description = input.description;
        template.tone = input.tone;
        template.language = input.language;
        template.is_system = is_system;

        self.repo.create_template(&template)?;
        info!(
            "event=template_create module=action status=ok template_id={} is_system={is_system}",
            template.uuid
        );

        Ok(TemplateResponse { template })
    }

    /// Merges supplied fields into an accessible template.
    ///
    /// The lookup is by id only; accessibility is decided afterwards, so a
    /// foreign template is indistinguishable from a missing one.
    ///
    /// # Errors
    /// - `NotFound` when the id is missing or owned by a different user.
    pub fn update_template(
        &self,
        ctx: &RequestContext,
        input: UpdateTemplateInput,
    ) -> ActionResult<TemplateResponse> {
        let user = require_user(ctx)?;

        let existing = self.repo.get_template(input.id)?;
        let Some(mut template) = existing.filter(|found| found.accessible_by(&user.id)) else {
            return Err(ActionError::NotFound {
                message: TEMPLATE_NOT_FOUND,
            });
        };

        if input.is_empty() {
            debug!(
                "event=template_update module=action status=noop template_id={}",
                template.uuid
            );
            return Ok(TemplateResponse { template });
        }

        input.apply_to(&mut template);
        self.repo.update_template(&template)?;
        debug!(
            "event=template_update module=action status=ok template_id={}",
            template.uuid
        );

        Ok(TemplateResponse { template })
    }

    /// Lists system templates together with the caller's own templates.
    pub fn list_templates(&self, ctx: &RequestContext) -> ActionResult<TemplatesResponse> {
        let user = require_user(ctx)?;

        let templates = self
            .repo
            .list_templates()?
            .into_iter()
            .filter(|template| template.accessible_by(&user.id))
            .collect();

        Ok(TemplatesResponse { templates })
    }
}
