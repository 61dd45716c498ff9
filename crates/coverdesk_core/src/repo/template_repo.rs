//! Template repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD persistence for `cover_letter_templates`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `LetterTemplate::validate()` before SQL mutations.
//! - Reads are by id only; visibility (system vs. user-owned) is decided
//!   by the action layer via `LetterTemplate::accessible_by`.

use crate::model::template::{LetterTemplate, TemplateId};
use crate::repo::{bool_to_int, ensure_connection_ready, int_to_bool, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TEMPLATE_SELECT_SQL: &str = "SELECT
    uuid,
    user_id,
    name,
    description,
    tone,
    language,
    body,
    is_system,
    created_at
FROM cover_letter_templates";

const TEMPLATE_COLUMNS: &[&str] = &[
    "uuid",
    "user_id",
    "name",
    "description",
    "tone",
    "language",
    "body",
    "is_system",
    "created_at",
];

/// Repository interface for template CRUD operations.
pub trait TemplateRepository {
    /// Persists a new template.
    fn create_template(&self, template: &LetterTemplate) -> RepoResult<()>;
    /// Gets one template by id, regardless of owner.
    fn get_template(&self, id: TemplateId) -> RepoResult<Option<LetterTemplate>>;
    /// Lists every stored template, newest first.
    fn list_templates(&self) -> RepoResult<Vec<LetterTemplate>>;
    /// Replaces the stored template with the same id as `template`.
    fn update_template(&self, template: &LetterTemplate) -> RepoResult<()>;
}

/// SQLite-backed template repository.
pub struct SqliteTemplateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTemplateRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "cover_letter_templates", TEMPLATE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TemplateRepository for SqliteTemplateRepository<'_> {
    fn create_template(&self, template: &LetterTemplate) -> RepoResult<()> {
        template.validate()?;

        self.conn.execute(
            "INSERT INTO cover_letter_templates (
                uuid,
                user_id,
                name,
                description,
                tone,
                language,
                body,
                is_system,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                template.uuid.to_string(),
                template.user_id.as_deref(),
                template.name.as_str(),
                template.description.as_deref(),
                template.tone.as_deref(),
                template.language.as_deref(),
                template.body.as_str(),
                bool_to_int(template.is_system),
                template.created_at,
            ],
        )?;

        Ok(())
    }

    fn get_template(&self, id: TemplateId) -> RepoResult<Option<LetterTemplate>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEMPLATE_SELECT_SQL} WHERE uuid = ?1 LIMIT 1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_template_row(row)?));
        }

        Ok(None)
    }

    fn list_templates(&self) -> RepoResult<Vec<LetterTemplate>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TEMPLATE_SELECT_SQL} ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut templates = Vec::new();
        while let Some(row) = rows.next()? {
            templates.push(parse_template_row(row)?);
        }

        Ok(templates)
    }

    fn update_template(&self, template: &LetterTemplate) -> RepoResult<()> {
        template.validate()?;

        let changed = self.conn.execute(
            "UPDATE cover_letter_templates
             SET
                user_id = ?1,
                name = ?2,
                description = ?3,
                tone = ?4,
                language = ?5,
                body = ?6,
                is_system = ?7
             WHERE uuid = ?8;",
            params![
                template.user_id.as_deref(),
                template.name.as_str(),
                template.description.as_deref(),
                template.tone.as_deref(),
                template.language.as_deref(),
                template.body.as_str(),
                bool_to_int(template.is_system),
                template.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(template.uuid));
        }

        Ok(())
    }
}

fn parse_template_row(row: &Row<'_>) -> RepoResult<LetterTemplate> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in cover_letter_templates.uuid"
        ))
    })?;

    let is_system = int_to_bool(
        row.get::<_, i64>("is_system")?,
        "cover_letter_templates",
        "is_system",
    )?;

    let template = LetterTemplate {
        uuid,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        tone: row.get("tone")?,
        language: row.get("language")?,
        body: row.get("body")?,
        is_system,
        created_at: row.get("created_at")?,
    };
    template.validate()?;
    Ok(template)
}
