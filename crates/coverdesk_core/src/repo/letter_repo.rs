//! Cover-letter repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD persistence for `cover_letters`, always scoped by the
//!   ownership predicate (`uuid` + `user_id`).
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `CoverLetter::validate()` before SQL mutations.
//! - Every read and mutation filters on the owning user; no API on this
//!   trait can return another user's letter.

use crate::model::letter::{CoverLetter, LetterId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const LETTER_SELECT_SQL: &str = "SELECT
    uuid,
    user_id,
    title,
    job_title,
    company_name,
    job_description,
    tone,
    language,
    content,
    status,
    created_at,
    updated_at
FROM cover_letters";

const LETTER_COLUMNS: &[&str] = &[
    "uuid",
    "user_id",
    "title",
    "job_title",
    "company_name",
    "job_description",
    "tone",
    "language",
    "content",
    "status",
    "created_at",
    "updated_at",
];

/// Repository interface for cover-letter CRUD operations.
pub trait LetterRepository {
    /// Persists a new letter.
    fn create_letter(&self, letter: &CoverLetter) -> RepoResult<()>;
    /// Gets one letter matching id + owner.
    fn get_letter(&self, id: LetterId, owner: &str) -> RepoResult<Option<CoverLetter>>;
    /// Lists all letters owned by `owner`, newest update first.
    fn list_letters(&self, owner: &str) -> RepoResult<Vec<CoverLetter>>;
    /// Replaces a stored letter matching id + owner with `letter`.
    fn update_letter(&self, letter: &CoverLetter) -> RepoResult<()>;
    /// Deletes the letter matching id + owner.
    fn delete_letter(&self, id: LetterId, owner: &str) -> RepoResult<()>;
}

/// SQLite-backed cover-letter repository.
pub struct SqliteLetterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLetterRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "cover_letters", LETTER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl LetterRepository for SqliteLetterRepository<'_> {
    fn create_letter(&self, letter: &CoverLetter) -> RepoResult<()> {
        letter.validate()?;

        self.conn.execute(
            "INSERT INTO cover_letters (
                uuid,
                user_id,
                title,
                job_title,
                company_name,
                job_description,
                tone,
                language,
                content,
                status,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                letter.uuid.to_string(),
                letter.user_id.as_str(),
                letter.title.as_str(),
                letter.job_title.as_str(),
                letter.company_name.as_deref(),
                letter.job_description.as_deref(),
                letter.tone.as_deref(),
                letter.language.as_deref(),
                letter.content.as_str(),
                letter.status.as_deref(),
                letter.created_at,
                letter.updated_at,
            ],
        )?;

        Ok(())
    }

    fn get_letter(&self, id: LetterId, owner: &str) -> RepoResult<Option<CoverLetter>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LETTER_SELECT_SQL}
             WHERE uuid = ?1 AND user_id = ?2
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), owner])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_letter_row(row)?));
        }

        Ok(None)
    }

    fn list_letters(&self, owner: &str) -> RepoResult<Vec<CoverLetter>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LETTER_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY updated_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([owner])?;
        let mut letters = Vec::new();
        while let Some(row) = rows.next()? {
            letters.push(parse_letter_row(row)?);
        }

        Ok(letters)
    }

    fn update_letter(&self, letter: &CoverLetter) -> RepoResult<()> {
        letter.validate()?;

        let changed = self.conn.execute(
            "UPDATE cover_letters
             SET
                title = ?1,
                job_title = ?2,
                company_name = ?3,
                job_description = ?4,
                tone = ?5,
                language = ?6,
                content = ?7,
                status = ?8,
                updated_at = ?9
             WHERE uuid = ?10 AND user_id = ?11;",
            params![
                letter.title.as_str(),
                letter.job_title.as_str(),
                letter.company_name.as_deref(),
                letter.job_description.as_deref(),
                letter.tone.as_deref(),
                letter.language.as_deref(),
                letter.content.as_str(),
                letter.status.as_deref(),
                letter.updated_at,
                letter.uuid.to_string(),
                letter.user_id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(letter.uuid));
        }

        Ok(())
    }

    fn delete_letter(&self, id: LetterId, owner: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM cover_letters WHERE uuid = ?1 AND user_id = ?2;",
            params![id.to_string(), owner],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_letter_row(row: &Row<'_>) -> RepoResult<CoverLetter> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in cover_letters.uuid"
        ))
    })?;

    let letter = CoverLetter {
        uuid,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        job_title: row.get("job_title")?,
        company_name: row.get("company_name")?,
        job_description: row.get("job_description")?,
        tone: row.get("tone")?,
        language: row.get("language")?,
        content: row.get("content")?,
        status: row.get("status")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    letter.validate()?;
    Ok(letter)
}
