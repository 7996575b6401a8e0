//! Notes Manager
//!
//! Reads are always filtered by the signed-in owner. Update and delete by id
//! add the owner predicate only when `verify_owner_on_mutation` is set.

use rusqlite::types::Value;
use rusqlite::OptionalExtension;

use everynote_auth::{OwnerId, SessionStore};
use everynote_storage::{now_timestamp, Database};

use crate::category::Category;
use crate::config::NotesConfig;
use crate::error::NotesError;
use crate::note::{NewNote, Note, NoteUpdate};
use crate::Result;

/// One millisecond past the owner's latest note write. Writes are stamped
/// with `MAX(now, this)`, so each owner's note stamps strictly increase and
/// "most recently updated" survives same-millisecond writes and clock steps.
const NEXT_NOTE_STAMP: &str = "COALESCE((SELECT strftime('%Y-%m-%dT%H:%M:%fZ', MAX(latest.updated_at), '+0.001 seconds')
    FROM notes AS latest WHERE latest.user_id = {owner}), '')";

fn next_note_stamp(owner: &str) -> String {
    NEXT_NOTE_STAMP.replace("{owner}", owner)
}

pub struct NotesManager {
    db: Database,
    session: SessionStore,
    config: NotesConfig,
}

impl NotesManager {
    pub fn new(db: Database, session: SessionStore, config: NotesConfig) -> Self {
        Self {
            db,
            session,
            config,
        }
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    fn owner(&self) -> Result<OwnerId> {
        Ok(self.session.current_owner_id()?)
    }

    /// Predicate and parameter restricting a by-id mutation to `owner`, if configured.
    fn mutation_scope(&self, owner: &OwnerId) -> Option<Value> {
        self.config
            .verify_owner_on_mutation
            .then(|| Value::Text(owner.to_string()))
    }

    /// Reject a category that exists but belongs to someone else. Missing
    /// categories are left for the foreign key to report.
    fn ensure_category_visible(&self, category_id: i64, owner: &OwnerId) -> Result<()> {
        let category_owner: Option<String> = self.db.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT user_id FROM categories WHERE id = ?1",
                    [category_id],
                    |row| row.get(0),
                )
                .optional()?)
        })?;

        match category_owner {
            Some(other) if other != owner.as_str() => Err(NotesError::CategoryNotFound(category_id)),
            _ => Ok(()),
        }
    }

    // === Notes ===

    pub fn create_note(&self, new_note: NewNote) -> Result<Note> {
        let owner = self.owner()?;

        if let Some(category_id) = new_note.category_id {
            self.ensure_category_visible(category_id, &owner)?;
        }

        let title = if new_note.title.trim().is_empty() {
            self.config.default_title.clone()
        } else {
            new_note.title
        };
        let now = now_timestamp();

        let note = self.db.transaction(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO notes (title, content, category_id, user_id, created_at, updated_at)
                     SELECT ?1, ?2, ?3, ?4, stamp, stamp
                     FROM (SELECT MAX(?5, {}) AS stamp)",
                    next_note_stamp("?4")
                ),
                rusqlite::params![
                    title,
                    new_note.content,
                    new_note.category_id,
                    owner.as_str(),
                    now
                ],
            )?;
            let id = conn.last_insert_rowid();

            Ok(conn.query_row(
                &format!("SELECT {} FROM notes WHERE id = ?1", Note::COLUMNS),
                [id],
                Note::from_row,
            )?)
        })?;

        tracing::info!(
            note_id = note.id,
            category_id = ?note.category_id,
            "Created note"
        );

        Ok(note)
    }

    pub fn get_note(&self, id: i64) -> Result<Note> {
        let owner = self.owner()?;

        self.db
            .with_connection(|conn| {
                Ok(conn
                    .query_row(
                        &format!(
                            "SELECT {} FROM notes WHERE id = ?1 AND user_id = ?2",
                            Note::COLUMNS
                        ),
                        rusqlite::params![id, owner.as_str()],
                        Note::from_row,
                    )
                    .optional()?)
            })?
            .ok_or(NotesError::NoteNotFound(id))
    }

    /// Apply the supplied fields and refresh `updated_at`. An empty update
    /// still refreshes `updated_at`.
    pub fn update_note(&self, id: i64, update: NoteUpdate) -> Result<Note> {
        let owner = self.owner()?;
        let update = update.with_policy(self.config.blank_updates);

        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(NotesError::EmptyTitle);
        }
        if let Some(Some(category_id)) = update.category_id {
            self.ensure_category_visible(category_id, &owner)?;
        }

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(title) = update.title {
            sets.push("title = ?");
            values.push(Value::Text(title));
        }
        if let Some(content) = update.content {
            sets.push("content = ?");
            values.push(Value::Text(content));
        }
        if let Some(category_id) = update.category_id {
            sets.push("category_id = ?");
            values.push(category_id.map(Value::Integer).unwrap_or(Value::Null));
        }

        // The row's own previous stamp is part of the owner's latest, so this
        // also moves strictly past the old updated_at (and so past created_at)
        let stamp = format!("updated_at = MAX(?, {})", next_note_stamp("notes.user_id"));
        sets.push(&stamp);
        values.push(Value::Text(now_timestamp()));

        let mut sql = format!("UPDATE notes SET {} WHERE id = ?", sets.join(", "));
        values.push(Value::Integer(id));
        if let Some(scope) = self.mutation_scope(&owner) {
            sql.push_str(" AND user_id = ?");
            values.push(scope);
        }

        let note = self
            .db
            .transaction(|conn| {
                let changed = conn.execute(&sql, rusqlite::params_from_iter(values.iter()))?;
                if changed == 0 {
                    return Ok(None);
                }

                Ok(Some(conn.query_row(
                    &format!("SELECT {} FROM notes WHERE id = ?1", Note::COLUMNS),
                    [id],
                    Note::from_row,
                )?))
            })?
            .ok_or(NotesError::NoteNotFound(id))?;

        tracing::info!(note_id = id, "Updated note");

        Ok(note)
    }

    /// Delete a note. Deleting an id that does not exist is a no-op.
    pub fn delete_note(&self, id: i64) -> Result<()> {
        let owner = self.owner()?;
        let scope = self.mutation_scope(&owner);

        let removed = self.db.with_connection(|conn| {
            let removed = match &scope {
                Some(scope) => conn.execute(
                    "DELETE FROM notes WHERE id = ?1 AND user_id = ?2",
                    rusqlite::params![id, scope],
                )?,
                None => conn.execute("DELETE FROM notes WHERE id = ?1", [id])?,
            };
            Ok(removed)
        })?;

        tracing::info!(note_id = id, removed, "Deleted note");

        Ok(())
    }

    /// All of the owner's notes, most recently updated first.
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let owner = self.owner()?;

        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM notes
                 WHERE user_id = ?1
                 ORDER BY updated_at DESC, id DESC",
                Note::COLUMNS
            ))?;

            let notes = stmt
                .query_map([owner.as_str()], Note::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(notes)
        })?)
    }

    pub fn list_notes_by_category(&self, category_id: i64) -> Result<Vec<Note>> {
        let owner = self.owner()?;

        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM notes
                 WHERE user_id = ?1 AND category_id = ?2
                 ORDER BY updated_at DESC, id DESC",
                Note::COLUMNS
            ))?;

            let notes = stmt
                .query_map(rusqlite::params![owner.as_str(), category_id], Note::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(notes)
        })?)
    }

    // === Categories ===

    pub fn create_category(&self, name: &str) -> Result<Category> {
        let owner = self.owner()?;
        if name.trim().is_empty() {
            return Err(NotesError::EmptyName);
        }
        let now = now_timestamp();

        let category = self.db.transaction(|conn| {
            conn.execute(
                "INSERT INTO categories (name, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)",
                rusqlite::params![name, owner.as_str(), now],
            )?;
            let id = conn.last_insert_rowid();

            Ok(conn.query_row(
                &format!("SELECT {} FROM categories WHERE id = ?1", Category::COLUMNS),
                [id],
                Category::from_row,
            )?)
        })?;

        tracing::info!(
            category_id = category.id,
            category_name = %category.name,
            "Created category"
        );

        Ok(category)
    }

    pub fn update_category(&self, id: i64, name: &str) -> Result<Category> {
        let owner = self.owner()?;
        if name.trim().is_empty() {
            return Err(NotesError::EmptyName);
        }

        let mut sql =
            "UPDATE categories
             SET name = ?,
                 updated_at = MAX(?, strftime('%Y-%m-%dT%H:%M:%fZ', updated_at, '+0.001 seconds'))
             WHERE id = ?"
                .to_string();
        let mut values = vec![
            Value::Text(name.to_string()),
            Value::Text(now_timestamp()),
            Value::Integer(id),
        ];
        if let Some(scope) = self.mutation_scope(&owner) {
            sql.push_str(" AND user_id = ?");
            values.push(scope);
        }

        let category = self
            .db
            .transaction(|conn| {
                let changed = conn.execute(&sql, rusqlite::params_from_iter(values.iter()))?;
                if changed == 0 {
                    return Ok(None);
                }

                Ok(Some(conn.query_row(
                    &format!("SELECT {} FROM categories WHERE id = ?1", Category::COLUMNS),
                    [id],
                    Category::from_row,
                )?))
            })?
            .ok_or(NotesError::CategoryNotFound(id))?;

        tracing::info!(category_id = id, category_name = %category.name, "Renamed category");

        Ok(category)
    }

    /// Delete a category. Notes filed under it are kept and keep pointing at
    /// the removed id.
    pub fn delete_category(&self, id: i64) -> Result<()> {
        let owner = self.owner()?;
        let scope = self.mutation_scope(&owner);

        let removed = self.db.with_foreign_keys_suspended(|conn| {
            let removed = match &scope {
                Some(scope) => conn.execute(
                    "DELETE FROM categories WHERE id = ?1 AND user_id = ?2",
                    rusqlite::params![id, scope],
                )?,
                None => conn.execute("DELETE FROM categories WHERE id = ?1", [id])?,
            };
            Ok(removed)
        })?;

        tracing::info!(category_id = id, removed, "Deleted category");

        Ok(())
    }

    /// All of the owner's categories by name (byte-wise ascending), ties by id.
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let owner = self.owner()?;

        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM categories
                 WHERE user_id = ?1
                 ORDER BY name ASC, id ASC",
                Category::COLUMNS
            ))?;

            let categories = stmt
                .query_map([owner.as_str()], Category::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(categories)
        })?)
    }
}

impl Clone for NotesManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            session: self.session.clone(),
            config: self.config.clone(),
        }
    }
}
