//! Notes error types

use everynote_auth::AuthError;
use everynote_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("Category name cannot be empty")]
    EmptyName,

    #[error("Note title cannot be empty")]
    EmptyTitle,

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl NotesError {
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, NotesError::Auth(AuthError::NotAuthenticated))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, NotesError::Storage(e) if e.is_constraint_violation())
    }
}
