//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] everynote_storage::StorageError),

    #[error("Auth error: {0}")]
    Auth(#[from] everynote_auth::AuthError),

    #[error("Notes error: {0}")]
    Notes(#[from] everynote_notes::NotesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
