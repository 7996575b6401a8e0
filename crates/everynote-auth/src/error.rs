//! Auth error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("No session token found")]
    MissingToken,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Storage error: {0}")]
    Storage(#[from] everynote_storage::StorageError),
}
