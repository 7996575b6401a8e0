//! EveryNote Core
//!
//! Builds the application context once at start (config, store, session,
//! notes) and hands it to the screens. Screens hold no persistence logic.

mod app;
mod config;
mod error;
mod filter;
mod home;

pub use app::App;
pub use config::Config;
pub use error::CoreError;
pub use filter::{filter_notes, NoteFilter};
pub use home::HomeScreen;

// Re-export core components
pub use everynote_auth::{
    session_token_from_redirect, sign_in_url, AuthError, AuthFlow, IdentityProvider, OwnerId,
    SessionStore,
};
pub use everynote_notes::{
    BlankUpdatePolicy, Category, NewNote, Note, NoteUpdate, NotesConfig, NotesError,
    NotesManager,
};
pub use everynote_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if fmt().with_env_filter(filter).with_target(true).try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging("debug");
        init_logging("info");
        tracing::info!("Logging still usable after second init");
    }
}
