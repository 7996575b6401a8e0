//! Application context
//!
//! Built once at process start and passed to whatever needs the store. There
//! is no global database handle or ambient session.

use everynote_auth::{AuthFlow, IdentityProvider, SessionStore};
use everynote_notes::NotesManager;
use everynote_storage::Database;

use crate::config::Config;
use crate::home::HomeScreen;
use crate::Result;

pub struct App {
    config: Config,
    session: SessionStore,
    notes: NotesManager,
}

impl App {
    /// Open the store at `config.database_path`, creating its directory.
    ///
    /// Failure here is fatal: there is no degraded mode without a store.
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db))
    }

    pub fn with_database(config: Config, db: Database) -> Self {
        let session = SessionStore::new(db.clone());
        let notes = NotesManager::new(db, session.clone(), config.notes.clone());

        tracing::info!(
            database = %config.database_path.display(),
            blank_updates = ?config.notes.blank_updates,
            verify_owner_on_mutation = config.notes.verify_owner_on_mutation,
            "EveryNote initialized"
        );

        Self {
            config,
            session,
            notes,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn notes(&self) -> &NotesManager {
        &self.notes
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session.is_authenticated()?)
    }

    pub fn auth_flow<P: IdentityProvider>(&self, provider: P) -> AuthFlow<P> {
        AuthFlow::new(self.session.clone(), provider)
    }

    pub fn home_screen(&self) -> HomeScreen {
        HomeScreen::new(self.notes.clone())
    }
}
