//! Session token storage
//!
//! Reads and writes the signed-in token in the store's settings table.

use everynote_storage::Database;

use crate::error::AuthError;
use crate::owner::OwnerId;
use crate::redirect::session_token_from_redirect;
use crate::Result;

/// Settings key holding the session token.
pub const TOKEN_KEY: &str = "userToken";

pub struct SessionStore {
    db: Database,
}

impl SessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The owner id of the signed-in session.
    ///
    /// Fails with [`AuthError::NotAuthenticated`] when no token is stored; a
    /// blank token counts as absent.
    pub fn current_owner_id(&self) -> Result<OwnerId> {
        self.db
            .get_setting(TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty())
            .map(OwnerId::new)
            .ok_or(AuthError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        match self.current_owner_id() {
            Ok(_) => Ok(true),
            Err(AuthError::NotAuthenticated) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.db.set_setting(TOKEN_KEY, token)?;
        tracing::info!("Stored session token");
        Ok(())
    }

    /// Store the token carried by the sign-in page's redirect URL and return
    /// the owner it identifies. Nothing is stored if the URL has no token.
    pub fn set_token_from_redirect(&self, redirect: &str) -> Result<OwnerId> {
        let token = session_token_from_redirect(redirect)?;
        self.set_token(&token)?;
        Ok(OwnerId::new(token))
    }

    pub fn clear_token(&self) -> Result<()> {
        self.db.delete_setting(TOKEN_KEY)?;
        tracing::info!("Cleared session token");
        Ok(())
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
