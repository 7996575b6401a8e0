//! Sign-in / sign-out flow
//!
//! Failures never reach the caller here: they are logged and reported as
//! `false`, leaving the stored token as it was.

use crate::error::AuthError;
use crate::store::SessionStore;
use crate::Result;

/// An interactive identity provider (e.g. a Google OAuth prompt).
pub trait IdentityProvider {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Run the provider's prompt and return its access token, or `None` if
    /// the user dismissed it.
    fn authenticate(&self) -> Result<Option<String>>;
}

pub struct AuthFlow<P> {
    session: SessionStore,
    provider: P,
}

impl<P: IdentityProvider> AuthFlow<P> {
    pub fn new(session: SessionStore, provider: P) -> Self {
        Self { session, provider }
    }

    pub fn sign_in(&self) -> bool {
        match self.try_sign_in() {
            Ok(signed_in) => signed_in,
            Err(e) => {
                tracing::error!(provider = self.provider.name(), error = %e, "Sign in failed");
                false
            }
        }
    }

    fn try_sign_in(&self) -> Result<bool> {
        let Some(token) = self.provider.authenticate()? else {
            tracing::info!(provider = self.provider.name(), "Sign in cancelled");
            return Ok(false);
        };

        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        self.session.set_token(&token)?;
        tracing::info!(provider = self.provider.name(), "Signed in");
        Ok(true)
    }

    /// Finish a server-side sign-in from the URL the sign-in page redirected
    /// to (see [`crate::sign_in_url`]).
    pub fn sign_in_with_redirect(&self, redirect: &str) -> bool {
        match self.session.set_token_from_redirect(redirect) {
            Ok(_) => {
                tracing::info!("Signed in from redirect");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Redirect sign in failed");
                false
            }
        }
    }

    pub fn sign_out(&self) -> bool {
        match self.session.clear_token() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Sign out failed");
                false
            }
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use everynote_storage::Database;

    enum Outcome {
        Token(&'static str),
        Cancelled,
        Failed,
    }

    struct FakeProvider(Outcome);

    impl IdentityProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        fn authenticate(&self) -> Result<Option<String>> {
            match self.0 {
                Outcome::Token(token) => Ok(Some(token.to_string())),
                Outcome::Cancelled => Ok(None),
                Outcome::Failed => Err(AuthError::Provider("popup blocked".to_string())),
            }
        }
    }

    fn flow(outcome: Outcome) -> AuthFlow<FakeProvider> {
        let session = SessionStore::new(Database::open_in_memory().unwrap());
        AuthFlow::new(session, FakeProvider(outcome))
    }

    #[test]
    fn test_sign_in_stores_token() {
        let flow = flow(Outcome::Token("access-1"));
        assert!(flow.sign_in());
        assert_eq!(flow.session().current_owner_id().unwrap().as_str(), "access-1");

        assert!(flow.sign_out());
        assert!(!flow.session().is_authenticated().unwrap());
    }

    #[test]
    fn test_cancelled_and_failed_sign_in() {
        let cancelled = flow(Outcome::Cancelled);
        assert!(!cancelled.sign_in());
        assert!(!cancelled.session().is_authenticated().unwrap());

        let failed = flow(Outcome::Failed);
        assert!(!failed.sign_in());
        assert!(!failed.session().is_authenticated().unwrap());

        let blank = flow(Outcome::Token(""));
        assert!(!blank.sign_in());
    }

    #[test]
    fn test_sign_out_without_token_succeeds() {
        let flow = flow(Outcome::Cancelled);
        assert!(flow.sign_out());
    }

    #[test]
    fn test_sign_in_with_redirect() {
        let flow = flow(Outcome::Cancelled);
        let url = crate::sign_in_url("http://localhost:3000", "everynote://login").unwrap();
        assert_eq!(url.query_pairs().count(), 1);

        assert!(!flow.sign_in_with_redirect("everynote://login"));
        assert!(!flow.session().is_authenticated().unwrap());

        assert!(flow.sign_in_with_redirect("everynote://login?session_token=srv-7"));
        assert_eq!(flow.session().current_owner_id().unwrap().as_str(), "srv-7");
    }
}
