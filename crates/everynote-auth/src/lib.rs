//! EveryNote Session Identity
//!
//! The signed-in user is identified by an opaque token kept in local
//! key-value storage. That token is the owner id every note and category is
//! scoped by. The OAuth exchange that produces it is delegated to an
//! [`IdentityProvider`].

mod error;
mod flow;
mod owner;
mod redirect;
mod store;

pub use error::AuthError;
pub use flow::{AuthFlow, IdentityProvider};
pub use owner::OwnerId;
pub use redirect::{session_token_from_redirect, sign_in_url};
pub use store::{SessionStore, TOKEN_KEY};

pub type Result<T> = std::result::Result<T, AuthError>;
