//! EveryNote Notes
//!
//! Owner-scoped create/read/update/delete for notes and the categories they
//! are filed under. Every operation first resolves the signed-in owner and
//! fails with `NotAuthenticated` when there is none.

mod category;
mod config;
mod error;
mod manager;
mod note;

pub use category::Category;
pub use config::{BlankUpdatePolicy, NotesConfig, DEFAULT_NOTE_TITLE};
pub use error::NotesError;
pub use manager::NotesManager;
pub use note::{NewNote, Note, NoteUpdate};

pub type Result<T> = std::result::Result<T, NotesError>;
