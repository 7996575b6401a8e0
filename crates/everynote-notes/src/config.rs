//! Notes behaviour switches

use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTE_TITLE: &str = "Untitled Note";

/// How `update_note` treats a title or content explicitly set to `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankUpdatePolicy {
    /// Write the empty value like any other.
    #[default]
    Apply,
    /// Leave the stored value alone, as if the field had not been supplied.
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Title given to notes created with a blank title.
    pub default_title: String,
    pub blank_updates: BlankUpdatePolicy,
    /// When set, update/delete by id also require the row to belong to the
    /// signed-in owner. Off by default: the id alone selects the row.
    pub verify_owner_on_mutation: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_NOTE_TITLE.to_string(),
            blank_updates: BlankUpdatePolicy::Apply,
            verify_owner_on_mutation: false,
        }
    }
}
