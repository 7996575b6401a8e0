use chrono::{DateTime, Utc};
use everynote_auth::OwnerId;
use everynote_storage::parse_timestamp;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::config::BlankUpdatePolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// `None` means uncategorized. May point at a deleted category.
    pub category_id: Option<i64>,
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub(crate) const COLUMNS: &'static str =
        "id, title, content, category_id, user_id, created_at, updated_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let created_str: String = row.get(5)?;
        let updated_str: String = row.get(6)?;

        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            category_id: row.get(3)?,
            owner_id: OwnerId::new(row.get::<_, String>(4)?),
            created_at: parse_timestamp(5, &created_str)?,
            updated_at: parse_timestamp(6, &updated_str)?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category_id: None,
        }
    }

    pub fn in_category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }
}

/// Partial note update. Fields left as `None` keep their stored value.
///
/// `category_id` is doubly optional: `Some(None)` moves the note to
/// uncategorized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<Option<i64>>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category_id.is_none()
    }

    /// Drop empty-string fields when the policy says to skip them.
    pub(crate) fn with_policy(mut self, policy: BlankUpdatePolicy) -> Self {
        if policy == BlankUpdatePolicy::Skip {
            self.title = self.title.filter(|t| !t.is_empty());
            self.content = self.content.filter(|c| !c.is_empty());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_policy_drops_empty_strings_only() {
        let update = NoteUpdate::new().title("").content("").category(None);

        let skipped = update.clone().with_policy(BlankUpdatePolicy::Skip);
        assert_eq!(skipped, NoteUpdate::new().category(None));

        let applied = update.clone().with_policy(BlankUpdatePolicy::Apply);
        assert_eq!(applied, update);
    }

    #[test]
    fn test_whitespace_is_not_skipped() {
        let update = NoteUpdate::new().content("  ");
        let skipped = update.with_policy(BlankUpdatePolicy::Skip);
        assert_eq!(skipped.content.as_deref(), Some("  "));
    }
}
