//! Client-side note filtering
//!
//! Applied to an already-loaded note list; nothing here touches the store.

use everynote_notes::Note;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against title and content.
    pub search: String,
    /// `None` shows every category, including uncategorized notes.
    pub category_id: Option<i64>,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        self.matches_search(note) && self.matches_category(note)
    }

    fn matches_search(&self, note: &Note) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        note.title.to_lowercase().contains(&needle) || note.content.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, note: &Note) -> bool {
        match self.category_id {
            Some(category_id) => note.category_id == Some(category_id),
            None => true,
        }
    }
}

/// Notes passing `filter`, in list order.
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    notes.iter().filter(|note| filter.matches(note)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use everynote_auth::OwnerId;

    fn note(id: i64, title: &str, content: &str, category_id: Option<i64>) -> Note {
        let now = Utc::now();
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            category_id,
            owner_id: OwnerId::new("owner"),
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(notes: Vec<&Note>) -> Vec<i64> {
        notes.into_iter().map(|n| n.id).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let notes = vec![note(1, "a", "", None), note(2, "b", "", Some(1))];
        assert_eq!(ids(filter_notes(&notes, &NoteFilter::default())), vec![1, 2]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_or_content() {
        let notes = vec![
            note(1, "Groceries", "Buy MILK", None),
            note(2, "Milkshake recipe", "", None),
            note(3, "Work", "standup", None),
        ];
        let filter = NoteFilter {
            search: "milk".to_string(),
            category_id: None,
        };
        assert_eq!(ids(filter_notes(&notes, &filter)), vec![1, 2]);
    }

    #[test]
    fn test_search_and_category_both_apply() {
        let notes = vec![
            note(1, "milk", "", Some(1)),
            note(2, "milk", "", Some(2)),
            note(3, "bread", "", Some(1)),
            note(4, "milk", "", None),
        ];
        let filter = NoteFilter {
            search: "MILK".to_string(),
            category_id: Some(1),
        };
        assert_eq!(ids(filter_notes(&notes, &filter)), vec![1]);

        let filter = NoteFilter {
            search: String::new(),
            category_id: Some(1),
        };
        assert_eq!(ids(filter_notes(&notes, &filter)), vec![1, 3]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let notes = vec![note(1, "alpha", "", None), note(2, "beta", "", None)];
        let filter = NoteFilter {
            search: "ALP".to_string(),
            category_id: None,
        };
        let once: Vec<Note> = filter_notes(&notes, &filter).into_iter().cloned().collect();
        let twice = filter_notes(&once, &filter);
        assert_eq!(ids(twice), vec![1]);
    }
}
