//! Home screen state
//!
//! Search box, category chips, note list and the quick-entry editor. Store
//! failures are logged and leave the screen as it was; nothing is retried.

use everynote_notes::{Category, NewNote, Note, NotesManager};

use crate::filter::{filter_notes, NoteFilter};

pub struct HomeScreen {
    notes_manager: NotesManager,
    notes: Vec<Note>,
    categories: Vec<Category>,
    filter: NoteFilter,
    draft: String,
}

impl HomeScreen {
    pub fn new(notes_manager: NotesManager) -> Self {
        Self {
            notes_manager,
            notes: Vec::new(),
            categories: Vec::new(),
            filter: NoteFilter::default(),
            draft: String::new(),
        }
    }

    /// Reload notes and categories. Returns whether both loaded.
    pub fn load(&mut self) -> bool {
        let loaded = self
            .notes_manager
            .list_notes()
            .and_then(|notes| Ok((notes, self.notes_manager.list_categories()?)));

        match loaded {
            Ok((notes, categories)) => {
                self.notes = notes;
                self.categories = categories;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading data");
                false
            }
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filter(&self) -> &NoteFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// Select a category chip; `None` is "All".
    pub fn select_category(&mut self, category_id: Option<i64>) {
        self.filter.category_id = category_id;
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn can_save(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Save the draft as a new placeholder-titled note in the selected
    /// category, then clear it and reload. A blank draft is ignored.
    pub fn save_draft(&mut self) -> Option<Note> {
        if !self.can_save() {
            return None;
        }

        let new_note = NewNote::new(
            self.notes_manager.config().default_title.clone(),
            self.draft.clone(),
        )
        .in_category(self.filter.category_id);

        match self.notes_manager.create_note(new_note) {
            Ok(note) => {
                self.draft.clear();
                self.load();
                Some(note)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving note");
                None
            }
        }
    }

    pub fn add_category(&mut self, name: &str) -> Option<Category> {
        match self.notes_manager.create_category(name) {
            Ok(category) => {
                self.load();
                Some(category)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error creating category");
                None
            }
        }
    }

    /// Notes passing the current search and category selection.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, &self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::Config;
    use everynote_storage::Database;

    fn app() -> App {
        let app = App::with_database(
            Config::new(std::path::PathBuf::from("unused")),
            Database::open_in_memory().unwrap(),
        );
        app.session().set_token("owner-1").unwrap();
        app
    }

    #[test]
    fn test_save_draft() {
        let app = app();
        let mut home = app.home_screen();
        assert!(home.load());

        home.set_draft("   ");
        assert!(!home.can_save());
        assert!(home.save_draft().is_none());

        home.set_draft("buy milk");
        let note = home.save_draft().unwrap();
        assert_eq!(note.title, "Untitled Note");
        assert_eq!(note.content, "buy milk");
        assert_eq!(note.category_id, None);
        assert_eq!(home.draft(), "");
        assert_eq!(home.notes().len(), 1);
    }

    #[test]
    fn test_save_into_selected_category() {
        let app = app();
        let mut home = app.home_screen();
        let work = home.add_category("Work").unwrap();
        assert_eq!(home.categories().len(), 1);

        home.select_category(Some(work.id));
        home.set_draft("standup at 10");
        home.save_draft().unwrap();

        home.select_category(None);
        home.set_draft("groceries");
        home.save_draft().unwrap();

        home.select_category(Some(work.id));
        let visible: Vec<&str> = home.visible_notes().iter().map(|n| n.content.as_str()).collect();
        assert_eq!(visible, vec!["standup at 10"]);

        home.select_category(None);
        home.set_search("GROC");
        let visible: Vec<&str> = home.visible_notes().iter().map(|n| n.content.as_str()).collect();
        assert_eq!(visible, vec!["groceries"]);
    }

    #[test]
    fn test_failures_leave_state_untouched() {
        let app = app();
        let mut home = app.home_screen();
        home.set_draft("first");
        home.save_draft().unwrap();

        app.session().clear_token().unwrap();

        assert!(!home.load());
        assert_eq!(home.notes().len(), 1);

        home.set_draft("second");
        assert!(home.save_draft().is_none());
        assert_eq!(home.draft(), "second");
        assert!(home.add_category("Work").is_none());
    }
}
