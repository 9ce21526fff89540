//! Generic searchable selector
//!
//! One [`SearchableSelect`] covers group, trainer and student pickers: it is
//! parameterised by the option type, a match predicate and a render function.
//! Options whose id is in the exclusion list are never offered.

use crate::api::Resource;
use crate::models::{EntityId, Group, Hall, Student, Trainer};
use crate::pages::Searchable;
use crate::utils::contains_ci;

type Predicate<T> = fn(&T, &str) -> bool;
type Render<T> = fn(&T) -> String;

/// Filterable option list with a single selection
#[derive(Clone)]
pub struct SearchableSelect<T: Resource> {
    options: Vec<T>,
    matches: Predicate<T>,
    render: Render<T>,
    term: String,
    open: bool,
    selected: Option<EntityId>,
    excluded: Vec<EntityId>,
}

impl<T: Resource + std::fmt::Debug> std::fmt::Debug for SearchableSelect<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchableSelect")
            .field("options", &self.options.len())
            .field("term", &self.term)
            .field("open", &self.open)
            .field("selected", &self.selected)
            .field("excluded", &self.excluded)
            .finish()
    }
}

impl<T: Resource> SearchableSelect<T> {
    pub fn new(options: Vec<T>, matches: Predicate<T>, render: Render<T>) -> Self {
        Self {
            options,
            matches,
            render,
            term: String::new(),
            open: false,
            selected: None,
            excluded: Vec::new(),
        }
    }

    /// Hide options with these ids
    pub fn exclude(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.excluded.extend(ids);
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Update the search term; typing opens the list
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Options matching the current term, minus exclusions
    pub fn visible(&self) -> Vec<&T> {
        let term = self.term.trim();
        self.options
            .iter()
            .filter(|o| !self.excluded.contains(&o.id()))
            .filter(|o| term.is_empty() || (self.matches)(o, term))
            .collect()
    }

    /// Select an option; the term becomes its label and the list closes
    pub fn select(&mut self, id: EntityId) -> Option<&T> {
        let option = self
            .options
            .iter()
            .find(|o| o.id() == id && !self.excluded.contains(&id))?;
        self.term = (self.render)(option);
        self.selected = Some(id);
        self.open = false;
        Some(option)
    }

    pub fn selected(&self) -> Option<&T> {
        let id = self.selected?;
        self.options.iter().find(|o| o.id() == id)
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.term.clear();
        self.selected = None;
        self.open = false;
    }

    pub fn label(&self, option: &T) -> String {
        (self.render)(option)
    }

    /// Resolve a query to one option: a numeric id, or a term matching exactly one
    pub fn resolve(&self, query: &str) -> Option<&T> {
        let query = query.trim();
        if let Ok(id) = query.parse::<EntityId>() {
            return self
                .options
                .iter()
                .find(|o| o.id() == id && !self.excluded.contains(&id));
        }

        let candidates: Vec<&T> = self
            .options
            .iter()
            .filter(|o| !self.excluded.contains(&o.id()))
            .filter(|o| (self.matches)(o, query))
            .collect();

        match candidates.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }
}

/// Group picker: matches name, trainer, dance style, difficulty
pub fn groups(options: Vec<Group>) -> SearchableSelect<Group> {
    SearchableSelect::new(
        options,
        |g, term| g.matches(term),
        |g| format!("#{} {}", g.id, g.summary()),
    )
}

/// Trainer picker: matches name or dance style
pub fn trainers(options: Vec<Trainer>) -> SearchableSelect<Trainer> {
    SearchableSelect::new(
        options,
        |t, term| contains_ci(&t.name, term) || contains_ci(&t.dance_style, term),
        |t| format!("{} ({})", t.name, t.dance_style),
    )
}

/// Student picker: matches name case-insensitively or phone as typed
pub fn students(options: Vec<Student>) -> SearchableSelect<Student> {
    SearchableSelect::new(
        options,
        |s, term| contains_ci(&s.name, term) || s.phone_number.contains(term),
        |s| format!("{} ({})", s.name, s.phone_number),
    )
}

/// Hall picker: matches name
pub fn halls(options: Vec<Hall>) -> SearchableSelect<Hall> {
    SearchableSelect::new(
        options,
        |h, term| contains_ci(&h.name, term),
        |h| h.name.clone(),
    )
}
