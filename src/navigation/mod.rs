//! View-state machine for browsing the help content.
//!
//! `NavigationController` owns the whole application state: the loaded
//! content, completion flags, the search index, the current location and a
//! pending "focus this step" request. Frontends read it and call the
//! transition methods; nothing else mutates it.

use crate::completion::CompletionTracker;
use crate::content::{Category, ContentStore, Topic};
use crate::search::{normalize_term, Hit, HitKind, SearchIndex};

/// Where the user currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLocation {
    Root,
    AtCategory(String),
    AtTopic(String, String),
    SearchResults {
        term: String,
        hits: Vec<Hit>,
        /// Location that was active when the search started
        return_to: Box<ViewLocation>,
    },
}

impl ViewLocation {
    pub fn is_search(&self) -> bool {
        matches!(self, ViewLocation::SearchResults { .. })
    }
}

pub struct NavigationController {
    store: ContentStore,
    tracker: CompletionTracker,
    index: SearchIndex,
    location: ViewLocation,
    focus: Option<usize>,
}

impl NavigationController {
    pub fn new(store: ContentStore, tracker: CompletionTracker, index: SearchIndex) -> Self {
        Self {
            store,
            tracker,
            index,
            location: ViewLocation::Root,
            focus: None,
        }
    }

    pub fn location(&self) -> &ViewLocation {
        &self.location
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn tracker(&self) -> &CompletionTracker {
        &self.tracker
    }

    /// Resolved category of the current location, if any
    pub fn current_category(&self) -> Option<&Category> {
        match &self.location {
            ViewLocation::AtCategory(c) | ViewLocation::AtTopic(c, _) => {
                self.store.find_category(c)
            }
            _ => None,
        }
    }

    /// Resolved topic of the current location, if any
    pub fn current_topic(&self) -> Option<&Topic> {
        match &self.location {
            ViewLocation::AtTopic(c, t) => self.store.topic(c, t),
            _ => None,
        }
    }

    /// Step index a frontend should scroll to, if one is pending
    pub fn pending_focus(&self) -> Option<usize> {
        self.focus
    }

    /// Consume the pending focus request
    pub fn take_focus(&mut self) -> Option<usize> {
        self.focus.take()
    }

    /// Select a child of the current location: a category from `Root`, a
    /// topic from `AtCategory`. Unknown slugs and other states are no-ops.
    pub fn select(&mut self, slug: &str) {
        match &self.location {
            ViewLocation::Root => self.open_category(slug),
            ViewLocation::AtCategory(category) => {
                let category = category.clone();
                self.open_topic(&category, slug);
            }
            _ => {
                tracing::debug!(slug, "Select ignored outside root/category view");
            }
        }
    }

    /// Go one level up. No-op at `Root`.
    pub fn back(&mut self) {
        let next = match &self.location {
            ViewLocation::Root => return,
            ViewLocation::AtCategory(_) => ViewLocation::Root,
            ViewLocation::AtTopic(c, _) => ViewLocation::AtCategory(c.clone()),
            ViewLocation::SearchResults { return_to, .. } => (**return_to).clone(),
        };
        self.set_location(next);
    }

    /// Jump straight back to the category overview
    pub fn go_home(&mut self) {
        self.set_location(ViewLocation::Root);
    }

    /// Toggle the done flag of step `index` in the current topic.
    ///
    /// Returns the new state, or `None` when not viewing a topic or the
    /// index is out of range.
    pub fn toggle_step(&mut self, index: usize) -> Option<bool> {
        let ViewLocation::AtTopic(c, t) = &self.location else {
            return None;
        };
        let step_count = self.store.topic(c, t)?.steps.len();
        if index >= step_count {
            tracing::debug!(index, step_count, "Toggle ignored, step out of range");
            return None;
        }
        Some(self.tracker.toggle(c, t, index))
    }

    /// Run a search from the current location.
    ///
    /// An empty or whitespace-only term does not touch the index: an active
    /// search is dismissed back to where it started, otherwise nothing
    /// changes.
    pub fn search(&mut self, raw: &str) {
        let Some(term) = normalize_term(raw) else {
            self.clear_search();
            return;
        };

        let hits = self.index.search(&self.store, &term);
        let return_to = match &self.location {
            ViewLocation::SearchResults { return_to, .. } => return_to.clone(),
            other => Box::new(other.clone()),
        };
        self.location = ViewLocation::SearchResults {
            term,
            hits,
            return_to,
        };
    }

    /// Dismiss an active search, restoring the location it started from
    pub fn clear_search(&mut self) {
        if let ViewLocation::SearchResults { return_to, .. } = &self.location {
            let previous = (**return_to).clone();
            self.set_location(previous);
        }
    }

    /// Select the `n`th hit of the active search
    pub fn select_hit_at(&mut self, n: usize) {
        let hit = match &self.location {
            ViewLocation::SearchResults { hits, .. } => hits.get(n).cloned(),
            _ => None,
        };
        if let Some(hit) = hit {
            self.select_hit(&hit);
        }
    }

    /// Navigate to whatever a search hit points at. A step hit also leaves a
    /// focus request for that step. Dangling hits leave the state unchanged.
    pub fn select_hit(&mut self, hit: &Hit) {
        let Some(category) = self.store.find_category(&hit.category_slug) else {
            tracing::debug!(category = %hit.category_slug, "Search hit points at unknown category");
            return;
        };

        let next = match (hit.kind, hit.topic_slug.as_deref()) {
            (HitKind::Category, _) => ViewLocation::AtCategory(category.slug.clone()),
            (HitKind::Topic | HitKind::Step, Some(topic_slug)) => {
                let Some(topic) = self.store.find_topic(Some(category), topic_slug) else {
                    tracing::debug!(topic = topic_slug, "Search hit points at unknown topic");
                    return;
                };
                ViewLocation::AtTopic(category.slug.clone(), topic.slug.clone())
            }
            (_, None) => {
                tracing::debug!(kind = %hit.kind, "Search hit is missing its topic");
                return;
            }
        };

        self.set_location(next);
        if hit.kind == HitKind::Step {
            self.focus = hit.step_index;
        }
    }

    fn open_category(&mut self, slug: &str) {
        if self.store.find_category(slug).is_none() {
            tracing::debug!(slug, "Unknown category");
            return;
        }
        self.set_location(ViewLocation::AtCategory(slug.to_string()));
    }

    fn open_topic(&mut self, category_slug: &str, topic_slug: &str) {
        if self.store.topic(category_slug, topic_slug).is_none() {
            tracing::debug!(
                category = category_slug,
                topic = topic_slug,
                "Unknown topic"
            );
            return;
        }
        self.set_location(ViewLocation::AtTopic(
            category_slug.to_string(),
            topic_slug.to_string(),
        ));
    }

    fn set_location(&mut self, location: ViewLocation) {
        self.focus = None;
        self.location = location;
    }
}
