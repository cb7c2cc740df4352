//! Pure view model derived from navigation state.
//!
//! `render` turns the current `NavigationController` state into a small tree
//! of view nodes. Frontends draw these nodes and never look at raw content
//! text; every content-derived string has gone through [`sanitize`].

mod text;

pub use text::{is_openable_href, mailto_href, sanitize, shorten, tel_href};

use crate::completion::CompletionTracker;
use crate::content::{ActionType, Category, ContentStore, Step, Topic};
use crate::navigation::{NavigationController, ViewLocation};
use crate::search::{Hit, HitKind};

/// Default length at which topic intros are cut on cards
pub const DEFAULT_INTRO_MAX_LENGTH: usize = 110;

const DEFAULT_ICON: &str = "📚";

/// Icons for the well-known category slugs
fn icon_for_category(category: &Category) -> String {
    if let Some(icon) = category.icon.as_deref().filter(|i| !i.is_empty()) {
        return sanitize(icon);
    }
    let icon = match category.slug.as_str() {
        "handbuch-einfuehrung" => "📘",
        "wartung-pflege" => "🔧",
        "problem-loesung-reparaturen" => "🧰",
        "reise-unterwegs" => "🚐",
        "saisonales" => "🌦️",
        "service-kontakt" => "📞",
        "schnelle-hilfe" => "⚡",
        _ => DEFAULT_ICON,
    };
    icon.to_string()
}

/// What a selectable card leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardTarget {
    Category(String),
    Topic(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub target: CardTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Done checkbox for checklist and diagnosis steps
    Toggle { done: bool },
    Call { href: String },
    Email { href: String },
    OpenLink { href: String, label: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub title: String,
    pub description: Option<String>,
    pub badge: &'static str,
    pub critical: bool,
    pub actions: Vec<StepAction>,
    pub focused: bool,
}

impl StepView {
    /// Done state, for steps that can be checked off
    pub fn done(&self) -> Option<bool> {
        self.actions.iter().find_map(|a| match a {
            StepAction::Toggle { done } => Some(*done),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitView {
    pub kind: HitKind,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Cards(Vec<Card>),
    Steps(Vec<StepView>),
    Hits(Vec<HitView>),
    Empty(String),
}

/// One full screen of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub title: String,
    /// Label of the "go back" affordance, absent at the root
    pub back_label: Option<String>,
    pub intro: Option<String>,
    /// "n/m done" for topics with completable steps
    pub progress: Option<String>,
    pub body: Body,
}

/// Rendering options that come from configuration
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub intro_max_length: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            intro_max_length: DEFAULT_INTRO_MAX_LENGTH,
        }
    }
}

pub fn render(nav: &NavigationController, options: RenderOptions) -> Screen {
    let store = nav.store();
    match nav.location() {
        ViewLocation::Root => render_root(store),
        ViewLocation::AtCategory(c) => match store.find_category(c) {
            Some(category) => render_category(category, options),
            None => render_root(store),
        },
        ViewLocation::AtTopic(c, t) => {
            let category = store.find_category(c);
            match (category, store.find_topic(category, t)) {
                (Some(category), Some(topic)) => {
                    render_topic(category, topic, nav.tracker(), nav.pending_focus())
                }
                _ => render_root(store),
            }
        }
        ViewLocation::SearchResults { term, hits, .. } => render_hits(term, hits),
    }
}

/// Screen shown when the content document could not be loaded
pub fn load_failed_screen() -> Screen {
    Screen {
        title: "Help Center".to_string(),
        back_label: None,
        intro: None,
        progress: None,
        body: Body::Empty(
            "The content could not be loaded. Please try again later.".to_string(),
        ),
    }
}

fn render_root(store: &ContentStore) -> Screen {
    let cards = store
        .categories()
        .iter()
        .map(|category| {
            let subtitle = match category.subtitle.as_deref() {
                Some(s) => sanitize(s),
                None => match category.topics.len() {
                    0 => String::new(),
                    1 => "1 topic".to_string(),
                    n => format!("{n} topics"),
                },
            };
            Card {
                icon: icon_for_category(category),
                title: sanitize(&category.title),
                subtitle,
                cta: sanitize(category.cta.as_deref().unwrap_or("Open")),
                target: CardTarget::Category(category.slug.clone()),
            }
        })
        .collect();

    Screen {
        title: "Areas".to_string(),
        back_label: None,
        intro: None,
        progress: None,
        body: Body::Cards(cards),
    }
}

fn render_category(category: &Category, options: RenderOptions) -> Screen {
    let icon = icon_for_category(category);
    let cards = category
        .topics
        .iter()
        .map(|topic| Card {
            icon: icon.clone(),
            title: sanitize(&topic.title),
            subtitle: match topic.intro.as_deref() {
                Some(intro) => shorten(&sanitize(intro), options.intro_max_length),
                None => "Open details".to_string(),
            },
            cta: "Show details".to_string(),
            target: CardTarget::Topic(topic.slug.clone()),
        })
        .collect();

    Screen {
        title: sanitize(&category.title),
        back_label: Some("Back to overview".to_string()),
        intro: category.subtitle.as_deref().map(sanitize),
        progress: None,
        body: Body::Cards(cards),
    }
}

fn render_topic(
    category: &Category,
    topic: &Topic,
    tracker: &CompletionTracker,
    focus: Option<usize>,
) -> Screen {
    let steps: Vec<StepView> = topic
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let done = tracker.is_done(&category.slug, &topic.slug, index);
            StepView {
                index,
                title: sanitize(&step.title),
                description: step.description.as_deref().map(sanitize),
                badge: step.action_type.label(),
                critical: step.is_critical,
                actions: step_actions(step, done),
                focused: focus == Some(index),
            }
        })
        .collect();

    let completable = topic.steps.iter().filter(|s| s.is_completable()).count();
    let progress = (completable > 0).then(|| {
        let done = steps.iter().filter(|s| s.done() == Some(true)).count();
        format!("{done}/{completable} done")
    });

    let body = if steps.is_empty() {
        Body::Empty("No steps have been added for this topic yet.".to_string())
    } else {
        Body::Steps(steps)
    };

    Screen {
        title: sanitize(&topic.title),
        back_label: Some(sanitize(&category.title)),
        intro: topic.intro.as_deref().map(sanitize),
        progress,
        body,
    }
}

fn step_actions(step: &Step, done: bool) -> Vec<StepAction> {
    let mut actions = Vec::new();
    match step.action_type {
        ActionType::Checklist | ActionType::Diagnosis => {
            actions.push(StepAction::Toggle { done });
        }
        ActionType::Contact => {
            if let Some(contact) = &step.contact {
                if let Some(phone) = contact.phone.as_deref() {
                    actions.push(StepAction::Call {
                        href: tel_href(phone),
                    });
                }
                if let Some(email) = contact.email.as_deref() {
                    actions.push(StepAction::Email {
                        href: mailto_href(
                            email,
                            contact.subject.as_deref(),
                            contact.preset_message.as_deref(),
                        ),
                    });
                }
            }
        }
        ActionType::Link => {
            if let Some(link) = step.link.as_ref().filter(|l| is_openable_href(&l.href)) {
                actions.push(StepAction::OpenLink {
                    href: sanitize(&link.href),
                    label: sanitize(link.label.as_deref().unwrap_or("Open")),
                });
            }
        }
    }
    actions
}

fn render_hits(term: &str, hits: &[Hit]) -> Screen {
    let body = if hits.is_empty() {
        Body::Empty("No matches".to_string())
    } else {
        Body::Hits(
            hits.iter()
                .map(|hit| HitView {
                    kind: hit.kind,
                    title: sanitize(&hit.title),
                    subtitle: sanitize(&hit.subtitle),
                })
                .collect(),
        )
    };

    Screen {
        title: format!("Search: {}", sanitize(term)),
        back_label: Some("Close search".to_string()),
        intro: None,
        progress: None,
        body,
    }
}
