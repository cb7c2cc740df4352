//! Linear substring search over the content tree.

use serde::Serialize;
use std::fmt;

use crate::content::ContentStore;

/// Default number of hits returned by a search
pub const DEFAULT_MAX_RESULTS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    Category,
    Topic,
    Step,
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HitKind::Category => "category",
            HitKind::Topic => "topic",
            HitKind::Step => "step",
        };
        f.pad(label)
    }
}

/// A single search result pointing into the content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub kind: HitKind,
    pub category_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_index: Option<usize>,
    pub title: String,
    pub subtitle: String,
}

/// Normalize raw user input into a search term.
///
/// Returns `None` for empty or whitespace-only input, in which case no
/// search should run.
pub fn normalize_term(raw: &str) -> Option<String> {
    let term = raw.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

fn contains(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

fn contains_opt(haystack: Option<&String>, term: &str) -> bool {
    haystack.is_some_and(|h| contains(h, term))
}

#[derive(Debug, Clone, Copy)]
pub struct SearchIndex {
    max_results: usize,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

impl SearchIndex {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    /// Find every category, topic and step whose text contains `term`.
    ///
    /// Hits come out in document order (a category, then each of its topics
    /// followed by that topic's steps) and are cut off at `max_results`.
    pub fn search(&self, store: &ContentStore, term: &str) -> Vec<Hit> {
        if self.max_results == 0 {
            return Vec::new();
        }
        let Some(term) = normalize_term(term) else {
            return Vec::new();
        };

        let mut hits = Vec::new();

        'outer: for category in store.categories() {
            if contains(&category.title, &term) {
                hits.push(Hit {
                    kind: HitKind::Category,
                    category_slug: category.slug.clone(),
                    topic_slug: None,
                    step_index: None,
                    title: category.title.clone(),
                    subtitle: "Category".to_string(),
                });
                if hits.len() >= self.max_results {
                    break 'outer;
                }
            }

            for topic in &category.topics {
                if contains(&topic.title, &term) || contains_opt(topic.intro.as_ref(), &term) {
                    hits.push(Hit {
                        kind: HitKind::Topic,
                        category_slug: category.slug.clone(),
                        topic_slug: Some(topic.slug.clone()),
                        step_index: None,
                        title: topic.title.clone(),
                        subtitle: category.title.clone(),
                    });
                    if hits.len() >= self.max_results {
                        break 'outer;
                    }
                }

                for (index, step) in topic.steps.iter().enumerate() {
                    if contains(&step.title, &term)
                        || contains_opt(step.description.as_ref(), &term)
                    {
                        hits.push(Hit {
                            kind: HitKind::Step,
                            category_slug: category.slug.clone(),
                            topic_slug: Some(topic.slug.clone()),
                            step_index: Some(index),
                            title: step.title.clone(),
                            subtitle: format!("{} · {}", topic.title, category.title),
                        });
                        if hits.len() >= self.max_results {
                            break 'outer;
                        }
                    }
                }
            }
        }

        tracing::debug!(term = %term, hits = hits.len(), "Search completed");
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Category, Step, Topic};

    fn step(title: &str, description: Option<&str>) -> Step {
        Step {
            title: title.to_string(),
            description: description.map(str::to_string),
            ..Step::default()
        }
    }

    fn store() -> ContentStore {
        ContentStore::new(vec![
            Category {
                slug: "wartung".to_string(),
                title: "Wartung & Pflege".to_string(),
                topics: vec![
                    Topic {
                        slug: "oelwechsel".to_string(),
                        title: "Ölwechsel".to_string(),
                        intro: Some("Motoröl regelmäßig prüfen".to_string()),
                        steps: vec![
                            step("Motor warmfahren", None),
                            step("Ölstand prüfen", Some("Messstab ziehen")),
                        ],
                    },
                    Topic {
                        slug: "reifen".to_string(),
                        title: "Reifen".to_string(),
                        intro: None,
                        steps: vec![step("Luftdruck prüfen", Some("Wartung laut Tabelle"))],
                    },
                ],
                ..Category::default()
            },
            Category {
                slug: "reise".to_string(),
                title: "Reise & Unterwegs".to_string(),
                topics: vec![Topic {
                    slug: "oelwechsel".to_string(),
                    title: "Öl unterwegs nachfüllen".to_string(),
                    intro: None,
                    steps: Vec::new(),
                }],
                ..Category::default()
            },
        ])
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Öl "), Some("öl".to_string()));
        assert_eq!(normalize_term("   "), None);
        assert_eq!(normalize_term(""), None);
    }

    #[test]
    fn test_empty_term_yields_nothing() {
        assert!(SearchIndex::default().search(&store(), "  ").is_empty());
    }

    #[test]
    fn test_umlaut_matches_topic() {
        let hits = SearchIndex::default().search(&store(), "öl");
        let topic_hit = hits
            .iter()
            .find(|h| h.kind == HitKind::Topic)
            .expect("topic hit");
        assert_eq!(topic_hit.topic_slug.as_deref(), Some("oelwechsel"));
        assert_eq!(topic_hit.category_slug, "wartung");
        assert_eq!(topic_hit.subtitle, "Wartung & Pflege");
    }

    #[test]
    fn test_traversal_order() {
        let hits = SearchIndex::default().search(&store(), "öl");
        let summary: Vec<_> = hits
            .iter()
            .map(|h| (h.kind, h.category_slug.as_str(), h.step_index))
            .collect();
        assert_eq!(
            summary,
            vec![
                (HitKind::Topic, "wartung", None),
                (HitKind::Step, "wartung", Some(1)),
                (HitKind::Topic, "reise", None),
            ]
        );
    }

    #[test]
    fn test_no_dedup_between_kinds() {
        // "wartung" matches the category title and a step description
        let hits = SearchIndex::default().search(&store(), "Wartung");
        let kinds: Vec<_> = hits.iter().map(|h| h.kind).collect();
        assert_eq!(kinds, vec![HitKind::Category, HitKind::Step]);
    }

    #[test]
    fn test_step_hit_subtitle_and_index() {
        let hits = SearchIndex::default().search(&store(), "messstab");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, HitKind::Step);
        assert_eq!(hits[0].step_index, Some(1));
        assert_eq!(hits[0].subtitle, "Ölwechsel · Wartung & Pflege");
    }

    #[test]
    fn test_results_are_capped() {
        let topics = (0..40)
            .map(|i| Topic {
                slug: format!("t{i}"),
                title: format!("Match {i}"),
                intro: Some("match".to_string()),
                steps: vec![step("match", Some("match"))],
            })
            .collect();
        let store = ContentStore::new(vec![Category {
            slug: "c".to_string(),
            title: "match".to_string(),
            topics,
            ..Category::default()
        }]);

        assert_eq!(SearchIndex::default().search(&store, "match").len(), 25);
        assert_eq!(SearchIndex::new(3).search(&store, "match").len(), 3);
        assert_eq!(SearchIndex::new(1).search(&store, "match").len(), 1);
        assert!(SearchIndex::new(0).search(&store, "match").is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(SearchIndex::default().search(&store(), "xyz").is_empty());
    }
}
