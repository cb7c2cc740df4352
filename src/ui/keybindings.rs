//! Centralized keyboard shortcuts registry.
//!
//! Everything the help overlay lists comes from here.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: KeyCode,
    /// Alternative key (e.g., arrow key for a vim key)
    pub alt_key: Option<KeyCode>,
    pub description: &'static str,
    pub category: ShortcutCategory,
    pub context: ShortcutContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Browsing categories, topics and steps
    Browse,
    /// Typing into the search box
    Search,
}

impl ShortcutCategory {
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
        ]
    }
}

impl ShortcutContext {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Browse => "Browsing",
            ShortcutContext::Search => "In Search:",
        }
    }

    pub fn all() -> &'static [ShortcutContext] {
        &[ShortcutContext::Browse, ShortcutContext::Search]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Enter", "j/↓")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for help dialog (left-padded to 10 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<10}", self.key_display())
    }
}

fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Browse ===
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: None,
        description: "Quit",
        category: ShortcutCategory::General,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        description: "Toggle help",
        category: ShortcutCategory::General,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('j'),
        alt_key: Some(KeyCode::Down),
        description: "Move down",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('k'),
        alt_key: Some(KeyCode::Up),
        description: "Move up",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: Some(KeyCode::Char('h')),
        description: "Back",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Backspace,
        alt_key: None,
        description: "Back",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('g'),
        alt_key: None,
        description: "Back to overview",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char('l')),
        description: "Open / activate selection",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char(' '),
        alt_key: Some(KeyCode::Char('x')),
        description: "Mark step done / not done",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('/'),
        alt_key: None,
        description: "Search",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Browse,
    },
    // === Search ===
    Shortcut {
        key: KeyCode::Up,
        alt_key: Some(KeyCode::Down),
        description: "Move through results",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Search,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        description: "Open highlighted result",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Search,
    },
    Shortcut {
        key: KeyCode::Backspace,
        alt_key: None,
        description: "Delete last character",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Search,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        description: "Clear and close search",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Search,
    },
];

/// Get shortcuts grouped by category for a given context
pub fn shortcuts_by_category_for_context(
    context: ShortcutContext,
) -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.context == context && s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shortcuts_have_descriptions() {
        for shortcut in SHORTCUTS {
            assert!(
                !shortcut.description.is_empty(),
                "Shortcut {:?} has empty description",
                shortcut.key
            );
        }
    }

    #[test]
    fn test_key_display() {
        let shortcut = &SHORTCUTS[2];
        assert_eq!(shortcut.key_display(), "j/↓");
        assert_eq!(format_keycode(&KeyCode::Char(' ')), "Space");
        assert_eq!(format_keycode(&KeyCode::Esc), "Esc");
    }

    #[test]
    fn test_every_context_has_shortcuts() {
        for context in ShortcutContext::all() {
            assert!(!shortcuts_by_category_for_context(*context).is_empty());
        }
    }

    #[test]
    fn test_every_back_key_is_listed() {
        let back_keys: Vec<String> = SHORTCUTS
            .iter()
            .filter(|s| s.context == ShortcutContext::Browse && s.description == "Back")
            .map(Shortcut::key_display)
            .collect();
        assert_eq!(back_keys, vec!["Esc/h", "Backspace"]);
    }

    #[test]
    fn test_browse_context_has_core_operations() {
        let descriptions: Vec<_> = SHORTCUTS
            .iter()
            .filter(|s| s.context == ShortcutContext::Browse)
            .map(|s| s.description.to_lowercase())
            .collect();
        for needle in ["back", "search", "done", "open"] {
            assert!(
                descriptions.iter().any(|d| d.contains(needle)),
                "missing shortcut for '{needle}'"
            );
        }
    }
}
