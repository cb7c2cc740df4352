//! Main content area: cards, steps or search hits as a selectable list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use helpcenter::search::HitKind;
use helpcenter::view::{Body, Card, CardTarget, HitView, Screen, StepAction, StepView};

/// What activating the selected row does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Select(String),
    ToggleStep(usize),
    OpenHref(String),
    SelectHit(usize),
}

pub struct Browser {
    pub state: ListState,
}

impl Browser {
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self { state }
    }

    pub fn selected(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.state.select(Some(0));
        *self.state.offset_mut() = 0;
    }

    pub fn select(&mut self, index: usize) {
        self.state.select(Some(index));
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = (self.selected() + 1) % len;
        self.state.select(Some(next));
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = if self.selected() == 0 {
            len - 1
        } else {
            self.selected() - 1
        };
        self.state.select(Some(prev));
    }

    /// Action for the selected row. Steps activate their first action.
    pub fn activation(&self, screen: &Screen) -> Option<Activation> {
        let selected = self.selected();
        match &screen.body {
            Body::Cards(cards) => cards.get(selected).map(|card| match &card.target {
                CardTarget::Category(slug) | CardTarget::Topic(slug) => {
                    Activation::Select(slug.clone())
                }
            }),
            Body::Steps(steps) => steps.get(selected).and_then(|step| {
                step.actions.first().map(|action| match action {
                    StepAction::Toggle { .. } => Activation::ToggleStep(step.index),
                    StepAction::Call { href } | StepAction::Email { href } => {
                        Activation::OpenHref(href.clone())
                    }
                    StepAction::OpenLink { href, .. } => Activation::OpenHref(href.clone()),
                })
            }),
            Body::Hits(hits) => (selected < hits.len()).then_some(Activation::SelectHit(selected)),
            Body::Empty(_) => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, screen: &Screen) {
        let area = match &screen.intro {
            Some(intro) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(3)])
                    .split(area);
                let intro = Paragraph::new(intro.as_str())
                    .style(Style::default().fg(Color::Gray))
                    .wrap(Wrap { trim: true });
                frame.render_widget(intro, chunks[0]);
                chunks[1]
            }
            None => area,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let items: Vec<ListItem> = match &screen.body {
            Body::Cards(cards) => cards.iter().map(card_item).collect(),
            Body::Steps(steps) => steps.iter().map(step_item).collect(),
            Body::Hits(hits) => hits.iter().map(hit_item).collect(),
            Body::Empty(message) => {
                let empty = Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(empty, area);
                return;
            }
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

/// Number of selectable rows on a screen
pub fn row_count(screen: &Screen) -> usize {
    match &screen.body {
        Body::Cards(cards) => cards.len(),
        Body::Steps(steps) => steps.len(),
        Body::Hits(hits) => hits.len(),
        Body::Empty(_) => 0,
    }
}

fn card_item(card: &Card) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::raw(format!("{} ", card.icon)),
            Span::styled(
                card.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} ›", card.cta),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(Span::styled(
            format!("   {}", card.subtitle),
            Style::default().fg(Color::Gray),
        )),
    ])
}

fn step_item(step: &StepView) -> ListItem<'static> {
    let marker = match step.done() {
        Some(true) => Span::styled("[x] ", Style::default().fg(Color::Green)),
        Some(false) => Span::raw("[ ] "),
        None => Span::raw("    "),
    };

    let title_style = if step.done() == Some(true) {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut header = vec![
        marker,
        Span::styled(step.title.clone(), title_style),
        Span::styled(
            format!("  [{}]", step.badge),
            Style::default().fg(Color::Blue),
        ),
    ];
    if step.critical {
        header.push(Span::styled(
            " [Important]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if step.focused {
        header.push(Span::styled(" ◀", Style::default().fg(Color::Yellow)));
    }

    let mut lines = vec![Line::from(header)];
    if let Some(description) = &step.description {
        lines.push(Line::from(Span::styled(
            format!("    {description}"),
            Style::default().fg(Color::Gray),
        )));
    }
    for action in &step.actions {
        let text = match action {
            StepAction::Toggle { .. } => continue,
            StepAction::Call { href } => format!("    ☎ Call: {href}"),
            StepAction::Email { href } => format!("    ✉ Write e-mail: {href}"),
            StepAction::OpenLink { href, label } => format!("    ↗ {label}: {href}"),
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Cyan),
        )));
    }
    ListItem::new(lines)
}

fn hit_item(hit: &HitView) -> ListItem<'static> {
    let kind_color = match hit.kind {
        HitKind::Category => Color::Magenta,
        HitKind::Topic => Color::Cyan,
        HitKind::Step => Color::Green,
    };
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(format!("{:<9}", hit.kind), Style::default().fg(kind_color)),
            Span::styled(
                hit.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("         {}", hit.subtitle),
            Style::default().fg(Color::Gray),
        )),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps_screen() -> Screen {
        Screen {
            title: "Topic".to_string(),
            back_label: None,
            intro: None,
            progress: None,
            body: Body::Steps(vec![
                StepView {
                    index: 0,
                    title: "Check".to_string(),
                    description: None,
                    badge: "Checklist",
                    critical: false,
                    actions: vec![StepAction::Toggle { done: false }],
                    focused: false,
                },
                StepView {
                    index: 1,
                    title: "Call".to_string(),
                    description: None,
                    badge: "Contact",
                    critical: false,
                    actions: vec![StepAction::Call {
                        href: "tel:1".to_string(),
                    }],
                    focused: false,
                },
                StepView {
                    index: 2,
                    title: "Nothing".to_string(),
                    description: None,
                    badge: "Contact",
                    critical: false,
                    actions: Vec::new(),
                    focused: false,
                },
            ]),
        }
    }

    #[test]
    fn test_selection_wraps() {
        let mut browser = Browser::new();
        browser.select_prev(3);
        assert_eq!(browser.selected(), 2);
        browser.select_next(3);
        assert_eq!(browser.selected(), 0);
        browser.select_next(0);
        assert_eq!(browser.selected(), 0);
    }

    #[test]
    fn test_step_activation() {
        let screen = steps_screen();
        let mut browser = Browser::new();
        assert_eq!(browser.activation(&screen), Some(Activation::ToggleStep(0)));
        browser.select(1);
        assert_eq!(
            browser.activation(&screen),
            Some(Activation::OpenHref("tel:1".to_string()))
        );
        browser.select(2);
        assert_eq!(browser.activation(&screen), None);
    }

    #[test]
    fn test_card_and_hit_activation() {
        let cards = Screen {
            title: String::new(),
            back_label: None,
            intro: None,
            progress: None,
            body: Body::Cards(vec![Card {
                icon: "📚".to_string(),
                title: "A".to_string(),
                subtitle: String::new(),
                cta: "Open".to_string(),
                target: CardTarget::Category("a".to_string()),
            }]),
        };
        let browser = Browser::new();
        assert_eq!(
            browser.activation(&cards),
            Some(Activation::Select("a".to_string()))
        );

        let hits = Screen {
            body: Body::Hits(vec![HitView {
                kind: HitKind::Topic,
                title: "T".to_string(),
                subtitle: String::new(),
            }]),
            ..cards
        };
        assert_eq!(browser.activation(&hits), Some(Activation::SelectHit(0)));
        assert_eq!(row_count(&hits), 1);
    }

    #[test]
    fn test_empty_body_has_no_rows() {
        let screen = Screen {
            title: String::new(),
            back_label: None,
            intro: None,
            progress: None,
            body: Body::Empty("No matches".to_string()),
        };
        assert_eq!(row_count(&screen), 0);
        assert_eq!(Browser::new().activation(&screen), None);
    }
}
