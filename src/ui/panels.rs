use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::search_bar::SearchBar;

/// Title on the left, search box on the right
pub struct HeaderBar<'a> {
    pub title: &'a str,
    pub back_label: Option<&'a str>,
    pub search: &'a SearchBar,
}

impl HeaderBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let mut spans = Vec::new();
        if let Some(back) = self.back_label {
            spans.push(Span::styled(
                format!("‹ {back}  "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            self.title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        let title = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        );
        frame.render_widget(title, chunks[0]);

        let (text, style) = if self.search.text().is_empty() && !self.search.active {
            (
                "Press / to search".to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else if self.search.active {
            (
                format!("{}▏", self.search.text()),
                Style::default().fg(Color::White),
            )
        } else {
            (
                self.search.text().to_string(),
                Style::default().fg(Color::White),
            )
        };
        let border = if self.search.active {
            Color::Cyan
        } else {
            Color::Gray
        };
        let search = Paragraph::new(Span::styled(text, style)).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(search, chunks[1]);
    }
}

/// Bottom line: transient message or progress, plus key hints
pub struct StatusBar<'a> {
    pub message: Option<&'a str>,
    pub progress: Option<&'a str>,
    pub searching: bool,
}

impl StatusBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();

        if let Some(message) = self.message {
            spans.push(Span::styled(
                format!(" {message} "),
                Style::default().fg(Color::Yellow),
            ));
        } else if let Some(progress) = self.progress {
            spans.push(Span::styled(
                format!(" ✓ {progress} "),
                Style::default().fg(Color::Green),
            ));
        }

        let hints: &[(&str, &str)] = if self.searching {
            &[("Enter", "open"), ("Esc", "close"), ("↑↓", "move")]
        } else {
            &[
                ("Enter", "open"),
                ("Space", "done"),
                ("Esc", "back"),
                ("/", "search"),
                ("?", "help"),
                ("q", "quit"),
            ]
        };
        for (key, label) in hints {
            spans.push(Span::styled(
                format!("[{key}]"),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::styled(
                format!(" {label}  "),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
