//! `?` overlay listing every shortcut, grouped by where it applies.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::keybindings::{shortcuts_by_category_for_context, ShortcutContext};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn lines() -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        for context in ShortcutContext::all() {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(Line::styled(context.display_name(), heading));

            for shortcut in shortcuts_by_category_for_context(*context)
                .into_iter()
                .flat_map(|(_, shortcuts)| shortcuts)
            {
                lines.push(Line::from(vec![
                    Span::styled(
                        shortcut.key_display_padded(),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(shortcut.description),
                ]));
            }
        }

        lines.push(Line::default());
        lines.push(Line::styled(
            "Steps marked [Important] should not be skipped.",
            Style::default().fg(Color::Red),
        ));
        lines.push(Line::styled(
            "Press any key to close",
            Style::default().fg(Color::Gray),
        ));
        lines
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = popup_area(frame.area(), 60, 70);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Self::lines())
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .title(" Keyboard Shortcuts ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                ),
            area,
        );
    }
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}
