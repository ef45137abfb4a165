//! Help overlay widget.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::event::get_help_sections;
use crate::theme::Theme;

/// Centered popup listing the key bindings.
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(self.theme.info)
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        for section in get_help_sections() {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(section.title, heading)));
            lines.extend(section.bindings.iter().map(|binding| {
                Line::from(vec![
                    Span::styled(format!("{:>12}", binding.keys), self.theme.help_key),
                    Span::styled(format!(" {}", binding.description), self.theme.help_desc),
                ])
            }));
        }
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        // Content plus the border rows.
        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(48)])
            .flex(Flex::Center)
            .areas(row);

        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help - Press ? or Esc to close ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        Paragraph::new(lines).block(block).render(popup, buf);
    }
}
