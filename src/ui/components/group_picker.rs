use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::store::progress::StatusTally;
use crate::ui::theme::Theme;

/// Cursor over the catalog's groups; wraps at both ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickerState {
    pub selected: usize,
}

impl PickerState {
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = len - 1;
        }
    }
}

pub struct PickerRow<'a> {
    pub name: &'a str,
    pub tally: StatusTally,
}

pub struct GroupPicker<'a> {
    pub rows: Vec<PickerRow<'a>>,
    pub state: PickerState,
    /// Group the session is currently based on.
    pub current: usize,
    pub theme: &'a Theme,
}

impl Widget for &GroupPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(" Groups ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let visible = layout[0].height as usize;
        let first = (self.state.selected + 1).saturating_sub(visible);

        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, row)| {
                let is_selected = i == self.state.selected;
                let indicator = if is_selected { ">" } else { " " };
                let current = if i == self.current { "*" } else { " " };
                let name_style = Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    });
                Line::from(vec![
                    Span::styled(format!(" {indicator}{current} {:<20}", row.name), name_style),
                    Span::styled(
                        format!("{:>3}", row.tally.known),
                        Style::default().fg(colors.status_known()),
                    ),
                    Span::styled(
                        format!(" {:>3}", row.tally.learning),
                        Style::default().fg(colors.status_learning()),
                    ),
                    Span::styled(
                        format!(" / {}", row.tally.total()),
                        Style::default().fg(colors.text_dim()),
                    ),
                ])
            })
            .collect();
        Paragraph::new(lines).render(layout[0], buf);

        Paragraph::new(Line::from(Span::styled(
            " [Enter] open  [m] bring groups 1..here  [Esc] back",
            Style::default().fg(colors.text_dim()),
        )))
        .render(layout[1], buf);
    }
}
