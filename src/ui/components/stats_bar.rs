use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::progress::StatusTally;
use crate::ui::theme::Theme;

/// Known / learning / new / total for the words on screen, plus a bar showing
/// the share already known.
pub struct StatsBar<'a> {
    stats: StatusTally,
    theme: &'a Theme,
}

impl<'a> StatsBar<'a> {
    pub fn new(stats: StatusTally, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(56), Constraint::Min(0)])
            .split(inner);

        let label = Style::default().fg(colors.fg());
        let value = |color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        let counts = Line::from(vec![
            Span::styled(" Known: ", label),
            Span::styled(self.stats.known.to_string(), value(colors.status_known())),
            Span::styled("  Learning: ", label),
            Span::styled(self.stats.learning.to_string(), value(colors.status_learning())),
            Span::styled("  New: ", label),
            Span::styled(self.stats.new.to_string(), value(colors.status_new())),
            Span::styled("  Total: ", label),
            Span::styled(self.stats.total().to_string(), value(colors.accent())),
        ]);
        Paragraph::new(counts).render(columns[0], buf);

        let bar = columns[1];
        if bar.width < 8 {
            return;
        }
        let ratio = self.stats.known_ratio();
        let filled_width = (ratio * bar.width as f64) as u16;
        for x in bar.x..bar.x + bar.width {
            let style = if x < bar.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, bar.y)].set_style(style);
        }
        let text = format!("{:.0}% known", ratio * 100.0);
        let label_x = bar.x + (bar.width.saturating_sub(text.len() as u16)) / 2;
        buf.set_string(label_x, bar.y, &text, Style::default().fg(colors.fg()));
    }
}
