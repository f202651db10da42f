use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::layout::CardGrid;
use crate::ui::theme::Theme;
use crate::view::card::CardView;

const NOTE_DOT: &str = " \u{25cf}";

pub struct WordGrid<'a> {
    cards: &'a [CardView<'a>],
    grid: &'a CardGrid,
    theme: &'a Theme,
}

impl<'a> WordGrid<'a> {
    pub fn new(cards: &'a [CardView<'a>], grid: &'a CardGrid, theme: &'a Theme) -> Self {
        Self { cards, grid, theme }
    }
}

impl Widget for WordGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        if self.cards.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "This group has no words.",
                Style::default().fg(colors.text_dim()),
            )))
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        for (index, rect) in &self.grid.cells {
            let Some(card) = self.cards.get(*index) else {
                continue;
            };
            let status_color = colors.status(card.status);

            let (border_style, bg) = if card.is_selected {
                (
                    Style::default()
                        .fg(colors.border_focused())
                        .add_modifier(Modifier::BOLD),
                    colors.selected_bg(),
                )
            } else {
                (Style::default().fg(status_color), colors.bg())
            };

            let block = Block::bordered()
                .border_style(border_style)
                .style(Style::default().bg(bg));
            let inner = block.inner(*rect);
            block.render(*rect, buf);

            let mut word_style = Style::default().fg(status_color);
            if card.is_selected {
                word_style = word_style.add_modifier(Modifier::BOLD);
            }
            let mut spans = vec![Span::styled(card.word, word_style)];
            if card.has_note_indicator {
                spans.push(Span::styled(NOTE_DOT, Style::default().fg(colors.note_dot())));
            }

            Paragraph::new(Line::from(spans))
                .alignment(Alignment::Center)
                .render(inner, buf);
        }
    }
}
