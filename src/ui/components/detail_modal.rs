use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph, Widget, Wrap};

use crate::store::schema::MasteryStatus;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;
use crate::view::detail::DetailView;

pub struct DetailModal<'a> {
    detail: &'a DetailView<'a>,
    status: MasteryStatus,
    /// Present while the note field has focus.
    note_input: Option<&'a LineInput>,
    theme: &'a Theme,
}

impl<'a> DetailModal<'a> {
    pub fn new(
        detail: &'a DetailView<'a>,
        status: MasteryStatus,
        note_input: Option<&'a LineInput>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            detail,
            status,
            note_input,
            theme,
        }
    }

    fn note_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        match self.note_input {
            Some(input) => {
                let (before, cursor_char, after) = input.render_parts();
                let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
                let text_style = Style::default().fg(colors.fg());
                let mut spans = vec![Span::styled(before.to_string(), text_style)];
                match cursor_char {
                    Some(ch) => {
                        spans.push(Span::styled(ch.to_string(), cursor_style));
                        spans.push(Span::styled(after.to_string(), text_style));
                    }
                    None => spans.push(Span::styled(" ", cursor_style)),
                }
                Line::from(spans)
            }
            None if self.detail.note_text.is_empty() => Line::from(Span::styled(
                "Add your personal notes about this word here... [e]",
                Style::default().fg(colors.text_dim()),
            )),
            None => Line::from(Span::styled(
                self.detail.note_text.clone(),
                Style::default().fg(colors.fg()),
            )),
        }
    }
}

impl Widget for DetailModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.detail.home_group))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(4),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Line::from(vec![
            Span::styled(
                format!(" {}", self.detail.word),
                Style::default()
                    .fg(colors.status(self.status))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", self.status.label()),
                Style::default().fg(colors.text_dim()),
            ),
        ]);
        Paragraph::new(title).render(sections[0], buf);

        let body = vec![
            Line::from(Span::styled(
                self.detail.definition,
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.detail.example,
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.detail.synonyms_line.as_str(),
                Style::default().fg(colors.accent()),
            )),
        ];
        Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::horizontal(1)))
            .render(sections[1], buf);

        let note_border = if self.note_input.is_some() {
            colors.border_focused()
        } else {
            colors.border()
        };
        Paragraph::new(self.note_line())
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(" Your Notes ")
                    .border_style(Style::default().fg(note_border)),
            )
            .render(sections[2], buf);

        let dim = Style::default().fg(colors.text_dim());
        let nav = |enabled: bool, text: &'static str| {
            if enabled {
                Span::styled(text, Style::default().fg(colors.accent()))
            } else {
                Span::styled(text, dim)
            }
        };
        let controls = if self.note_input.is_some() {
            Line::from(Span::styled(" [Enter/Esc] done editing", dim))
        } else {
            Line::from(vec![
                nav(self.detail.can_go_previous, " [\u{2190}] prev"),
                Span::styled("  [g] known  [r] learning  [w] new  [s] speak  [e] note  ", dim),
                nav(self.detail.can_go_next, "[\u{2192}] next"),
            ])
        };
        Paragraph::new(controls).render(sections[3], buf);
    }
}
