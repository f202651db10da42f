use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const CARD_HEIGHT: u16 = 3;
const CARD_GAP: u16 = 1;

pub struct AppLayout {
    pub header: Rect,
    pub stats: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(CARD_HEIGHT),
                Constraint::Length(2),
            ])
            .split(area);

        Self {
            header: vertical[0],
            stats: vertical[1],
            main: vertical[2],
            footer: vertical[3],
        }
    }
}

/// Card positions for the word grid. Shared by rendering and mouse
/// hit-testing so a click always lands on the card that was drawn there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardGrid {
    /// (index into the displayed words, on-screen rect) for visible cards.
    pub cells: Vec<(usize, Rect)>,
    pub columns: usize,
    pub first_row: usize,
}

impl CardGrid {
    /// Lay out `count` cards of `card_width` in `area`, scrolled by whole rows
    /// so that `selected` is visible.
    pub fn new(area: Rect, count: usize, card_width: u16, selected: Option<usize>) -> Self {
        let card_width = card_width.min(area.width).max(1);
        let columns = ((area.width + CARD_GAP) / (card_width + CARD_GAP)).max(1) as usize;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;

        let first_row = match selected {
            Some(index) if index / columns >= visible_rows => index / columns + 1 - visible_rows,
            _ => 0,
        };

        let mut cells = Vec::new();
        for row in 0..visible_rows {
            for col in 0..columns {
                let index = (first_row + row) * columns + col;
                if index >= count {
                    break;
                }
                let x = area.x + col as u16 * (card_width + CARD_GAP);
                let y = area.y + row as u16 * CARD_HEIGHT;
                if y + CARD_HEIGHT > area.y + area.height {
                    break;
                }
                cells.push((index, Rect::new(x, y, card_width, CARD_HEIGHT)));
            }
        }

        Self {
            cells,
            columns,
            first_row,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<usize> {
        self.cells
            .iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(index, _)| *index)
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 12;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fills_rows_left_to_right() {
        let grid = CardGrid::new(Rect::new(0, 0, 40, 9), 5, 12, None);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.cells.len(), 5);
        assert_eq!(grid.cells[0], (0, Rect::new(0, 0, 12, 3)));
        assert_eq!(grid.cells[2], (2, Rect::new(26, 0, 12, 3)));
        assert_eq!(grid.cells[3], (3, Rect::new(0, 3, 12, 3)));
    }

    #[test]
    fn grid_scrolls_to_selected_row() {
        // 2 columns, 2 visible rows, 10 cards
        let grid = CardGrid::new(Rect::new(0, 0, 25, 6), 10, 12, Some(7));
        assert_eq!(grid.columns, 2);
        assert_eq!(grid.first_row, 2);
        assert_eq!(grid.cells.first().map(|c| c.0), Some(4));
        assert!(grid.cells.iter().any(|(i, _)| *i == 7));
    }

    #[test]
    fn hit_test_matches_layout() {
        let grid = CardGrid::new(Rect::new(2, 4, 40, 9), 5, 12, None);
        assert_eq!(grid.hit(2, 4), Some(0));
        assert_eq!(grid.hit(15, 5), Some(1));
        // Gap between cards
        assert_eq!(grid.hit(14, 5), None);
        assert_eq!(grid.hit(3, 8), Some(3));
        assert_eq!(grid.hit(30, 8), None);
    }

    #[test]
    fn narrow_area_still_has_one_column() {
        let grid = CardGrid::new(Rect::new(0, 0, 5, 3), 2, 18, None);
        assert_eq!(grid.columns, 1);
        assert_eq!(grid.cells, vec![(0, Rect::new(0, 0, 5, 3))]);
    }

    #[test]
    fn hints_wrap_to_width() {
        let lines = pack_hint_lines(&["[g] known", "[r] learning", "[w] new"], 24);
        assert_eq!(lines, vec![" [g] known  [r] learning", " [w] new"]);
        assert!(pack_hint_lines(&[], 10).is_empty());
    }
}
