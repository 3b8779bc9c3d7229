use ratatui::{prelude::*, widgets::*};

use crate::env::{Cell, Minefield};

const CELL_WIDTH: u16 = 4;
const CELL_HEIGHT: u16 = 2;

/// Renders the minefield as a centered block of colored cells
///
/// The agent is yellow, the goal blue, mines red, and open ground green. The
/// widget reads the environment exclusively through its observers.
pub struct Board<'a> {
    env: &'a Minefield,
}

impl<'a> Board<'a> {
    pub fn new(env: &'a Minefield) -> Self {
        Self { env }
    }

    fn cell_color(&self, row: usize, col: usize) -> Color {
        if (row, col) == self.env.position() {
            Color::Yellow
        } else if (row, col) == self.env.goal() {
            Color::Blue
        } else if self.env.cell(row, col) == Some(Cell::Mine) {
            Color::Red
        } else {
            Color::Green
        }
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.env.size();
        if size == 0 {
            return;
        }

        let [_, center_vert, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(size as u16 * CELL_HEIGHT + 2),
            Constraint::Fill(1),
        ])
        .areas(area);

        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(size as u16 * CELL_WIDTH + 2),
            Constraint::Fill(1),
        ])
        .areas(center_vert);

        let mut lines = Vec::with_capacity(size * CELL_HEIGHT as usize);
        for row in 0..size {
            let spans = (0..size)
                .map(|col| {
                    Span::styled(
                        " ".repeat(CELL_WIDTH as usize),
                        Style::default().bg(self.cell_color(row, col)),
                    )
                })
                .collect::<Vec<_>>();
            for _ in 0..CELL_HEIGHT {
                lines.push(Line::from(spans.clone()));
            }
        }

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Minefield"),
            )
            .render(center, buf);
    }
}
