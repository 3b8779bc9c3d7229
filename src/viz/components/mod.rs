pub mod board;
pub mod help;
pub mod log;
pub mod plot;

use crossterm::event::{Event, KeyCode, KeyEventKind};
pub use board::Board;
pub use log::Logs;
pub use plot::Plots;
use ratatui::widgets::WidgetRef;

pub trait Component: WidgetRef {
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}

/// Takes an event, checks if it is a key press event, and returns the [`KeyCode`]
pub(super) fn event_keycode(event: &Event) -> Option<KeyCode> {
    let Event::Key(key) = event else {
        return None;
    };

    if key.kind != KeyEventKind::Press {
        return None;
    }

    Some(key.code)
}
