pub mod add_dialog;
pub mod alert;
pub mod confirm;
pub mod filter_bar;
pub mod money;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Centered fixed-size rect for modal overlays.
#[must_use]
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
