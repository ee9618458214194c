//! Small shared rendering helpers.

pub mod form;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A centered rect of the given size, clamped to the containing area.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [horizontal] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(horizontal);
    rect
}
