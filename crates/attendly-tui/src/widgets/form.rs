//! Labeled form-field rendering for the modal dialogs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::Input;

use crate::theme;

/// A bordered text field with its label as the title. A field error, when
/// present, is shown along the bottom border in the error style.
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    focused: bool,
    error: Option<&str>,
) {
    let mut block = Block::default()
        .title(format!(" {label} "))
        .title_style(theme::field_label())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        });
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            theme::error_style(),
        )));
    }

    let inner_width = area.width.saturating_sub(2);
    let scroll = input.visual_scroll(usize::from(inner_width));
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    let paragraph = Paragraph::new(input.value())
        .style(theme::table_row())
        .scroll((0, scroll as u16))
        .block(block);
    frame.render_widget(paragraph, area);

    if focused {
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let cursor_x = area.x + 1 + (input.visual_cursor().saturating_sub(scroll)) as u16;
        frame.set_cursor_position((cursor_x.min(area.x + area.width - 2), area.y + 1));
    }
}

/// A bordered read-only field showing a fixed value (used for selectors
/// cycled with arrow keys rather than typed into).
pub fn render_selector(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    error: Option<&str>,
) {
    let mut block = Block::default()
        .title(format!(" {label} "))
        .title_style(theme::field_label())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        });
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            theme::error_style(),
        )));
    }

    let text = if focused {
        format!("◂ {value} ▸")
    } else {
        value.to_owned()
    };
    frame.render_widget(
        Paragraph::new(text).style(theme::table_row()).block(block),
        area,
    );
}
