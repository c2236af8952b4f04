//! Key mapping and drawing for single-line `tui-input` fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_input::{Input, InputRequest};

use crate::theme;

/// Editing keys understood by every text field.
pub fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let req = match key.code {
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char(c) if !ctrl => InputRequest::InsertChar(c),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(req)
}

/// Draw `label` then the field's visible window. A focused field owns
/// the terminal cursor.
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: Span<'static>,
    input: &Input,
    focused: bool,
) {
    let label_width = u16::try_from(label.width()).unwrap_or(area.width);
    let [label_area, field_area] =
        Layout::horizontal([Constraint::Length(label_width), Constraint::Fill(1)]).areas(area);

    let width = usize::from(field_area.width.max(1).saturating_sub(1));
    let scroll = input.visual_scroll(width);
    let style = if focused {
        theme::table_row().bg(theme::BG_SELECTED)
    } else {
        theme::table_row()
    };

    frame.render_widget(Paragraph::new(Line::from(label)), label_area);
    frame.render_widget(
        Paragraph::new(input.value()).style(style).scroll((0, u16::try_from(scroll).unwrap_or(0))),
        field_area,
    );

    if focused {
        let offset = input.visual_cursor().saturating_sub(scroll);
        let x = field_area.x + u16::try_from(offset).unwrap_or(0).min(field_area.width);
        frame.set_cursor_position(Position::new(x, field_area.y));
    }
}
