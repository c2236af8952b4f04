//! Draws a [`ViewState`]: throbber, error, empty placeholder, or table.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Cell as TableCell, Paragraph, Row, Table, TableState, Wrap};
use throbber_widgets_tui::{Throbber, ThrobberState};

use stockly_core::format::PageFooter;
use stockly_core::{Cell, ViewState};

use crate::theme;

/// Widest column we size to before letting the table squeeze it.
const MAX_COLUMN: u16 = 40;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &ViewState,
    selected: usize,
    throbber: &ThrobberState,
) {
    match view {
        ViewState::Loading { text } => render_loading(frame, area, text, throbber),
        ViewState::Error {
            message,
            retry_hint,
        } => render_error(frame, area, message, retry_hint),
        ViewState::Empty {
            icon,
            title,
            description,
        } => render_empty(frame, area, icon, title, description),
        ViewState::Table {
            headers,
            rows,
            footer,
        } => render_table(frame, area, headers, rows, footer.as_ref(), selected),
    }
}

fn middle(area: Rect, height: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    mid
}

fn render_loading(frame: &mut Frame, area: Rect, text: &str, throbber: &ThrobberState) {
    let widget = Throbber::default()
        .label(format!(" {text}"))
        .style(theme::table_row())
        .throbber_style(Style::default().fg(theme::ACCENT));
    let row = middle(area, 1);
    let width = u16::try_from(text.len() + 4).unwrap_or(row.width).min(row.width);
    let [_, centered, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(row);
    frame.render_stateful_widget(widget, centered, &mut throbber.clone());
}

fn render_error(frame: &mut Frame, area: Rect, message: &str, hint: &str) {
    let text = vec![
        Line::from(Span::styled(message.to_owned(), theme::error_text())),
        Line::from(""),
        Line::from(Span::styled(hint.to_owned(), theme::key_hint())),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle(area, 3),
    );
}

fn render_empty(frame: &mut Frame, area: Rect, icon: &str, title: &str, description: &str) {
    let text = vec![
        Line::from(icon.to_owned()),
        Line::from(""),
        Line::from(Span::styled(
            title.to_owned(),
            theme::table_row().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(description.to_owned(), theme::secondary())),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        middle(area, 4),
    );
}

/// Text, optional marker, optional dimmed second line.
pub fn cell_text(cell: &Cell) -> Text<'static> {
    let style = theme::toned(cell.tone);
    let mut first = vec![Span::styled(cell.text.clone(), style)];
    if let Some(ref marker) = cell.marker {
        first.push(Span::raw(" "));
        first.push(Span::styled(
            marker.clone(),
            style.add_modifier(Modifier::BOLD),
        ));
    }
    let mut lines = vec![Line::from(first)];
    if let Some(ref secondary) = cell.secondary {
        lines.push(Line::from(Span::styled(secondary.clone(), theme::secondary())));
    }
    Text::from(lines)
}

fn cell_width(cell: &Cell) -> usize {
    let first = cell.text.chars().count()
        + cell.marker.as_ref().map_or(0, |m| m.chars().count() + 1);
    first.max(cell.secondary.as_ref().map_or(0, |s| s.chars().count()))
}

fn column_widths(headers: &[&str], rows: &[Vec<Cell>]) -> Vec<Constraint> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let widest = rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(cell_width)
                .fold(h.chars().count(), usize::max);
            Constraint::Min(u16::try_from(widest).unwrap_or(MAX_COLUMN).min(MAX_COLUMN))
        })
        .collect()
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    headers: &[&'static str],
    rows: &[Vec<Cell>],
    footer: Option<&PageFooter>,
    selected: usize,
) {
    let [table_area, footer_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::from(footer.is_some())),
    ])
    .areas(area);

    let header = Row::new(headers.iter().map(|h| TableCell::from(*h)))
        .style(theme::table_header())
        .bottom_margin(1);

    let body = rows.iter().map(|row| {
        let height = if row.iter().any(|c| c.secondary.is_some()) {
            2
        } else {
            1
        };
        Row::new(row.iter().map(|c| TableCell::from(cell_text(c))))
            .style(theme::table_row())
            .height(height)
    });

    let table = Table::new(body, column_widths(headers, rows))
        .header(header)
        .column_spacing(2)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, table_area, &mut state);

    if let Some(footer) = footer {
        let line = Line::from(vec![
            Span::styled(footer.showing.clone(), theme::secondary()),
            Span::styled("  ·  ", theme::key_hint()),
            Span::styled(footer.page.clone(), theme::secondary()),
        ]);
        frame.render_widget(Paragraph::new(line), footer_area);
    }
}
