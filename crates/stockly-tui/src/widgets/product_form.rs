//! Add / edit product popup.
//!
//! Text fields are `tui-input` inputs mirrored into the form's draft on
//! every keystroke. Category and status are pick lists cycled with
//! ←/→. Submit stays disabled until the draft validates; a field's
//! error shows once it has been edited or a submit was attempted.
//! While a save is in flight the popup ignores input, and a failed
//! save leaves the draft as it was.

use std::collections::HashSet;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tui_input::Input;

use stockly_core::form::{CATEGORY_OPTIONS, STATUS_OPTIONS};
use stockly_core::{Field, FieldErrors, FormMode, Product, ProductForm};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::input::{input_request, render_input};

const FIELDS: [Field; 9] = [
    Field::Name,
    Field::Sku,
    Field::Category,
    Field::Description,
    Field::Price,
    Field::Cost,
    Field::StockQuantity,
    Field::MinStockLevel,
    Field::Status,
];

const LABEL_WIDTH: usize = 18;

fn options(field: Field) -> Option<&'static [(&'static str, &'static str)]> {
    match field {
        Field::Category => Some(CATEGORY_OPTIONS),
        Field::Status => Some(STATUS_OPTIONS),
        _ => None,
    }
}

pub struct ProductFormPopup {
    form: ProductForm,
    inputs: Vec<Input>,
    focus: usize,
    touched: HashSet<Field>,
    attempted: bool,
    submitting: bool,
}

impl ProductFormPopup {
    pub fn new(product: Option<&Product>) -> Self {
        let form = product.map_or_else(ProductForm::create, ProductForm::edit);
        let inputs = FIELDS
            .iter()
            .map(|f| Input::new(form.draft.get(*f).to_owned()))
            .collect();
        Self {
            form,
            inputs,
            focus: 0,
            touched: HashSet::new(),
            attempted: false,
            submitting: false,
        }
    }

    fn field(&self) -> Field {
        FIELDS.get(self.focus).copied().unwrap_or(Field::Name)
    }

    fn errors(&self) -> FieldErrors {
        self.form.validate().err().unwrap_or_default()
    }

    fn visible_error(&self, errors: &FieldErrors, field: Field) -> Option<&'static str> {
        (self.attempted || self.touched.contains(&field))
            .then(|| errors.get(field))
            .flatten()
    }

    fn set_value(&mut self, value: String) {
        let field = self.field();
        self.touched.insert(field);
        self.form.draft.set(field, value.clone());
        if let Some(input) = self.inputs.get_mut(self.focus) {
            *input = Input::new(value);
        }
    }

    /// Step a pick list; an unknown current value starts from the top.
    fn cycle(&mut self, forward: bool) {
        let Some(choices) = options(self.field()) else {
            return;
        };
        let current = self.form.draft.get(self.field());
        let len = choices.len();
        let next = match choices.iter().position(|(v, _)| *v == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        if let Some((value, _)) = choices.get(next) {
            self.set_value((*value).to_owned());
        }
    }

    fn edit_text(&mut self, key: KeyEvent) {
        let Some(req) = input_request(key) else {
            return;
        };
        let field = self.field();
        let Some(input) = self.inputs.get_mut(self.focus) else {
            return;
        };
        input.handle(req);
        let value = input.value().to_owned();
        self.touched.insert(field);
        self.form.draft.set(field, value);
    }

    fn submit(&mut self) -> Option<Action> {
        if let Err(errors) = self.form.validate() {
            self.attempted = true;
            if let Some((first, _)) = errors.iter().next() {
                self.focus = FIELDS.iter().position(|f| *f == first).unwrap_or(0);
            }
            return None;
        }
        self.submitting = true;
        Some(Action::SubmitProductForm(Box::new(self.form.clone())))
    }

    fn display_value(&self, field: Field) -> String {
        let raw = self.form.draft.get(field);
        match options(field) {
            Some(choices) => choices
                .iter()
                .find(|(v, _)| *v == raw)
                .map_or_else(
                    || {
                        if raw.is_empty() {
                            format!("Select {}", field.label().to_lowercase())
                        } else {
                            raw.to_owned()
                        }
                    },
                    |(_, label)| (*label).to_owned(),
                ),
            None => raw.to_owned(),
        }
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, index: usize, errors: &FieldErrors) {
        let Some(&field) = FIELDS.get(index) else {
            return;
        };
        let focused = index == self.focus;
        let [row, error_row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let marker = if field.is_required() { "*" } else { " " };
        let label_style = if focused {
            theme::key_hint_key()
        } else {
            theme::table_row()
        };
        let label = Span::styled(
            format!(" {:<width$}{marker} ", field.label(), width = LABEL_WIDTH - 3),
            label_style,
        );

        match (options(field), self.inputs.get(index)) {
            (None, Some(input)) => render_input(frame, row, label, input, focused),
            _ => {
                let value_style = if focused {
                    theme::table_row().bg(theme::BG_SELECTED)
                } else {
                    theme::table_row()
                };
                let arrows = if focused { "  ◂ ▸" } else { "" };
                frame.render_widget(
                    Paragraph::new(Line::from(vec![
                        label,
                        Span::styled(self.display_value(field), value_style),
                        Span::styled(arrows, theme::key_hint()),
                    ])),
                    row,
                );
            }
        }

        if let Some(message) = self.visible_error(errors, field) {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::raw(" ".repeat(LABEL_WIDTH)),
                    Span::styled(message, theme::error_text()),
                ])),
                error_row,
            );
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, valid: bool) {
        let verb = match self.form.mode() {
            FormMode::Create => "Create Product",
            FormMode::Edit(_) => "Update Product",
        };
        let (label, style) = if self.submitting {
            ("Saving...".to_owned(), theme::key_hint())
        } else if valid {
            (
                format!("Enter {verb}"),
                Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD),
            )
        } else {
            (format!("Enter {verb}"), theme::key_hint())
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(label, style),
                Span::styled("    Esc ", theme::key_hint_key()),
                Span::styled("Cancel    ", theme::key_hint()),
                Span::styled("Tab ", theme::key_hint_key()),
                Span::styled("next field", theme::key_hint()),
            ])),
            area,
        );
    }
}

impl Component for ProductFormPopup {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.submitting {
            return Ok(None);
        }
        let choice = options(self.field()).is_some();
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseProductForm),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELDS.len();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
                None
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if choice => {
                self.cycle(key.code != KeyCode::Left);
                None
            }
            _ if choice => None,
            _ => {
                self.edit_text(key);
                None
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ProductSaveFailed(_) = action {
            self.submitting = false;
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let height = u16::try_from(FIELDS.len() * 2 + 4).unwrap_or(u16::MAX);
        let popup = centered(area, 72, height);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", self.form.title()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_POPUP));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints = vec![Constraint::Length(2); FIELDS.len()];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        let errors = self.errors();
        for (index, row) in rows.iter().take(FIELDS.len()).enumerate() {
            self.render_field(frame, *row, index, &errors);
        }
        if let Some(buttons) = rows.last() {
            self.render_buttons(frame, *buttons, errors.is_empty());
        }
    }

    fn id(&self) -> &str {
        "product-form"
    }
}

/// A `width` × `height` rect centered in `area`, clipped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
