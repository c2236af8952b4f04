//! Generic entity list screen.
//!
//! Shows whatever [`ViewState`] the data bridge last published for its
//! tab. The tab decides a few extras: a capacity gauge on warehouses and
//! approve/reject on adjustments. Products and stock levels wrap this
//! screen with their own filter bars.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge};
use throbber_widgets_tui::ThrobberState;

use stockly_core::format;
use stockly_core::{TabId, ViewState, Warehouse};

use crate::action::{Action, Notification, Records, ViewFeed};
use crate::component::Component;
use crate::theme;
use crate::widgets::view_table;

pub struct ListScreen {
    tab: TabId,
    focused: bool,
    view: ViewState,
    refreshing: bool,
    records: Records,
    selected: usize,
    throbber: ThrobberState,
}

impl ListScreen {
    pub fn new(tab: TabId) -> Self {
        Self {
            tab,
            focused: false,
            view: ViewState::Loading {
                text: "Loading...".into(),
            },
            refreshing: false,
            records: Records::None,
            selected: 0,
            throbber: ThrobberState::default(),
        }
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn apply_feed(&mut self, feed: &ViewFeed) {
        self.view = feed.view.clone();
        self.refreshing = feed.refreshing;
        self.records = feed.records.clone();
        self.selected = self.selected.min(self.view.row_count().saturating_sub(1));
    }

    /// Row movement and retry. Shared by every list-backed screen.
    pub fn handle_navigation(&mut self, key: KeyEvent) -> Option<Action> {
        let last = self.view.row_count().saturating_sub(1);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => self.selected = last,
            KeyCode::Char('r') => return Some(Action::Retry(self.tab)),
            _ => {}
        }
        None
    }

    fn review_selected(&self, approve: bool) -> Option<Action> {
        let Records::Adjustments(ref adjustments) = self.records else {
            return None;
        };
        let adjustment = adjustments.items.get(self.selected)?;
        if !adjustment.is_pending() {
            return Some(Action::Notify(Notification::error(
                "Only pending adjustments can be reviewed",
            )));
        }
        Some(Action::ReviewAdjustment {
            id: adjustment.id.clone(),
            approve,
        })
    }

    fn selected_warehouse(&self) -> Option<&Warehouse> {
        match self.records {
            Records::Warehouses(ref w) => w.items.get(self.selected),
            _ => None,
        }
    }

    /// Bordered block titled with the tab and row count.
    pub fn block(&self, suffix: Option<Line<'static>>) -> Block<'static> {
        let mut spans = vec![Span::styled(
            format!(" {} {} ", self.tab.icon(), self.tab.label()),
            theme::title_style(),
        )];
        if let ViewState::Table { ref rows, .. } = self.view {
            spans.push(Span::styled(format!("({}) ", rows.len()), theme::key_hint()));
        }
        if self.refreshing {
            spans.push(Span::styled("↻ ", theme::key_hint()));
        }
        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let mut block = Block::default()
            .title(Line::from(spans))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        if let Some(suffix) = suffix {
            block = block.title_bottom(suffix);
        }
        block
    }

    /// Draw the view inside `area` without the surrounding block.
    pub fn render_body(&self, frame: &mut Frame, area: Rect) {
        view_table::render(frame, area, &self.view, self.selected, &self.throbber);
    }

    fn render_gauge(frame: &mut Frame, area: Rect, warehouse: &Warehouse) {
        let pct = warehouse.capacity.utilization_pct();
        let color = theme::tone(format::utilization_band(pct));
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" {} capacity ", warehouse.name))
                    .title_style(theme::title_style())
                    .borders(Borders::TOP)
                    .border_style(theme::border_default()),
            )
            .gauge_style(Style::default().fg(color).bg(theme::BG_SELECTED))
            .ratio((pct / 100.0).clamp(0.0, 1.0))
            .label(format!(
                "{}/{} units ({pct:.0}%)",
                format::grouped(i64::try_from(warehouse.capacity.used).unwrap_or(i64::MAX)),
                format::grouped(i64::try_from(warehouse.capacity.total).unwrap_or(i64::MAX)),
            ));
        frame.render_widget(gauge, area);
    }

    fn hints(&self) -> Line<'static> {
        let mut pairs = vec![("j/k", "move"), ("g/G", "top/bottom"), ("r", "retry")];
        if self.tab == TabId::Adjustments {
            pairs.extend([("a", "approve"), ("x", "reject")]);
        }
        hint_line(&pairs)
    }
}

/// ` key label  key label ` in hint styling.
pub fn hint_line(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in pairs {
        spans.push(Span::styled(*key, theme::key_hint_key()));
        spans.push(Span::styled(format!(" {label}  "), theme::key_hint()));
    }
    Line::from(spans)
}

impl Component for ListScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.tab == TabId::Adjustments {
            match key.code {
                KeyCode::Char('a') => return Ok(self.review_selected(true)),
                KeyCode::Char('x') => return Ok(self.review_selected(false)),
                _ => {}
            }
        }
        Ok(self.handle_navigation(key))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ViewUpdated(feed) if feed.tab == self.tab => self.apply_feed(feed),
            Action::Tick if matches!(self.view, ViewState::Loading { .. }) => {
                self.throbber.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = self.block(Some(self.hints()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let warehouse = self.selected_warehouse();
        let [body, gauge_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(if warehouse.is_some() { 2 } else { 0 }),
        ])
        .areas(inner);

        self.render_body(frame, body);
        if let Some(warehouse) = warehouse {
            Self::render_gauge(frame, gauge_area, warehouse);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        self.tab.id()
    }
}
