//! Dashboard screen: headline tiles over the overview panels.
//!
//! Layout:
//! ┌─ Total Products ─┐┌─ Low Stock ─┐┌─ Stock Value ─┐┌─ Warehouses ─┐
//! └──────────────────┘└─────────────┘└───────────────┘└──────────────┘
//! ┌─ Inventory Overview ───────────┐┌─ Stock Alerts ─────────────────┐
//! └────────────────────────────────┘└────────────────────────────────┘

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};

use stockly_core::dashboard::{dashboard_kpis, overview_alerts, overview_summary};
use stockly_core::view::RETRY_HINT;
use stockly_core::{InventoryAnalytics, Kpi, QueryState, TabId};

use crate::action::Action;
use crate::component::Component;
use crate::screens::list::hint_line;
use crate::theme;

pub struct DashboardScreen {
    focused: bool,
    analytics: QueryState<InventoryAnalytics>,
    throbber: ThrobberState,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            analytics: QueryState::Loading,
            throbber: ThrobberState::default(),
        }
    }

    fn data(&self) -> Option<&InventoryAnalytics> {
        self.analytics.data().map(Arc::as_ref)
    }

    fn panel(&self, title: &'static str) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
    }

    fn render_tile(&self, frame: &mut Frame, area: Rect, kpi: &Kpi) {
        let block = self.panel(kpi.label);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if matches!(self.analytics, QueryState::Loading) {
            let throbber = Throbber::default()
                .label(" loading")
                .style(theme::secondary())
                .throbber_style(theme::toned(kpi.tone));
            frame.render_stateful_widget(throbber, inner, &mut self.throbber.clone());
            return;
        }
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                kpi.value.clone(),
                theme::toned(kpi.tone).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            inner,
        );
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, title: &'static str, rows: &[Kpi]) {
        let lines: Vec<Line> = rows
            .iter()
            .map(|kpi| {
                Line::from(vec![
                    Span::styled(format!(" {:<18}", kpi.label), theme::secondary()),
                    Span::styled(
                        kpi.value.clone(),
                        theme::toned(kpi.tone).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(self.panel(title)), area);
    }

    fn render_error(frame: &mut Frame, area: Rect, message: &str) {
        let text = vec![
            Line::from(Span::styled(message.to_owned(), theme::error_text())),
            Line::from(Span::styled(RETRY_HINT, theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match key.code {
            KeyCode::Char('r') => Some(Action::Retry(TabId::Dashboard)),
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::AnalyticsUpdated(state) => self.analytics = state.clone(),
            Action::Tick if matches!(self.analytics, QueryState::Loading) => {
                self.throbber.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [tiles, status, panels, hints] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(if self.analytics.error().is_some() { 2 } else { 0 }),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .areas(area);

        let kpis = dashboard_kpis(self.data());
        let tile_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(tiles);
        for (kpi, tile) in kpis.iter().zip(tile_areas.iter()) {
            self.render_tile(frame, *tile, kpi);
        }

        if let Some(err) = self.analytics.error() {
            Self::render_error(frame, status, &err.to_string());
        }

        let [left, right] =
            Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(panels);
        self.render_panel(
            frame,
            left,
            "Inventory Overview",
            &overview_summary(self.data()),
        );
        self.render_panel(frame, right, "Stock Alerts", &overview_alerts(self.data()));

        frame.render_widget(Paragraph::new(hint_line(&[("r", "refresh")])), hints);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        TabId::Dashboard.id()
    }
}
