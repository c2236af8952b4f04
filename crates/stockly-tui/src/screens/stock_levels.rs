//! Stock levels tab: the generic list with the alert line and the
//! warehouse and status filters.
//!
//! Warehouse choices come from the warehouses feed, which the data bridge
//! mounts alongside this tab.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use stockly_core::format;
use stockly_core::{Filters, StockStatus, TabId};

use crate::action::{Action, Records};
use crate::component::Component;
use crate::screens::list::{ListScreen, hint_line};
use crate::theme;

/// Stock status cycle; the empty value means all statuses.
const STATUS_FILTERS: &[(&str, &str)] = &[
    ("", "All"),
    ("critical", "Critical"),
    ("low", "Low"),
    ("ok", "OK"),
    ("overstock", "Overstock"),
];

pub struct StockLevelsScreen {
    list: ListScreen,
    /// `(id, name)` of every known warehouse.
    warehouses: Vec<(String, String)>,
    warehouse: Option<String>,
    status: usize,
}

impl StockLevelsScreen {
    pub fn new() -> Self {
        Self {
            list: ListScreen::new(TabId::StockLevels),
            warehouses: Vec::new(),
            warehouse: None,
            status: 0,
        }
    }

    pub fn filters(&self) -> Filters {
        let mut filters = Filters::new();
        if let Some(ref id) = self.warehouse {
            filters.insert("warehouse", id.as_str());
        }
        if let Some((status, _)) = STATUS_FILTERS.get(self.status) {
            filters.insert("status", *status);
        }
        filters
    }

    fn publish(&self) -> Option<Action> {
        Some(Action::SetFilters(TabId::StockLevels, self.filters()))
    }

    /// All, then each warehouse in feed order, then back to all.
    fn next_warehouse(&mut self) -> Option<Action> {
        if self.warehouses.is_empty() {
            return None;
        }
        let current = self
            .warehouse
            .as_ref()
            .and_then(|id| self.warehouses.iter().position(|(w, _)| w == id));
        let next = match current {
            None => 0,
            Some(i) => i + 1,
        };
        self.warehouse = self.warehouses.get(next).map(|(id, _)| id.clone());
        self.publish()
    }

    fn warehouse_label(&self) -> &str {
        self.warehouse
            .as_ref()
            .and_then(|id| self.warehouses.iter().find(|(w, _)| w == id))
            .map_or("All", |(_, name)| name.as_str())
    }

    fn status_label(&self) -> &'static str {
        STATUS_FILTERS.get(self.status).map_or("All", |&(_, label)| label)
    }

    fn alert_summary(&self) -> Option<String> {
        let Records::StockLevels(levels) = self.list.records() else {
            return None;
        };
        let count = |status| levels.items.iter().filter(|l| l.status == status).count();
        format::stock_alert_summary(count(StockStatus::Critical), count(StockStatus::Low))
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let [warehouse_area, status_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" w ", theme::key_hint_key()),
                Span::styled("warehouse: ", theme::key_hint()),
                Span::styled(self.warehouse_label().to_owned(), theme::table_row()),
            ])),
            warehouse_area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("f ", theme::key_hint_key()),
                Span::styled("status: ", theme::key_hint()),
                Span::styled(self.status_label(), theme::table_row()),
            ])),
            status_area,
        );
    }
}

impl Component for StockLevelsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('w') => self.next_warehouse(),
            KeyCode::Char('f') => {
                self.status = (self.status + 1) % STATUS_FILTERS.len();
                self.publish()
            }
            _ => self.list.handle_navigation(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ViewUpdated(feed) = action {
            if let Records::Warehouses(ref warehouses) = feed.records {
                self.warehouses = warehouses
                    .items
                    .iter()
                    .map(|w| (w.id.to_string(), w.name.clone()))
                    .collect();
            }
        }
        self.list.update(action)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = hint_line(&[
            ("w", "warehouse"),
            ("f", "status"),
            ("j/k", "move"),
            ("r", "retry"),
        ]);
        let block = self.list.block(Some(hints));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let alert = self.alert_summary();
        let [bar, alert_area, body] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(if alert.is_some() { 2 } else { 0 }),
            Constraint::Min(1),
        ])
        .areas(inner);

        self.render_filter_bar(frame, bar);
        if let Some(alert) = alert {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" ⚠ Stock Alert: ", theme::error_text()),
                    Span::styled(alert, theme::table_row()),
                ])),
                alert_area,
            );
        }
        self.list.render_body(frame, body);
    }

    fn set_focused(&mut self, focused: bool) {
        self.list.set_focused(focused);
    }

    fn id(&self) -> &str {
        TabId::StockLevels.id()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use stockly_core::view::views;
    use stockly_core::{
        Capacity, Collection, QueryKey, QueryState, RecordId, Resource, StockLevel, Warehouse,
        WarehouseStatus,
    };

    use super::*;
    use crate::action::ViewFeed;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn filters_of(action: Option<Action>) -> Filters {
        match action {
            Some(Action::SetFilters(TabId::StockLevels, f)) => f,
            other => panic!("expected stock filters, got {other:?}"),
        }
    }

    fn warehouse(id: i64, name: &str) -> Warehouse {
        Warehouse {
            id: RecordId::Numeric(id),
            name: name.into(),
            code: None,
            address: None,
            city: None,
            country: None,
            capacity: Capacity { total: 100, used: 10 },
            status: WarehouseStatus::Active,
        }
    }

    fn warehouses_feed(items: Vec<Warehouse>) -> Action {
        let collection = Arc::new(Collection {
            items,
            pagination: None,
        });
        Action::ViewUpdated(Box::new(ViewFeed {
            tab: TabId::Warehouses,
            key: QueryKey::new(Resource::Warehouses),
            view: views::warehouses().render(&QueryState::Ready(Arc::clone(&collection))),
            refreshing: false,
            records: Records::Warehouses(collection),
        }))
    }

    fn level(status: StockStatus) -> StockLevel {
        StockLevel {
            product_id: RecordId::from("1"),
            product_name: Some("Blue Mug".into()),
            sku: Some("SKU-1".into()),
            warehouse_name: None,
            quantity: 0,
            min_level: 5,
            max_level: 0,
            status,
            value: 0.0,
        }
    }

    #[test]
    fn warehouse_picker_cycles_through_known_warehouses() {
        let mut screen = StockLevelsScreen::new();
        assert!(screen.handle_key_event(key(KeyCode::Char('w'))).unwrap().is_none());

        screen
            .update(&warehouses_feed(vec![warehouse(1, "Main"), warehouse(2, "North")]))
            .unwrap();

        let picks: Vec<Option<String>> = (0..3)
            .map(|_| {
                filters_of(screen.handle_key_event(key(KeyCode::Char('w'))).unwrap())
                    .get("warehouse")
                    .map(str::to_owned)
            })
            .collect();
        assert_eq!(picks, vec![Some("1".to_owned()), Some("2".to_owned()), None]);
    }

    #[test]
    fn f_cycles_stock_status() {
        let mut screen = StockLevelsScreen::new();
        let statuses: Vec<Option<String>> = (0..5)
            .map(|_| {
                filters_of(screen.handle_key_event(key(KeyCode::Char('f'))).unwrap())
                    .get("status")
                    .map(str::to_owned)
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                Some("critical".to_owned()),
                Some("low".to_owned()),
                Some("ok".to_owned()),
                Some("overstock".to_owned()),
                None
            ]
        );
    }

    #[test]
    fn filters_combine() {
        let mut screen = StockLevelsScreen::new();
        screen
            .update(&warehouses_feed(vec![warehouse(3, "South")]))
            .unwrap();
        screen.handle_key_event(key(KeyCode::Char('w'))).unwrap();
        let filters = filters_of(screen.handle_key_event(key(KeyCode::Char('f'))).unwrap());
        assert_eq!(filters.get("warehouse"), Some("3"));
        assert_eq!(filters.get("status"), Some("critical"));
        assert_eq!(screen.warehouse_label(), "South");
    }

    #[test]
    fn shows_the_alert_summary_and_filter_bar() {
        let mut screen = StockLevelsScreen::new();
        let collection = Arc::new(Collection {
            items: vec![level(StockStatus::Critical), level(StockStatus::Low), level(StockStatus::Low)],
            pagination: None,
        });
        screen
            .update(&Action::ViewUpdated(Box::new(ViewFeed {
                tab: TabId::StockLevels,
                key: QueryKey::new(Resource::StockLevels),
                view: views::stock_levels(Filters::new())
                    .render(&QueryState::Ready(Arc::clone(&collection))),
                refreshing: false,
                records: Records::StockLevels(collection),
            })))
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("1 critical, 2 low stock items"));
        assert!(text.contains("warehouse: All"));
    }
}
