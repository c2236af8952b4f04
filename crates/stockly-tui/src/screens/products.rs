//! Products tab: the generic list plus search, category and status
//! filters, paging, and the add / edit / delete entry points.
//!
//! Every filter change publishes a new [`Filters`] set; the data bridge
//! swaps the observed query to match.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_input::Input;

use stockly_core::form::CATEGORY_OPTIONS;
use stockly_core::{Filters, Product, TabId};

use crate::action::{Action, ConfirmAction, Records};
use crate::component::Component;
use crate::screens::list::{ListScreen, hint_line};
use crate::theme;
use crate::widgets::input::{input_request, render_input};

/// Status filter cycle; the empty value means all statuses.
const STATUS_FILTERS: &[(&str, &str)] = &[
    ("", "All"),
    ("active", "Active"),
    ("inactive", "Inactive"),
    ("discontinued", "Discontinued"),
];

/// Starting filter set: first page at the configured size.
pub fn initial_filters(page_size: u32) -> Filters {
    Filters::new()
        .with("page", "1")
        .with("limit", page_size.to_string())
}

pub struct ProductsScreen {
    list: ListScreen,
    page_size: u32,
    page: u32,
    /// 0 is all categories, otherwise an index into [`CATEGORY_OPTIONS`] plus one.
    category: usize,
    status: usize,
    search: Input,
    /// Search text before `/` was pressed, restored on Esc.
    search_before: Option<String>,
}

impl ProductsScreen {
    pub fn new(page_size: u32) -> Self {
        Self {
            list: ListScreen::new(TabId::Products),
            page_size,
            page: 1,
            category: 0,
            status: 0,
            search: Input::default(),
            search_before: None,
        }
    }

    pub fn filters(&self) -> Filters {
        let mut filters = initial_filters(self.page_size).with("page", self.page.to_string());
        filters.insert("search", self.search.value());
        if let Some((category, _)) = self.category_choice() {
            filters.insert("category", *category);
        }
        if let Some((status, _)) = STATUS_FILTERS.get(self.status) {
            filters.insert("status", *status);
        }
        filters
    }

    fn publish(&self) -> Option<Action> {
        Some(Action::SetFilters(TabId::Products, self.filters()))
    }

    fn selected_product(&self) -> Option<&Product> {
        match self.list.records() {
            Records::Products(products) => products.items.get(self.list.selected()),
            _ => None,
        }
    }

    fn total_pages(&self) -> u32 {
        match self.list.records() {
            Records::Products(products) => products
                .pagination
                .as_ref()
                .map_or(1, |p| p.total_pages.max(1)),
            _ => 1,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                self.search_before = None;
                self.page = 1;
                self.publish()
            }
            KeyCode::Esc => {
                if let Some(before) = self.search_before.take() {
                    self.search = Input::new(before);
                }
                None
            }
            _ => {
                if let Some(req) = input_request(key) {
                    self.search.handle(req);
                }
                None
            }
        }
    }

    fn category_choice(&self) -> Option<&'static (&'static str, &'static str)> {
        self.category.checked_sub(1).and_then(|i| CATEGORY_OPTIONS.get(i))
    }

    fn category_label(&self) -> &'static str {
        self.category_choice().map_or("All", |&(_, label)| label)
    }

    fn status_label(&self) -> &'static str {
        STATUS_FILTERS.get(self.status).map_or("All", |&(_, label)| label)
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let [search_area, category_area, status_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(32),
            Constraint::Length(24),
        ])
        .areas(area);

        let label = Span::styled(" / ", theme::key_hint_key());
        if self.search_before.is_some() {
            render_input(frame, search_area, label, &self.search, true);
        } else {
            let value = if self.search.value().is_empty() {
                Span::styled("search products", theme::key_hint())
            } else {
                Span::styled(self.search.value().to_owned(), theme::table_row())
            };
            frame.render_widget(Paragraph::new(Line::from(vec![label, value])), search_area);
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("c ", theme::key_hint_key()),
                Span::styled("category: ", theme::key_hint()),
                Span::styled(self.category_label(), theme::table_row()),
            ])),
            category_area,
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

impl Component for ProductsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.captures_input() {
            return Ok(self.handle_search_key(key));
        }
        let action = match key.code {
            KeyCode::Char('/') => {
                self.search_before = Some(self.search.value().to_owned());
                None
            }
            KeyCode::Char('c') => {
                self.category = (self.category + 1) % (CATEGORY_OPTIONS.len() + 1);
                self.page = 1;
                self.publish()
            }
            KeyCode::Char('f') => {
                self.status = (self.status + 1) % STATUS_FILTERS.len();
                self.page = 1;
                self.publish()
            }
            KeyCode::Char('n') if self.page < self.total_pages() => {
                self.page += 1;
                self.publish()
            }
            KeyCode::Char('p') if self.page > 1 => {
                self.page -= 1;
                self.publish()
            }
            KeyCode::Char('n' | 'p') => None,
            KeyCode::Char('a') => Some(Action::OpenProductForm(None)),
            KeyCode::Char('e') => self
                .selected_product()
                .map(|p| Action::OpenProductForm(Some(Box::new(p.clone())))),
            KeyCode::Char('d') => self.selected_product().map(|p| {
                Action::ShowConfirm(ConfirmAction::DeleteProduct {
                    id: p.id.clone(),
                    name: p.name.clone(),
                })
            }),
            _ => self.list.handle_navigation(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        self.list.update(action)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = hint_line(&[
            ("/", "search"),
            ("c", "category"),
            ("f", "status"),
            ("n/p", "page"),
            ("a", "add"),
            ("e", "edit"),
            ("d", "delete"),
            ("r", "retry"),
        ]);
        let block = self.list.block(Some(hints));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [bar, _, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);
        self.render_filter_bar(frame, bar);
        self.list.render_body(frame, body);
    }

    fn captures_input(&self) -> bool {
        self.search_before.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.list.set_focused(focused);
    }

    fn id(&self) -> &str {
        TabId::Products.id()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use stockly_core::view::views;
    use stockly_core::{
        Collection, Pagination, ProductStatus, QueryKey, QueryState, RecordId, Resource,
    };

    use super::*;
    use crate::action::ViewFeed;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut ProductsScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn filters_of(action: Option<Action>) -> Filters {
        match action {
            Some(Action::SetFilters(TabId::Products, f)) => f,
            other => panic!("expected filters, got {other:?}"),
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: RecordId::from(id),
            sku: format!("SKU-{id}"),
            name: format!("Product {id}"),
            description: None,
            category: Some("home".into()),
            price: 10.0,
            cost: None,
            stock_quantity: 12,
            min_stock_level: Some(5),
            status: ProductStatus::Active,
            supplier_name: None,
            location_name: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn load(screen: &mut ProductsScreen, items: Vec<Product>, total_pages: u32) {
        let collection = Arc::new(Collection {
            items,
            pagination: Some(Pagination {
                page: 1,
                limit: 20,
                total: u64::from(total_pages) * 20,
                total_pages,
            }),
        });
        let feed = ViewFeed {
            tab: TabId::Products,
            key: QueryKey::new(Resource::Products),
            view: views::products(Filters::new()).render(&QueryState::Ready(Arc::clone(&collection))),
            refreshing: false,
            records: Records::Products(collection),
        };
        screen.update(&Action::ViewUpdated(Box::new(feed))).unwrap();
    }

    #[test]
    fn initial_filters_are_first_page() {
        let screen = ProductsScreen::new(20);
        let filters = screen.filters();
        assert_eq!(filters.get("page"), Some("1"));
        assert_eq!(filters.get("limit"), Some("20"));
        assert_eq!(filters.get("search"), None);
        assert_eq!(filters.get("status"), None);
    }

    #[test]
    fn search_applies_on_enter_and_captures_keys() {
        let mut screen = ProductsScreen::new(20);
        screen.handle_key_event(key(KeyCode::Char('/'))).unwrap();
        assert!(screen.captures_input());

        // 'q', 'f', and 'd' are text while searching.
        type_text(&mut screen, "fqd");
        let filters = filters_of(screen.handle_key_event(key(KeyCode::Enter)).unwrap());
        assert_eq!(filters.get("search"), Some("fqd"));
        assert!(!screen.captures_input());
    }

    #[test]
    fn esc_restores_previous_search() {
        let mut screen = ProductsScreen::new(20);
        screen.handle_key_event(key(KeyCode::Char('/'))).unwrap();
        type_text(&mut screen, "mug");
        screen.handle_key_event(key(KeyCode::Enter)).unwrap();

        screen.handle_key_event(key(KeyCode::Char('/'))).unwrap();
        type_text(&mut screen, "xyz");
        assert!(screen.handle_key_event(key(KeyCode::Esc)).unwrap().is_none());
        assert_eq!(screen.filters().get("search"), Some("mug"));
    }

    #[test]
    fn f_cycles_status_and_resets_page() {
        let mut screen = ProductsScreen::new(20);
        let statuses: Vec<Option<String>> = (0..4)
            .map(|_| {
                filters_of(screen.handle_key_event(key(KeyCode::Char('f'))).unwrap())
                    .get("status")
                    .map(str::to_owned)
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                Some("active".to_owned()),
                Some("inactive".to_owned()),
                Some("discontinued".to_owned()),
                None
            ]
        );
    }

    #[test]
    fn c_cycles_category_and_resets_page() {
        let mut screen = ProductsScreen::new(20);
        load(&mut screen, vec![product("1")], 3);
        screen.handle_key_event(key(KeyCode::Char('n'))).unwrap();

        let filters = filters_of(screen.handle_key_event(key(KeyCode::Char('c'))).unwrap());
        assert_eq!(filters.get("category"), Some("electronics"));
        assert_eq!(filters.get("page"), Some("1"));

        let filters = filters_of(screen.handle_key_event(key(KeyCode::Char('c'))).unwrap());
        assert_eq!(filters.get("category"), Some("clothing"));

        // Wraps back to all categories after the last option.
        let mut last = None;
        for _ in 0..CATEGORY_OPTIONS.len() - 1 {
            last = Some(filters_of(
                screen.handle_key_event(key(KeyCode::Char('c'))).unwrap(),
            ));
        }
        assert_eq!(last.unwrap().get("category"), None);
    }

    #[test]
    fn paging_stays_within_bounds() {
        let mut screen = ProductsScreen::new(20);
        load(&mut screen, vec![product("1")], 2);

        assert!(screen.handle_key_event(key(KeyCode::Char('p'))).unwrap().is_none());
        let filters = filters_of(screen.handle_key_event(key(KeyCode::Char('n'))).unwrap());
        assert_eq!(filters.get("page"), Some("2"));
        assert!(screen.handle_key_event(key(KeyCode::Char('n'))).unwrap().is_none());
    }

    #[test]
    fn delete_asks_for_confirmation_of_the_selected_row() {
        let mut screen = ProductsScreen::new(20);
        load(&mut screen, vec![product("1"), product("2")], 1);
        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();

        let action = screen.handle_key_event(key(KeyCode::Char('d'))).unwrap();
        match action {
            Some(Action::ShowConfirm(ConfirmAction::DeleteProduct { id, .. })) => {
                assert_eq!(id, RecordId::from("2"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn edit_without_rows_does_nothing() {
        let mut screen = ProductsScreen::new(20);
        assert!(screen.handle_key_event(key(KeyCode::Char('e'))).unwrap().is_none());
        assert!(matches!(
            screen.handle_key_event(key(KeyCode::Char('a'))).unwrap(),
            Some(Action::OpenProductForm(None))
        ));
    }
}
