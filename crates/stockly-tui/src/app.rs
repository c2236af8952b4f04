//! Application core: event loop, tab management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use stockly_core::{Command, FormMode, Inventory, ProductForm, TabId};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge::DataBridge;
use crate::event::{Event, EventReader};
use crate::screens::{create_screens, products};
use crate::theme;
use crate::tui::Tui;
use crate::widgets::product_form::{ProductFormPopup, centered};

/// How long a toast stays up.
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    inventory: Inventory,
    active_tab: TabId,
    screens: HashMap<TabId, Box<dyn Component>>,
    bridge: DataBridge,
    running: bool,
    help_visible: bool,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    /// Add / edit product popup. Captures all input while open.
    form: Option<ProductFormPopup>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(inventory: Inventory) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let page_size = inventory.config().page_size;
        let screens = create_screens(page_size).into_iter().collect();
        let mut bridge = DataBridge::new(inventory.clone(), action_tx.clone());
        bridge.set_filters(TabId::Products, products::initial_filters(page_size));

        Self {
            inventory,
            active_tab: TabId::default(),
            screens,
            bridge,
            running: true,
            help_visible: false,
            pending_confirm: None,
            notification: None,
            form: None,
            action_tx,
            action_rx,
        }
    }

    /// Initialize screens and start observing the first tab.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_tab) {
            screen.set_focused(true);
        }
        self.bridge.mount(self.active_tab);
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.bridge.shutdown();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Overlays first, then text entry, then global keys, then the
    /// active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl_c = key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c');

        if let Some(ref mut form) = self.form {
            if ctrl_c {
                return Ok(Some(Action::Quit));
            }
            return form.handle_key_event(key);
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let Some(screen) = self.screens.get_mut(&self.active_tab) else {
            return Ok(None);
        };

        if screen.captures_input() {
            if ctrl_c {
                return Ok(Some(Action::Quit));
            }
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let tab = c
                    .to_digit(10)
                    .and_then(|n| u8::try_from(n).ok())
                    .and_then(TabId::from_number);
                if let Some(tab) = tab {
                    return Ok(Some(Action::SwitchTab(tab)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchTab(self.active_tab.next())));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchTab(self.active_tab.prev())));
            }

            _ => {}
        }

        screen.handle_key_event(key)
    }

    /// Update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
                self.bridge.shutdown();
            }

            Action::Resize(..) | Action::Render => {}

            Action::SwitchTab(target) => {
                if *target != self.active_tab {
                    debug!("switching tab: {} → {}", self.active_tab, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_tab) {
                        screen.set_focused(false);
                    }
                    self.active_tab = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_tab) {
                        screen.set_focused(true);
                    }
                }
                self.bridge.mount(*target);
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Tick => {
                if let Some((_, shown)) = &self.notification {
                    if shown.elapsed() > TOAST_TTL {
                        self.notification = None;
                    }
                }
                self.broadcast(action)?;
            }

            // A feed for filters the tab has since moved away from.
            Action::ViewUpdated(feed)
                if self.bridge.key(feed.tab).is_some_and(|key| *key != feed.key) =>
            {
                debug!(tab = %feed.tab, key = %feed.key, "dropping superseded feed");
            }

            Action::ViewUpdated(_) | Action::AnalyticsUpdated(_) => self.broadcast(action)?,

            Action::Retry(tab) => self.bridge.retry(*tab),

            Action::SetFilters(tab, filters) => {
                self.bridge.set_filters(*tab, filters.clone());
            }

            // ── Product form ──────────────────────────────────────────
            Action::OpenProductForm(product) => {
                self.form = Some(ProductFormPopup::new(product.as_deref()));
            }

            Action::CloseProductForm => self.form = None,

            Action::SubmitProductForm(form) => self.submit_form((**form).clone()),

            Action::ProductSaved(message) => {
                self.form = None;
                self.notify(Notification::success(message.clone()));
            }

            Action::ProductSaveFailed(message) => {
                if let Some(ref mut form) = self.form {
                    form.update(action)?;
                }
                self.notify(Notification::error(message.clone()));
            }

            // ── Confirmation ──────────────────────────────────────────
            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            Action::ReviewAdjustment { id, approve } => {
                let (cmd, message) = if *approve {
                    (
                        Command::ApproveAdjustment { id: id.clone() },
                        "Adjustment approved",
                    )
                } else {
                    (
                        Command::RejectAdjustment { id: id.clone() },
                        "Adjustment rejected",
                    )
                };
                self.execute_command(cmd, message.to_owned());
            }

            Action::Notify(notification) => self.notify(notification.clone()),
        }
        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    // ── Command execution ─────────────────────────────────────────

    /// Spawn a command execution task. Sends a Notify action on completion.
    fn execute_command(&self, cmd: Command, success_msg: String) {
        let inventory = self.inventory.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match inventory.execute(cmd).await {
                Ok(_) => {
                    let _ = tx.send(Action::Notify(Notification::success(success_msg)));
                }
                Err(e) => {
                    warn!(error = %e, "command execution failed");
                    let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                }
            }
        });
    }

    fn execute_confirm(&self, confirm: ConfirmAction) {
        match confirm {
            ConfirmAction::DeleteProduct { id, name } => {
                let inventory = self.inventory.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    // Already confirmed through the dialog.
                    let notification = match inventory.delete_product(id, || true).await {
                        Ok(_) => {
                            info!(%name, "product deleted");
                            Notification::success("Product deleted successfully")
                        }
                        Err(e) => {
                            warn!(error = %e, %name, "product delete failed");
                            Notification::error(e.to_string())
                        }
                    };
                    let _ = tx.send(Action::Notify(notification));
                });
            }
        }
    }

    /// Save the form. The popup stays open until the result arrives.
    fn submit_form(&self, form: ProductForm) {
        let inventory = self.inventory.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let verb = match form.mode() {
                FormMode::Create => "created",
                FormMode::Edit(_) => "updated",
            };
            let action = match form.submit(&inventory).await {
                Ok(product) => {
                    info!(id = %product.id, "product {verb}");
                    Action::ProductSaved(format!("Product {verb} successfully"))
                }
                Err(e) => {
                    warn!(error = %e, "product save failed");
                    Action::ProductSaveFailed(e.to_string())
                }
            };
            let _ = tx.send(action);
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_tab) {
            screen.render(frame, content_area);
        }
        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Overlays, last is topmost.
        if let Some(ref form) = self.form {
            form.render(frame, content_area);
        }
        if let Some((ref notif, _)) = self.notification {
            render_notification(frame, area, notif);
        }
        if let Some(ref confirm) = self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = TabId::ALL
            .iter()
            .map(|&tab| {
                let style = if tab == self.active_tab {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", tab.number(), tab.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                TabId::ALL
                    .iter()
                    .position(|&t| t == self.active_tab)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" ● ", Style::default().fg(theme::TEAL)),
            Span::styled(self.inventory.config().api_url.to_string(), theme::secondary()),
            Span::styled(" │ ? help  Tab next  1-9 jump  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn key_row(key: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
        Span::styled(label, theme::key_hint()),
    ])
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default().fg(theme::TEAL),
    ))
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 56, 28);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_POPUP));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        section("Navigation"),
        key_row("1-9", "Jump to tab"),
        key_row("Tab", "Next tab"),
        key_row("j/k ↑/↓", "Move up/down"),
        key_row("g/G", "Top / bottom"),
        key_row("r", "Retry / refresh"),
        Line::from(""),
        section("Products"),
        key_row("/", "Search (Enter apply, Esc cancel)"),
        key_row("c f", "Cycle category / status filter"),
        key_row("n/p", "Next / previous page"),
        key_row("a e d", "Add / edit / delete"),
        Line::from(""),
        section("Stock Levels"),
        key_row("w f", "Cycle warehouse / status filter"),
        Line::from(""),
        section("Adjustments"),
        key_row("a x", "Approve / reject pending"),
        Line::from(""),
        section("Global"),
        key_row("?", "This help"),
        key_row("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "                  Esc or ? to close",
            theme::key_hint(),
        )),
    ];
    frame.render_widget(Paragraph::new(help_text), inner);
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let dialog_area = centered(area, 56, 7);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::AMBER))
        .style(Style::default().bg(theme::BG_POPUP));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let subject = match confirm {
        ConfirmAction::DeleteProduct { name, .. } => name.clone(),
    };
    let text = vec![
        Line::from(Span::styled(format!("  {confirm}"), theme::table_row())),
        Line::from(Span::styled(format!("  {subject}"), theme::secondary())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Toast in the bottom-right corner, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
    let width = u16::try_from(notif.message.chars().count() + 6)
        .unwrap_or(u16::MAX)
        .clamp(20, 60)
        .min(area.width);
    let height = 3u16;

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height.min(area.height));

    let (color, icon) = match notif.level {
        NotificationLevel::Success => (theme::GREEN, "✓"),
        NotificationLevel::Error => (theme::RED, "✗"),
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_POPUP));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(notif.message.as_str(), theme::table_row()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use stockly_core::{Filters, InventoryConfig, QueryCache, RecordId, ViewState};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn app_for(server: &MockServer) -> App {
        let url = stockly_config::parse_api_url(&format!("{}/api/v1", server.uri())).unwrap();
        let inventory = Inventory::new(InventoryConfig::new(url), QueryCache::new()).unwrap();
        App::new(inventory)
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn delete_confirm() -> Action {
        Action::ShowConfirm(ConfirmAction::DeleteProduct {
            id: RecordId::from("7"),
            name: "Blue Mug".into(),
        })
    }

    #[tokio::test]
    async fn number_keys_switch_tabs_and_mount_lazily() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);
        assert!(!app.bridge.is_mounted(TabId::Warehouses));

        let action = press(&mut app, KeyCode::Char('4')).unwrap();
        assert!(matches!(action, Action::SwitchTab(TabId::Warehouses)));
        app.process_action(&action).unwrap();

        assert_eq!(app.active_tab, TabId::Warehouses);
        assert!(app.bridge.is_mounted(TabId::Warehouses));
        assert!(!app.bridge.is_mounted(TabId::Products));
    }

    #[tokio::test]
    async fn search_input_swallows_global_keys() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);
        app.process_action(&Action::SwitchTab(TabId::Products)).unwrap();

        assert!(press(&mut app, KeyCode::Char('/')).is_none());
        assert!(press(&mut app, KeyCode::Char('q')).is_none());
        assert!(press(&mut app, KeyCode::Char('3')).is_none());
        assert!(press(&mut app, KeyCode::Esc).is_none());
        assert!(matches!(press(&mut app, KeyCode::Char('q')), Some(Action::Quit)));
    }

    #[tokio::test]
    async fn declining_a_delete_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        let mut app = app_for(&server);

        app.process_action(&delete_confirm()).unwrap();
        assert!(draw(&app).contains("Are you sure you want to delete this product?"));

        let action = press(&mut app, KeyCode::Char('n')).unwrap();
        app.process_action(&action).unwrap();
        assert!(app.pending_confirm.is_none());
        assert!(!draw(&app).contains("Are you sure"));
    }

    #[tokio::test]
    async fn confirming_a_delete_calls_the_api_and_toasts() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/inventory/products/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let mut app = app_for(&server);

        app.process_action(&delete_confirm()).unwrap();
        // Other keys are ignored while the dialog is up.
        assert!(press(&mut app, KeyCode::Char('q')).is_none());
        let action = press(&mut app, KeyCode::Char('y')).unwrap();
        app.process_action(&action).unwrap();

        let notify = app.action_rx.recv().await.unwrap();
        match notify {
            Action::Notify(ref n) => {
                assert_eq!(n.level, NotificationLevel::Success);
                assert_eq!(n.message, "Product deleted successfully");
            }
            ref other => panic!("unexpected {other:?}"),
        }
        app.process_action(&notify).unwrap();
        assert!(draw(&app).contains("✓ Product deleted successfully"));
    }

    #[tokio::test]
    async fn failed_save_keeps_the_form_open() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);

        app.process_action(&Action::OpenProductForm(None)).unwrap();
        // The popup owns the keyboard.
        assert!(press(&mut app, KeyCode::Char('q')).is_none());

        app.process_action(&Action::ProductSaveFailed("SKU already exists".into()))
            .unwrap();
        assert!(app.form.is_some());
        let screen = draw(&app);
        assert!(screen.contains("Add New Product"));
        assert!(screen.contains("SKU already exists"));

        app.process_action(&Action::ProductSaved("Product created successfully".into()))
            .unwrap();
        assert!(app.form.is_none());
    }

    #[tokio::test]
    async fn stock_filters_swap_the_observed_query() {
        const EMPTY: &str = r#"{"success":true,"data":[]}"#;
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/inventory/stock"))
            .and(query_param("status", "critical"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(EMPTY, "application/json"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(EMPTY, "application/json"))
            .mount(&server)
            .await;
        let mut app = app_for(&server);

        app.process_action(&Action::SwitchTab(TabId::StockLevels)).unwrap();
        // The warehouse picker needs the warehouses feed.
        assert!(app.bridge.is_mounted(TabId::Warehouses));
        let before = app.bridge.key(TabId::StockLevels).cloned().unwrap();

        let filters = Filters::new().with("status", "critical");
        app.process_action(&Action::SetFilters(TabId::StockLevels, filters.clone()))
            .unwrap();
        let key = app.bridge.key(TabId::StockLevels).cloned().unwrap();
        assert_ne!(key, before);
        assert_eq!(key.filters, filters);

        let feed = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Some(Action::ViewUpdated(feed)) = app.action_rx.recv().await {
                    if feed.key == key && !matches!(feed.view, ViewState::Loading { .. }) {
                        return feed;
                    }
                }
            }
        })
        .await
        .unwrap();
        assert!(matches!(feed.view, ViewState::Empty { .. }));
    }

    #[tokio::test]
    async fn tab_bar_lists_every_tab() {
        let server = MockServer::start().await;
        let app = app_for(&server);
        let screen = draw(&app);
        for tab in TabId::ALL {
            assert!(screen.contains(tab.label()), "missing {tab}");
        }
    }
}
