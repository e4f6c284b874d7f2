//! Application shell and event loop
//!
//! One `App` owns every piece of state; spawned tasks never touch it
//! directly and instead deliver results through the event channel,
//! which the loop applies between draws.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

use roster_client::{
    DeletedEmployee, DemoSource, DirectoryApi, EmployeeSource, FlagStore, LocalStore, SessionStore,
    SourceKind,
};
use shared::{Employee, EmployeePage, LoginResponse};

use crate::config::Config;
use crate::router::{self, Route};
use crate::state::{AuthGate, DirectoryState, ViewMode};
use crate::ui;

/// Current input mode
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Which login form field has focus
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Which filter field receives keystrokes while editing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    #[default]
    Name,
    Class,
}

/// Login form state
#[derive(Default)]
pub struct LoginForm {
    pub username: Input,
    pub password: Input,
    pub focus: LoginField,
    pub error: Option<String>,
    pub loading: bool,
}

impl LoginForm {
    pub fn reset(&mut self) {
        self.username.reset();
        self.password.reset();
        self.focus = LoginField::Username;
        self.error = None;
        self.loading = false;
    }

    fn focused_mut(&mut self) -> &mut Input {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Row actions offered by the listing menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Flag,
    Delete,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::Flag => "Flag",
            RowAction::Delete => "Delete",
        }
    }
}

/// Menu entries for the current role; Edit and Delete are admin-only
pub fn row_actions(is_admin: bool) -> &'static [RowAction] {
    if is_admin {
        &[RowAction::Edit, RowAction::Flag, RowAction::Delete]
    } else {
        &[RowAction::Flag]
    }
}

/// Results delivered back to the event loop by spawned tasks
pub enum AppEvent {
    Collection {
        generation: u64,
        result: Result<Vec<Employee>, String>,
    },
    Page {
        generation: u64,
        result: Result<EmployeePage, String>,
    },
    LoginDone {
        result: Result<LoginResponse, String>,
    },
    DeleteDone {
        id: i64,
        result: Result<DeletedEmployee, String>,
    },
}

pub struct App {
    /// Current route, already guard-resolved
    pub route: Route,
    pub auth: AuthGate,
    pub directory: DirectoryState,
    pub view_mode: ViewMode,
    /// Detail overlay, when open
    pub detail: Option<Employee>,
    /// Cursor into the row actions menu, when open
    pub menu: Option<usize>,
    /// Pending remote delete awaiting confirmation: (id, name)
    pub confirm_delete: Option<(i64, String)>,
    /// Blocking message dismissed with Enter or Esc
    pub alert: Option<String>,
    pub input_mode: InputMode,
    pub login: LoginForm,
    pub filter_name: Input,
    pub filter_class: Input,
    pub filter_focus: FilterField,
    pub logger_state: TuiWidgetState,
    pub show_logs: bool,
    /// Section cursor on the static pages
    pub page_section: usize,
    pub source: SourceKind,
    pub should_quit: bool,
    api: DirectoryApi,
    demo: DemoSource,
    events: mpsc::Sender<AppEvent>,
}

impl App {
    /// Build the shell: open the store, hydrate the session, wire the
    /// adapters. The caller keeps the receiving end of the channel.
    pub fn new(config: &Config) -> anyhow::Result<(Self, mpsc::Receiver<AppEvent>)> {
        let store = LocalStore::open(config.store_path())?;

        let mut auth = AuthGate::new(SessionStore::new(store.clone()));
        auth.hydrate()?;

        let client_config = config.client_config();
        let mut api = DirectoryApi::new(&client_config)?;
        api.set_token(auth.token().map(str::to_owned));
        let demo = DemoSource::new(&client_config)?;

        let server_paged = config.source == SourceKind::GraphQl;
        let directory = DirectoryState::new(FlagStore::new(store), config.page_size, server_paged)?;

        let (events, receiver) = mpsc::channel(16);

        let app = Self {
            route: router::resolve(Route::Home, auth.is_authenticated()),
            auth,
            directory,
            view_mode: ViewMode::default(),
            detail: None,
            menu: None,
            confirm_delete: None,
            alert: None,
            input_mode: InputMode::Normal,
            login: LoginForm::default(),
            filter_name: Input::default(),
            filter_class: Input::default(),
            filter_focus: FilterField::default(),
            logger_state: TuiWidgetState::new(),
            show_logs: false,
            page_section: 0,
            source: config.source,
            should_quit: false,
            api,
            demo,
            events,
        };
        Ok((app, receiver))
    }

    // ========== Navigation ==========

    /// Move to a route, passing it through the access guard
    ///
    /// Entering Home reloads the directory; overlays close on any
    /// navigation.
    pub fn navigate(&mut self, requested: Route) {
        let destination = router::resolve(requested, self.auth.is_authenticated());
        if destination != self.route {
            tracing::debug!(from = self.route.path(), to = destination.path(), "Navigate");
        }
        self.route = destination;
        self.detail = None;
        self.menu = None;
        self.confirm_delete = None;
        self.page_section = 0;
        if destination == Route::Login {
            self.login.reset();
            self.input_mode = InputMode::Editing;
        } else {
            self.input_mode = InputMode::Normal;
        }
        if destination == Route::Home {
            self.refresh();
        }
    }

    pub fn logout(&mut self) {
        if let Err(error) = self.auth.logout() {
            tracing::error!(%error, "Failed to clear session");
        }
        self.api.set_token(None);
        self.navigate(Route::Login);
    }

    // ========== Background Work ==========

    /// Reload the directory from the active source
    pub fn refresh(&mut self) {
        match self.source {
            SourceKind::Demo => self.spawn_collection_fetch(),
            SourceKind::GraphQl => self.spawn_page_fetch(),
        }
    }

    fn spawn_collection_fetch(&mut self) {
        let generation = self.directory.begin_fetch();
        let demo = self.demo.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = demo.fetch_all().await.map_err(|e| e.to_string());
            let _ = events.send(AppEvent::Collection { generation, result }).await;
        });
    }

    fn spawn_page_fetch(&mut self) {
        let generation = self.directory.begin_fetch();
        let request = self.directory.page_request();
        let filter = self.directory.filter_request();
        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api
                .employees_paginated(&request, filter.as_ref())
                .await
                .map_err(|e| e.to_string());
            let _ = events.send(AppEvent::Page { generation, result }).await;
        });
    }

    fn submit_login(&mut self) {
        let username = self.login.username.value().trim().to_owned();
        let password = self.login.password.value().to_owned();
        if username.is_empty() || password.is_empty() {
            self.login.error = Some("Please enter both username and password".into());
            return;
        }
        self.login.loading = true;
        self.login.error = None;

        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api
                .login(&username, &password)
                .await
                .map_err(|e| e.to_string());
            let _ = events.send(AppEvent::LoginDone { result }).await;
        });
    }

    fn spawn_delete(&mut self, id: i64) {
        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.delete_employee(id).await.map_err(|e| e.to_string());
            let _ = events.send(AppEvent::DeleteDone { id, result }).await;
        });
    }

    /// Delete a row: immediately in demo mode, after confirmation and a
    /// server round-trip in GraphQL mode
    fn request_delete(&mut self, id: i64, name: String) {
        match self.source {
            SourceKind::Demo => {
                if let Err(error) = self.directory.remove_local(id) {
                    tracing::error!(%error, "Failed to update flag store");
                }
            }
            SourceKind::GraphQl => {
                self.confirm_delete = Some((id, name));
            }
        }
    }

    fn toggle_flag(&mut self, id: i64) {
        if let Err(error) = self.directory.toggle_flag(id) {
            tracing::error!(%error, "Failed to persist flag set");
            self.alert = Some(format!("Could not save flags: {error}"));
        }
    }

    // ========== Event Application ==========

    /// Apply one result from a spawned task
    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Collection { generation, result } => {
                self.directory.complete_collection(generation, result);
            }
            AppEvent::Page { generation, result } => {
                self.directory.complete_remote(generation, result);
            }
            AppEvent::LoginDone { result } => {
                self.login.loading = false;
                match result {
                    Ok(response) => {
                        self.api.set_token(Some(response.access_token.clone()));
                        if let Err(error) =
                            self.auth.establish(response.access_token, response.user)
                        {
                            tracing::error!(%error, "Failed to persist session");
                        }
                        self.navigate(Route::Home);
                    }
                    Err(message) => {
                        self.login.error = Some(message);
                    }
                }
            }
            AppEvent::DeleteDone { id, result } => match result {
                Ok(deleted) => {
                    tracing::info!(id = deleted.id, name = %deleted.name, "Employee deleted");
                    self.refresh();
                }
                Err(message) => {
                    tracing::error!(id, %message, "Delete failed");
                    self.alert = Some(format!("Delete failed: {message}"));
                }
            },
        }
    }

    // ========== Key Handling ==========

    pub fn handle_key(&mut self, key: KeyEvent) {
        // overlays swallow input before anything else
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return;
        }
        if self.confirm_delete.is_some() {
            self.handle_confirm_key(key);
            return;
        }
        if self.menu.is_some() {
            self.handle_menu_key(key);
            return;
        }
        if self.detail.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                self.detail = None;
            }
            return;
        }

        match self.route {
            Route::Login => self.handle_login_key(key),
            Route::Home => self.handle_directory_key(key),
            _ => self.handle_page_key(key),
        }
    }

    /// Keys shared by every route while in normal mode
    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as usize) - ('1' as usize);
                self.navigate(Route::NAV[index]);
                true
            }
            KeyCode::Char('l') => {
                if self.auth.is_authenticated() {
                    self.logout();
                } else {
                    self.navigate(Route::Login);
                }
                true
            }
            KeyCode::Char('L') => {
                self.show_logs = !self.show_logs;
                true
            }
            KeyCode::PageUp if self.show_logs => {
                self.logger_state.transition(TuiWidgetEvent::PrevPageKey);
                true
            }
            KeyCode::PageDown if self.show_logs => {
                self.logger_state.transition(TuiWidgetEvent::NextPageKey);
                true
            }
            _ => false,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some((id, name)) = self.confirm_delete.take() {
                    tracing::info!(id, %name, "Delete confirmed");
                    self.spawn_delete(id);
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm_delete = None;
            }
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let actions = row_actions(self.auth.is_admin());
        let Some(cursor) = self.menu else { return };
        match key.code {
            KeyCode::Esc | KeyCode::Char('a') => self.menu = None,
            KeyCode::Up => self.menu = Some(cursor.saturating_sub(1)),
            KeyCode::Down => self.menu = Some((cursor + 1).min(actions.len() - 1)),
            KeyCode::Enter => {
                self.menu = None;
                if let Some(employee) = self.directory.selected_employee() {
                    match actions[cursor] {
                        RowAction::Edit => {
                            // intentionally a stub: logs, changes nothing
                            tracing::info!(
                                id = employee.id,
                                name = %employee.name,
                                "Edit requested; editing is not available here"
                            );
                        }
                        RowAction::Flag => self.toggle_flag(employee.id),
                        RowAction::Delete => self.request_delete(employee.id, employee.name),
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => {
                if self.handle_global_key(&key) {
                    return;
                }
                if matches!(key.code, KeyCode::Char('e') | KeyCode::Char('i')) {
                    self.input_mode = InputMode::Editing;
                }
            }
            InputMode::Editing => match key.code {
                KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                    self.login.focus = match self.login.focus {
                        LoginField::Username => LoginField::Password,
                        LoginField::Password => LoginField::Username,
                    };
                }
                KeyCode::Enter => {
                    if self.login.focus == LoginField::Username {
                        self.login.focus = LoginField::Password;
                    } else if !self.login.loading {
                        self.submit_login();
                    }
                }
                _ => {
                    self.login.focused_mut().handle_event(&Event::Key(key));
                }
            },
        }
    }

    fn handle_directory_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Editing => match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.input_mode = InputMode::Normal;
                    self.refetch_if_remote();
                }
                KeyCode::Tab => {
                    self.filter_focus = match self.filter_focus {
                        FilterField::Name => FilterField::Class,
                        FilterField::Class => FilterField::Name,
                    };
                }
                _ => {
                    let input = match self.filter_focus {
                        FilterField::Name => &mut self.filter_name,
                        FilterField::Class => &mut self.filter_class,
                    };
                    input.handle_event(&Event::Key(key));
                    let value = input.value().to_owned();
                    match self.filter_focus {
                        FilterField::Name => self.directory.set_filter_name(value),
                        FilterField::Class => self.directory.set_filter_class(value),
                    }
                }
            },
            InputMode::Normal => {
                if self.handle_global_key(&key) {
                    return;
                }
                match key.code {
                    KeyCode::Up => self.directory.select_prev(),
                    KeyCode::Down => self.directory.select_next(),
                    KeyCode::Left => {
                        let before = self.directory.offset();
                        self.directory.prev_page();
                        if self.directory.offset() != before {
                            self.refetch_if_remote();
                        }
                    }
                    KeyCode::Right => {
                        let before = self.directory.offset();
                        self.directory.next_page();
                        if self.directory.offset() != before {
                            self.refetch_if_remote();
                        }
                    }
                    KeyCode::Char('v') => self.view_mode = self.view_mode.toggled(),
                    KeyCode::Char('s') => {
                        let next = self.directory.sort().field.cycled();
                        self.directory.set_sort_field(next);
                        self.refetch_if_remote();
                    }
                    KeyCode::Char('r') => {
                        self.directory.toggle_sort_order();
                        self.refetch_if_remote();
                    }
                    KeyCode::Char('/') => {
                        self.filter_focus = FilterField::Name;
                        self.input_mode = InputMode::Editing;
                    }
                    KeyCode::Char('c') => {
                        self.filter_focus = FilterField::Class;
                        self.input_mode = InputMode::Editing;
                    }
                    KeyCode::Char('f') => {
                        if let Some(employee) = self.directory.selected_employee() {
                            self.toggle_flag(employee.id);
                        }
                    }
                    KeyCode::Char('g') => self.refresh(),
                    KeyCode::Char('a') => {
                        if self.directory.selected_employee().is_some() {
                            self.menu = Some(0);
                        }
                    }
                    KeyCode::Enter => {
                        self.detail = self.directory.selected_employee();
                    }
                    KeyCode::Esc => self.directory.clear_error(),
                    _ => {}
                }
            }
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        if self.handle_global_key(&key) {
            return;
        }
        let sections = ui::pages::sections(self.route).len();
        match key.code {
            KeyCode::Up => self.page_section = self.page_section.saturating_sub(1),
            KeyCode::Down if sections > 0 => {
                self.page_section = (self.page_section + 1).min(sections - 1);
            }
            _ => {}
        }
    }

    fn refetch_if_remote(&mut self) {
        if self.source == SourceKind::GraphQl {
            self.spawn_page_fetch();
        }
    }
}

// ========== Event Loop ==========

/// Drive the terminal: draw, poll keys, apply task results
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &mut mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = Duration::from_millis(100);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        // apply results delivered by spawned tasks (non-blocking)
        while let Ok(event) = events.try_recv() {
            app.on_event(event);
        }
    }
}
