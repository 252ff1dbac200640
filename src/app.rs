//! Root application shell for the Bankly TUI.
//!
//! This module owns the single source of truth for "is this client session
//! authenticated": the `SessionState` resolved once at startup and mutated
//! only by the login and logout flows. Routes, the navigation guard wiring,
//! form state, and background fetch plumbing all live here.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, FormOutcome};
use crate::auth::{resolve, Credential, NavigationGuard, SessionState, TokenStore};
use crate::config::Config;
use crate::models::{
    Account, AccountType, Notification, Statement, TransactionRequest, TransactionType,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background fetch message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username and email input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for numeric inputs (recipient id, amount).
const MAX_NUMERIC_LENGTH: usize = 16;

/// Warning shown by the login view when already authenticated.
const ALREADY_LOGGED_IN_NOTICE: &str = "You are already logged in";

/// Smallest transaction the server accepts, in EGP.
const MIN_TRANSACTION_AMOUNT: f64 = 1.0;

// ============================================================================
// Routes
// ============================================================================

/// The route surface of the client. `Home` is the catch-all landing
/// redirector; `Dashboard` and `AccountDetail` are protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Register,
    Login,
    Logout,
    Dashboard,
    AccountDetail(i64),
}

impl Route {
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::AccountDetail(_))
    }

    /// Display title for the view header.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Register => "Register",
            Route::Login => "Login",
            Route::Logout => "Logout",
            Route::Dashboard => "Dashboard",
            Route::AccountDetail(_) => "Account",
        }
    }
}

/// Landing redirect target for the catch-all route.
pub fn home_redirect(session: &SessionState) -> Route {
    if session.is_authenticated() {
        Route::Dashboard
    } else {
        Route::Login
    }
}

// ============================================================================
// Notices
// ============================================================================

/// Severity of a transient user-visible notice in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

// ============================================================================
// Form state
// ============================================================================

/// Focus within the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub field_errors: HashMap<String, String>,
    pub detail: Option<String>,
}

impl LoginForm {
    /// Editing any field clears prior server errors.
    pub fn clear_server_errors(&mut self) {
        self.field_errors.clear();
        self.detail = None;
    }
}

/// Focus within the register form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    Password,
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub field_errors: HashMap<String, String>,
    pub detail: Option<String>,
}

impl RegisterForm {
    pub fn clear_server_errors(&mut self) {
        self.field_errors.clear();
        self.detail = None;
    }
}

/// Create-account form on the dashboard (a single select).
#[derive(Debug)]
pub struct AccountForm {
    pub account_type: AccountType,
    pub field_errors: HashMap<String, String>,
    pub detail: Option<String>,
}

impl Default for AccountForm {
    fn default() -> Self {
        Self {
            account_type: AccountType::Individual,
            field_errors: HashMap::new(),
            detail: None,
        }
    }
}

impl AccountForm {
    pub fn clear_server_errors(&mut self) {
        self.field_errors.clear();
        self.detail = None;
    }
}

/// Focus within the transaction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField {
    Type,
    Recipient,
    Amount,
}

#[derive(Debug)]
pub struct TransactionForm {
    pub transaction_type: TransactionType,
    pub recipient: String,
    pub amount: String,
    pub field_errors: HashMap<String, String>,
    pub detail: Option<String>,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            transaction_type: TransactionType::Withdraw,
            recipient: String::new(),
            amount: String::new(),
            field_errors: HashMap::new(),
            detail: None,
        }
    }
}

impl TransactionForm {
    pub fn clear_server_errors(&mut self) {
        self.field_errors.clear();
        self.detail = None;
    }
}

/// Which pane has focus on the dashboard and account views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
    Form,
    List,
}

// ============================================================================
// Background fetch results
// ============================================================================

/// Results sent back from spawned fetch tasks.
///
/// Account and statement results are tagged with the navigation generation
/// they were spawned under; notification results with the session epoch.
/// A result whose tag no longer matches is discarded (the liveness guard:
/// no state update on behalf of a view that has since been left).
enum FetchResult {
    Accounts(Vec<Account>),
    Statements(i64, Vec<Statement>),
    Notifications(Vec<Notification>),
    Error(String),
}

// ============================================================================
// Main application struct
// ============================================================================

/// Root shell: owns session state, routing, view data, and forms.
pub struct App {
    // Core services
    pub config: Config,
    pub store: TokenStore,
    pub api: ApiClient,

    // Session and navigation
    pub session: SessionState,
    pub route: Route,
    pub guard: Option<NavigationGuard>,

    // View data
    pub accounts: Vec<Account>,
    pub statements: Vec<Statement>,
    pub notifications: Vec<Notification>,
    pub account_selection: usize,
    pub statement_scroll: usize,
    pub pane_focus: PaneFocus,
    pub showing_notifications: bool,
    pub last_refreshed: Option<DateTime<Utc>>,

    // Forms
    pub login_form: LoginForm,
    pub login_focus: LoginField,
    pub register_form: RegisterForm,
    pub register_focus: RegisterField,
    pub account_form: AccountForm,
    pub transaction_form: TransactionForm,
    pub transaction_focus: TransactionField,

    // Status
    pub notice: Option<Notice>,
    pub should_quit: bool,

    // Liveness counters: navigation generation for per-route fetches,
    // session epoch for the route-independent notification fetch.
    generation: u64,
    session_epoch: u64,
    fetch_rx: mpsc::Receiver<(u64, FetchResult)>,
    fetch_tx: mpsc::Sender<(u64, FetchResult)>,
}

impl App {
    /// Create the application, loading config and locating the token store.
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        let data_dir = config.data_dir()?;
        let store = TokenStore::new(data_dir);
        Self::from_parts(config, store)
    }

    /// Build the app from explicit parts (tests inject a temp-dir store).
    fn from_parts(config: Config, store: TokenStore) -> Result<Self> {
        let api = ApiClient::new(config.server_url())?;
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let login_form = LoginForm {
            username: config.last_username.clone().unwrap_or_default(),
            ..Default::default()
        };

        Ok(Self {
            config,
            store,
            api,

            session: SessionState::Unresolved,
            route: Route::Home,
            guard: None,

            accounts: Vec::new(),
            statements: Vec::new(),
            notifications: Vec::new(),
            account_selection: 0,
            statement_scroll: 0,
            pane_focus: PaneFocus::Form,
            showing_notifications: false,
            last_refreshed: None,

            login_form,
            login_focus: LoginField::Username,
            register_form: RegisterForm::default(),
            register_focus: RegisterField::Username,
            account_form: AccountForm::default(),
            transaction_form: TransactionForm::default(),
            transaction_focus: TransactionField::Type,

            notice: None,
            should_quit: false,

            generation: 0,
            session_epoch: 0,
            fetch_rx: rx,
            fetch_tx: tx,
        })
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Initialization effect, run once after construction: resolve the
    /// session from the token store, then land on the catch-all route.
    /// Until this runs, consumers see `Unresolved` and treat it as anonymous.
    pub fn on_ready(&mut self) {
        self.session = SessionState::from_access(resolve(&self.store));
        if let Some(access) = self.session.access() {
            self.api.set_token(access.to_string());
            self.spawn_fetch_notifications();
        }
        info!(authenticated = self.session.is_authenticated(), "Session resolved");
        self.navigate(Route::Home);
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
        });
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a route, running its entry effects.
    ///
    /// Every navigation bumps the fetch generation, so responses spawned for
    /// the previous route are discarded on arrival. Protected routes mount a
    /// fresh guard instance; denied guards redirect to the login view with a
    /// warning, and protected content is never rendered.
    pub fn navigate(&mut self, route: Route) {
        self.generation += 1;
        self.guard = None;
        self.pane_focus = PaneFocus::Form;

        match route {
            Route::Home => {
                let target = home_redirect(&self.session);
                debug!(?target, "Landing redirect");
                self.navigate(target);
            }
            Route::Logout => {
                self.logout();
            }
            Route::Login => {
                if self.session.is_authenticated() {
                    self.notify(NoticeLevel::Info, ALREADY_LOGGED_IN_NOTICE);
                    self.navigate(Route::Dashboard);
                    return;
                }
                self.login_focus = if self.login_form.username.is_empty() {
                    LoginField::Username
                } else {
                    LoginField::Password
                };
                self.route = Route::Login;
            }
            Route::Register => {
                self.register_focus = RegisterField::Username;
                self.route = Route::Register;
            }
            Route::Dashboard => {
                let (guard, redirect) = NavigationGuard::mount(&self.store);
                if let Some(redirect) = redirect {
                    self.sync_session_after_denial();
                    self.notify(NoticeLevel::Warning, redirect.warning);
                    self.navigate(redirect.route);
                    return;
                }
                self.guard = Some(guard);
                self.route = Route::Dashboard;
                self.account_selection = 0;
                self.spawn_fetch_accounts();
            }
            Route::AccountDetail(account_id) => {
                let (guard, redirect) = NavigationGuard::mount(&self.store);
                if let Some(redirect) = redirect {
                    self.sync_session_after_denial();
                    self.notify(NoticeLevel::Warning, redirect.warning);
                    self.navigate(redirect.route);
                    return;
                }
                self.guard = Some(guard);
                self.route = Route::AccountDetail(account_id);
                self.statement_scroll = 0;
                self.transaction_form = TransactionForm::default();
                self.transaction_focus = TransactionField::Type;
                self.spawn_fetch_accounts();
                self.spawn_fetch_statements(account_id);
            }
        }
    }

    /// A guard denial means the store no longer holds a credential, even if
    /// the shell still thinks it is authenticated (the blob can be removed
    /// out from under us by another process). Re-resolve from the store so
    /// the login gate and the guard agree on who is anonymous; otherwise the
    /// two redirect into each other without terminating.
    fn sync_session_after_denial(&mut self) {
        self.session = SessionState::from_access(resolve(&self.store));
        if !self.session.is_authenticated() {
            self.api.clear_token();
        }
    }

    /// Whether the current route's protected content may render.
    pub fn protected_content_visible(&self) -> bool {
        if !self.route.is_protected() {
            return true;
        }
        self.guard
            .as_ref()
            .map(|g| g.permits_render())
            .unwrap_or(false)
    }

    // =========================================================================
    // Exit flow
    // =========================================================================

    /// Unconditional logout: clear the token store, drop to anonymous, and
    /// land on the catch-all route. Runs without checking prior state.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear token store");
        }
        self.session = SessionState::Anonymous;
        self.api.clear_token();
        self.session_epoch += 1;
        self.notifications.clear();
        self.showing_notifications = false;
        self.accounts.clear();
        self.statements.clear();
        info!("Logged out");
        self.navigate(Route::Home);
    }

    // =========================================================================
    // Entry flow (login)
    // =========================================================================

    /// Submit the login form.
    pub async fn submit_login(&mut self) {
        let username = self.login_form.username.trim().to_string();
        let password = self.login_form.password.clone();
        self.login_form.clear_server_errors();

        if username.is_empty() || password.is_empty() {
            if username.is_empty() {
                self.login_form
                    .field_errors
                    .insert("username".to_string(), "This field is required".to_string());
            }
            if password.is_empty() {
                self.login_form
                    .field_errors
                    .insert("password".to_string(), "This field is required".to_string());
            }
            return;
        }

        match self.api.obtain_token(&username, &password).await {
            Ok(outcome) => self.apply_login_outcome(outcome),
            Err(e) => {
                error!(error = %e, "Login request failed");
                self.notify(NoticeLevel::Error, friendly_network_error(&e));
            }
        }
    }

    /// Apply the classified login response.
    fn apply_login_outcome(&mut self, outcome: FormOutcome<Credential>) {
        match outcome {
            FormOutcome::Ok(credential) => self.apply_login_success(credential),
            FormOutcome::FieldErrors(fields) => {
                self.login_form.field_errors = fields;
            }
            FormOutcome::Detail(message) => {
                self.login_form.detail = Some(message);
            }
        }
    }

    /// Persist the credential, re-resolve session state through the
    /// resolver, and land on the catch-all route (which forwards to the
    /// dashboard now that the session is authenticated).
    fn apply_login_success(&mut self, credential: Credential) {
        if let Err(e) = self.store.save(&credential) {
            warn!(error = %e, "Failed to persist credential");
        }
        self.session = SessionState::from_access(resolve(&self.store));
        if let Some(access) = self.session.access() {
            self.api.set_token(access.to_string());
        }
        self.session_epoch += 1;
        self.spawn_fetch_notifications();

        self.config.last_username = Some(self.login_form.username.trim().to_string());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }

        self.login_form.password.clear();
        self.notify(NoticeLevel::Success, "Logged in successfully");
        info!("Login successful");
        self.navigate(Route::Home);
    }

    // =========================================================================
    // Registration flow
    // =========================================================================

    /// Submit the registration form.
    pub async fn submit_register(&mut self) {
        let username = self.register_form.username.trim().to_string();
        let email = self.register_form.email.trim().to_string();
        let password = self.register_form.password.clone();
        self.register_form.clear_server_errors();

        if username.is_empty() || password.is_empty() {
            if username.is_empty() {
                self.register_form
                    .field_errors
                    .insert("username".to_string(), "This field is required".to_string());
            }
            if password.is_empty() {
                self.register_form
                    .field_errors
                    .insert("password".to_string(), "This field is required".to_string());
            }
            return;
        }

        let email = if email.is_empty() { None } else { Some(email) };
        match self
            .api
            .register(&username, email.as_deref(), &password)
            .await
        {
            Ok(FormOutcome::Ok(user)) => {
                debug!(username = %user.username, email = ?user.email, "Registered");
                self.notify(NoticeLevel::Success, "Registered successfully");
                // Prefill the login form with the new username
                self.login_form.username = user.username;
                self.register_form = RegisterForm::default();
                self.navigate(Route::Login);
            }
            Ok(FormOutcome::FieldErrors(fields)) => {
                self.register_form.field_errors = fields;
            }
            Ok(FormOutcome::Detail(message)) => {
                self.register_form.detail = Some(message);
            }
            Err(e) => {
                error!(error = %e, "Registration request failed");
                self.notify(NoticeLevel::Error, friendly_network_error(&e));
            }
        }
    }

    // =========================================================================
    // Dashboard flows
    // =========================================================================

    /// Submit the create-account form.
    pub async fn submit_create_account(&mut self) {
        self.account_form.clear_server_errors();
        let account_type = self.account_form.account_type;

        match self.api.create_account(account_type).await {
            Ok(FormOutcome::Ok(created)) => {
                debug!(account_id = created.id, account_type = %created.account_type, "Account created");
                self.notify(NoticeLevel::Success, "Account created successfully");
                self.account_form = AccountForm::default();
                self.spawn_fetch_accounts();
            }
            Ok(FormOutcome::FieldErrors(fields)) => {
                self.account_form.field_errors = fields;
            }
            Ok(FormOutcome::Detail(message)) => {
                self.account_form.detail = Some(message);
            }
            Err(e) => {
                error!(error = %e, "Account creation failed");
                self.notify(NoticeLevel::Error, friendly_network_error(&e));
            }
        }
    }

    /// Submit the transaction form from the given sender account.
    pub async fn submit_transaction(&mut self, sender: i64) {
        self.transaction_form.clear_server_errors();
        let transaction_type = self.transaction_form.transaction_type;

        let recipient = if transaction_type.needs_recipient() {
            match self.transaction_form.recipient.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    self.transaction_form.field_errors.insert(
                        "recipient".to_string(),
                        "Enter a valid account number".to_string(),
                    );
                    return;
                }
            }
        } else {
            None
        };

        let amount = self.transaction_form.amount.trim().to_string();
        if amount.is_empty() {
            self.transaction_form
                .field_errors
                .insert("amount".to_string(), "This field is required".to_string());
            return;
        }
        match amount.parse::<f64>() {
            Ok(value) if value >= MIN_TRANSACTION_AMOUNT => {}
            Ok(_) => {
                self.transaction_form.field_errors.insert(
                    "amount".to_string(),
                    "Minimum amount is 1 EGP".to_string(),
                );
                return;
            }
            Err(_) => {
                self.transaction_form
                    .field_errors
                    .insert("amount".to_string(), "Enter a valid amount".to_string());
                return;
            }
        }

        let request = TransactionRequest {
            transaction_type,
            recipient,
            amount,
            sender,
        };

        match self.api.create_transaction(&request).await {
            Ok(FormOutcome::Ok(statement)) => {
                debug!(statement_id = statement.id, "Transaction created");
                self.notify(NoticeLevel::Success, "Transaction successful");
                self.transaction_form = TransactionForm::default();
                self.spawn_fetch_accounts();
                self.spawn_fetch_statements(sender);
            }
            Ok(FormOutcome::FieldErrors(fields)) => {
                self.transaction_form.field_errors = fields
                    .into_iter()
                    .map(|(field, message)| {
                        let message = rewrite_recipient_error(&field, message);
                        (field, message)
                    })
                    .collect();
            }
            Ok(FormOutcome::Detail(message)) => {
                self.transaction_form.detail = Some(message);
            }
            Err(e) => {
                error!(error = %e, "Transaction failed");
                self.notify(NoticeLevel::Error, friendly_network_error(&e));
            }
        }
    }

    // =========================================================================
    // Background fetches
    // =========================================================================

    /// Re-fetch the data backing the current route on demand.
    pub fn refresh_current_route(&mut self) {
        match self.route {
            Route::Dashboard => self.spawn_fetch_accounts(),
            Route::AccountDetail(account_id) => {
                self.spawn_fetch_accounts();
                self.spawn_fetch_statements(account_id);
            }
            _ => {}
        }
        self.spawn_fetch_notifications();
    }

    fn spawn_fetch_accounts(&self) {
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = match api.fetch_accounts().await {
                Ok(accounts) => FetchResult::Accounts(accounts),
                Err(e) => FetchResult::Error(format!("Accounts: {}", e)),
            };
            if tx.send((generation, result)).await.is_err() {
                debug!("Fetch channel closed, dropping accounts result");
            }
        });
    }

    fn spawn_fetch_statements(&self, account_id: i64) {
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = match api.fetch_statements(account_id).await {
                Ok(statements) => FetchResult::Statements(account_id, statements),
                Err(e) => FetchResult::Error(format!("Statements: {}", e)),
            };
            if tx.send((generation, result)).await.is_err() {
                debug!("Fetch channel closed, dropping statements result");
            }
        });
    }

    /// Unread-notifications fetch, keyed by the session epoch rather than
    /// the navigation generation: it belongs to the session, not a route.
    /// Fetch errors here are logged and swallowed - the badge just stays
    /// empty.
    fn spawn_fetch_notifications(&self) {
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        let epoch = self.session_epoch;
        tokio::spawn(async move {
            match api.fetch_unread_notifications().await {
                Ok(notifications) => {
                    if tx
                        .send((epoch, FetchResult::Notifications(notifications)))
                        .await
                        .is_err()
                    {
                        debug!("Fetch channel closed, dropping notifications result");
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Notifications fetch failed");
                }
            }
        });
    }

    /// Drain completed background fetches and apply live results.
    pub fn check_background_tasks(&mut self) {
        while let Ok((tag, result)) = self.fetch_rx.try_recv() {
            self.process_fetch_result(tag, result);
        }
    }

    fn process_fetch_result(&mut self, tag: u64, result: FetchResult) {
        match result {
            FetchResult::Accounts(accounts) => {
                if tag != self.generation {
                    debug!("Discarding stale accounts result");
                    return;
                }
                self.account_selection = self
                    .account_selection
                    .min(accounts.len().saturating_sub(1));
                self.accounts = accounts;
                self.last_refreshed = Some(Utc::now());
            }
            FetchResult::Statements(account_id, statements) => {
                if tag != self.generation {
                    debug!(account_id, "Discarding stale statements result");
                    return;
                }
                self.statements = statements;
                self.last_refreshed = Some(Utc::now());
            }
            FetchResult::Notifications(notifications) => {
                if tag != self.session_epoch {
                    debug!("Discarding stale notifications result");
                    return;
                }
                self.notifications = notifications;
            }
            FetchResult::Error(message) => {
                if tag != self.generation {
                    debug!(%message, "Discarding stale fetch error");
                    return;
                }
                error!(error = %message, "Background fetch failed");
                self.notify(NoticeLevel::Error, friendly_fetch_error(&message));
            }
        }
    }

    // =========================================================================
    // View helpers
    // =========================================================================

    /// The account currently selected in the dashboard list.
    pub fn selected_account(&self) -> Option<&Account> {
        self.accounts.get(self.account_selection)
    }

    /// The account shown on the detail view, once the list fetch lands.
    pub fn detail_account(&self) -> Option<&Account> {
        match self.route {
            Route::AccountDetail(id) => self.accounts.iter().find(|a| a.id == id),
            _ => None,
        }
    }
}

// ============================================================================
// Input validation and error mapping
// ============================================================================

/// Printable, single-width characters only
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username or email character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Check if a numeric-field character (amount, recipient id) should be accepted
pub fn can_add_numeric_char(current_len: usize, c: char) -> bool {
    current_len < MAX_NUMERIC_LENGTH && (c.is_ascii_digit() || c == '.')
}

/// The server reports a missing recipient account with a DRF-generated
/// "object does not exist" message; show something friendlier.
pub fn rewrite_recipient_error(field: &str, message: String) -> String {
    if field == "recipient" && message.contains("object does not exist") {
        "Account does not exist".to_string()
    } else {
        message
    }
}

/// Map transport-level failures to user-facing messages.
fn friendly_network_error(error: &anyhow::Error) -> String {
    let text = error.to_string().to_lowercase();
    if text.contains("timeout") {
        "Connection timed out. Please try again.".to_string()
    } else if text.contains("connect") || text.contains("network") {
        "Unable to connect to server. Check your internet connection.".to_string()
    } else {
        format!("Request failed: {}", error)
    }
}

fn friendly_fetch_error(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("unauthorized") || lower.contains("401") {
        "Session rejected by server. Please log in again.".to_string()
    } else if lower.contains("connect") || lower.contains("network") {
        "Network error. Check your connection.".to_string()
    } else {
        format!("Error: {}", message)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::tests::{credential, temp_store};

    fn test_app() -> App {
        App::from_parts(Config::default(), temp_store()).unwrap()
    }

    fn authenticated_app(access: &str) -> App {
        let app = test_app();
        app.store.save(&credential(access, "R")).unwrap();
        app
    }

    // -------------------------------------------------------------------------
    // Landing redirect
    // -------------------------------------------------------------------------

    #[test]
    fn test_home_redirect_targets() {
        assert_eq!(home_redirect(&SessionState::Anonymous), Route::Login);
        assert_eq!(home_redirect(&SessionState::Unresolved), Route::Login);
        assert_eq!(
            home_redirect(&SessionState::Authenticated("A".to_string())),
            Route::Dashboard
        );
    }

    #[tokio::test]
    async fn test_on_ready_anonymous_lands_on_login() {
        let mut app = test_app();
        app.on_ready();
        assert_eq!(app.session, SessionState::Anonymous);
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_on_ready_authenticated_lands_on_dashboard() {
        let mut app = authenticated_app("A");
        app.on_ready();
        assert_eq!(app.session, SessionState::Authenticated("A".to_string()));
        assert_eq!(app.route, Route::Dashboard);
        assert!(app.protected_content_visible());
    }

    // -------------------------------------------------------------------------
    // Navigation guard wiring
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_protected_route_denied_while_anonymous() {
        let mut app = test_app();
        app.session = SessionState::Anonymous;
        app.navigate(Route::Dashboard);

        assert_eq!(app.route, Route::Login);
        assert!(app.guard.is_none());
        let notice = app.notice.expect("denial emits a warning notice");
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "You need to be logged in");
    }

    #[tokio::test]
    async fn test_diverged_session_resolves_to_anonymous_on_denial() {
        // Shell state says authenticated, but the blob was removed out from
        // under us (e.g. by a second process). The denial must drop the
        // session to anonymous and terminate on the login view instead of
        // bouncing between the login gate and the guard.
        let mut app = test_app();
        app.session = SessionState::Authenticated("A".to_string());

        app.navigate(Route::Dashboard);

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.session, SessionState::Anonymous);
        let notice = app.notice.expect("denial emits a warning notice");
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "You need to be logged in");
    }

    #[tokio::test]
    async fn test_protected_route_permitted_when_authenticated() {
        let mut app = authenticated_app("A");
        app.session = SessionState::Authenticated("A".to_string());
        app.navigate(Route::AccountDetail(7));

        assert_eq!(app.route, Route::AccountDetail(7));
        assert!(app.protected_content_visible());
        assert!(app.notice.is_none());
    }

    #[tokio::test]
    async fn test_login_route_redirects_when_already_authenticated() {
        let mut app = authenticated_app("A");
        app.session = SessionState::Authenticated("A".to_string());
        app.navigate(Route::Login);

        assert_eq!(app.route, Route::Dashboard);
        let notice = app.notice.expect("redirect emits an info notice");
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, ALREADY_LOGGED_IN_NOTICE);
    }

    // -------------------------------------------------------------------------
    // Entry flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_login_success_persists_and_resolves() {
        let mut app = test_app();
        app.session = SessionState::Anonymous;
        app.login_form.username = "alice".to_string();

        app.apply_login_outcome(FormOutcome::Ok(credential("A", "R")));

        assert_eq!(app.store.read(), Some(credential("A", "R")));
        assert_eq!(app.session, SessionState::Authenticated("A".to_string()));
        // Landing redirect forwarded to the dashboard
        assert_eq!(app.route, Route::Dashboard);
        assert!(app.login_form.password.is_empty());
    }

    #[tokio::test]
    async fn test_login_failure_maps_field_error_and_leaves_store() {
        let mut app = test_app();
        app.session = SessionState::Anonymous;

        let mut fields = HashMap::new();
        fields.insert("password".to_string(), "too short".to_string());
        app.apply_login_outcome(FormOutcome::FieldErrors(fields));

        assert_eq!(
            app.login_form.field_errors.get("password").unwrap(),
            "too short"
        );
        assert!(app.store.read().is_none());
        assert_eq!(app.session, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_login_detail_error_is_page_level() {
        let mut app = test_app();
        app.apply_login_outcome(FormOutcome::Detail("No active account".to_string()));
        assert_eq!(app.login_form.detail.as_deref(), Some("No active account"));
        assert!(app.login_form.field_errors.is_empty());
    }

    #[test]
    fn test_editing_clears_server_errors() {
        let mut form = LoginForm::default();
        form.field_errors
            .insert("password".to_string(), "too short".to_string());
        form.detail = Some("nope".to_string());
        form.clear_server_errors();
        assert!(form.field_errors.is_empty());
        assert!(form.detail.is_none());
    }

    // -------------------------------------------------------------------------
    // Exit flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_logout_clears_store_and_session() {
        let mut app = authenticated_app("A");
        app.session = SessionState::Authenticated("A".to_string());

        app.logout();

        assert!(app.store.read().is_none());
        assert_eq!(resolve(&app.store), None);
        assert_eq!(app.session, SessionState::Anonymous);
        // Landing redirect sent the anonymous user to login
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_logout_is_unconditional() {
        let mut app = test_app();
        app.session = SessionState::Anonymous;
        // Never authenticated; logout still runs to completion
        app.logout();
        assert!(app.store.read().is_none());
        assert_eq!(app.route, Route::Login);
    }

    // -------------------------------------------------------------------------
    // Liveness guard
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_stale_generation_results_are_discarded() {
        let mut app = authenticated_app("A");
        app.session = SessionState::Authenticated("A".to_string());
        app.navigate(Route::Dashboard);
        let stale = app.generation;
        app.navigate(Route::AccountDetail(1));

        let account = Account {
            id: 1,
            account_type: AccountType::Individual,
            balance: "10.00".to_string(),
        };
        app.process_fetch_result(stale, FetchResult::Accounts(vec![account]));
        assert!(app.accounts.is_empty());
    }

    #[tokio::test]
    async fn test_live_generation_results_are_applied() {
        let mut app = authenticated_app("A");
        app.session = SessionState::Authenticated("A".to_string());
        app.navigate(Route::Dashboard);

        let account = Account {
            id: 1,
            account_type: AccountType::Company,
            balance: "10.00".to_string(),
        };
        app.process_fetch_result(app.generation, FetchResult::Accounts(vec![account]));
        assert_eq!(app.accounts.len(), 1);
        assert!(app.last_refreshed.is_some());
    }

    #[tokio::test]
    async fn test_notifications_from_old_epoch_are_discarded() {
        let mut app = authenticated_app("A");
        app.session = SessionState::Authenticated("A".to_string());
        let old_epoch = app.session_epoch;

        app.logout();

        let notification = Notification {
            id: None,
            message: "stale".to_string(),
            is_read: false,
            timestamp: None,
        };
        app.process_fetch_result(old_epoch, FetchResult::Notifications(vec![notification]));
        assert!(app.notifications.is_empty());
    }

    // -------------------------------------------------------------------------
    // Transaction form validation
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_transaction_amount_below_minimum_is_rejected() {
        let mut app = test_app();
        app.transaction_form.amount = "0.50".to_string();

        app.submit_transaction(1).await;

        assert_eq!(
            app.transaction_form.field_errors.get("amount").unwrap(),
            "Minimum amount is 1 EGP"
        );
    }

    #[tokio::test]
    async fn test_transaction_amount_must_parse() {
        let mut app = test_app();
        app.transaction_form.amount = "1.2.3".to_string();

        app.submit_transaction(1).await;

        assert_eq!(
            app.transaction_form.field_errors.get("amount").unwrap(),
            "Enter a valid amount"
        );
    }

    // -------------------------------------------------------------------------
    // Error mapping and input validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_rewrite_recipient_error() {
        assert_eq!(
            rewrite_recipient_error(
                "recipient",
                "Invalid pk \"99\" - object does not exist.".to_string()
            ),
            "Account does not exist"
        );
        // Other fields and other messages pass through
        assert_eq!(
            rewrite_recipient_error("amount", "object does not exist".to_string()),
            "object does not exist"
        );
        assert_eq!(
            rewrite_recipient_error("recipient", "Self transactions are not allowed".to_string()),
            "Self transactions are not allowed"
        );
    }

    #[test]
    fn test_can_add_input_chars() {
        assert!(can_add_username_char(0, 'a'));
        assert!(!can_add_username_char(50, 'a'));
        assert!(!can_add_username_char(0, '\n'));

        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));

        assert!(can_add_numeric_char(0, '9'));
        assert!(can_add_numeric_char(1, '.'));
        assert!(!can_add_numeric_char(0, 'x'));
        assert!(!can_add_numeric_char(16, '1'));
    }

    #[test]
    fn test_route_protection() {
        assert!(Route::Dashboard.is_protected());
        assert!(Route::AccountDetail(1).is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(!Route::Home.is_protected());
    }
}
