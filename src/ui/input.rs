//! Keyboard input handling for the TUI.
//!
//! This module translates key events into navigation, form edits, and
//! submissions. Text entry goes to the focused form field; route changes go
//! through `App::navigate` so every transition runs the guard protocol.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{
    can_add_numeric_char, can_add_password_char, can_add_username_char, App, LoginField,
    PaneFocus, RegisterField, Route, TransactionField,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Notifications overlay swallows input while open
    if app.showing_notifications {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('n')) {
            app.showing_notifications = false;
        }
        return Ok(false);
    }

    match app.route {
        Route::Login => handle_login_input(app, key).await,
        Route::Register => handle_register_input(app, key).await,
        Route::Dashboard => handle_dashboard_input(app, key).await,
        Route::AccountDetail(account_id) => handle_account_input(app, key, account_id).await,
        // Redirect-only routes never persist; nothing to handle
        Route::Home | Route::Logout => Ok(false),
    }
}

// ============================================================================
// Login view
// ============================================================================

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('r') {
            app.navigate(Route::Register);
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
            app.login_focus = match app.login_focus {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
        }
        KeyCode::Enter => {
            app.submit_login().await;
        }
        KeyCode::Backspace => {
            app.login_form.clear_server_errors();
            match app.login_focus {
                LoginField::Username => app.login_form.username.pop(),
                LoginField::Password => app.login_form.password.pop(),
            };
        }
        KeyCode::Char(c) => {
            app.login_form.clear_server_errors();
            match app.login_focus {
                LoginField::Username => {
                    if can_add_username_char(app.login_form.username.len(), c) {
                        app.login_form.username.push(c);
                    }
                }
                LoginField::Password => {
                    if can_add_password_char(app.login_form.password.len(), c) {
                        app.login_form.password.push(c);
                    }
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

// ============================================================================
// Register view
// ============================================================================

async fn handle_register_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.navigate(Route::Login),
        KeyCode::Tab | KeyCode::Down => {
            app.register_focus = match app.register_focus {
                RegisterField::Username => RegisterField::Email,
                RegisterField::Email => RegisterField::Password,
                RegisterField::Password => RegisterField::Username,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.register_focus = match app.register_focus {
                RegisterField::Username => RegisterField::Password,
                RegisterField::Email => RegisterField::Username,
                RegisterField::Password => RegisterField::Email,
            };
        }
        KeyCode::Enter => {
            app.submit_register().await;
        }
        KeyCode::Backspace => {
            app.register_form.clear_server_errors();
            match app.register_focus {
                RegisterField::Username => app.register_form.username.pop(),
                RegisterField::Email => app.register_form.email.pop(),
                RegisterField::Password => app.register_form.password.pop(),
            };
        }
        KeyCode::Char(c) => {
            app.register_form.clear_server_errors();
            match app.register_focus {
                RegisterField::Username => {
                    if can_add_username_char(app.register_form.username.len(), c) {
                        app.register_form.username.push(c);
                    }
                }
                RegisterField::Email => {
                    if can_add_username_char(app.register_form.email.len(), c) {
                        app.register_form.email.push(c);
                    }
                }
                RegisterField::Password => {
                    if can_add_password_char(app.register_form.password.len(), c) {
                        app.register_form.password.push(c);
                    }
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

// ============================================================================
// Dashboard view
// ============================================================================

async fn handle_dashboard_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // No text fields here, so letter shortcuts are safe in both panes
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('l') => {
            app.navigate(Route::Logout);
            return Ok(false);
        }
        KeyCode::Char('n') => {
            app.showing_notifications = true;
            return Ok(false);
        }
        KeyCode::Char('u') => {
            app.refresh_current_route();
            return Ok(false);
        }
        KeyCode::Tab => {
            app.pane_focus = match app.pane_focus {
                PaneFocus::Form => PaneFocus::List,
                PaneFocus::List => PaneFocus::Form,
            };
            return Ok(false);
        }
        _ => {}
    }

    match app.pane_focus {
        PaneFocus::Form => match key.code {
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                app.account_form.clear_server_errors();
                app.account_form.account_type = app.account_form.account_type.toggle();
            }
            KeyCode::Enter => {
                app.submit_create_account().await;
            }
            _ => {}
        },
        PaneFocus::List => match key.code {
            KeyCode::Up => {
                app.account_selection = app.account_selection.saturating_sub(1);
            }
            KeyCode::Down => {
                if app.account_selection + 1 < app.accounts.len() {
                    app.account_selection += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(account) = app.selected_account() {
                    let id = account.id;
                    app.navigate(Route::AccountDetail(id));
                }
            }
            _ => {}
        },
    }
    Ok(false)
}

// ============================================================================
// Account detail view
// ============================================================================

async fn handle_account_input(app: &mut App, key: KeyEvent, account_id: i64) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.navigate(Route::Dashboard);
            return Ok(false);
        }
        KeyCode::Tab => {
            app.pane_focus = match app.pane_focus {
                PaneFocus::Form => PaneFocus::List,
                PaneFocus::List => PaneFocus::Form,
            };
            return Ok(false);
        }
        _ => {}
    }

    match app.pane_focus {
        PaneFocus::Form => handle_transaction_form_input(app, key, account_id).await,
        PaneFocus::List => {
            match key.code {
                KeyCode::Char('q') => return Ok(true),
                KeyCode::Char('l') => app.navigate(Route::Logout),
                KeyCode::Char('n') => app.showing_notifications = true,
                KeyCode::Char('u') => app.refresh_current_route(),
                KeyCode::Up => {
                    app.statement_scroll = app.statement_scroll.saturating_sub(1);
                }
                KeyCode::Down => {
                    if app.statement_scroll + 1 < app.statements.len() {
                        app.statement_scroll += 1;
                    }
                }
                _ => {}
            }
            Ok(false)
        }
    }
}

async fn handle_transaction_form_input(
    app: &mut App,
    key: KeyEvent,
    account_id: i64,
) -> Result<bool> {
    let needs_recipient = app.transaction_form.transaction_type.needs_recipient();

    match key.code {
        KeyCode::Down => {
            app.transaction_focus = match app.transaction_focus {
                TransactionField::Type if needs_recipient => TransactionField::Recipient,
                TransactionField::Type => TransactionField::Amount,
                TransactionField::Recipient => TransactionField::Amount,
                TransactionField::Amount => TransactionField::Type,
            };
        }
        KeyCode::Up => {
            app.transaction_focus = match app.transaction_focus {
                TransactionField::Type => TransactionField::Amount,
                TransactionField::Recipient => TransactionField::Type,
                TransactionField::Amount if needs_recipient => TransactionField::Recipient,
                TransactionField::Amount => TransactionField::Type,
            };
        }
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
            if app.transaction_focus == TransactionField::Type =>
        {
            app.transaction_form.clear_server_errors();
            app.transaction_form.transaction_type =
                app.transaction_form.transaction_type.next();
            // A withdrawal has no recipient; drop any typed value
            if !app.transaction_form.transaction_type.needs_recipient() {
                app.transaction_form.recipient.clear();
            }
        }
        KeyCode::Enter => {
            app.submit_transaction(account_id).await;
        }
        KeyCode::Backspace => {
            app.transaction_form.clear_server_errors();
            match app.transaction_focus {
                TransactionField::Recipient => app.transaction_form.recipient.pop(),
                TransactionField::Amount => app.transaction_form.amount.pop(),
                TransactionField::Type => None,
            };
        }
        KeyCode::Char(c) => {
            app.transaction_form.clear_server_errors();
            match app.transaction_focus {
                TransactionField::Recipient => {
                    if can_add_numeric_char(app.transaction_form.recipient.len(), c) {
                        app.transaction_form.recipient.push(c);
                    }
                }
                TransactionField::Amount => {
                    if can_add_numeric_char(app.transaction_form.amount.len(), c) {
                        app.transaction_form.amount.push(c);
                    }
                }
                TransactionField::Type => {}
            }
        }
        _ => {}
    }
    Ok(false)
}
