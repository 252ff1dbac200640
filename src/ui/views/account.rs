use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, PaneFocus, Route, TransactionField};
use crate::utils::format_amount;

use super::super::styles;
use super::form;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if !app.protected_content_visible() {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Account details
            Constraint::Length(11), // Transaction form
            Constraint::Min(4),     // Statements
        ])
        .split(area);

    render_details(frame, app, chunks[0]);
    render_transaction_form(frame, app, chunks[1]);
    render_statements(frame, app, chunks[2]);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let account_id = match app.route {
        Route::AccountDetail(id) => id,
        _ => return,
    };

    let balance = app
        .detail_account()
        .map(|account| format_amount(&account.balance))
        .unwrap_or_else(|| "...".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled("  Account Number  ", styles::muted_style()),
            Span::styled(format!("#{}", account_id), styles::highlight_style()),
        ]),
        Line::from(vec![
            Span::styled("  Balance         ", styles::muted_style()),
            Span::styled(balance, styles::success_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::muted_style())
        .title(" Account details ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_transaction_form(frame: &mut Frame, app: &App, area: Rect) {
    let form_state = &app.transaction_form;
    let focused = app.pane_focus == PaneFocus::Form;
    let mut lines: Vec<Line> = Vec::new();

    lines.extend(form::detail_alert(form_state.detail.as_ref()));

    lines.push(form::select_field(
        "Type",
        &form_state.transaction_type.to_string(),
        focused && app.transaction_focus == TransactionField::Type,
    ));
    if let Some(error) = form::field_error(form_state.field_errors.get("transaction_type")) {
        lines.push(error);
    }

    // Withdrawals carry no recipient; the field is hidden entirely
    if form_state.transaction_type.needs_recipient() {
        lines.push(form::text_field(
            "Recipient",
            &form_state.recipient,
            focused && app.transaction_focus == TransactionField::Recipient,
            false,
        ));
        if let Some(error) = form::field_error(form_state.field_errors.get("recipient")) {
            lines.push(error);
        }
    }

    lines.push(form::text_field(
        "Amount",
        &form_state.amount,
        focused && app.transaction_focus == TransactionField::Amount,
        false,
    ));
    if let Some(error) = form::field_error(form_state.field_errors.get("amount")) {
        lines.push(error);
    }
    lines.push(Line::from(Span::styled(
        "  Minimum amount is 1 EGP",
        styles::muted_style(),
    )));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter: submit | Space: change type | Tab: statements | Esc: dashboard",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
        .title(" Make a transaction ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_statements(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.pane_focus == PaneFocus::List;

    let items: Vec<ListItem> = app
        .statements
        .iter()
        .map(|statement| {
            let recipient = statement
                .recipient
                .map(|id| format!("-> #{}", id))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(format!(" ref {:<8}", statement.id), styles::muted_style()),
                Span::styled(
                    format!("{:<10}", statement.transaction_type.to_string()),
                    styles::list_item_style(),
                ),
                Span::styled(
                    format!("{:<14}", format_amount(&statement.amount)),
                    styles::highlight_style(),
                ),
                Span::styled(recipient, styles::muted_style()),
            ]))
        })
        .collect();

    let title = format!(" Bank statements ({}) ", app.statements.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
        .title(title);

    if items.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No statements yet",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_style())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.statement_scroll.min(app.statements.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}
