use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, PaneFocus};
use crate::utils::format_amount;

use super::super::styles;
use super::form;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    // The guard decides whether protected content appears at all
    if !app.protected_content_visible() {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(area);

    render_create_form(frame, app, chunks[0]);
    render_account_list(frame, app, chunks[1]);
}

fn render_create_form(frame: &mut Frame, app: &App, area: Rect) {
    let form_state = &app.account_form;
    let focused = app.pane_focus == PaneFocus::Form;
    let mut lines: Vec<Line> = Vec::new();

    lines.extend(form::detail_alert(form_state.detail.as_ref()));

    lines.push(form::select_field(
        "Type",
        &form_state.account_type.to_string(),
        focused,
    ));
    if let Some(error) = form::field_error(form_state.field_errors.get("account_type")) {
        lines.push(error);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter: create | Space: change type | Tab: account list",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
        .title(" Create a new bank account ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_account_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.pane_focus == PaneFocus::List;

    let items: Vec<ListItem> = app
        .accounts
        .iter()
        .map(|account| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" #{:<8}", account.id), styles::highlight_style()),
                Span::styled(
                    format!("{:<22}", account.account_type.to_string()),
                    styles::list_item_style(),
                ),
                Span::styled(format_amount(&account.balance), styles::success_style()),
            ]))
        })
        .collect();

    let title = format!(" All accounts ({}) ", app.accounts.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
        .title(title);

    if items.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No accounts yet",
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
    state.select(Some(app.account_selection));
    frame.render_stateful_widget(list, area, &mut state);
}
