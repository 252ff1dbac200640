use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginField};

use super::super::styles;
use super::form;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form_state = &app.login_form;
    let mut lines: Vec<Line> = Vec::new();

    lines.extend(form::detail_alert(form_state.detail.as_ref()));

    lines.push(form::text_field(
        "Username",
        &form_state.username,
        app.login_focus == LoginField::Username,
        false,
    ));
    if let Some(error) = form::field_error(form_state.field_errors.get("username")) {
        lines.push(error);
    }
    lines.push(Line::from(""));

    lines.push(form::text_field(
        "Password",
        &form_state.password,
        app.login_focus == LoginField::Password,
        true,
    ));
    if let Some(error) = form::field_error(form_state.field_errors.get("password")) {
        lines.push(error);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter: log in | Tab: next field | Ctrl+R: register | Esc: quit",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Login ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
