use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, RegisterField};

use super::super::styles;
use super::form;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form_state = &app.register_form;
    let mut lines: Vec<Line> = Vec::new();

    lines.extend(form::detail_alert(form_state.detail.as_ref()));

    lines.push(form::text_field(
        "Username",
        &form_state.username,
        app.register_focus == RegisterField::Username,
        false,
    ));
    if let Some(error) = form::field_error(form_state.field_errors.get("username")) {
        lines.push(error);
    }
    lines.push(Line::from(""));

    lines.push(form::text_field(
        "Email",
        &form_state.email,
        app.register_focus == RegisterField::Email,
        false,
    ));
    if let Some(error) = form::field_error(form_state.field_errors.get("email")) {
        lines.push(error);
    }
    lines.push(Line::from(Span::styled(
        "  optional",
        styles::muted_style(),
    )));
    lines.push(Line::from(""));

    lines.push(form::text_field(
        "Password",
        &form_state.password,
        app.register_focus == RegisterField::Password,
        true,
    ));
    if let Some(error) = form::field_error(form_state.field_errors.get("password")) {
        lines.push(error);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter: register | Tab: next field | Esc: back to login",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Register ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
