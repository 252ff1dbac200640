use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, NoticeLevel, Route};
use crate::models::notification::unread_count;
use crate::utils::age_display;

use super::styles;
use super::views::{account, dashboard, login, register};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.showing_notifications {
        render_notifications_overlay(frame, app);
    }
}

/// Header bar: brand on the left, session-dependent links on the right.
/// Anonymous sessions see login/register; authenticated sessions see the
/// notification badge and logout.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let brand = "  Bankly";
    let links = if app.session.is_authenticated() {
        format!(
            "[n] Notifications ({}) | [l] Logout | [q] Quit ",
            unread_count(&app.notifications)
        )
    } else {
        "Login | Register ".to_string()
    };

    let padding = (area.width as usize)
        .saturating_sub(brand.len())
        .saturating_sub(links.len());

    let line = Line::from(vec![
        Span::styled(brand, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(links, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Login => login::render(frame, app, area),
        Route::Register => register::render(frame, app, area),
        Route::Dashboard => dashboard::render(frame, app, area),
        Route::AccountDetail(_) => account::render(frame, app, area),
        // Home and Logout redirect on entry and never persist as the
        // current route; nothing to draw.
        Route::Home | Route::Logout => {}
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (left_text, left_style) = match &app.notice {
        Some(notice) => {
            let style = match notice.level {
                NoticeLevel::Success => styles::success_style(),
                NoticeLevel::Info => styles::info_style(),
                NoticeLevel::Warning => styles::warning_style(),
                NoticeLevel::Error => styles::error_style(),
            };
            (format!(" {} ", notice.message), style)
        }
        None => {
            let updated = app
                .last_refreshed
                .map(age_display)
                .unwrap_or_else(|| "never".to_string());
            (format!(" Updated {} ", updated), styles::muted_style())
        }
    };

    let right_text = format!(" {} ", app.route.title());
    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(styles::status_bar_style()),
        area,
    );
}

fn render_notifications_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 14, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    let unread: Vec<_> = app.notifications.iter().filter(|n| !n.is_read).collect();
    if unread.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No unread notifications",
            styles::muted_style(),
        )));
    } else {
        for notification in unread {
            lines.push(Line::from(Span::styled(
                format!("  * {}", notification.message),
                styles::list_item_style(),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc: close",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(format!(
            " Notifications ({}) ",
            unread_count(&app.notifications)
        ));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Fixed-size rect centered in the parent area.
fn centered_rect(width: u16, height: u16, parent: Rect) -> Rect {
    let x = parent.x + parent.width.saturating_sub(width) / 2;
    let y = parent.y + parent.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(parent.width),
        height: height.min(parent.height),
    }
}
