//! Shared form-rendering helpers.
//!
//! Forms are rendered as stacked lines: a label/value row per control, an
//! inline error row under the offending control, and an optional page-level
//! alert above the whole form (the `detail` server error).

use ratatui::text::{Line, Span};

use super::super::styles;

/// Mask for password fields
const PASSWORD_MASK: char = '*';

/// A text input row, with the cursor marker on the focused field.
pub fn text_field(
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
) -> Line<'static> {
    let shown = if masked {
        PASSWORD_MASK.to_string().repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("  {:<12}", label), styles::muted_style()),
        Span::styled(format!("{}{}", shown, cursor), styles::field_style(focused)),
    ])
}

/// A select row showing the current choice.
pub fn select_field(label: &str, value: &str, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", label), styles::muted_style()),
        Span::styled(format!("< {} >", value), styles::field_style(focused)),
    ])
}

/// Inline error row under a control, when the server flagged the field.
pub fn field_error(error: Option<&String>) -> Option<Line<'static>> {
    error.map(|message| {
        Line::from(Span::styled(
            format!("  {}", message),
            styles::error_style(),
        ))
    })
}

/// Page-level alert lines for a `detail` error.
pub fn detail_alert(detail: Option<&String>) -> Vec<Line<'static>> {
    match detail {
        Some(message) => vec![
            Line::from(Span::styled(
                format!("  ! {}", message),
                styles::error_style(),
            )),
            Line::from(""),
        ],
        None => Vec::new(),
    }
}
