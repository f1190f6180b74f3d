use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::models::StatusCode;

/// Fixed semantic color of a status, identical in both themes
pub fn status_color(status: StatusCode) -> Color {
    match status {
        StatusCode::Ok => Color::Green,
        StatusCode::Warning => Color::Yellow,
        StatusCode::Critical => Color::Red,
        StatusCode::Info => Color::Blue,
        StatusCode::Unknown => Color::Gray,
    }
}

pub fn status_dot(status: StatusCode) -> Span<'static> {
    Span::styled("●", Style::default().fg(status_color(status)))
}

pub fn status_badge(label: impl Into<String>, status: StatusCode) -> Span<'static> {
    Span::styled(
        format!(" {} ", label.into()),
        Style::default()
            .fg(Color::Black)
            .bg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

/// true → OK badge, false → CRITICAL badge
pub fn bool_badge(value: bool) -> Span<'static> {
    let status = if value {
        StatusCode::Ok
    } else {
        StatusCode::Critical
    };
    status_badge(value.to_string(), status)
}

/// Neutral tag, used for module and variant names
pub fn tag(label: impl Into<String>) -> Span<'static> {
    Span::styled(
        format!("[{}]", label.into()),
        Style::default().add_modifier(Modifier::ITALIC),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges() {
        let badge = status_badge("success", StatusCode::Ok);
        assert_eq!(badge.content, " success ");
        assert_eq!(badge.style.bg, Some(Color::Green));

        assert_eq!(bool_badge(false).style.bg, Some(Color::Red));
        assert_eq!(bool_badge(true).content, " true ");
        assert_eq!(status_dot(StatusCode::Info).style.fg, Some(Color::Blue));
        assert_eq!(tag("postgres").content, "[postgres]");
    }
}
