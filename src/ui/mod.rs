pub mod card;
pub mod loading;
pub mod status;
pub mod table;
pub mod theme;

pub use card::{Card, render_message};
pub use loading::{render_loading_indicator, spinner_char, spinner_span};
pub use table::{TableCursor, render_data_table};
pub use theme::Theme;

use ratatui::layout::Rect;

/// Rect of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));
        assert_eq!(centered_rect(200, 80, area), area);
    }
}
