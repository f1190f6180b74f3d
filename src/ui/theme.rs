use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeName;

/// Color palette for the chrome around the data (borders, text, selection)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub skeleton: Color,
    pub skeleton_pulse: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            background: Color::Reset,
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::Gray,
            selection: Color::DarkGray,
            skeleton: Color::DarkGray,
            skeleton_pulse: Color::Gray,
        }
    }

    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            background: Color::White,
            text: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            border: Color::DarkGray,
            selection: Color::Indexed(254),
            skeleton: Color::Indexed(252),
            skeleton_pulse: Color::Indexed(248),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        Self::from_name(self.name.toggled())
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    /// Skeleton color for the given animation tick
    pub fn skeleton_style(&self, tick: usize) -> Style {
        if (tick / 6) % 2 == 0 {
            Style::default().fg(self.skeleton)
        } else {
            Style::default().fg(self.skeleton_pulse)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let theme = Theme::default();
        assert_eq!(theme.name, ThemeName::Dark);
        assert_eq!(theme.toggled().name, ThemeName::Light);
        assert_eq!(theme.toggled().toggled(), theme);
    }

    #[test]
    fn test_skeleton_pulses() {
        let theme = Theme::dark();
        assert_ne!(theme.skeleton_style(0), theme.skeleton_style(6));
        assert_eq!(theme.skeleton_style(0), theme.skeleton_style(12));
    }
}
