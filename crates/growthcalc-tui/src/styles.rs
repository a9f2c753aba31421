//! TUI styles and color themes.

use ratatui::style::{Color, Modifier, Style};

use growthcalc_core::SequenceKind;

/// Color theme for the TUI.
pub struct ColorTheme {
    pub primary: Color,
    pub linear: Color,
    pub exponential: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub text: Color,
    pub muted: Color,
    pub key: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            linear: Color::Blue,
            exponential: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            text: Color::White,
            muted: Color::DarkGray,
            key: Color::Yellow,
        }
    }
}

impl ColorTheme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.key)
    }

    /// Line color of a sequence's chart.
    #[must_use]
    pub fn sequence_style(&self, kind: SequenceKind) -> Style {
        let color = match kind {
            SequenceKind::Linear => self.linear,
            SequenceKind::Exponential => self.exponential,
        };
        Style::default().fg(color)
    }
}
