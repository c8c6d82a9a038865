//! Color theme for the Vigil TUI.
//!
//! A dark slate palette with one accent family per phase.

use ratatui::style::{Color, Modifier, Style};

use vigil_engine::PhaseRecord;
use vigil_types::{Accent, Emphasis};

mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(17, 24, 39); // gray-900
    pub const BG_PANEL: Color = Color::Rgb(31, 41, 55); // gray-800
    pub const BG_HIGHLIGHT: Color = Color::Rgb(55, 65, 81); // gray-700
    pub const BG_BORDER: Color = Color::Rgb(75, 85, 99); // gray-600

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(243, 244, 246); // gray-100
    pub const TEXT_SECONDARY: Color = Color::Rgb(209, 213, 219); // gray-300
    pub const TEXT_MUTED: Color = Color::Rgb(156, 163, 175); // gray-400
    pub const TEXT_DISABLED: Color = Color::Rgb(107, 114, 128); // gray-500

    // === Accents ===
    pub const BLUE: Color = Color::Rgb(96, 165, 250); // blue-400
    pub const YELLOW: Color = Color::Rgb(250, 204, 21); // yellow-400
    pub const ORANGE: Color = Color::Rgb(251, 146, 60); // orange-400
    pub const RED: Color = Color::Rgb(248, 113, 113); // red-400
    pub const GREEN: Color = Color::Rgb(74, 222, 128); // green-400
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub blue: Color,
    pub yellow: Color,
    pub orange: Color,
    pub red: Color,
    pub green: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            text_disabled: colors::TEXT_DISABLED,
            blue: colors::BLUE,
            yellow: colors::YELLOW,
            orange: colors::ORANGE,
            red: colors::RED,
            green: colors::GREEN,
        }
    }

    #[must_use]
    pub fn accent(&self, accent: Accent) -> Color {
        match accent {
            Accent::Blue => self.blue,
            Accent::Yellow => self.yellow,
            Accent::Orange => self.orange,
            Accent::Red => self.red,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Emphasis, Modifier, Palette, PhaseRecord, Style};

    #[must_use]
    pub fn brand(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn heading(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn label(palette: &Palette) -> Style {
        Style::default().fg(palette.text_disabled)
    }

    #[must_use]
    pub fn body(palette: &Palette) -> Style {
        Style::default().fg(palette.text_secondary)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.orange)
            .add_modifier(Modifier::BOLD)
    }

    /// Title style of a phase card. Inactive phases are dimmed.
    #[must_use]
    pub fn phase_title(palette: &Palette, phase: &PhaseRecord, active: bool) -> Style {
        if !active {
            return Style::default()
                .fg(palette.text_disabled)
                .add_modifier(Modifier::DIM);
        }
        let style = Style::default()
            .fg(palette.accent(phase.style.accent))
            .add_modifier(Modifier::BOLD);
        match phase.style.emphasis {
            Emphasis::Raised => style,
            Emphasis::Scaled => style.add_modifier(Modifier::UNDERLINED),
            Emphasis::Pulse => style.add_modifier(Modifier::SLOW_BLINK),
        }
    }

    #[must_use]
    pub fn phase_body(palette: &Palette, active: bool) -> Style {
        if active {
            Style::default().fg(palette.text_secondary)
        } else {
            Style::default()
                .fg(palette.text_disabled)
                .add_modifier(Modifier::DIM)
        }
    }

    #[must_use]
    pub fn selected_case(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.orange)
            .bg(palette.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }
}
