//! Color theme for the TUI.
//!
//! Both variants are derived from a [`Palette`] of Tailwind CSS colors, so
//! card styles stay consistent between dark and light.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Theme variant (dark or light).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Colors a theme is built from, by role.
struct Palette {
    /// Screen background.
    base: Color,
    /// Cards at rest, header and footer.
    card: Color,
    /// Cards that slid out of the way.
    card_shifted: Color,
    /// The card being dragged.
    card_lifted: Color,
    text: Color,
    text_lifted: Color,
    subtle: Color,
    rule: Color,
    accent: Color,
    grip: Color,
    ok: Color,
    caution: Color,
}

impl Palette {
    fn dark() -> Self {
        Self {
            base: Color::Rgb(15, 23, 42),           // slate-900
            card: Color::Rgb(30, 41, 59),           // slate-800
            card_shifted: Color::Rgb(51, 65, 85),   // slate-700
            card_lifted: Color::Rgb(30, 58, 138),   // blue-900
            text: Color::Rgb(241, 245, 249),        // slate-100
            text_lifted: Color::Rgb(241, 245, 249), // slate-100
            subtle: Color::Rgb(148, 163, 184),      // slate-400
            rule: Color::Rgb(71, 85, 105),          // slate-600
            accent: Color::Rgb(96, 165, 250),       // blue-400
            grip: Color::Rgb(245, 158, 11),         // amber-500
            ok: Color::Rgb(34, 197, 94),            // green-500
            caution: Color::Rgb(234, 179, 8),       // yellow-500
        }
    }

    fn light() -> Self {
        Self {
            base: Color::Rgb(248, 250, 252),         // slate-50
            card: Color::Rgb(226, 232, 240),         // slate-200
            card_shifted: Color::Rgb(203, 213, 225), // slate-300
            card_lifted: Color::Rgb(219, 234, 254),  // blue-100
            text: Color::Rgb(15, 23, 42),            // slate-900
            text_lifted: Color::Rgb(29, 78, 216),    // blue-700
            subtle: Color::Rgb(71, 85, 105),         // slate-600
            rule: Color::Rgb(148, 163, 184),         // slate-400
            accent: Color::Rgb(29, 78, 216),         // blue-700
            grip: Color::Rgb(217, 119, 6),           // amber-600
            ok: Color::Rgb(22, 163, 74),             // green-600
            caution: Color::Rgb(202, 138, 4),        // yellow-600
        }
    }
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    // Base colors
    pub background: Color,
    pub foreground: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub info: Color,

    // UI elements
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub border: Style,

    // List cards
    pub item: Style,
    pub item_displaced: Style,
    pub item_dragged: Style,
    pub item_handle: Style,

    // Header/Footer
    pub header: Style,
    pub footer: Style,
}

impl Theme {
    /// Dark theme on slate-900.
    pub fn dark() -> Self {
        Self::build(ThemeVariant::Dark, &Palette::dark())
    }

    /// Light theme on slate-50.
    pub fn light() -> Self {
        Self::build(ThemeVariant::Light, &Palette::light())
    }

    fn build(variant: ThemeVariant, p: &Palette) -> Self {
        let emphasis = Style::new().fg(p.accent).add_modifier(Modifier::BOLD);
        Self {
            variant,
            background: p.base,
            foreground: p.text,

            success: p.ok,
            warning: p.caution,
            info: p.accent,

            title: emphasis,
            help_key: emphasis,
            help_desc: Style::new().fg(p.subtle),
            border: Style::new().fg(p.rule),

            item: Style::new().bg(p.card).fg(p.text),
            item_displaced: Style::new().bg(p.card_shifted).fg(p.text),
            item_dragged: Style::new()
                .bg(p.card_lifted)
                .fg(p.text_lifted)
                .add_modifier(Modifier::BOLD),
            item_handle: Style::new().fg(p.grip),

            header: Style::new().bg(p.card).fg(p.text),
            footer: Style::new().bg(p.card).fg(p.subtle),
        }
    }

    /// Create theme from variant.
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Toggle between dark and light themes.
    pub fn toggle(&self) -> Self {
        match self.variant {
            ThemeVariant::Dark => Self::light(),
            ThemeVariant::Light => Self::dark(),
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
    fn test_toggle_round_trips_variant() {
        let theme = Theme::default();
        assert_eq!(theme.variant, ThemeVariant::Dark);
        assert_eq!(theme.toggle().variant, ThemeVariant::Light);
        assert_eq!(theme.toggle().toggle().variant, ThemeVariant::Dark);
    }

    #[test]
    fn test_card_states_are_distinct() {
        for theme in [Theme::dark(), Theme::light()] {
            assert_ne!(theme.item.bg, theme.item_displaced.bg);
            assert_ne!(theme.item.bg, theme.item_dragged.bg);
            assert_ne!(theme.item_displaced.bg, theme.item_dragged.bg);
        }
    }

    #[test]
    fn test_variant_parses_from_settings_text() {
        assert_eq!("light".parse::<ThemeVariant>(), Ok(ThemeVariant::Light));
        assert_eq!(ThemeVariant::Dark.to_string(), "dark");
    }
}
