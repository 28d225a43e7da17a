//! Color palettes and derived widget styles

use ratatui::style::{Color, Modifier, Style};

use crate::core::history::Health;

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub styles: ThemeStyles,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,

    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    pub accent_primary: Color,
    pub accent_secondary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

#[derive(Debug, Clone)]
pub struct ThemeStyles {
    pub header: Style,
    pub footer: Style,
    pub panel_title: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub nav_item: Style,
    pub nav_item_active: Style,
    pub list_item: Style,
    pub list_item_selected: Style,
    pub label: Style,
    pub value: Style,
    pub muted: Style,
    pub health_normal: Style,
    pub health_moderate: Style,
    pub health_high: Style,
    pub connected: Style,
    pub disconnected: Style,
    pub sparkline: Style,
    pub chart_line: Style,
    pub trend_up: Style,
    pub trend_down: Style,
    pub keybind: Style,
    pub keybind_key: Style,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "catppuccin" | "catppuccin-mocha" => Self::catppuccin_mocha(),
            "nord" => Self::nord(),
            _ => Self::tokyo_night(),
        }
    }

    /// Tokyo Night theme (default)
    pub fn tokyo_night() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(26, 27, 38),
            bg_secondary: Color::Rgb(36, 40, 59),
            bg_highlight: Color::Rgb(47, 53, 73),

            fg_primary: Color::Rgb(192, 202, 245),
            fg_secondary: Color::Rgb(169, 177, 214),
            fg_muted: Color::Rgb(86, 95, 137),

            accent_primary: Color::Rgb(122, 162, 247),
            accent_secondary: Color::Rgb(187, 154, 247),

            success: Color::Rgb(158, 206, 106),
            warning: Color::Rgb(224, 175, 104),
            error: Color::Rgb(247, 118, 142),
            info: Color::Rgb(125, 207, 255),

            border: Color::Rgb(41, 46, 66),
            border_focused: Color::Rgb(122, 162, 247),
            selection: Color::Rgb(52, 59, 88),
        };

        Self::from_colors("Tokyo Night", colors)
    }

    pub fn catppuccin_mocha() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(30, 30, 46),
            bg_secondary: Color::Rgb(49, 50, 68),
            bg_highlight: Color::Rgb(88, 91, 112),

            fg_primary: Color::Rgb(205, 214, 244),
            fg_secondary: Color::Rgb(186, 194, 222),
            fg_muted: Color::Rgb(147, 153, 178),

            accent_primary: Color::Rgb(137, 180, 250),
            accent_secondary: Color::Rgb(203, 166, 247),

            success: Color::Rgb(166, 227, 161),
            warning: Color::Rgb(249, 226, 175),
            error: Color::Rgb(243, 139, 168),
            info: Color::Rgb(148, 226, 213),

            border: Color::Rgb(69, 71, 90),
            border_focused: Color::Rgb(137, 180, 250),
            selection: Color::Rgb(88, 91, 112),
        };

        Self::from_colors("Catppuccin Mocha", colors)
    }

    pub fn nord() -> Self {
        let colors = ThemeColors {
            bg_primary: Color::Rgb(46, 52, 64),
            bg_secondary: Color::Rgb(59, 66, 82),
            bg_highlight: Color::Rgb(76, 86, 106),

            fg_primary: Color::Rgb(236, 239, 244),
            fg_secondary: Color::Rgb(229, 233, 240),
            fg_muted: Color::Rgb(216, 222, 233),

            accent_primary: Color::Rgb(136, 192, 208),
            accent_secondary: Color::Rgb(129, 161, 193),

            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            info: Color::Rgb(136, 192, 208),

            border: Color::Rgb(67, 76, 94),
            border_focused: Color::Rgb(136, 192, 208),
            selection: Color::Rgb(76, 86, 106),
        };

        Self::from_colors("Nord", colors)
    }

    fn from_colors(name: &str, colors: ThemeColors) -> Self {
        let styles = ThemeStyles {
            header: Style::default()
                .bg(colors.bg_secondary)
                .fg(colors.fg_primary),
            footer: Style::default().bg(colors.bg_secondary).fg(colors.fg_muted),
            panel_title: Style::default()
                .fg(colors.accent_primary)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(colors.border),
            panel_border_focused: Style::default().fg(colors.border_focused),
            nav_item: Style::default().fg(colors.fg_secondary),
            nav_item_active: Style::default()
                .fg(colors.fg_primary)
                .bg(colors.selection)
                .add_modifier(Modifier::BOLD),
            list_item: Style::default().fg(colors.fg_primary),
            list_item_selected: Style::default()
                .fg(colors.fg_primary)
                .bg(colors.bg_highlight),
            label: Style::default().fg(colors.fg_muted),
            value: Style::default()
                .fg(colors.fg_primary)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(colors.fg_muted),
            health_normal: Style::default().fg(colors.success),
            health_moderate: Style::default().fg(colors.warning),
            health_high: Style::default()
                .fg(colors.error)
                .add_modifier(Modifier::BOLD),
            connected: Style::default().fg(colors.success),
            disconnected: Style::default()
                .fg(colors.error)
                .add_modifier(Modifier::BOLD),
            sparkline: Style::default().fg(colors.accent_primary),
            chart_line: Style::default().fg(colors.info),
            trend_up: Style::default().fg(colors.warning),
            trend_down: Style::default().fg(colors.info),
            keybind: Style::default().fg(colors.fg_muted),
            keybind_key: Style::default()
                .fg(colors.accent_secondary)
                .add_modifier(Modifier::BOLD),
        };

        Self {
            name: name.to_string(),
            colors,
            styles,
        }
    }

    pub fn health_style(&self, health: Health) -> Style {
        match health {
            Health::Normal => self.styles.health_normal,
            Health::Moderate => self.styles.health_moderate,
            Health::High => self.styles.health_high,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_tokyo_night() {
        assert_eq!(Theme::from_name("solarized").name, "Tokyo Night");
        assert_eq!(Theme::from_name("NORD").name, "Nord");
        assert_eq!(Theme::from_name("catppuccin").name, "Catppuccin Mocha");
    }
}
