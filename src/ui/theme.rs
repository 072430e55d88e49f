//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── grid ───────────────────────────────────────────────────
    pub fn cell_style() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    pub fn active_style() -> Style {
        Style::default().bg(Color::Cyan)
    }

    pub fn hover_style() -> Style {
        Style::default().bg(Color::LightCyan)
    }

    pub fn disabled_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::DarkGray)
    }

    pub fn preview_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    // ── search modal ───────────────────────────────────────────
    pub fn result_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn result_selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn meta_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn loading_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

/// Per-state visual overrides for the grid widget, patched over the theme
/// defaults (a later override wins over the base style).
#[derive(Debug, Clone, Copy, Default)]
pub struct GridStyles {
    pub cell: Option<Style>,
    pub active: Option<Style>,
    pub hover: Option<Style>,
    pub disabled: Option<Style>,
    pub grid: Option<Style>,
}

impl GridStyles {
    /// Build overrides from the config file's colour settings. Cell states
    /// override the background; the border overrides the foreground.
    pub fn from_colors(colors: &crate::config::ColorOverrides) -> Self {
        Self {
            cell: colors.cell.map(|c| Style::default().bg(c)),
            active: colors.active.map(|c| Style::default().bg(c)),
            hover: colors.hover.map(|c| Style::default().bg(c)),
            disabled: colors.disabled.map(|c| Style::default().bg(c)),
            grid: colors.grid.map(|c| Style::default().fg(c)),
        }
    }

    pub fn cell(&self) -> Style {
        patched(Theme::cell_style(), self.cell)
    }

    pub fn active(&self) -> Style {
        patched(Theme::active_style(), self.active)
    }

    pub fn hover(&self) -> Style {
        patched(Theme::hover_style(), self.hover)
    }

    pub fn disabled(&self) -> Style {
        patched(Theme::disabled_style(), self.disabled)
    }

    pub fn grid(&self) -> Style {
        patched(Theme::border_style(), self.grid)
    }
}

fn patched(base: Style, over: Option<Style>) -> Style {
    match over {
        Some(s) => base.patch(s),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn overrides_patch_over_defaults() {
        let styles = GridStyles {
            active: Some(Style::default().bg(Color::Magenta)),
            ..GridStyles::default()
        };
        assert_eq!(styles.active().bg, Some(Color::Magenta));
        // Unset states keep the theme default.
        assert_eq!(styles.cell(), Theme::cell_style());
    }

    #[test]
    fn configured_colours_reach_the_grid_styles() {
        let colors = crate::config::ColorOverrides {
            active: Some(Color::Magenta),
            grid: Some(Color::LightBlue),
            ..Default::default()
        };
        let styles = GridStyles::from_colors(&colors);
        assert_eq!(styles.active().bg, Some(Color::Magenta));
        assert_eq!(styles.grid().fg, Some(Color::LightBlue));
        assert_eq!(styles.hover(), Theme::hover_style());
    }
}
