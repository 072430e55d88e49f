//! User configuration — keybindings, grid defaults, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/gridpick/config.toml` (default `~/.config/gridpick/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the grid view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Confirm,
    OpenSearch,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when serialising the config).
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Confirm,
        Action::OpenSearch,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Confirm => "confirm",
            Action::OpenSearch => "open_search",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "move_up" => Some(Action::MoveUp),
            "move_down" => Some(Action::MoveDown),
            "move_left" => Some(Action::MoveLeft),
            "move_right" => Some(Action::MoveRight),
            "confirm" => Some(Action::Confirm),
            "open_search" => Some(Action::OpenSearch),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"↑"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+c"`, `"Up"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            s if s.len() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── colours ───────────

/// Optional per-state colour overrides for the grid, applied over the
/// theme defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorOverrides {
    pub cell: Option<Color>,
    pub active: Option<Color>,
    pub hover: Option<Color>,
    pub disabled: Option<Color>,
    /// Border colour of the grid block.
    pub grid: Option<Color>,
}

/// Parse a colour name from the config file.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Black => "black",
        Color::Red => "red",
        Color::Green => "green",
        Color::Yellow => "yellow",
        Color::Blue => "blue",
        Color::Magenta => "magenta",
        Color::Cyan => "cyan",
        Color::Gray => "gray",
        Color::DarkGray => "darkgray",
        Color::LightRed => "lightred",
        Color::LightGreen => "lightgreen",
        Color::LightYellow => "lightyellow",
        Color::LightBlue => "lightblue",
        Color::LightMagenta => "lightmagenta",
        Color::LightCyan => "lightcyan",
        Color::White => "white",
        _ => "white",
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and grid defaults.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Default grid dimensions, overridable on the command line.
    pub rows: u16,
    pub cols: u16,
    /// Width of one grid cell in terminal columns.
    pub cell_size: u16,
    /// Grid colour overrides, applied over the theme.
    pub colors: ColorOverrides,
}

impl AppConfig {
    /// Hard-coded defaults.
    pub fn defaults() -> Self {
        Self {
            bindings: Self::default_bindings(),
            rows: 10,
            cols: 10,
            cell_size: 2,
            colors: ColorOverrides::default(),
        }
    }

    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(MoveLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(MoveRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Confirm, vec![KeyBind::new(Enter, n), KeyBind::new(Char(' '), n)]);
        m.insert(OpenSearch, vec![KeyBind::new(Char('/'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: move | {}: confirm | {}: search | {}: quit",
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::MoveDown),
            self.short_binding(Action::Confirm),
            self.short_binding(Action::OpenSearch),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Whether a config file exists on disk.
    pub fn exists() -> bool {
        config_path().exists()
    }

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::defaults()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::defaults();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Grid settings.  Kept bounded so a typo can't produce an
            // unusable screen-filling grid.
            match key {
                "rows" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.rows = v.clamp(1, 50);
                    }
                    continue;
                }
                "cols" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.cols = v.clamp(1, 50);
                    }
                    continue;
                }
                "cell_size" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.cell_size = v.clamp(1, 8);
                    }
                    continue;
                }
                "cell_color" => {
                    config.colors.cell = parse_color(value);
                    continue;
                }
                "active_color" => {
                    config.colors.active = parse_color(value);
                    continue;
                }
                "hover_color" => {
                    config.colors.hover = parse_color(value);
                    continue;
                }
                "disabled_color" => {
                    config.colors.disabled = parse_color(value);
                    continue;
                }
                "border_color" => {
                    config.colors.grid = parse_color(value);
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# gridpick configuration".to_string(),
            String::new(),
            "# Grid defaults".to_string(),
            format!("rows = {}", self.rows),
            format!("cols = {}", self.cols),
            format!("cell_size = {}", self.cell_size),
            String::new(),
            "# Grid colours (optional): cell_color, active_color, hover_color,".to_string(),
            "#   disabled_color, border_color (e.g. `active_color = magenta`)".to_string(),
        ];
        for (key, color) in [
            ("cell_color", self.colors.cell),
            ("active_color", self.colors.active),
            ("hover_color", self.colors.hover),
            ("disabled_color", self.colors.disabled),
            ("border_color", self.colors.grid),
        ] {
            if let Some(color) = color {
                lines.push(format!("{key} = {}", color_name(color)));
            }
        }
        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, Space".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/gridpick/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("gridpick").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialised_config_parses_back() {
        let config = AppConfig::defaults();
        let parsed = AppConfig::parse_config(&config.serialise());
        assert_eq!(parsed.rows, config.rows);
        assert_eq!(parsed.cols, config.cols);
        assert_eq!(parsed.cell_size, config.cell_size);
        assert_eq!(parsed.bindings, config.bindings);
        assert_eq!(parsed.colors, config.colors);
    }

    #[test]
    fn colour_overrides_parse_and_roundtrip() {
        let parsed = AppConfig::parse_config("active_color = Magenta\nborder_color = lightblue\n");
        assert_eq!(parsed.colors.active, Some(Color::Magenta));
        assert_eq!(parsed.colors.grid, Some(Color::LightBlue));
        assert_eq!(parsed.colors.cell, None);

        let reparsed = AppConfig::parse_config(&parsed.serialise());
        assert_eq!(reparsed.colors, parsed.colors);
    }

    #[test]
    fn unknown_colour_is_ignored() {
        let parsed = AppConfig::parse_config("hover_color = chartreuse\n");
        assert_eq!(parsed.colors.hover, None);
    }

    #[test]
    fn grid_settings_are_clamped() {
        let parsed = AppConfig::parse_config("rows = 9999\ncols = 0\ncell_size = 99\n");
        assert_eq!(parsed.rows, 50);
        assert_eq!(parsed.cols, 1); // clamped up to the floor
        assert_eq!(parsed.cell_size, 8);
    }

    #[test]
    fn custom_binding_overrides_default() {
        let parsed = AppConfig::parse_config("open_search = Ctrl+f\n");
        let event = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(parsed.match_key(event), Some(Action::OpenSearch));
        // The default binding is replaced, not appended.
        let slash = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE);
        assert_eq!(parsed.match_key(slash), None);
    }

    #[test]
    fn unknown_lines_are_ignored() {
        let parsed = AppConfig::parse_config("nonsense = true\n# comment\n[section]\n");
        assert_eq!(parsed.rows, 10);
    }
}
