//! User configuration: keybindings, budget and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/payroll-tui/config.toml` (default `~/.config/payroll-tui/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::payroll::DEFAULT_MONTHLY_BUDGET;

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid monthly budget '{0}'")]
    InvalidBudget(String),

    #[error("monthly budget cannot be negative: {0}")]
    NegativeBudget(String),

    #[error("invalid value '{value}' for '{key}', expected true or false")]
    InvalidBool { key: String, value: String },

    #[error("no valid key in binding list '{value}' for '{key}'")]
    InvalidBinding { key: String, value: String },
}

/// Parse a budget amount such as `20000`, `20,000.00` or `$15000`.
pub fn parse_budget(s: &str) -> Result<Decimal, ConfigError> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && *c != '_')
        .collect();
    let budget: Decimal = cleaned
        .parse()
        .map_err(|_| ConfigError::InvalidBudget(s.trim().to_string()))?;
    if budget.is_sign_negative() && !budget.is_zero() {
        return Err(ConfigError::NegativeBudget(s.trim().to_string()));
    }
    Ok(budget)
}

// ───────────────────────────────────────── actions ───────────

/// Where an action applies.  Global actions work in every pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Form,
    Table,
}

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextField,
    PrevField,
    Submit,
    ClearForm,
    MoveUp,
    MoveDown,
    FirstRow,
    LastRow,
    DeleteRow,
    SwitchPane,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::NextField,
        Action::PrevField,
        Action::Submit,
        Action::ClearForm,
        Action::MoveUp,
        Action::MoveDown,
        Action::FirstRow,
        Action::LastRow,
        Action::DeleteRow,
        Action::SwitchPane,
        Action::Help,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::NextField => "Next Field",
            Action::PrevField => "Previous Field",
            Action::Submit => "Add Employee",
            Action::ClearForm => "Clear Form",
            Action::MoveUp => "Select Up",
            Action::MoveDown => "Select Down",
            Action::FirstRow => "Select First",
            Action::LastRow => "Select Last",
            Action::DeleteRow => "Delete Employee",
            Action::SwitchPane => "Switch Form/Table",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }

    pub fn scope(self) -> Scope {
        match self {
            Action::NextField | Action::PrevField | Action::Submit | Action::ClearForm => {
                Scope::Form
            }
            Action::MoveUp
            | Action::MoveDown
            | Action::FirstRow
            | Action::LastRow
            | Action::DeleteRow => Scope::Table,
            Action::SwitchPane | Action::Help | Action::Quit => Scope::Global,
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::NextField => "next_field",
            Action::PrevField => "prev_field",
            Action::Submit => "submit",
            Action::ClearForm => "clear_form",
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::FirstRow => "first_row",
            Action::LastRow => "last_row",
            Action::DeleteRow => "delete_row",
            Action::SwitchPane => "switch_pane",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
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
    /// are compared.  `BackTab` always arrives with SHIFT, so SHIFT is
    /// ignored for it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        if self.code == KeyCode::BackTab {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+q"`, `"↑"`, `"Enter"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::BackTab => "Shift+Tab".into(),
            other => code_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+q"`, `"Up"`, `"F2"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&code_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+q"`, `"Up"`, `"d"`, `"Enter"`.
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
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => {
                let n: u8 = k[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn code_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings, budget and input settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Monthly payroll above this amount triggers the warning dialog.
    pub monthly_budget: Decimal,
    /// Capture the mouse so `[Delete]` cells are clickable.
    pub mouse: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
            mouse: true,
        }
    }
}

impl AppConfig {
    /// Built-in bindings.  Form-scope keys avoid plain characters, which
    /// are typed into the focused input.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(NextField, vec![KeyBind::new(Tab, n), KeyBind::new(Down, n)]);
        m.insert(PrevField, vec![KeyBind::new(BackTab, n), KeyBind::new(Up, n)]);
        m.insert(Submit, vec![KeyBind::new(Enter, n)]);
        m.insert(ClearForm, vec![KeyBind::new(Char('r'), ctrl)]);
        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(FirstRow, vec![KeyBind::new(Home, n)]);
        m.insert(LastRow, vec![KeyBind::new(End, n)]);
        m.insert(
            DeleteRow,
            vec![KeyBind::new(Delete, n), KeyBind::new(Char('d'), n)],
        );
        m.insert(SwitchPane, vec![KeyBind::new(Esc, n), KeyBind::new(F(2), n)]);
        m.insert(Help, vec![KeyBind::new(F(1), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), ctrl)]);

        m
    }

    /// Find the action that matches a key event in `scope`.  Global actions
    /// are always candidates.  When multiple bindings match, the one with
    /// the most modifiers wins.
    pub fn match_key(&self, scope: Scope, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            let in_scope = action.scope() == Scope::Global || action.scope() == scope;
            if !in_scope {
                continue;
            }
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

    /// Format the binding list for a given action (e.g. `"Tab/↓"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string for the focused pane.
    pub fn status_bar_hint(&self, scope: Scope) -> String {
        match scope {
            Scope::Table => format!(
                "{}: select | {}: delete | {}: form | {}: help | {}: quit",
                self.short_binding(Action::MoveUp),
                self.short_binding(Action::DeleteRow),
                self.short_binding(Action::SwitchPane),
                self.short_binding(Action::Help),
                self.short_binding(Action::Quit),
            ),
            Scope::Form | Scope::Global => format!(
                "{}: next field | {}: add | {}: table | {}: help | {}: quit",
                self.short_binding(Action::NextField),
                self.short_binding(Action::Submit),
                self.short_binding(Action::SwitchPane),
                self.short_binding(Action::Help),
                self.short_binding(Action::Quit),
            ),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`.  Bad lines are logged and skipped.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                }
                return Self::default();
            }
        };
        let (config, errors) = Self::parse_config(&contents);
        for error in errors {
            tracing::warn!(path = %path.display(), %error, "ignoring config line");
        }
        tracing::debug!(path = %path.display(), "loaded config");
        config
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    pub(crate) fn parse_config(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "monthly_budget" => {
                    match parse_budget(value) {
                        Ok(b) => config.monthly_budget = b,
                        Err(e) => errors.push(e),
                    }
                    continue;
                }
                "mouse" => {
                    match value {
                        "true" => config.mouse = true,
                        "false" => config.mouse = false,
                        _ => errors.push(ConfigError::InvalidBool {
                            key: key.into(),
                            value: value.into(),
                        }),
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if parsed.is_empty() {
                errors.push(ConfigError::InvalidBinding {
                    key: key.into(),
                    value: value.into(),
                });
            } else {
                config.bindings.insert(action, parsed);
            }
        }

        (config, errors)
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# payroll-tui configuration".to_string(),
            String::new(),
            "# Budget".to_string(),
            format!("monthly_budget = {}", self.monthly_budget),
            format!("mouse = {}", self.mouse),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, BackTab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

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

/// Return the config file path (`$XDG_CONFIG_HOME/payroll-tui/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn same_key_resolves_by_scope() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(Scope::Form, key(KeyCode::Down)),
            Some(Action::NextField)
        );
        assert_eq!(
            config.match_key(Scope::Table, key(KeyCode::Down)),
            Some(Action::MoveDown)
        );
        assert_eq!(config.match_key(Scope::Form, key(KeyCode::Char('d'))), None);
        assert_eq!(
            config.match_key(Scope::Table, key(KeyCode::F(1))),
            Some(Action::Help)
        );
    }

    #[test]
    fn backtab_matches_with_implicit_shift() {
        let config = AppConfig::default();
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(config.match_key(Scope::Form, event), Some(Action::PrevField));
    }

    #[test]
    fn parse_config_reads_budget_mouse_and_bindings() {
        let text = "\
# comment
monthly_budget = 15,000.50
mouse = false
delete_row = x, Ctrl+d
unknown_key = whatever
";
        let (config, errors) = AppConfig::parse_config(text);
        assert!(errors.is_empty());
        assert_eq!(config.monthly_budget, dec!(15000.50));
        assert!(!config.mouse);
        assert_eq!(
            config.bindings[&Action::DeleteRow],
            vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::NONE),
                KeyBind::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            ]
        );
        // Untouched actions keep their defaults.
        assert_eq!(
            config.bindings[&Action::Submit],
            AppConfig::default_bindings()[&Action::Submit]
        );
    }

    #[test]
    fn parse_config_reports_bad_values_and_keeps_defaults() {
        let text = "monthly_budget = lots\nmouse = maybe\nquit = Hyper+q\n";
        let (config, errors) = AppConfig::parse_config(text);
        assert_eq!(config.monthly_budget, DEFAULT_MONTHLY_BUDGET);
        assert!(config.mouse);
        assert_eq!(
            errors,
            vec![
                ConfigError::InvalidBudget("lots".into()),
                ConfigError::InvalidBool {
                    key: "mouse".into(),
                    value: "maybe".into()
                },
                ConfigError::InvalidBinding {
                    key: "quit".into(),
                    value: "Hyper+q".into()
                },
            ]
        );
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.monthly_budget = dec!(12345);
        config.mouse = false;
        let (parsed, errors) = AppConfig::parse_config(&config.serialise());
        assert!(errors.is_empty());
        assert_eq!(parsed.monthly_budget, dec!(12345));
        assert!(!parsed.mouse);
        for &action in Action::ALL {
            assert_eq!(parsed.bindings[&action], config.bindings[&action], "{action:?}");
        }
    }

    #[test]
    fn save_to_and_load_from_round_trip_through_disk() {
        let dir = std::env::temp_dir().join(format!("payroll-tui-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.monthly_budget = dec!(500);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.monthly_budget, dec!(500));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let loaded = AppConfig::load_from(Path::new("/nonexistent/payroll-tui/config.toml"));
        assert_eq!(loaded.monthly_budget, DEFAULT_MONTHLY_BUDGET);
    }

    #[test]
    fn parse_budget_accepts_formatted_amounts() {
        assert_eq!(parse_budget("$20,000"), Ok(dec!(20000)));
        assert_eq!(parse_budget(" 1_000.25 "), Ok(dec!(1000.25)));
        assert_eq!(
            parse_budget("-5"),
            Err(ConfigError::NegativeBudget("-5".into()))
        );
    }

    #[test]
    fn display_bindings_joins_all_keys() {
        let config = AppConfig::default();
        assert_eq!(config.display_bindings(Action::NextField), "Tab/↓");
        assert_eq!(config.display_bindings(Action::Quit), "Ctrl+q");
        assert_eq!(config.display_bindings(Action::PrevField), "Shift+Tab/↑");
    }
}
