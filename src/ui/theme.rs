//! Console styling per log level.

use console::Style;

use super::LogLevel;

/// Styles applied to console lines.
#[derive(Debug, Clone)]
pub struct InspectorTheme {
    ok: Style,
    attention: Style,
    broken: Style,
    marker: Style,
    quiet: Style,
}

impl Default for InspectorTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectorTheme {
    /// Colored theme.
    pub fn new() -> Self {
        Self {
            ok: Style::new().green(),
            attention: Style::new().color256(208),
            broken: Style::new().red().bold(),
            marker: Style::new().magenta().bold(),
            quiet: Style::new().dim(),
        }
    }

    /// Theme without any styling (non-TTY or `--no-color`).
    pub fn plain() -> Self {
        Self {
            ok: Style::new(),
            attention: Style::new(),
            broken: Style::new(),
            marker: Style::new(),
            quiet: Style::new(),
        }
    }

    /// Render `msg` the way the console shows a message of `level`.
    pub fn format(&self, level: LogLevel, msg: &str) -> String {
        match level {
            LogLevel::Info => msg.to_string(),
            LogLevel::Debug => self.quiet.apply_to(msg).to_string(),
            LogLevel::Progress => format!("{} {}", self.marker.apply_to("»"), msg),
            LogLevel::Success => self.ok.apply_to(format!("✓ {}", msg)).to_string(),
            LogLevel::Warn => self.attention.apply_to(format!("⚠ {}", msg)).to_string(),
            LogLevel::Error => self.broken.apply_to(format!("✗ {}", msg)).to_string(),
            LogLevel::Failure => self.broken.apply_to(msg).to_string(),
        }
    }
}

/// Whether console output should carry colors.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}
