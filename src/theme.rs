//! Theme configuration for TUI and CLI
//!
//! Centralizes all color and style definitions for easy customization.
//! Provides both ratatui styles (for the player) and ANSI escape codes (for CLI).

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: Color,
    /// Secondary/dimmed text color
    pub text_secondary: Color,
    /// Accent color for highlights, keys and the progress bar
    pub accent: Color,
    /// Citation pill background
    pub citation: Color,
    /// User message color
    pub user: Color,
    /// Error/warning color
    pub error: Color,
    /// Success color (completed steps)
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::chatreel()
    }
}

impl Theme {
    /// Names accepted by [`Theme::by_name`].
    pub const NAMES: [&'static str; 3] = ["default", "classic", "ocean"];

    /// Default theme - light gray text with a green accent.
    pub fn chatreel() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Green,
            citation: Color::Blue,
            user: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Classic terminal theme - white text.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: Color::Yellow,
            citation: Color::Magenta,
            user: Color::LightYellow,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Cyan/blue theme.
    pub fn ocean() -> Self {
        Self {
            text_primary: Color::Cyan,
            text_secondary: Color::DarkGray,
            accent: Color::LightCyan,
            citation: Color::Blue,
            user: Color::White,
            error: Color::Red,
            success: Color::LightGreen,
        }
    }

    /// Look up a theme by config name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "chatreel" => Some(Self::chatreel()),
            "classic" => Some(Self::classic()),
            "ocean" => Some(Self::ocean()),
            _ => None,
        }
    }

    // Style helpers

    /// Style for primary text content.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for secondary/dimmed text.
    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for accented/highlighted text.
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for bold accented text (keybindings, headings).
    pub fn accent_bold_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for an inline citation pill.
    pub fn citation_style(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.citation)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the user's message.
    pub fn user_style(&self) -> Style {
        Style::default().fg(self.user).add_modifier(Modifier::BOLD)
    }

    /// Style for error text.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for success text.
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    // ANSI color helpers for CLI output

    /// Format text with the accent color (for CLI output).
    pub fn accent_text(&self, text: &str) -> String {
        paint(self.accent, text)
    }

    /// Format text with the primary color (for CLI output).
    pub fn primary_text(&self, text: &str) -> String {
        paint(self.text_primary, text)
    }

    /// Format text with the secondary color (for CLI output).
    pub fn secondary_text(&self, text: &str) -> String {
        paint(self.text_secondary, text)
    }

    /// Format text with the error color (for CLI output).
    pub fn error_text(&self, text: &str) -> String {
        paint(self.error, text)
    }

    /// Format text with the success color (for CLI output).
    pub fn success_text(&self, text: &str) -> String {
        paint(self.success, text)
    }
}

/// ANSI reset sequence.
const RESET: &str = "\x1b[0m";

/// True unless `NO_COLOR` is set (https://no-color.org).
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty())
}

fn paint(color: Color, text: &str) -> String {
    if colors_enabled() {
        format!("{}{}{}", color_to_ansi(color), text, RESET)
    } else {
        text.to_string()
    }
}

/// Convert a ratatui Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightRed => "\x1b[91m",
        Color::LightGreen => "\x1b[92m",
        Color::LightYellow => "\x1b[93m",
        Color::LightBlue => "\x1b[94m",
        Color::LightMagenta => "\x1b[95m",
        Color::LightCyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // For RGB and indexed colors, fall back to reset (no color)
        _ => "",
    }
}
