//! Colours and text styling shared by the CLI output and the TUI.

use colored::Colorize;

// ── CLI helpers ─────────────────────────────────────────────────────────────

pub fn heading(text: &str) -> String {
    text.bold().cyan().to_string()
}

pub fn accent(text: &str) -> String {
    text.cyan().to_string()
}

pub fn accent_bright(text: &str) -> String {
    text.bright_cyan().bold().to_string()
}

pub fn muted(text: &str) -> String {
    text.bright_black().to_string()
}

pub fn icon_ok(text: &str) -> String {
    format!("{} {}", "✓".green(), text)
}

pub fn print_header(title: &str) {
    let rule = "─".repeat(title.chars().count() + 4);
    println!("{}", muted(&rule));
    println!("  {}", heading(title));
    println!("{}", muted(&rule));
}

// ── TUI palette ─────────────────────────────────────────────────────────────

#[cfg(feature = "tui")]
pub mod tui_palette {
    use ratatui::style::{Color, Modifier, Style};

    pub const ACCENT: Color = Color::Cyan;
    pub const ACCENT_BRIGHT: Color = Color::LightCyan;
    pub const SUCCESS: Color = Color::LightGreen;
    pub const WARN: Color = Color::Yellow;
    pub const ERROR: Color = Color::LightRed;
    pub const MUTED: Color = Color::DarkGray;
    pub const TEXT: Color = Color::White;
    pub const TEXT_DIM: Color = Color::Gray;

    pub fn border_focused() -> Style {
        Style::default().fg(SUCCESS)
    }

    pub fn title_focused() -> Style {
        Style::default().fg(ACCENT_BRIGHT).add_modifier(Modifier::BOLD)
    }

    pub fn title_unfocused() -> Style {
        Style::default().fg(TEXT_DIM)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    }
}
