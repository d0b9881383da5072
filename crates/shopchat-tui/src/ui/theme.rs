//! Theme and styling definitions for the shopchat TUI.

use ratatui::style::{Color, Modifier, Style};
use shopchat_engine::Tone;

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(30, 30, 40);
    pub const FG: Color = Color::Rgb(220, 220, 230);
    pub const DIM: Color = Color::Rgb(140, 140, 160);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(130, 170, 255);

    // Message bubbles
    pub const USER_BUBBLE_BG: Color = Color::Rgb(0, 123, 255);
    pub const USER_BUBBLE_FG: Color = Color::Rgb(255, 255, 255);
    pub const BOT_BUBBLE_BG: Color = Color::Rgb(241, 241, 241);
    pub const BOT_BUBBLE_FG: Color = Color::Rgb(0, 0, 0);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(45, 45, 60);
    pub const STATUS_KEY_BG: Color = Color::Rgb(70, 90, 140);

    // Border colors
    pub const BORDER: Color = Color::Rgb(80, 80, 100);
    pub const BORDER_ACTIVE: Color = Color::Rgb(130, 170, 255);
}

/// Status indicator symbols (with ASCII fallbacks).
pub struct Symbols;

impl Symbols {
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Message bubble for the given tone.
    pub fn bubble(tone: Tone) -> Style {
        match tone {
            Tone::Accent => Style::default()
                .fg(Palette::USER_BUBBLE_FG)
                .bg(Palette::USER_BUBBLE_BG),
            Tone::Neutral => Style::default()
                .fg(Palette::BOT_BUBBLE_FG)
                .bg(Palette::BOT_BUBBLE_BG),
        }
    }

    /// The submit button.
    pub fn button() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}

/// Spinner frame for the given tick.
pub fn spinner(tick: usize) -> &'static str {
    Symbols::SPINNER[tick % Symbols::SPINNER.len()]
}
