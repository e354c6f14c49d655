use ratatui::style::{Color, Modifier, Style};

/// Violet gradient theme for folio
///
/// The two accent stops (#667eea and #764ba2) frame the chat the way the
/// gradient header does on the web version; everything else is a dark
/// neutral so bubbles stand out.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background
    pub const BG: Color = Color::Rgb(20, 21, 31);

    /// Foreground: primary text
    pub const FG: Color = Color::Rgb(226, 228, 240);

    /// Persona bubbles and panel cards
    pub const PANEL_BG: Color = Color::Rgb(36, 38, 56);

    /// Gradient start: visitor bubbles, focused items
    pub const ACCENT: Color = Color::Rgb(102, 126, 234);

    /// Gradient end: titles, avatar
    pub const ACCENT_DEEP: Color = Color::Rgb(118, 75, 162);

    /// Skill chips
    pub const CHIP_BG: Color = Color::Rgb(52, 46, 86);

    /// Availability dot
    pub const GREEN: Color = Color::Rgb(72, 199, 142);

    /// Notices
    pub const YELLOW: Color = Color::Rgb(240, 196, 110);

    /// Secondary text
    pub const MUTED: Color = Color::Rgb(122, 126, 150);

    pub const BORDER: Color = Color::Rgb(64, 66, 96);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Panel and block titles
    pub fn title() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn persona_bubble() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    pub fn visitor_bubble() -> Style {
        Style::default().fg(Color::White).bg(Self::ACCENT)
    }

    pub fn chip() -> Style {
        Style::default().fg(Self::FG).bg(Self::CHIP_BG)
    }

    /// Selected list row
    pub fn selected() -> Style {
        Style::default().fg(Color::White).bg(Self::ACCENT_DEEP).add_modifier(Modifier::BOLD)
    }

    pub fn notice() -> Style {
        Style::default().fg(Self::YELLOW)
    }

    /// The inert contact field
    pub fn disabled_input() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::PANEL_BG)
    }
}
