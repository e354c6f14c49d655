use crate::theme::Theme;

use folio_core::Persona;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Persona header: avatar initial, availability dot, name and title line
pub struct Header<'a> {
    persona: &'a Persona,
}

impl<'a> Header<'a> {
    pub fn new(persona: &'a Persona) -> Self {
        Self { persona }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::BOTTOM).border_style(Theme::border());
        let paragraph = Paragraph::new(self.lines()).block(block);
        frame.render_widget(paragraph, area);
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let avatar = Style::default()
            .fg(ratatui::style::Color::White)
            .bg(Theme::ACCENT_DEEP)
            .add_modifier(Modifier::BOLD);

        vec![
            Line::from(vec![
                Span::styled(format!(" {} ", self.avatar_initial()), avatar),
                Span::styled("●", Style::default().fg(Theme::GREEN)),
                Span::raw(" "),
                Span::styled(self.persona.name.clone(), Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![Span::raw("    "), Span::styled(self.persona.subtitle(), Theme::muted())]),
        ]
    }

    /// Configured initial, or the first letter of the name
    fn avatar_initial(&self) -> String {
        let initial = self.persona.initial.trim();
        if !initial.is_empty() {
            return initial.to_string();
        }
        self.persona.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona() -> Persona {
        Persona {
            name: "Carl Mensah".into(),
            initial: "C".into(),
            title: "Frontend Developer".into(),
            status: "Available".into(),
            contact: "Email Carl".into(),
        }
    }

    #[test]
    fn test_header_lines() {
        let persona = persona();
        let lines = Header::new(&persona).lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), " C ● Carl Mensah");
        assert_eq!(lines[1].to_string(), "    Frontend Developer • Available");
    }

    #[test]
    fn test_avatar_falls_back_to_name() {
        let mut persona = persona();
        persona.initial = " ".into();
        persona.name = "ada".into();
        assert_eq!(Header::new(&persona).avatar_initial(), "A");
    }
}
