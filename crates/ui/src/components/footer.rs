use crate::state::Notice;
use crate::theme::Theme;

use folio_core::{Persona, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub const SEND_GLYPH: &str = "➤";

/// The contact field. It never takes input.
pub struct InputBar<'a> {
    persona: &'a Persona,
}

impl<'a> InputBar<'a> {
    pub fn new(persona: &'a Persona) -> Self {
        Self { persona }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .style(Theme::disabled_input());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let placeholder = Paragraph::new(Line::from(Span::styled(format!(" {}", self.persona.contact), Theme::muted())));
        frame.render_widget(placeholder, chunks[0]);

        let send = Paragraph::new(Line::from(Span::styled(SEND_GLYPH, Style::default().fg(Theme::ACCENT))));
        frame.render_widget(send, chunks[1]);
    }
}

/// One line under the input: the current notice, or key hints for the view
pub struct Footer<'a> {
    notice: Option<&'a Notice>,
    view: &'a View,
    unlocked: bool,
}

impl<'a> Footer<'a> {
    pub fn new(notice: Option<&'a Notice>, view: &'a View, unlocked: bool) -> Self {
        Self { notice, view, unlocked }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let line = match self.notice {
            Some(notice) => Line::from(Span::styled(notice.text.clone(), Theme::notice())),
            None => Line::from(Span::styled(self.hints(), Theme::muted())),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn hints(&self) -> &'static str {
        match self.view {
            View::Conversation if self.unlocked => "1-3 open · ↑↓ scroll · End latest · q quit",
            View::Conversation => "↑↓ scroll · End latest · q quit",
            View::ProjectList => "↑↓ select · Enter open · Esc back · q quit",
            View::ArticleDetail(_) => "↑↓ scroll · Esc back · q quit",
            View::Skills | View::Experience => "Esc back · q quit",
        }
    }
}
