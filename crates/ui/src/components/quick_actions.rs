use crate::layout::button_row;
use crate::theme::Theme;

use folio_core::QuickAction;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Numbered buttons shown once the conversation has finished
pub struct QuickActions;

impl QuickActions {
    pub fn render(frame: &mut Frame<'_>, area: Rect) {
        for (action, slot) in QuickAction::ALL.iter().zip(button_row(area, QuickAction::ALL.len())) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Theme::ACCENT));
            let button = Paragraph::new(Self::label(*action)).alignment(Alignment::Center).block(block);
            frame.render_widget(button, slot);
        }
    }

    fn label(action: QuickAction) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{} ", action.number()), Theme::title()),
            Span::styled(action.label(), Style::default().fg(Theme::FG)),
        ])
    }
}
