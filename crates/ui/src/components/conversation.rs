use crate::components::chips::chip_rows;
use crate::state::ScrollState;
use crate::theme::Theme;

use folio_core::{EntryBody, Persona, RevealState, ScriptEntry, Speaker};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

/// The chat transcript: revealed entries as bubbles plus the typing indicator
///
/// Persona bubbles sit on the left, visitor bubbles on the right. A name
/// label starts every run of messages from the same speaker.
pub struct Conversation<'a> {
    reveal: &'a RevealState,
    persona: &'a Persona,
    typing_frame: &'a str,
}

impl<'a> Conversation<'a> {
    pub fn new(reveal: &'a RevealState, persona: &'a Persona, typing_frame: &'a str) -> Self {
        Self { reveal, persona, typing_frame }
    }

    /// Render, following the bottom unless `scroll` holds a position
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, scroll: &mut ScrollState) {
        let lines = self.lines(area.width);
        scroll.set_max(lines.len().saturating_sub(area.height as usize));
        let offset = u16::try_from(scroll.offset()).unwrap_or(u16::MAX);

        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
    }

    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = width as usize;
        let bubble_width = (width * 3 / 4).max(12).min(width);
        let mut lines = Vec::new();
        let mut previous: Option<Speaker> = None;

        for entry in self.reveal.visible() {
            lines.push(Line::default());
            if previous != Some(entry.speaker) {
                lines.push(self.label(entry.speaker));
            }
            self.push_entry(entry, bubble_width, &mut lines);
            previous = Some(entry.speaker);
        }

        if self.reveal.is_typing() {
            lines.push(Line::default());
            if previous != Some(Speaker::Persona) {
                lines.push(self.label(Speaker::Persona));
            }
            lines.push(Line::from(Span::styled(format!(" {} ", self.typing_frame), Theme::persona_bubble())));
        }

        lines
    }

    fn label(&self, speaker: Speaker) -> Line<'static> {
        match speaker {
            Speaker::Persona => {
                let name = self.persona.name.split_whitespace().next().unwrap_or_default().to_string();
                Line::from(Span::styled(name, Style::default().fg(Theme::ACCENT).add_modifier(Modifier::BOLD)))
            }
            Speaker::Visitor => Line::from(Span::styled("You", Theme::muted())).right_aligned(),
        }
    }

    fn push_entry(&self, entry: &ScriptEntry, bubble_width: usize, lines: &mut Vec<Line<'static>>) {
        match &entry.body {
            EntryBody::Text { text } => push_bubble(text, entry.speaker, bubble_width, lines),
            EntryBody::SkillBubble { caption, skills } => {
                if !caption.trim().is_empty() {
                    push_bubble(caption, entry.speaker, bubble_width, lines);
                }
                for row in chip_rows(skills, bubble_width, 0) {
                    lines.push(align(row, entry.speaker));
                }
            }
        }
    }
}

fn push_bubble(text: &str, speaker: Speaker, bubble_width: usize, lines: &mut Vec<Line<'static>>) {
    let style = match speaker {
        Speaker::Persona => Theme::persona_bubble(),
        Speaker::Visitor => Theme::visitor_bubble(),
    };
    let wrapped = textwrap::wrap(text, bubble_width.saturating_sub(2).max(1));
    let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);

    for segment in wrapped {
        let pad = " ".repeat(inner.saturating_sub(segment.width()));
        let line = Line::from(Span::styled(format!(" {segment}{pad} "), style));
        lines.push(align(line, speaker));
    }
}

fn align(line: Line<'static>, speaker: Speaker) -> Line<'static> {
    match speaker {
        Speaker::Persona => line,
        Speaker::Visitor => line.right_aligned(),
    }
}
