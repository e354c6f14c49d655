//! Content panels: project list, article detail, skills and work history.
//!
//! Each panel shows a loading line while its slot is loading and the
//! dataset once it has arrived.

use crate::components::chips::chip_rows;
use crate::theme::Theme;

use folio_core::{Article, ArticleLink, PanelContent, PanelSlot};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::ops::Range;

pub const PROJECTS_TITLE: &str = "My Articles & Demos";
pub const SKILLS_TITLE: &str = "Skills";
pub const EXPERIENCE_TITLE: &str = "Work Experience";
pub const NO_CONTENT: &str = "No content available for this article yet.";

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(format!(" {title} "), Theme::title()))
}

fn render_loading(frame: &mut Frame<'_>, area: Rect, title: &str, what: &str) {
    let line = Line::from(Span::styled(format!("Loading {what}…"), Theme::muted()));
    frame.render_widget(Paragraph::new(line).block(panel_block(title)), area);
}

fn render_empty(frame: &mut Frame<'_>, area: Rect, title: &str) {
    let line = Line::from(Span::styled("Nothing here yet.", Theme::muted()));
    frame.render_widget(Paragraph::new(line).block(panel_block(title)), area);
}

fn wrap_into(text: &str, width: usize, style: Style, indent: &str, lines: &mut Vec<Line<'static>>) {
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(Line::default());
            continue;
        }
        for segment in textwrap::wrap(paragraph, width.saturating_sub(indent.len()).max(1)) {
            lines.push(Line::from(Span::styled(format!("{indent}{segment}"), style)));
        }
    }
}

/// Smallest scroll offset that keeps `range` on screen
fn scroll_to(range: &Range<usize>, height: usize) -> usize {
    range.end.saturating_sub(height)
}

/// Article and demo list with a cursor
pub struct ProjectsPanel<'a> {
    slot: &'a PanelSlot,
    cursor: usize,
}

impl<'a> ProjectsPanel<'a> {
    pub fn new(slot: &'a PanelSlot, cursor: usize) -> Self {
        Self { slot, cursor }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if self.slot.is_loading() {
            return render_loading(frame, area, PROJECTS_TITLE, "articles");
        }
        let Some(PanelContent::Projects(articles)) = self.slot.content() else {
            return render_empty(frame, area, PROJECTS_TITLE);
        };

        let block = panel_block(PROJECTS_TITLE);
        let inner = block.inner(area);
        let (lines, selected) = Self::lines(articles, self.cursor, inner.width as usize);
        let offset = scroll_to(&selected, inner.height as usize);

        let paragraph = Paragraph::new(lines).block(block).scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, area);
    }

    /// Lines for the list and the line range of the selected article
    pub fn lines(articles: &[Article], cursor: usize, width: usize) -> (Vec<Line<'static>>, Range<usize>) {
        let mut lines = Vec::new();
        let mut selected = 0..0;

        for (i, article) in articles.iter().enumerate() {
            let start = lines.len();
            let is_selected = i == cursor;
            let marker = if is_selected { "▸ " } else { "  " };
            let title_style = if is_selected {
                Theme::selected()
            } else {
                Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
            };

            let mut title = vec![Span::styled(marker, Style::default().fg(Theme::ACCENT)), Span::styled(article.title.clone(), title_style)];
            if article.is_external() {
                title.push(Span::styled(" ↗", Style::default().fg(Theme::ACCENT)));
            }
            lines.push(Line::from(title));

            wrap_into(&article.description, width, Style::default().fg(Theme::FG), "  ", &mut lines);
            lines.push(Line::from(Span::styled(format!("  {}", meta(article)), Theme::muted())));
            lines.push(Line::default());

            if is_selected {
                selected = start..lines.len();
            }
        }

        (lines, selected)
    }
}

fn meta(article: &Article) -> String {
    match &article.read_time {
        Some(read_time) => format!("{} · {}", article.date, read_time),
        None => article.date.clone(),
    }
}

/// A single internal article
///
/// Unknown ids and articles without a body render the same neutral view.
pub struct ArticleView<'a> {
    article: Option<&'a Article>,
}

impl<'a> ArticleView<'a> {
    pub fn new(article: Option<&'a Article>) -> Self {
        Self { article }
    }

    /// Render, clamping `scroll` to the content
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, scroll: &mut u16) {
        let title = self.article.map(|a| a.title.as_str()).unwrap_or("Article");
        let block = panel_block(title);
        let inner = block.inner(area);
        let lines = self.lines(inner.width as usize);

        let max = lines.len().saturating_sub(inner.height as usize);
        *scroll = (*scroll).min(u16::try_from(max).unwrap_or(u16::MAX));

        frame.render_widget(Paragraph::new(lines).block(block).scroll((*scroll, 0)), area);
    }

    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let body = match self.article.map(Article::link) {
            Some(ArticleLink::Internal(Some(body))) => body,
            _ => {
                lines.push(Line::from(Span::styled(NO_CONTENT, Theme::muted())));
                return lines;
            }
        };

        if let Some(article) = self.article {
            lines.push(Line::from(Span::styled(meta(article), Theme::muted())));
            lines.push(Line::default());
        }
        wrap_into(body, width, Style::default().fg(Theme::FG), "", &mut lines);
        lines
    }
}

/// Skill groups as chip rows
pub struct SkillsPanel<'a> {
    slot: &'a PanelSlot,
}

impl<'a> SkillsPanel<'a> {
    pub fn new(slot: &'a PanelSlot) -> Self {
        Self { slot }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if self.slot.is_loading() {
            return render_loading(frame, area, SKILLS_TITLE, "skills");
        }
        let Some(PanelContent::Skills(groups)) = self.slot.content() else {
            return render_empty(frame, area, SKILLS_TITLE);
        };

        let block = panel_block(SKILLS_TITLE);
        let width = block.inner(area).width as usize;
        let mut lines = Vec::new();
        for group in groups {
            lines.push(Line::from(Span::styled(
                group.name.clone(),
                Style::default().fg(Theme::ACCENT).add_modifier(Modifier::BOLD),
            )));
            lines.extend(chip_rows(&group.skills, width, 0));
            lines.push(Line::default());
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Work history entries
pub struct ExperiencePanel<'a> {
    slot: &'a PanelSlot,
}

impl<'a> ExperiencePanel<'a> {
    pub fn new(slot: &'a PanelSlot) -> Self {
        Self { slot }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        if self.slot.is_loading() {
            return render_loading(frame, area, EXPERIENCE_TITLE, "experience");
        }
        let Some(PanelContent::Experience(roles)) = self.slot.content() else {
            return render_empty(frame, area, EXPERIENCE_TITLE);
        };

        let block = panel_block(EXPERIENCE_TITLE);
        let width = block.inner(area).width as usize;
        let mut lines = Vec::new();
        for role in roles {
            let mut heading = vec![
                Span::styled(role.role.clone(), Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)),
                Span::styled(" @ ", Theme::muted()),
                Span::styled(role.company.clone(), Style::default().fg(Theme::ACCENT)),
            ];
            if let Some(period) = &role.period {
                heading.push(Span::styled(format!("  {period}"), Theme::muted()));
            }
            lines.push(Line::from(heading));
            wrap_into(&role.summary, width, Style::default().fg(Theme::FG), "  ", &mut lines);
            lines.push(Line::default());
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
