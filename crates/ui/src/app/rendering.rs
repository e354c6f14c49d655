use super::App;
use crate::components::{
    ArticleView, Conversation, ExperiencePanel, Footer, Header, InputBar, ProjectsPanel, QuickActions, SkillsPanel,
};
use crate::layout::TuiLayout;
use crate::theme::Theme;

use folio_core::{PanelId, View};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect, widgets::Block};
use std::io::Result;

pub fn draw(app: &mut App, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    terminal.draw(|frame| render(app, frame))?;
    Ok(())
}

pub fn render(app: &mut App, frame: &mut Frame<'_>) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Theme::base()), area);

    let session = &app.session;
    let view = session.view();
    let persona = &session.portfolio().persona;
    let unlocked = session.reveal().actions_unlocked();
    let layout = TuiLayout::calculate(area, *view == View::Conversation && unlocked);

    Header::new(persona).render(frame, layout.header);

    let body = inset(layout.body, 1);
    match view {
        View::Conversation => {
            Conversation::new(session.reveal(), persona, app.state.typing_frame()).render(
                frame,
                body,
                &mut app.state.conversation_scroll,
            );
        }
        View::ProjectList => ProjectsPanel::new(session.panel(PanelId::Projects), session.cursor()).render(frame, body),
        View::ArticleDetail(id) => {
            ArticleView::new(session.portfolio().article(id)).render(frame, body, &mut app.state.detail_scroll);
        }
        View::Skills => SkillsPanel::new(session.panel(PanelId::Skills)).render(frame, body),
        View::Experience => ExperiencePanel::new(session.panel(PanelId::Experience)).render(frame, body),
    }

    if let Some(actions) = layout.quick_actions {
        QuickActions::render(frame, actions);
    }
    InputBar::new(persona).render(frame, layout.input);
    Footer::new(app.state.notice.as_ref(), view, unlocked).render(frame, inset(layout.footer, 1));
}

fn inset(area: Rect, horizontal: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(horizontal),
        width: area.width.saturating_sub(horizontal * 2),
        ..area
    }
}
