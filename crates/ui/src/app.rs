use crate::event_handler::{EventHandler, KeyAction};
use crate::state::UiState;

use crossterm::event::Event;
use folio_core::{NavOutcome, Session, SessionEvent, View};
use ratatui::Frame;
use std::io::Result;

mod event_loop;
mod rendering;

/// Main TUI application
///
/// Owns the session for the lifetime of the view and maps key actions onto
/// session operations.
pub struct App {
    pub(crate) session: Session,
    pub(crate) state: UiState,
    pub(crate) should_exit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self { session, state: UiState::new(), should_exit: false }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Run the interactive view until the visitor quits
    pub async fn run(&mut self) -> Result<()> {
        event_loop::run(self).await
    }

    /// Draw everything into `frame`
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        rendering::render(self, frame);
    }

    /// Handle a terminal event. Returns whether a redraw is needed.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => {
                let had_notice = self.state.notice.is_some();
                match EventHandler::handle_key_event(key, &mut self.state) {
                    Some(action) => {
                        self.handle_key_action(action);
                        true
                    }
                    None => had_notice != self.state.notice.is_some(),
                }
            }
            Event::Resize(..) => true,
            _ => false,
        }
    }

    pub fn handle_key_action(&mut self, action: KeyAction) {
        self.state.clear_notice();
        let view = self.session.view().clone();

        match action {
            KeyAction::Exit => self.should_exit = true,
            KeyAction::QuickAction(action) => match self.session.select_action(action) {
                NavOutcome::Locked => self.state.show_notice("Quick actions unlock when the conversation finishes"),
                NavOutcome::Entered(panel) => tracing::debug!(panel = panel.as_str(), "quick action"),
                _ => {}
            },
            KeyAction::Up => match view {
                View::Conversation => self.state.conversation_scroll.up(),
                View::ProjectList => {
                    self.session.cursor_up();
                }
                View::ArticleDetail(_) => self.state.detail_scroll = self.state.detail_scroll.saturating_sub(1),
                View::Skills | View::Experience => {}
            },
            KeyAction::Down => match view {
                View::Conversation => self.state.conversation_scroll.down(),
                View::ProjectList => {
                    self.session.cursor_down();
                }
                View::ArticleDetail(_) => self.state.detail_scroll = self.state.detail_scroll.saturating_add(1),
                View::Skills | View::Experience => {}
            },
            KeyAction::Open => match self.session.open_selected() {
                NavOutcome::OpenExternal(url) => self.state.show_notice(format!("Opens in your browser: {url}")),
                NavOutcome::Moved => self.state.detail_scroll = 0,
                _ => {}
            },
            KeyAction::Back => {
                self.session.back();
            }
            KeyAction::FollowLatest => {
                if view == View::Conversation {
                    self.state.conversation_scroll.follow();
                }
            }
        }
    }

    /// Commit a timer event. Returns whether anything changed.
    pub fn handle_session_event(&mut self, event: SessionEvent) -> bool {
        self.session.apply(event)
    }

    /// Advance the typing animation. Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        if self.session.reveal().is_typing() {
            self.state.advance_animation_frame();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use folio_core::{Config, PanelId, Portfolio, QuickAction, RevealEvent, Timeline};

    fn app() -> App {
        App::new(Session::new(Portfolio::builtin().unwrap(), &Config::default()))
    }

    fn reveal_all(app: &mut App) {
        let script = app.session().portfolio().script.clone();
        let timeline = Timeline::plan(&script, &Config::default().timing);
        let events: Vec<RevealEvent> = timeline.steps().iter().filter_map(|s| s.event(&script)).collect();
        for event in events {
            app.handle_session_event(SessionEvent::Reveal(event));
        }
    }

    async fn finish_panel_load(app: &mut App) {
        let event = app.session_mut().next_event().await;
        app.handle_session_event(event);
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_locked_quick_action_shows_notice() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.session().view(), &View::Conversation);
        assert!(app.state().notice.is_some());

        press(&mut app, KeyCode::Down);
        assert!(app.state().notice.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_action_opens_panel() {
        let mut app = app();
        reveal_all(&mut app);
        assert!(app.session().reveal().actions_unlocked());

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.session().view(), &View::Skills);
        assert!(app.session().panel(PanelId::Skills).is_loading());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session().view(), &View::Conversation);
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_article_shows_url() {
        let mut app = app();
        reveal_all(&mut app);
        press(&mut app, KeyCode::Char('1'));
        finish_panel_load(&mut app).await;
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session().view(), &View::ProjectList);
        let notice = app.state().notice.as_ref().unwrap();
        assert!(notice.text.contains("https://codepen.io/"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_internal_article_opens_detail() {
        let mut app = app();
        reveal_all(&mut app);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().view(), &View::ProjectList);

        finish_panel_load(&mut app).await;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().view(), &View::ArticleDetail("universal-components".into()));

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session().view(), &View::ProjectList);
    }

    #[test]
    fn test_conversation_scroll_and_follow() {
        let mut app = app();
        app.state.conversation_scroll.set_max(20);
        press(&mut app, KeyCode::Up);
        assert!(!app.state().conversation_scroll.is_following());
        press(&mut app, KeyCode::End);
        assert!(app.state().conversation_scroll.is_following());
    }

    #[test]
    fn test_tick_animates_only_while_typing() {
        let mut app = app();
        assert!(!app.tick());

        let first = app.session().portfolio().script.entries()[0].clone();
        app.handle_session_event(SessionEvent::Reveal(RevealEvent::Revealed { index: 0, entry: first }));
        app.handle_session_event(SessionEvent::Reveal(RevealEvent::TypingStarted { index: 1 }));
        assert!(app.tick());
        assert_eq!(app.state().animation_frame, 1);
    }

    #[test]
    fn test_resize_requests_redraw() {
        let mut app = app();
        assert!(app.handle_event(Event::Resize(80, 24)));
        assert!(!app.handle_event(Event::FocusGained));
    }

    #[test]
    fn test_actions_ignored_without_unlock() {
        let mut app = app();
        app.handle_key_action(KeyAction::QuickAction(QuickAction::Experience));
        assert_eq!(app.session().view(), &View::Conversation);
    }
}
