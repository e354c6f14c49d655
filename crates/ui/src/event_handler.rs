use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use folio_core::QuickAction;
use std::io::Result;
use std::time::Duration;

use crate::state::UiState;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    QuickAction(QuickAction),
    /// Cursor or scroll up, depending on the view
    Up,
    Down,
    /// Open the selected article
    Open,
    Back,
    /// Jump to the newest message and keep following
    FollowLatest,
    Exit,
}

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read one terminal event if one is ready
    pub fn read() -> Result<Option<Event>> {
        match crossterm::event::poll(Duration::ZERO) {
            Ok(true) => Ok(Some(crossterm::event::read()?)),
            _ => Ok(None),
        }
    }

    pub fn handle_key_event(event: KeyEvent, state: &mut UiState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            if state.exit.record_ctrl_c() {
                return Some(KeyAction::Exit);
            }
            state.show_notice("Press Ctrl+C again to exit");
            return None;
        }
        state.exit.reset();

        match event.code {
            KeyCode::Char('q') => Some(KeyAction::Exit),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .and_then(|n| QuickAction::from_number(n as usize))
                .map(KeyAction::QuickAction),
            KeyCode::Up | KeyCode::Char('k') => Some(KeyAction::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(KeyAction::Down),
            KeyCode::Enter | KeyCode::Char('l') => Some(KeyAction::Open),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => Some(KeyAction::Back),
            KeyCode::End | KeyCode::Char('G') => Some(KeyAction::FollowLatest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_c() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_quick_action_keys() {
        let mut state = UiState::new();
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('1')), &mut state),
            Some(KeyAction::QuickAction(QuickAction::Projects))
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('3')), &mut state),
            Some(KeyAction::QuickAction(QuickAction::Experience))
        );
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Char('4')), &mut state), None);
    }

    #[test]
    fn test_navigation_keys() {
        let mut state = UiState::new();
        let cases = [
            (KeyCode::Up, KeyAction::Up),
            (KeyCode::Char('k'), KeyAction::Up),
            (KeyCode::Down, KeyAction::Down),
            (KeyCode::Char('j'), KeyAction::Down),
            (KeyCode::Enter, KeyAction::Open),
            (KeyCode::Esc, KeyAction::Back),
            (KeyCode::Backspace, KeyAction::Back),
            (KeyCode::Char('h'), KeyAction::Back),
            (KeyCode::End, KeyAction::FollowLatest),
            (KeyCode::Char('q'), KeyAction::Exit),
        ];
        for (code, expected) in cases {
            assert_eq!(EventHandler::handle_key_event(key(code), &mut state), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn test_double_ctrl_c_exits() {
        let mut state = UiState::new();
        assert_eq!(EventHandler::handle_key_event(ctrl_c(), &mut state), None);
        assert!(state.notice.is_some());
        assert_eq!(EventHandler::handle_key_event(ctrl_c(), &mut state), Some(KeyAction::Exit));
    }

    #[test]
    fn test_other_key_resets_ctrl_c() {
        let mut state = UiState::new();
        EventHandler::handle_key_event(ctrl_c(), &mut state);
        EventHandler::handle_key_event(key(KeyCode::Down), &mut state);
        assert_eq!(EventHandler::handle_key_event(ctrl_c(), &mut state), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut state = UiState::new();
        let mut event = key(KeyCode::Char('q'));
        event.kind = KeyEventKind::Release;
        assert_eq!(EventHandler::handle_key_event(event, &mut state), None);
    }
}
