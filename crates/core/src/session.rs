//! The session root.
//!
//! A [`Session`] is one run of the interactive view. It is the only writer of
//! reveal, navigation and panel state; timer tasks report back over channels
//! and the owner applies their events here. Tearing the session down cancels
//! every pending timer and drops the receivers, so nothing can mutate state
//! afterwards.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, TimingConfig};
use crate::content::Portfolio;
use crate::loader::{PanelContent, PanelEvent, PanelId, PanelLoader, PanelSlot, PanelSlots};
use crate::navigation::{NavOutcome, Navigator, QuickAction, View};
use crate::reveal::{RevealEvent, RevealState};
use crate::sequencer::RevealSequencer;

/// Anything a timer task can report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Reveal(RevealEvent),
    Panel(PanelEvent),
}

enum Closed {
    Reveal,
    Panel,
}

#[derive(Debug)]
pub struct Session {
    portfolio: Portfolio,
    timing: TimingConfig,
    reveal: RevealState,
    navigator: Navigator,
    panels: PanelSlots,
    loader: PanelLoader,
    token: CancellationToken,
    reveal_rx: Option<mpsc::UnboundedReceiver<RevealEvent>>,
    panel_rx: Option<mpsc::UnboundedReceiver<PanelEvent>>,
    started: bool,
    torn_down: bool,
}

impl Session {
    pub fn new(portfolio: Portfolio, config: &Config) -> Self {
        let token = CancellationToken::new();
        let (loader, panel_rx) = PanelLoader::new(&config.timing, config.panels.load_policy, token.child_token());
        Self {
            reveal: RevealState::new(portfolio.script.len()),
            portfolio,
            timing: config.timing,
            navigator: Navigator::new(),
            panels: PanelSlots::new(),
            loader,
            token,
            reveal_rx: None,
            panel_rx: Some(panel_rx),
            started: false,
            torn_down: false,
        }
    }

    /// Start revealing the script. Later calls do nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.started || self.torn_down {
            return;
        }
        self.started = true;

        tracing::info!(
            persona = %self.portfolio.persona.name,
            entries = self.portfolio.script.len(),
            load_policy = %self.loader.policy(),
            "session started"
        );
        let sequencer = RevealSequencer::new(self.portfolio.script.clone(), &self.timing);
        self.reveal_rx = Some(sequencer.start(self.token.child_token()));
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    pub fn view(&self) -> &View {
        self.navigator.view()
    }

    /// Project list cursor
    pub fn cursor(&self) -> usize {
        self.navigator.cursor()
    }

    pub fn panel(&self, panel: PanelId) -> &PanelSlot {
        self.panels.get(panel)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Commit one event. Returns whether state changed.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        if self.torn_down {
            return false;
        }
        match event {
            SessionEvent::Reveal(event) => self.reveal.apply(event),
            SessionEvent::Panel(event) => {
                let content = PanelContent::from_portfolio(event.panel, &self.portfolio);
                let changed = self.panels.complete(event, content);
                if changed {
                    tracing::debug!(panel = event.panel.as_str(), "panel loaded");
                }
                changed
            }
        }
    }

    /// Apply every event that is already queued, without waiting
    pub fn pump(&mut self) -> usize {
        let mut events = Vec::new();

        if let Some(rx) = self.reveal_rx.as_mut() {
            loop {
                match rx.try_recv() {
                    Ok(event) => events.push(SessionEvent::Reveal(event)),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.reveal_rx = None;
                        break;
                    }
                }
            }
        }
        if let Some(rx) = self.panel_rx.as_mut() {
            while let Ok(event) = rx.try_recv() {
                events.push(SessionEvent::Panel(event));
            }
        }

        let mut changed = 0;
        for event in events {
            if self.apply(event) {
                changed += 1;
            }
        }
        changed
    }

    /// Wait for the next timer event.
    ///
    /// Never resolves once the session is torn down; callers select on it
    /// alongside their own inputs.
    pub async fn next_event(&mut self) -> SessionEvent {
        loop {
            let received = tokio::select! {
                event = recv_opt(&mut self.reveal_rx) => event.map(SessionEvent::Reveal).ok_or(Closed::Reveal),
                event = recv_opt(&mut self.panel_rx) => event.map(SessionEvent::Panel).ok_or(Closed::Panel),
            };
            match received {
                Ok(event) => return event,
                Err(Closed::Reveal) => self.reveal_rx = None,
                Err(Closed::Panel) => self.panel_rx = None,
            }
        }
    }

    pub fn select_action(&mut self, action: QuickAction) -> NavOutcome {
        if self.torn_down {
            return NavOutcome::Unchanged;
        }
        let outcome = self.navigator.select_action(action, self.reveal.actions_unlocked());
        if let NavOutcome::Entered(panel) = outcome {
            self.loader.enter_panel(panel, &mut self.panels);
        }
        outcome
    }

    /// Open the article under the project list cursor
    pub fn open_selected(&mut self) -> NavOutcome {
        if self.torn_down || self.projects_loading() {
            return NavOutcome::Unchanged;
        }
        self.navigator.open_selected(&self.portfolio)
    }

    pub fn open_article(&mut self, id: &str) -> NavOutcome {
        if self.torn_down {
            return NavOutcome::Unchanged;
        }
        self.navigator.open_article(&self.portfolio, id)
    }

    pub fn back(&mut self) -> NavOutcome {
        if self.torn_down {
            return NavOutcome::Unchanged;
        }
        self.navigator.back()
    }

    pub fn cursor_up(&mut self) -> NavOutcome {
        if !self.can_move_cursor() {
            return NavOutcome::Unchanged;
        }
        self.navigator.cursor_up(self.portfolio.articles.len());
        NavOutcome::Moved
    }

    pub fn cursor_down(&mut self) -> NavOutcome {
        if !self.can_move_cursor() {
            return NavOutcome::Unchanged;
        }
        self.navigator.cursor_down(self.portfolio.articles.len());
        NavOutcome::Moved
    }

    /// The list is hidden behind the loading line until its content lands
    fn projects_loading(&self) -> bool {
        self.panels.get(PanelId::Projects).is_loading()
    }

    fn can_move_cursor(&self) -> bool {
        !self.torn_down && self.navigator.view() == &View::ProjectList && !self.projects_loading()
    }

    /// Cancel all pending timers and stop accepting events. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.token.cancel();
        self.loader.cancel_all();
        self.reveal_rx = None;
        self.panel_rx = None;
        tracing::info!(visible = self.reveal.visible().len(), view = self.view().as_str(), "session ended");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn recv_opt<T>(rx: &mut Option<mpsc::UnboundedReceiver<T>>) -> Option<T> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
