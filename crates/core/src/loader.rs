//! Simulated content loading for the data-bearing panels.
//!
//! Content is static, so "loading" is only a delay: entering a panel marks
//! its slot as loading, and a timer later fills the slot with a copy of the
//! dataset.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::{LoadPolicy, TimingConfig};
use crate::content::{Article, Portfolio, Role, SkillGroup};

/// Panels that need content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Projects,
    Skills,
    Experience,
}

impl PanelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelId::Projects => "projects",
            PanelId::Skills => "skills",
            PanelId::Experience => "experience",
        }
    }

    fn slot(&self) -> usize {
        match self {
            PanelId::Projects => 0,
            PanelId::Skills => 1,
            PanelId::Experience => 2,
        }
    }
}

/// A panel's dataset, copied out of the portfolio
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Projects(Vec<Article>),
    Skills(Vec<SkillGroup>),
    Experience(Vec<Role>),
}

impl PanelContent {
    pub fn from_portfolio(panel: PanelId, portfolio: &Portfolio) -> Self {
        match panel {
            PanelId::Projects => Self::Projects(portfolio.articles.clone()),
            PanelId::Skills => Self::Skills(portfolio.skills.clone()),
            PanelId::Experience => Self::Experience(portfolio.experience.clone()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Projects(items) => items.len(),
            Self::Skills(items) => items.len(),
            Self::Experience(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A finished load; `generation` identifies which entry started it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEvent {
    pub panel: PanelId,
    pub generation: u64,
}

/// Loading flag and content slot for one panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSlot {
    loading: bool,
    content: Option<PanelContent>,
    generation: u64,
}

impl PanelSlot {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn content(&self) -> Option<&PanelContent> {
        self.content.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.content.is_some()
    }
}

/// Slots for every panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSlots {
    slots: [PanelSlot; 3],
}

impl PanelSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, panel: PanelId) -> &PanelSlot {
        &self.slots[panel.slot()]
    }

    fn begin(&mut self, panel: PanelId, generation: u64) {
        let slot = &mut self.slots[panel.slot()];
        slot.loading = true;
        slot.generation = generation;
    }

    /// Fill a slot. Stale events (superseded by a later entry) are ignored.
    pub fn complete(&mut self, event: PanelEvent, content: PanelContent) -> bool {
        let slot = &mut self.slots[event.panel.slot()];
        if !slot.loading || slot.generation != event.generation {
            tracing::debug!(panel = event.panel.as_str(), generation = event.generation, "ignoring stale panel load");
            return false;
        }
        slot.loading = false;
        slot.content = Some(content);
        true
    }
}

/// Starts delayed loads and cancels the ones still pending
#[derive(Debug)]
pub struct PanelLoader {
    delay: Duration,
    policy: LoadPolicy,
    token: CancellationToken,
    pending: [Option<CancellationToken>; 3],
    generation: u64,
    tx: mpsc::UnboundedSender<PanelEvent>,
}

impl PanelLoader {
    /// Create a loader whose timers die with `token`
    pub fn new(
        timing: &TimingConfig, policy: LoadPolicy, token: CancellationToken,
    ) -> (Self, mpsc::UnboundedReceiver<PanelEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = Self {
            delay: timing.panel_load(),
            policy,
            token,
            pending: Default::default(),
            generation: 0,
            tx,
        };
        (loader, rx)
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Mark `panel` as loading and schedule its content.
    ///
    /// Returns false when nothing was scheduled: the session is over, or the
    /// policy is [`LoadPolicy::Once`] and the panel already has content.
    pub fn enter_panel(&mut self, panel: PanelId, slots: &mut PanelSlots) -> bool {
        if self.token.is_cancelled() {
            return false;
        }

        if self.policy == LoadPolicy::Once && slots.get(panel).is_loaded() {
            tracing::debug!(panel = panel.as_str(), "panel already loaded");
            return false;
        }

        if let Some(previous) = self.pending[panel.slot()].take() {
            previous.cancel();
        }

        self.generation += 1;
        let event = PanelEvent { panel, generation: self.generation };
        slots.begin(panel, event.generation);

        let token = self.token.child_token();
        self.pending[panel.slot()] = Some(token.clone());
        let tx = self.tx.clone();
        let delay = self.delay;

        tracing::debug!(panel = panel.as_str(), delay_ms = delay.as_millis() as u64, "loading panel");
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if !token.is_cancelled() {
                        let _ = tx.send(event);
                    }
                }
            }
        });

        true
    }

    /// Cancel every pending load
    pub fn cancel_all(&mut self) {
        for pending in self.pending.iter_mut().filter_map(Option::take) {
            pending.cancel();
        }
    }
}
