//! Reveal state: what the conversation view currently shows.

use crate::script::ScriptEntry;

/// A single mutation produced by the sequencer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// The persona starts "typing" entry `index`
    TypingStarted { index: usize },
    /// Entry `index` becomes visible
    Revealed { index: usize, entry: ScriptEntry },
    /// The whole script is visible and the grace delay has passed
    ActionsUnlocked,
}

/// Visible messages plus the two derived flags
///
/// `visible` is append-only. Events that would skip, repeat or reorder an
/// entry are dropped, so the list always equals a prefix of the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    visible: Vec<ScriptEntry>,
    typing: bool,
    actions_unlocked: bool,
    script_len: usize,
}

impl RevealState {
    pub fn new(script_len: usize) -> Self {
        Self { visible: Vec::with_capacity(script_len), typing: false, actions_unlocked: false, script_len }
    }

    pub fn visible(&self) -> &[ScriptEntry] {
        &self.visible
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn actions_unlocked(&self) -> bool {
        self.actions_unlocked
    }

    /// All entries have been revealed
    pub fn is_complete(&self) -> bool {
        self.visible.len() == self.script_len
    }

    /// Index the next reveal must carry
    pub fn next_index(&self) -> usize {
        self.visible.len()
    }

    /// Apply an event, returning whether anything changed
    pub fn apply(&mut self, event: RevealEvent) -> bool {
        match event {
            RevealEvent::TypingStarted { index } => {
                if index != self.next_index() || self.is_complete() {
                    tracing::warn!(index, expected = self.next_index(), "dropping out-of-order typing event");
                    return false;
                }
                let changed = !self.typing;
                self.typing = true;
                changed
            }
            RevealEvent::Revealed { index, entry } => {
                if index != self.next_index() || self.is_complete() {
                    tracing::warn!(index, expected = self.next_index(), "dropping out-of-order reveal");
                    return false;
                }
                self.typing = false;
                self.visible.push(entry);
                tracing::debug!(
                    index,
                    speaker = self.visible[index].speaker.as_str(),
                    text = %crate::logging::preview(&self.visible[index].summary(), 40),
                    "revealed entry"
                );
                true
            }
            RevealEvent::ActionsUnlocked => {
                if !self.is_complete() {
                    tracing::warn!(visible = self.visible.len(), "unlock before the script finished");
                    return false;
                }
                if self.actions_unlocked {
                    return false;
                }
                self.actions_unlocked = true;
                tracing::debug!("quick actions unlocked");
                true
            }
        }
    }
}
