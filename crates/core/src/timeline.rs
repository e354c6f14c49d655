//! Reveal timeline: when each typing indicator, reveal and the unlock fire.
//!
//! Everything here is pure. Offsets are milliseconds since the session
//! started; the sequencer turns the plan into timers.

use serde::Serialize;

use crate::config::TimingConfig;
use crate::reveal::{RevealEvent, RevealState};
use crate::script::Script;

/// What a step does. Declaration order is the tie-break at equal offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    TypingStarted,
    Reveal,
    Unlock,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::TypingStarted => "typing",
            StepKind::Reveal => "reveal",
            StepKind::Unlock => "unlock",
        }
    }
}

/// One scheduled activation
///
/// Field order matters: steps sort by offset, then script index, then kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Step {
    pub at_ms: u64,
    pub index: usize,
    pub kind: StepKind,
}

impl Step {
    /// The state mutation this step commits
    pub fn event(&self, script: &Script) -> Option<RevealEvent> {
        match self.kind {
            StepKind::TypingStarted => Some(RevealEvent::TypingStarted { index: self.index }),
            StepKind::Reveal => script
                .get(self.index)
                .map(|entry| RevealEvent::Revealed { index: self.index, entry: entry.clone() }),
            StepKind::Unlock => Some(RevealEvent::ActionsUnlocked),
        }
    }
}

/// Prefix sums of the entry delays
pub fn cumulative_offsets(script: &Script) -> Vec<u64> {
    script
        .iter()
        .scan(0u64, |total, entry| {
            *total = total.saturating_add(entry.delay_ms);
            Some(*total)
        })
        .collect()
}

/// When the typing indicator turns on for each entry, if at all
///
/// Only persona entries after the first get an indicator. It leads the
/// reveal by `lead_ms`, but never starts before the previous reveal.
pub fn typing_activation_times(script: &Script, offsets: &[u64], lead_ms: u64) -> Vec<Option<u64>> {
    script
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i == 0 || !entry.is_persona() {
                return None;
            }
            let previous = offsets[i - 1];
            Some(offsets[i].saturating_sub(lead_ms).max(previous))
        })
        .collect()
}

/// The full ordered plan for a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    steps: Vec<Step>,
}

impl Timeline {
    pub fn plan(script: &Script, timing: &TimingConfig) -> Self {
        let offsets = cumulative_offsets(script);
        let typing = typing_activation_times(script, &offsets, timing.typing_lead_ms);

        let mut steps = Vec::with_capacity(script.len() * 2 + 1);
        for (index, (&at_ms, typing_at)) in offsets.iter().zip(&typing).enumerate() {
            if let Some(typing_at) = typing_at {
                steps.push(Step { at_ms: *typing_at, index, kind: StepKind::TypingStarted });
            }
            steps.push(Step { at_ms, index, kind: StepKind::Reveal });
        }

        if let Some(&last) = offsets.last() {
            steps.push(Step {
                at_ms: last.saturating_add(timing.unlock_grace_ms),
                index: offsets.len() - 1,
                kind: StepKind::Unlock,
            });
        }

        steps.sort();
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Offset of the final step (the unlock)
    pub fn total_ms(&self) -> u64 {
        self.steps.last().map(|s| s.at_ms).unwrap_or(0)
    }

    /// Steps due at or before `elapsed_ms`
    pub fn due(&self, elapsed_ms: u64) -> impl Iterator<Item = &Step> {
        self.steps.iter().take_while(move |s| s.at_ms <= elapsed_ms)
    }

    /// Replay the plan up to a virtual instant
    pub fn state_at(&self, script: &Script, elapsed_ms: u64) -> RevealState {
        let mut state = RevealState::new(script.len());
        for event in self.due(elapsed_ms).filter_map(|step| step.event(script)) {
            state.apply(event);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{ScriptEntry, Speaker};

    fn example_script() -> Script {
        Script::new(vec![
            ScriptEntry::text(Speaker::Persona, "hi", 1000),
            ScriptEntry::text(Speaker::Visitor, "hey", 2000),
            ScriptEntry::text(Speaker::Persona, "sup", 1500),
        ])
        .unwrap()
    }

    #[test]
    fn test_cumulative_offsets() {
        assert_eq!(cumulative_offsets(&example_script()), vec![1000, 3000, 4500]);
    }

    #[test]
    fn test_typing_activation_times() {
        let script = example_script();
        let offsets = cumulative_offsets(&script);
        assert_eq!(typing_activation_times(&script, &offsets, 500), vec![None, None, Some(4000)]);
    }

    #[test]
    fn test_first_entry_never_types() {
        let script = Script::new(vec![ScriptEntry::text(Speaker::Persona, "hi", 5000)]).unwrap();
        let offsets = cumulative_offsets(&script);
        assert_eq!(typing_activation_times(&script, &offsets, 500), vec![None]);
    }

    #[test]
    fn test_typing_clamped_to_previous_reveal() {
        let script = Script::new(vec![
            ScriptEntry::text(Speaker::Persona, "a", 1000),
            ScriptEntry::text(Speaker::Persona, "b", 200),
            ScriptEntry::text(Speaker::Persona, "c", 0),
        ])
        .unwrap();
        let offsets = cumulative_offsets(&script);
        assert_eq!(offsets, vec![1000, 1200, 1200]);
        assert_eq!(typing_activation_times(&script, &offsets, 500), vec![None, Some(1000), Some(1200)]);
    }

    #[test]
    fn test_typing_saturates_at_zero() {
        let script = Script::new(vec![
            ScriptEntry::text(Speaker::Visitor, "a", 0),
            ScriptEntry::text(Speaker::Persona, "b", 100),
        ])
        .unwrap();
        let offsets = cumulative_offsets(&script);
        assert_eq!(typing_activation_times(&script, &offsets, 500), vec![None, Some(0)]);
    }

    #[test]
    fn test_plan_example_trace() {
        let timeline = Timeline::plan(&example_script(), &TimingConfig::default());
        let steps: Vec<(u64, usize, StepKind)> = timeline.steps().iter().map(|s| (s.at_ms, s.index, s.kind)).collect();
        assert_eq!(
            steps,
            vec![
                (1000, 0, StepKind::Reveal),
                (3000, 1, StepKind::Reveal),
                (4000, 2, StepKind::TypingStarted),
                (4500, 2, StepKind::Reveal),
                (5000, 2, StepKind::Unlock),
            ]
        );
        assert_eq!(timeline.total_ms(), 5000);
    }

    #[test]
    fn test_plan_zero_delays_keep_script_order() {
        let script = Script::new(vec![
            ScriptEntry::text(Speaker::Persona, "a", 0),
            ScriptEntry::text(Speaker::Persona, "b", 0),
            ScriptEntry::text(Speaker::Visitor, "c", 0),
        ])
        .unwrap();
        let timing = TimingConfig { unlock_grace_ms: 0, ..TimingConfig::default() };
        let timeline = Timeline::plan(&script, &timing);
        let kinds: Vec<(usize, StepKind)> = timeline.steps().iter().map(|s| (s.index, s.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (0, StepKind::Reveal),
                (1, StepKind::TypingStarted),
                (1, StepKind::Reveal),
                (2, StepKind::Reveal),
                (2, StepKind::Unlock),
            ]
        );
        assert!(timeline.steps().iter().all(|s| s.at_ms == 0));
    }

    #[test]
    fn test_plan_reveals_every_entry_once() {
        let script = Script::new(
            (0..20)
                .map(|i| {
                    let speaker = if i % 3 == 0 { Speaker::Visitor } else { Speaker::Persona };
                    ScriptEntry::text(speaker, format!("m{i}"), (i * 137 % 700) as u64)
                })
                .collect(),
        )
        .unwrap();
        let timeline = Timeline::plan(&script, &TimingConfig::default());
        let reveals: Vec<usize> = timeline
            .steps()
            .iter()
            .filter(|s| s.kind == StepKind::Reveal)
            .map(|s| s.index)
            .collect();
        assert_eq!(reveals, (0..20).collect::<Vec<_>>());
        assert!(timeline.steps().windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
    }

    #[test]
    fn test_state_at() {
        let script = example_script();
        let timeline = Timeline::plan(&script, &TimingConfig::default());

        let state = timeline.state_at(&script, 999);
        assert!(state.visible().is_empty());

        let state = timeline.state_at(&script, 1000);
        assert_eq!(state.visible().len(), 1);

        let state = timeline.state_at(&script, 4200);
        assert_eq!(state.visible().len(), 2);
        assert!(state.is_typing());

        let state = timeline.state_at(&script, 4500);
        assert_eq!(state.visible(), script.entries());
        assert!(!state.is_typing());
        assert!(!state.actions_unlocked());

        let state = timeline.state_at(&script, 5000);
        assert!(state.actions_unlocked());
    }
}
