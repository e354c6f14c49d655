//! Timer-driven reveal of the conversation script.
//!
//! A single task walks the [`Timeline`] in order, sleeping until each step's
//! offset and sending the resulting [`RevealEvent`] to the session. Walking
//! the plan sequentially is what keeps reveals in script order even when
//! offsets tie.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::TimingConfig;
use crate::reveal::RevealEvent;
use crate::script::Script;
use crate::timeline::Timeline;

/// Owns a script and its plan until started
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    script: Script,
    timeline: Timeline,
}

impl RevealSequencer {
    pub fn new(script: Script, timing: &TimingConfig) -> Self {
        let timeline = Timeline::plan(&script, timing);
        Self { script, timeline }
    }

    /// Spawn the reveal task.
    ///
    /// Offsets count from the moment this is called. The task stops when
    /// `token` is cancelled, when the receiver is dropped, or after the
    /// unlock step; the channel closes with it.
    pub fn start(self, token: CancellationToken) -> mpsc::UnboundedReceiver<RevealEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let origin = Instant::now();
        let Self { script, timeline } = self;

        tracing::debug!(entries = script.len(), total_ms = timeline.total_ms(), "starting reveal sequence");

        tokio::spawn(async move {
            for step in timeline.steps() {
                let deadline = origin + Duration::from_millis(step.at_ms);
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!(at_ms = step.at_ms, "reveal sequence cancelled");
                        return;
                    }
                    _ = tokio::time::sleep_until(deadline) => {}
                }

                let Some(event) = step.event(&script) else {
                    continue;
                };
                if token.is_cancelled() || tx.send(event).is_err() {
                    return;
                }
            }
            tracing::debug!("reveal sequence finished");
        });

        rx
    }
}
