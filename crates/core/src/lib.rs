pub mod config;
pub mod content;
pub mod error;
pub mod loader;
pub mod logging;
pub mod navigation;
pub mod reveal;
pub mod script;
pub mod sequencer;
pub mod session;
pub mod timeline;

pub use config::{Config, ConfigError, ContentConfig, LoadPolicy, PanelsConfig, TimingConfig};
pub use content::{Article, ArticleLink, Persona, Portfolio, Role, SkillGroup};
pub use error::{ContentError, Error, Result, ScriptError};
pub use loader::{PanelContent, PanelEvent, PanelId, PanelLoader, PanelSlot, PanelSlots};
pub use logging::{LogFormat, LogGuard, init_logging};
pub use navigation::{NavOutcome, Navigator, QuickAction, View};
pub use reveal::{RevealEvent, RevealState};
pub use script::{EntryBody, Script, ScriptEntry, Speaker};
pub use sequencer::RevealSequencer;
pub use session::{Session, SessionEvent};
pub use timeline::{Step, StepKind, Timeline, cumulative_offsets, typing_activation_times};
