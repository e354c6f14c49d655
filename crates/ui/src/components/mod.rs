pub mod chips;
pub mod conversation;
pub mod footer;
pub mod header;
pub mod panels;
pub mod quick_actions;

pub use conversation::Conversation;
pub use footer::{Footer, InputBar};
pub use header::Header;
pub use panels::{ArticleView, ExperiencePanel, ProjectsPanel, SkillsPanel};
pub use quick_actions::QuickActions;
