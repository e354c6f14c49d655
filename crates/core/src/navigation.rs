//! Navigation between the conversation and the content panels.

use crate::content::{ArticleLink, Portfolio};
use crate::loader::PanelId;

/// The active view. Exactly one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Conversation,
    ProjectList,
    ArticleDetail(String),
    Skills,
    Experience,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Conversation => "conversation",
            View::ProjectList => "project-list",
            View::ArticleDetail(_) => "article-detail",
            View::Skills => "skills",
            View::Experience => "experience",
        }
    }

    /// The panel whose content this view displays
    pub fn panel(&self) -> Option<PanelId> {
        match self {
            View::ProjectList => Some(PanelId::Projects),
            View::Skills => Some(PanelId::Skills),
            View::Experience => Some(PanelId::Experience),
            View::Conversation | View::ArticleDetail(_) => None,
        }
    }
}

/// Buttons shown under the conversation once it has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    Projects,
    Skills,
    Experience,
}

impl QuickAction {
    pub const ALL: [QuickAction; 3] = [QuickAction::Projects, QuickAction::Skills, QuickAction::Experience];

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::Projects => "View Projects",
            QuickAction::Skills => "Skills",
            QuickAction::Experience => "Work Experience",
        }
    }

    /// 1-based number used as the keyboard shortcut
    pub fn number(&self) -> usize {
        match self {
            QuickAction::Projects => 1,
            QuickAction::Skills => 2,
            QuickAction::Experience => 3,
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.number() == number)
    }

    pub fn panel(&self) -> PanelId {
        match self {
            QuickAction::Projects => PanelId::Projects,
            QuickAction::Skills => PanelId::Skills,
            QuickAction::Experience => PanelId::Experience,
        }
    }

    fn view(&self) -> View {
        match self {
            QuickAction::Projects => View::ProjectList,
            QuickAction::Skills => View::Skills,
            QuickAction::Experience => View::Experience,
        }
    }
}

/// What a navigation request did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Moved into a content panel; its content should load
    Entered(PanelId),
    /// Moved to a view that needs no load
    Moved,
    /// The article lives elsewhere; state is unchanged
    OpenExternal(String),
    /// Quick actions are still locked
    Locked,
    Unchanged,
}

/// Current view plus the project list cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    view: View,
    cursor: usize,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a quick action. Only the conversation shows them.
    pub fn select_action(&mut self, action: QuickAction, unlocked: bool) -> NavOutcome {
        if self.view != View::Conversation {
            return NavOutcome::Unchanged;
        }
        if !unlocked {
            tracing::debug!(action = action.label(), "quick action while locked");
            return NavOutcome::Locked;
        }

        self.view = action.view();
        if action == QuickAction::Projects {
            self.cursor = 0;
        }
        tracing::debug!(view = self.view.as_str(), "entered panel");
        NavOutcome::Entered(action.panel())
    }

    /// Open the article under the cursor
    pub fn open_selected(&mut self, portfolio: &Portfolio) -> NavOutcome {
        if self.view != View::ProjectList {
            return NavOutcome::Unchanged;
        }
        match portfolio.articles.get(self.cursor) {
            Some(article) => {
                let id = article.id.clone();
                self.open_article(portfolio, &id)
            }
            None => NavOutcome::Unchanged,
        }
    }

    /// Open an article by id from the project list.
    ///
    /// Unknown ids still enter the detail view, which renders as empty.
    pub fn open_article(&mut self, portfolio: &Portfolio, id: &str) -> NavOutcome {
        if self.view != View::ProjectList {
            return NavOutcome::Unchanged;
        }

        match portfolio.article(id).map(|a| a.link()) {
            Some(ArticleLink::External(url)) => {
                tracing::info!(article = id, url, "external article selected");
                NavOutcome::OpenExternal(url.to_string())
            }
            Some(ArticleLink::Internal(_)) => {
                self.view = View::ArticleDetail(id.to_string());
                NavOutcome::Moved
            }
            None => {
                tracing::warn!(article = id, "unknown article id");
                self.view = View::ArticleDetail(id.to_string());
                NavOutcome::Moved
            }
        }
    }

    pub fn back(&mut self) -> NavOutcome {
        let next = match self.view {
            View::Conversation => return NavOutcome::Unchanged,
            View::ArticleDetail(_) => View::ProjectList,
            View::ProjectList | View::Skills | View::Experience => View::Conversation,
        };
        self.view = next;
        NavOutcome::Moved
    }

    /// Move the cursor up among `len` articles, wrapping
    pub fn cursor_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { (self.cursor - 1).min(len - 1) };
    }

    pub fn cursor_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }
}
