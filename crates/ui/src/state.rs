mod exit;

pub use exit::{CTRL_C_WINDOW, ExitState};

/// Frames of the three-dot typing indicator
pub const TYPING_FRAMES: [&str; 4] = ["●  ", "●● ", "●●●", " ●●"];

/// A one-line message shown in the footer until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
}

/// Vertical scroll that can follow the bottom
///
/// `None` follows the newest line. Any other offset is held until the view
/// scrolls back down to the bottom or follow is resumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: Option<usize>,
    max: usize,
}

impl ScrollState {
    pub fn is_following(&self) -> bool {
        self.offset.is_none()
    }

    /// Update the largest valid offset; called by the renderer
    pub fn set_max(&mut self, max: usize) {
        self.max = max;
        if let Some(offset) = self.offset
            && offset > max
        {
            self.offset = Some(max);
        }
    }

    /// Offset to render at
    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(self.max).min(self.max)
    }

    pub fn up(&mut self) {
        let current = self.offset();
        self.offset = Some(current.saturating_sub(1));
    }

    pub fn down(&mut self) {
        if let Some(offset) = self.offset {
            let next = offset + 1;
            self.offset = if next >= self.max { None } else { Some(next) };
        }
    }

    pub fn follow(&mut self) {
        self.offset = None;
    }
}

/// Presentation-only state; everything else lives in the session
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub conversation_scroll: ScrollState,
    /// Scroll of the article body
    pub detail_scroll: u16,
    pub animation_frame: usize,
    pub notice: Option<Notice>,
    pub exit: ExitState,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice { text: text.into() });
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn advance_animation_frame(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % TYPING_FRAMES.len();
    }

    pub fn typing_frame(&self) -> &'static str {
        TYPING_FRAMES[self.animation_frame % TYPING_FRAMES.len()]
    }
}
