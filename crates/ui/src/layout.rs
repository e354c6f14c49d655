use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest the chat column gets; wider terminals centre it
pub const MAX_CHAT_WIDTH: u16 = 90;

/// Calculated layout for the TUI
#[derive(Debug, Clone)]
pub struct TuiLayout {
    /// Persona header (3 lines)
    pub header: Rect,
    /// Conversation or panel
    pub body: Rect,
    /// Quick action buttons, only once unlocked
    pub quick_actions: Option<Rect>,
    /// Inert contact field (3 lines)
    pub input: Rect,
    /// Notice or key hints (1 line)
    pub footer: Rect,
}

impl TuiLayout {
    pub fn calculate(area: Rect, show_quick_actions: bool) -> Self {
        let column = centered_column(area, MAX_CHAT_WIDTH);
        let actions_height = if show_quick_actions { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(actions_height),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(column);

        Self {
            header: chunks[0],
            body: chunks[1],
            quick_actions: show_quick_actions.then_some(chunks[2]),
            input: chunks[3],
            footer: chunks[4],
        }
    }
}

/// Split a quick action row into equal buttons
pub fn button_row(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

fn centered_column(area: Rect, max_width: u16) -> Rect {
    if area.width <= max_width {
        return area;
    }
    let margin = (area.width - max_width) / 2;
    Rect { x: area.x + margin, width: max_width, ..area }
}
