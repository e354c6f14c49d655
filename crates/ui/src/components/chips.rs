use crate::theme::Theme;

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Lay skill tags out as chips, flowing onto new rows at `width`
pub fn chip_rows(tags: &[String], width: usize, indent: usize) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = indent;

    for tag in tags {
        let chip = format!(" {tag} ");
        let chip_width = chip.width();
        let gap = usize::from(used > indent);

        if used > indent && used + gap + chip_width > width {
            rows.push(Line::from(std::mem::take(&mut spans)));
            used = indent;
        }
        if spans.is_empty() && indent > 0 {
            spans.push(Span::raw(" ".repeat(indent)));
        }
        if used > indent {
            spans.push(Span::raw(" "));
            used += 1;
        }
        spans.push(Span::styled(chip, Theme::chip()));
        used += chip_width;
    }

    if !spans.is_empty() {
        rows.push(Line::from(spans));
    }
    rows
}
