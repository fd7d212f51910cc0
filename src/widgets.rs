//! Widgets that draw themselves and register their own click regions.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

const TAB_SEPARATOR: &str = " | ";

/// One row of tabs. The active tab is highlighted.
pub struct TabBar<'a> {
    tabs: Vec<(&'a str, u16)>,
    active: Option<u16>,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            block: None,
        }
    }

    pub fn tab(mut self, label: &'a str, action_id: u16) -> Self {
        self.tabs.push((label, action_id));
        self
    }

    pub fn active(mut self, action_id: u16) -> Self {
        self.active = Some(action_id);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let gap = TAB_SEPARATOR.len() as u16;

        let mut spans = Vec::with_capacity(self.tabs.len() * 2);
        let mut widths = Vec::with_capacity(self.tabs.len());
        for (i, &(label, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(TAB_SEPARATOR, Style::default().fg(Color::DarkGray)));
            }
            let text = format!(" {label} ");
            widths.push((Line::from(text.as_str()).width() as u16, action_id));
            let style = if self.active == Some(action_id) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(text, style));
        }

        let mut paragraph = Paragraph::new(Line::from(spans));
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        f.render_widget(paragraph, area);

        // Full outer height so a tap on the border still lands on a tab.
        let strip = Rect::new(inner.x, area.y, inner.width, area.height.max(1));
        cs.add_strip_targets(strip, &widths, gap);
    }
}

/// Lines for a `Paragraph`, some of them bound to actions.
///
/// Targets follow their line, so reordering lines never desynchronizes
/// the hit regions. Lines are assumed not to wrap.
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<Line<'a>>) {
        self.lines.push(line.into());
    }

    pub fn push_clickable(&mut self, line: impl Into<Line<'a>>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line.into());
    }

    /// Register a row target for each clickable line that is visible inside
    /// `area` once `border` rows are skipped top and bottom.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, border: u16) {
        let first = area.y + border;
        let last = area.bottom().saturating_sub(border);
        for &(index, action_id) in &self.actions {
            let row = first as usize + index;
            if row < last as usize {
                cs.add_row_target(area, row as u16, action_id);
            }
        }
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratzilla::ratatui::backend::TestBackend;
    use ratzilla::ratatui::widgets::Borders;
    use ratzilla::ratatui::Terminal;

    #[test]
    fn list_targets_track_line_positions() {
        let mut list = ClickableList::new();
        list.push("header");
        list.push_clickable("first", 1);
        list.push("");
        list.push_clickable("second", 2);

        let mut cs = ClickState::new();
        list.register_targets(Rect::new(0, 5, 30, 10), &mut cs, 1);
        assert_eq!(cs.hit_test(3, 7), Some(1));
        assert_eq!(cs.hit_test(3, 8), None);
        assert_eq!(cs.hit_test(3, 9), Some(2));
        assert_eq!(list.into_lines().len(), 4);
    }

    #[test]
    fn list_targets_clip_to_area() {
        let mut list = ClickableList::new();
        for id in 0..10 {
            list.push_clickable(format!("row {id}"), id);
        }
        let mut cs = ClickState::new();
        // Height 5 with borders leaves rows 1..4 for content.
        list.register_targets(Rect::new(0, 0, 20, 5), &mut cs, 1);
        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(0, 3), Some(2));
        assert_eq!(cs.hit_test(0, 4), None);
    }

    #[test]
    fn tab_bar_registers_one_target_per_tab() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        let mut cs = ClickState::new();
        terminal
            .draw(|f| {
                let area = f.area();
                TabBar::new()
                    .tab("Dashboard", 1)
                    .tab("Team", 2)
                    .tab("Projects", 3)
                    .active(2)
                    .block(Block::default().borders(Borders::ALL))
                    .render(f, area, &mut cs);
            })
            .unwrap();

        assert_eq!(cs.targets.len(), 3);
        // Inner x starts at 1; " Dashboard " is 11 wide.
        assert_eq!(cs.hit_test(1, 1), Some(1));
        assert_eq!(cs.hit_test(11, 1), Some(1));
        assert_eq!(cs.hit_test(15, 1), Some(2));
        assert_eq!(cs.hit_test(50, 1), Some(3));
        // The border row is part of the tap zone.
        assert_eq!(cs.hit_test(15, 0), Some(2));
    }
}
