//! Dashboard input: normalized events, clickable regions and the
//! pixel-to-cell mapping used by the browser shell.

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input folded into one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(char),
    /// A press on a registered region, carrying its action id.
    Click(u16),
}

/// A screen region bound to an action id, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Regions registered by the last frame, plus the grid size they were drawn on.
///
/// Rebuilt on every draw. The mouse handler reads it between draws.
#[derive(Debug, Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub cols: u16,
    pub rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's regions and remember the new grid size.
    pub fn reset(&mut self, area: Rect) {
        self.targets.clear();
        self.cols = area.width;
        self.rows = area.height;
    }

    pub fn add_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// A one-row target spanning `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if (area.y..area.bottom()).contains(&row) {
            self.add_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for labels laid out left to right with `gap` cells between
    /// them. Each label owns half of the gap on either side; the first and
    /// last stretch to the edges of `area`.
    pub fn add_strip_targets(&mut self, area: Rect, widths: &[(u16, u16)], gap: u16) {
        let mut start = 0u16;
        let mut left = 0u16;
        for (i, &(width, action_id)) in widths.iter().enumerate() {
            let end = start + width;
            let right = if i + 1 == widths.len() {
                area.width
            } else {
                (end + gap / 2).min(area.width)
            };
            if right > left {
                self.add_target(
                    Rect::new(area.x + left, area.y, right - left, area.height.max(1)),
                    action_id,
                );
            }
            left = right;
            start = end + gap;
        }
    }

    /// The action under a cell. Later registrations sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                (t.rect.x..t.rect.right()).contains(&col)
                    && (t.rect.y..t.rect.bottom()).contains(&row)
            })
            .map(|t| t.action_id)
    }
}

pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset inside a grid of `extent` pixels split into `cells`
/// equal cells to a cell index.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if cells == 0 || extent <= 0.0 || offset < 0.0 || offset >= extent {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    Some(cell.min(cells - 1))
}
