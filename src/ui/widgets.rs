//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    widgets::{List, ListState},
    Frame,
};

/// Render a list with `selected_index` highlighted and scrolled into view.
///
/// The cursor is clamped so an index left over from a longer list still
/// highlights the last row.
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let selected = match list.len() {
        0 => None,
        len => Some(selected_index.min(len - 1)),
    };
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}
