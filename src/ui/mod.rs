//! UI module for rendering the TUI

mod chooser;
mod components;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::Step;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area());

    layout::draw_header(frame, areas.header);
    layout::draw_nav_bar(frame, areas.nav, app);

    match app.state.step() {
        Step::ChooseType => chooser::draw(frame, areas.main, app),
        Step::FillFields => forms::draw_document_form(frame, areas.main, app),
    }

    layout::draw_status_bar(frame, areas.status, app);

    // Error dialog goes on top of everything
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.pending_errors());
    }
}
