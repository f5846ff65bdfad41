//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_submit_button, SubmitState, BUTTON_HEIGHT};
pub use dialog::render_error_dialog;
