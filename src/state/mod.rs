//! Application state module

mod app_state;
mod document;
mod forms;
mod party;
mod wizard;

pub use app_state::*;
pub use document::*;
pub use forms::*;
pub use party::*;
pub use wizard::*;
