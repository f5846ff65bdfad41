//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `document_form`: The fill step for the chosen document type

mod document_form;
mod field_renderer;

pub use document_form::draw as draw_document_form;
