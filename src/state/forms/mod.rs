//! Form domain layer
//!
//! Field schemas, bound field values and the form controller used by the
//! fill-in step of the wizard.

mod field;
mod form_state;
mod schema;

pub use field::FormField;
pub use form_state::{FormState, ValidatedForm, ValidationErrors};
pub use schema::{Coercion, FieldSpec, FieldValue, Rule};
