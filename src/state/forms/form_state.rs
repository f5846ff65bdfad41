//! Form controller: field binding, party auto-fill and submit-time validation

use super::field::FormField;
use super::schema::FieldValue;
use crate::state::{DocumentType, PartyRecord};
use std::collections::BTreeMap;

/// Live form for one document submission
#[derive(Debug, Clone)]
pub struct FormState {
    document_type: DocumentType,
    fields: Vec<FormField>,
    /// Values set programmatically for keys without an input of their own
    auto_filled: BTreeMap<String, String>,
    pub active_field_index: usize,
}

/// Every field coerced successfully
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub document_type: DocumentType,
    pub values: Vec<(&'static str, FieldValue)>,
    pub auto_filled: BTreeMap<String, String>,
}

impl ValidatedForm {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Client name as entered, used in the download filename
    pub fn client_name(&self) -> &str {
        self.get("nomeCliente")
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }
}

/// Per-field messages from a failed submit, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<(&'static str, String)>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, msg)| msg.as_str())
    }
}

impl FormState {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            fields: document_type
                .schema()
                .iter()
                .copied()
                .map(FormField::new)
                .collect(),
            auto_filled: BTreeMap::new(),
            active_field_index: 0,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Bind an input to the named field
    pub fn register(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Current raw value for a key, whether it has an input or was auto-filled
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .map(FormField::as_text)
            .or_else(|| self.auto_filled.get(name).map(String::as_str))
    }

    /// Programmatic overwrite
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.register(name) {
            Some(field) => field.set_text(value),
            None => {
                self.auto_filled.insert(name.to_string(), value);
            }
        }
    }

    /// Copy every party field into the form, replacing earlier party values
    pub fn apply_party(&mut self, party: &PartyRecord) {
        for (key, value) in party.form_values() {
            self.set_value(key, value);
        }
    }

    /// Run the full schema without touching field state
    pub fn validate(&self) -> Result<ValidatedForm, ValidationErrors> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut errors = Vec::new();

        for field in &self.fields {
            match field.spec.validate(&field.value) {
                Ok(Some(value)) => values.push((field.name(), value)),
                Ok(None) => {}
                Err(msg) => errors.push((field.name(), msg)),
            }
        }

        let errors = ValidationErrors(errors);
        if errors.is_empty() {
            Ok(ValidatedForm {
                document_type: self.document_type,
                values,
                auto_filled: self.auto_filled.clone(),
            })
        } else {
            Err(errors)
        }
    }

    /// Validate, record per-field messages, and call `on_valid` only when every field passes
    pub fn handle_submit<R>(
        &mut self,
        on_valid: impl FnOnce(ValidatedForm) -> R,
    ) -> Result<R, ValidationErrors> {
        match self.validate() {
            Ok(validated) => {
                for field in &mut self.fields {
                    field.error = None;
                }
                Ok(on_valid(validated))
            }
            Err(errors) => {
                for field in &mut self.fields {
                    field.error = errors.get(field.name()).map(str::to_string);
                }
                if let Some(first) = self.fields.iter().position(|f| f.error.is_some()) {
                    self.active_field_index = first;
                }
                Err(errors)
            }
        }
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.error.is_some()).count()
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.active_field_index = (self.active_field_index + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        if self.active_field_index == 0 {
            self.active_field_index = self.fields.len() - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
}
