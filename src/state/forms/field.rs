//! Form field value objects

use super::schema::FieldSpec;

/// A single bound input: its declaration, raw text and last validation message
#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: String,
    pub error: Option<String>,
}

impl FormField {
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            value: String::new(),
            error: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn label(&self) -> &'static str {
        self.spec.label
    }

    /// Get the raw text value
    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Overwrite the value; a stale error no longer applies
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.error = None;
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
        self.error = None;
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FormField {
        FormField::new(FieldSpec::text("nomeCliente", "Nome", "Nome é obrigatório"))
    }

    #[test]
    fn test_new_is_empty() {
        let f = field();
        assert_eq!(f.name(), "nomeCliente");
        assert_eq!(f.label(), "Nome");
        assert_eq!(f.as_text(), "");
        assert!(f.error.is_none());
    }

    #[test]
    fn test_edit_clears_error() {
        let mut f = field();
        f.error = Some("Nome é obrigatório".to_string());
        f.push_char('A');
        assert!(f.error.is_none());
        assert_eq!(f.as_text(), "A");

        f.error = Some("x".to_string());
        f.pop_char();
        assert!(f.error.is_none());
        assert_eq!(f.as_text(), "");
    }

    #[test]
    fn test_set_text_and_clear() {
        let mut f = field();
        f.set_text("Maria");
        assert_eq!(f.as_text(), "Maria");
        f.clear();
        assert_eq!(f.as_text(), "");
    }
}
