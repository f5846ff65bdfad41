//! Two-step wizard: choose document type and party, then fill fields

use super::forms::FormState;
use super::{DocumentType, PartyRecord};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    ChooseType,
    FillFields,
}

/// Why the wizard stayed on the choose step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdvanceRefused {
    #[error("Selecione o tipo de documento e o advogado")]
    NothingSelected,
    #[error("Selecione o tipo de documento")]
    MissingDocumentType,
    #[error("Selecione o advogado")]
    MissingParty,
}

/// Focus on the choose step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChooseFocus {
    #[default]
    DocumentTypes,
    Parties,
}

impl ChooseFocus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::DocumentTypes => Self::Parties,
            Self::Parties => Self::DocumentTypes,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: Step,
    document_type: Option<DocumentType>,
    /// Index into the loaded party directory; re-resolved on every reload
    selected_party: Option<usize>,
    form: Option<FormState>,
}

impl Wizard {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn document_type(&self) -> Option<DocumentType> {
        self.document_type
    }

    pub fn selected_party_index(&self) -> Option<usize> {
        self.selected_party
    }

    pub fn selected_party<'a>(&self, parties: &'a [PartyRecord]) -> Option<&'a PartyRecord> {
        self.selected_party.and_then(|i| parties.get(i))
    }

    pub fn select_document_type(&mut self, document_type: DocumentType) {
        self.document_type = Some(document_type);
    }

    pub fn select_party(&mut self, index: usize) {
        self.selected_party = Some(index);
    }

    /// Point the selection at `previous` in a freshly loaded directory, or clear it
    pub fn reselect_party(
        &mut self,
        previous: Option<&PartyRecord>,
        parties: &[PartyRecord],
    ) -> Option<usize> {
        self.selected_party =
            previous.and_then(|prev| parties.iter().position(|p| prev.same_party(p)));
        self.selected_party
    }

    /// Move to `FillFields` when both selections are present.
    ///
    /// A form for the same document type is resumed; a different type starts
    /// a fresh one. The selected party is applied on every advance.
    pub fn advance(&mut self, parties: &[PartyRecord]) -> Result<(), AdvanceRefused> {
        let party = self.selected_party(parties);
        let (document_type, party) = match (self.document_type, party) {
            (Some(d), Some(p)) => (d, p),
            (None, None) => return Err(AdvanceRefused::NothingSelected),
            (None, Some(_)) => return Err(AdvanceRefused::MissingDocumentType),
            (Some(_), None) => return Err(AdvanceRefused::MissingParty),
        };

        let form = match self.form.take() {
            Some(form) if form.document_type() == document_type => form,
            _ => FormState::new(document_type),
        };
        let form = self.form.insert(form);
        form.apply_party(party);
        self.step = Step::FillFields;
        Ok(())
    }

    /// Return to `ChooseType`, keeping entered values
    pub fn back(&mut self) {
        self.step = Step::ChooseType;
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        self.form.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> Vec<PartyRecord> {
        vec![
            PartyRecord {
                beneficiary_name: "João".to_string(),
                email: "joao@example.com".to_string(),
                ..Default::default()
            },
            PartyRecord {
                beneficiary_name: "Maria".to_string(),
                email: "maria@example.com".to_string(),
                ..Default::default()
            },
        ]
    }

    mod transitions {
        use super::*;

        #[test]
        fn test_initial_step_is_choose_type() {
            assert_eq!(Wizard::default().step(), Step::ChooseType);
        }

        #[test]
        fn test_refuses_without_selections() {
            let parties = parties();
            let mut wizard = Wizard::default();
            assert_eq!(wizard.advance(&parties), Err(AdvanceRefused::NothingSelected));

            wizard.select_party(0);
            assert_eq!(
                wizard.advance(&parties),
                Err(AdvanceRefused::MissingDocumentType)
            );
            assert_eq!(wizard.step(), Step::ChooseType);
        }

        #[test]
        fn test_refuses_without_party() {
            let mut wizard = Wizard::default();
            wizard.select_document_type(DocumentType::ReceiptOfFees);
            assert_eq!(wizard.advance(&parties()), Err(AdvanceRefused::MissingParty));
            assert_eq!(wizard.step(), Step::ChooseType);
            assert!(wizard.form().is_none());
        }

        #[test]
        fn test_refuses_when_party_index_not_loaded() {
            let mut wizard = Wizard::default();
            wizard.select_document_type(DocumentType::ReceiptOfFees);
            wizard.select_party(0);
            assert_eq!(wizard.advance(&[]), Err(AdvanceRefused::MissingParty));
        }

        #[test]
        fn test_advances_with_both() {
            let mut wizard = Wizard::default();
            wizard.select_document_type(DocumentType::ReceiptOfFees);
            wizard.select_party(1);
            assert_eq!(wizard.advance(&parties()), Ok(()));
            assert_eq!(wizard.step(), Step::FillFields);

            let form = wizard.form().unwrap();
            assert_eq!(form.document_type(), DocumentType::ReceiptOfFees);
            assert_eq!(form.value("beneficiario"), Some("Maria"));
        }

        #[test]
        fn test_back_is_unconditional() {
            let mut wizard = Wizard::default();
            wizard.back();
            assert_eq!(wizard.step(), Step::ChooseType);
        }
    }

    mod resume {
        use super::*;

        #[test]
        fn test_back_then_same_type_keeps_values() {
            let parties = parties();
            let mut wizard = Wizard::default();
            wizard.select_document_type(DocumentType::ReceiptOfFees);
            wizard.select_party(0);
            wizard.advance(&parties).unwrap();
            wizard.form_mut().unwrap().set_value("nomeCliente", "Ana");

            wizard.back();
            wizard.select_party(1);
            wizard.advance(&parties).unwrap();

            let form = wizard.form().unwrap();
            assert_eq!(form.value("nomeCliente"), Some("Ana"));
            assert_eq!(form.value("email"), Some("maria@example.com"));
        }

        #[test]
        fn test_changing_type_starts_fresh_form() {
            let parties = parties();
            let mut wizard = Wizard::default();
            wizard.select_document_type(DocumentType::ReceiptOfFees);
            wizard.select_party(0);
            wizard.advance(&parties).unwrap();
            wizard.form_mut().unwrap().set_value("nomeCliente", "Ana");

            wizard.back();
            wizard.select_document_type(DocumentType::PowerOfAttorney);
            wizard.advance(&parties).unwrap();

            let form = wizard.form().unwrap();
            assert_eq!(form.document_type(), DocumentType::PowerOfAttorney);
            assert_eq!(form.value("nomeCliente"), Some(""));
        }
    }

    mod reload {
        use super::*;

        fn lawyer(name: &str, oab: &str) -> PartyRecord {
            PartyRecord {
                beneficiary_name: name.to_string(),
                license_id: oab.to_string(),
                ..Default::default()
            }
        }

        #[test]
        fn test_selection_follows_party_to_new_position() {
            let before = vec![lawyer("A", "1"), lawyer("B", "2")];
            let after = vec![lawyer("C", "3"), lawyer("A", "1")];
            let mut wizard = Wizard::default();
            wizard.select_party(0);

            let previous = wizard.selected_party(&before).cloned();
            assert_eq!(wizard.reselect_party(previous.as_ref(), &after), Some(1));
            assert_eq!(
                wizard.selected_party(&after).map(|p| p.beneficiary_name.as_str()),
                Some("A")
            );
        }

        #[test]
        fn test_selection_cleared_when_party_gone() {
            let before = vec![lawyer("A", "1")];
            let after = vec![lawyer("C", "3")];
            let mut wizard = Wizard::default();
            wizard.select_document_type(DocumentType::ReceiptOfFees);
            wizard.select_party(0);

            let previous = wizard.selected_party(&before).cloned();
            assert_eq!(wizard.reselect_party(previous.as_ref(), &after), None);
            assert_eq!(wizard.advance(&after), Err(AdvanceRefused::MissingParty));
        }
    }

    #[test]
    fn test_refusal_messages() {
        assert_eq!(
            AdvanceRefused::MissingParty.to_string(),
            "Selecione o advogado"
        );
    }

    #[test]
    fn test_choose_focus_toggle() {
        let mut focus = ChooseFocus::default();
        focus.toggle();
        assert_eq!(focus, ChooseFocus::Parties);
        focus.toggle();
        assert_eq!(focus, ChooseFocus::DocumentTypes);
    }
}
