//! Lawyer/beneficiary directory records

use serde::{Deserialize, Deserializer, Serialize};

/// A selectable lawyer/beneficiary profile used to auto-fill contact fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartyRecord {
    #[serde(alias = "beneficiario", deserialize_with = "null_as_empty")]
    pub beneficiary_name: String,
    #[serde(alias = "telefone", deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    /// Individual tax id (CPF), 11 digits
    #[serde(alias = "cpf", deserialize_with = "null_as_empty")]
    pub tax_id: String,
    /// Bar association license (OAB)
    #[serde(alias = "oab", deserialize_with = "null_as_empty")]
    pub license_id: String,
    #[serde(alias = "tratamento", deserialize_with = "null_as_empty")]
    pub salutation: String,
    #[serde(alias = "endereco", deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(alias = "nacionalidade", deserialize_with = "null_as_empty")]
    pub nationality: String,
}

/// The directory sends `null` for unset fields
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Form keys written by party auto-fill, in the order the backend expects
pub const PARTY_FIELD_KEYS: [&str; 8] = [
    "beneficiario",
    "telefone",
    "email",
    "cpf",
    "oab",
    "tratamento",
    "enderecoAdvogado",
    "nacionalidadeAdvogado",
];

impl PartyRecord {
    /// Pairs of (form key, value) covering every party field, empty ones included
    pub fn form_values(&self) -> [(&'static str, &str); 8] {
        [
            (PARTY_FIELD_KEYS[0], self.beneficiary_name.as_str()),
            (PARTY_FIELD_KEYS[1], self.phone.as_str()),
            (PARTY_FIELD_KEYS[2], self.email.as_str()),
            (PARTY_FIELD_KEYS[3], self.tax_id.as_str()),
            (PARTY_FIELD_KEYS[4], self.license_id.as_str()),
            (PARTY_FIELD_KEYS[5], self.salutation.as_str()),
            (PARTY_FIELD_KEYS[6], self.address.as_str()),
            (PARTY_FIELD_KEYS[7], self.nationality.as_str()),
        ]
    }

    /// Whether `other` is the same lawyer, compared by license and tax id.
    ///
    /// Records without either id fall back to the name.
    pub fn same_party(&self, other: &PartyRecord) -> bool {
        if self.license_id.is_empty() && self.tax_id.is_empty() {
            other.license_id.is_empty()
                && other.tax_id.is_empty()
                && self.beneficiary_name == other.beneficiary_name
        } else {
            self.license_id == other.license_id && self.tax_id == other.tax_id
        }
    }

    /// Name shown in the party list
    pub fn display_name(&self) -> &str {
        if self.beneficiary_name.is_empty() {
            "(sem nome)"
        } else {
            &self.beneficiary_name
        }
    }
}

/// Load state of the party directory
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DirectoryState {
    #[default]
    Loading,
    Loaded(Vec<PartyRecord>),
    Failed(String),
}

impl DirectoryState {
    /// Records available for selection (empty unless loaded)
    pub fn records(&self) -> &[PartyRecord] {
        match self {
            DirectoryState::Loaded(records) => records,
            DirectoryState::Loading | DirectoryState::Failed(_) => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DirectoryState::Loading)
    }
}
