//! Document types and their field schemas

use super::forms::{Coercion, FieldSpec, Rule};

/// The kind of legal document being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    ReceiptOfFees,
    PowerOfAttorney,
}

impl DocumentType {
    pub const ALL: [DocumentType; 2] = [DocumentType::ReceiptOfFees, DocumentType::PowerOfAttorney];

    /// Stable label, used for endpoint lookup and download filenames
    pub fn label(&self) -> &'static str {
        match self {
            Self::ReceiptOfFees => "ReceiptOfFees",
            Self::PowerOfAttorney => "PowerOfAttorney",
        }
    }

    /// Human-readable title for the UI
    pub fn title(&self) -> &'static str {
        match self {
            Self::ReceiptOfFees => "Recibo de Honorários",
            Self::PowerOfAttorney => "Procuração",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Ordered field definitions
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            Self::ReceiptOfFees => RECEIPT_OF_FEES,
            Self::PowerOfAttorney => POWER_OF_ATTORNEY,
        }
    }
}

const CLIENT_NAME: FieldSpec =
    FieldSpec::text("nomeCliente", "Nome do Cliente", "Nome do cliente é obrigatório");
const ADDRESS: FieldSpec = FieldSpec::text("endereco", "Endereço", "Endereço é obrigatório");
const COMPANY_TAX_ID: FieldSpec = FieldSpec::text("cnpj", "CNPJ", "CNPJ é obrigatório").with_rule(
    Coercion::Text,
    Rule::Digits(14),
    "CNPJ deve ter 14 dígitos",
);
const DATE: FieldSpec = FieldSpec::text("data", "Data", "Data é obrigatória").with_rule(
    Coercion::Text,
    Rule::Date,
    "Data inválida (use AAAA-MM-DD ou DD/MM/AAAA)",
);

const RECEIPT_OF_FEES: &[FieldSpec] = &[
    CLIENT_NAME,
    COMPANY_TAX_ID,
    ADDRESS,
    FieldSpec::text("cep", "CEP", "CEP é obrigatório").with_rule(
        Coercion::Text,
        Rule::Digits(8),
        "CEP deve ter 8 dígitos",
    ),
    FieldSpec::text(
        "numeroContrato",
        "Número do Contrato",
        "Número do contrato é obrigatório",
    ),
    FieldSpec::text("parcelas", "Parcelas", "Deve haver ao menos uma parcela").with_rule(
        Coercion::Integer,
        Rule::MinInteger(1),
        "Deve haver ao menos uma parcela",
    ),
    FieldSpec::text("valor", "Valor", "O valor é obrigatório").with_rule(
        Coercion::Float,
        Rule::MinFloat(0.0),
        "O valor deve ser positivo",
    ),
    DATE,
    FieldSpec::text("telefone", "Telefone", "Telefone é obrigatório"),
    FieldSpec::text("email", "E-mail", "E-mail é obrigatório").with_rule(
        Coercion::Text,
        Rule::Email,
        "E-mail inválido",
    ),
    FieldSpec::text("cpf", "CPF do Advogado", "CPF é obrigatório").with_rule(
        Coercion::Text,
        Rule::Digits(11),
        "CPF deve ter 11 dígitos",
    ),
    FieldSpec::text("oab", "OAB", "OAB é obrigatória"),
];

const POWER_OF_ATTORNEY: &[FieldSpec] = &[
    CLIENT_NAME,
    FieldSpec::text("nacionalidade", "Nacionalidade", "Nacionalidade é obrigatória"),
    FieldSpec::text("profissao", "Profissão", "Profissão é obrigatória"),
    ADDRESS,
    COMPANY_TAX_ID,
    FieldSpec::text("razaoSocial", "Razão Social", "Razão social é obrigatória"),
    DATE,
];
