use serde::{Deserialize, Serialize};
use std::fmt;

/// Modalidade do contrato
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Modality {
    Mei,
    #[default]
    Pme,
    Empresarial,
    Opcional,
    Other(String),
}

impl Modality {
    pub fn code(&self) -> &str {
        match self {
            Modality::Mei => "MEI",
            Modality::Pme => "PME",
            Modality::Empresarial => "EMPRESARIAL",
            Modality::Opcional => "OPCIONAL",
            Modality::Other(code) => code,
        }
    }

    pub fn all() -> Vec<Modality> {
        vec![
            Modality::Mei,
            Modality::Pme,
            Modality::Empresarial,
            Modality::Opcional,
        ]
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "MEI" => Modality::Mei,
            "PME" => Modality::Pme,
            "EMPRESARIAL" => Modality::Empresarial,
            "OPCIONAL" => Modality::Opcional,
            _ => Modality::Other(code.trim().to_string()),
        }
    }
}

impl From<String> for Modality {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<Modality> for String {
    fn from(value: Modality) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
