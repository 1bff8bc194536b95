use serde::{Deserialize, Serialize};
use std::fmt;

/// Режим соучастия (coparticipação) плана: полное, без соучастия или частичное.
///
/// Коды приходят строками ("COM", "SEM", "PARC"); неизвестный код сохраняется
/// как есть, чтобы не потерять его при сохранении.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CoparticipationType {
    #[default]
    Com,
    Sem,
    Parc,
    Other(String),
}

impl CoparticipationType {
    /// Режимы, которые показываются бок о бок в разбивке по выбранному плану
    pub const BREAKDOWN: [CoparticipationType; 3] = [
        CoparticipationType::Com,
        CoparticipationType::Parc,
        CoparticipationType::Sem,
    ];

    pub fn code(&self) -> &str {
        match self {
            CoparticipationType::Com => "COM",
            CoparticipationType::Sem => "SEM",
            CoparticipationType::Parc => "PARC",
            CoparticipationType::Other(code) => code,
        }
    }

    /// Короткая подпись для карточек плана
    pub fn short_label(&self) -> &str {
        match self {
            CoparticipationType::Com => "Com copart.",
            CoparticipationType::Sem => "Sem copart.",
            CoparticipationType::Parc => "Parcial",
            CoparticipationType::Other(code) => code,
        }
    }

    /// Полная подпись для презентации клиенту
    pub fn display_name(&self) -> &str {
        match self {
            CoparticipationType::Com => "Com Coparticipação",
            CoparticipationType::Sem => "Sem Coparticipação",
            CoparticipationType::Parc => "Parcial",
            CoparticipationType::Other(code) => code,
        }
    }

    pub fn all() -> Vec<CoparticipationType> {
        Self::BREAKDOWN.to_vec()
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "COM" => CoparticipationType::Com,
            "SEM" => CoparticipationType::Sem,
            "PARC" => CoparticipationType::Parc,
            _ => CoparticipationType::Other(code.trim().to_string()),
        }
    }
}

impl From<String> for CoparticipationType {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<CoparticipationType> for String {
    fn from(value: CoparticipationType) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for CoparticipationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(CoparticipationType::from_code("parc"), CoparticipationType::Parc);
        assert_eq!(CoparticipationType::from_code(" SEM "), CoparticipationType::Sem);
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let t: CoparticipationType = serde_json::from_str("\"MISTO\"").unwrap();
        assert_eq!(t, CoparticipationType::Other("MISTO".into()));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"MISTO\"");
    }
}
