use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document identifier the user supplies to look up their case.
///
/// Valid ids are 1 to 20 ASCII digits after trimming surrounding
/// whitespace; anything else is rejected locally before any request is
/// sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("El documento debe contener solo dígitos (máximo 20).")]
pub struct InvalidDocumentId;

impl DocumentId {
    pub const MAX_DIGITS: usize = 20;

    /// Trims and validates raw user input.
    pub fn parse(input: &str) -> Result<Self, InvalidDocumentId> {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || trimmed.len() > Self::MAX_DIGITS
            || !trimmed.chars().all(|c| c.is_ascii_digit())
        {
            return Err(InvalidDocumentId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed, ordered survey answer categories. Transmitted by index,
/// displayed by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyAnswer {
    AlreadyAttended,
    AppointmentRequested,
    InsurerContactedUnresolved,
    NoActionTaken,
}

impl SurveyAnswer {
    pub const ALL: [SurveyAnswer; 4] = [
        SurveyAnswer::AlreadyAttended,
        SurveyAnswer::AppointmentRequested,
        SurveyAnswer::InsurerContactedUnresolved,
        SurveyAnswer::NoActionTaken,
    ];

    /// Wire position of the answer (0-3).
    pub fn index(self) -> usize {
        match self {
            SurveyAnswer::AlreadyAttended => 0,
            SurveyAnswer::AppointmentRequested => 1,
            SurveyAnswer::InsurerContactedUnresolved => 2,
            SurveyAnswer::NoActionTaken => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            SurveyAnswer::AlreadyAttended => "Ya asistí",
            SurveyAnswer::AppointmentRequested => "Ya solicite la cita",
            SurveyAnswer::InsurerContactedUnresolved => {
                "Me he comunicado con la eps y no ha sido posible"
            }
            SurveyAnswer::NoActionTaken => "No he realizado actividades para la recomendación",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_digit_ids() {
        let id = DocumentId::parse("1032456789").expect("valid id");
        assert_eq!(id.as_str(), "1032456789");
    }

    #[test]
    fn trims_surrounding_whitespace_before_validating() {
        let id = DocumentId::parse("  42\t").expect("valid id");
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn accepts_exactly_twenty_digits() {
        let id = DocumentId::parse("12345678901234567890").expect("valid id");
        assert_eq!(id.as_str().len(), 20);
    }

    #[test]
    fn rejects_twenty_one_digits() {
        assert_eq!(
            DocumentId::parse("123456789012345678901"),
            Err(InvalidDocumentId)
        );
    }

    #[test]
    fn rejects_empty_and_whitespace_only_input() {
        assert_eq!(DocumentId::parse(""), Err(InvalidDocumentId));
        assert_eq!(DocumentId::parse("   "), Err(InvalidDocumentId));
    }

    #[test]
    fn rejects_non_digit_input() {
        assert_eq!(DocumentId::parse("abc123"), Err(InvalidDocumentId));
        assert_eq!(DocumentId::parse("10.32"), Err(InvalidDocumentId));
        assert_eq!(DocumentId::parse("10 32"), Err(InvalidDocumentId));
        // Unicode digits are not ASCII digits.
        assert_eq!(DocumentId::parse("١٢٣"), Err(InvalidDocumentId));
    }

    #[test]
    fn answers_round_trip_through_their_wire_index() {
        for (position, answer) in SurveyAnswer::ALL.iter().enumerate() {
            assert_eq!(answer.index(), position);
            assert_eq!(SurveyAnswer::from_index(position), Some(*answer));
        }
        assert_eq!(SurveyAnswer::from_index(4), None);
    }

    #[test]
    fn answer_labels_match_the_survey_wording() {
        assert_eq!(SurveyAnswer::AlreadyAttended.label(), "Ya asistí");
        assert_eq!(
            SurveyAnswer::AppointmentRequested.label(),
            "Ya solicite la cita"
        );
        assert_eq!(
            SurveyAnswer::InsurerContactedUnresolved.label(),
            "Me he comunicado con la eps y no ha sido posible"
        );
        assert_eq!(
            SurveyAnswer::NoActionTaken.label(),
            "No he realizado actividades para la recomendación"
        );
    }
}
