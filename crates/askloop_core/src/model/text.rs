//! Text normalization rules for user-submitted content.
//!
//! # Invariants
//! - Stored text is always trimmed of whitespace and byte-order marks.
//! - Length limits count Unicode scalar values, not bytes.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for question text after trimming.
pub const QUESTION_MAX_CHARS: usize = 500;
/// Upper bound for feedback text after trimming.
pub const FEEDBACK_MAX_CHARS: usize = 1000;

/// User-facing text field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Question,
    Feedback,
}

impl TextField {
    /// Capitalized label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Question => "Question",
            Self::Feedback => "Feedback",
        }
    }

    /// Maximum accepted length in characters.
    pub fn max_chars(self) -> usize {
        match self {
            Self::Question => QUESTION_MAX_CHARS,
            Self::Feedback => FEEDBACK_MAX_CHARS,
        }
    }
}

/// Validation failure for submitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text is missing or blank after trimming.
    Empty { field: TextField },
    /// Trimmed text exceeds the field limit.
    TooLong {
        field: TextField,
        max_chars: usize,
        actual_chars: usize,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field.label()),
            Self::TooLong {
                field, max_chars, ..
            } => write!(
                f,
                "{} must be at most {max_chars} characters",
                field.label()
            ),
        }
    }
}

impl Error for ValidationError {}

/// Trims `raw` and checks it against the limits of `field`.
///
/// Returns the trimmed text on success.
pub fn normalize_text(field: TextField, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let actual_chars = trimmed.chars().count();
    let max_chars = field.max_chars();
    if actual_chars > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max_chars,
            actual_chars,
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, TextField, ValidationError, QUESTION_MAX_CHARS};

    #[test]
    fn normalize_trims_surrounding_whitespace() {
        let text = normalize_text(TextField::Question, "  hello \n").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn normalize_rejects_blank_text() {
        for raw in ["", "   ", "\t\n", "\u{feff}", " \u{feff} "] {
            let err = normalize_text(TextField::Feedback, raw).unwrap_err();
            assert_eq!(
                err,
                ValidationError::Empty {
                    field: TextField::Feedback
                }
            );
        }
    }

    #[test]
    fn normalize_strips_byte_order_marks() {
        let text = normalize_text(TextField::Question, "\u{feff} hello\u{feff}").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn normalize_counts_chars_not_bytes() {
        let at_limit = "é".repeat(QUESTION_MAX_CHARS);
        assert!(normalize_text(TextField::Question, &at_limit).is_ok());

        let over_limit = "é".repeat(QUESTION_MAX_CHARS + 1);
        let err = normalize_text(TextField::Question, &over_limit).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooLong { actual_chars, .. } if actual_chars == QUESTION_MAX_CHARS + 1
        ));
    }

    #[test]
    fn messages_use_field_label() {
        let empty = ValidationError::Empty {
            field: TextField::Question,
        };
        assert_eq!(empty.to_string(), "Question is required");

        let too_long = ValidationError::TooLong {
            field: TextField::Feedback,
            max_chars: 1000,
            actual_chars: 1001,
        };
        assert_eq!(
            too_long.to_string(),
            "Feedback must be at most 1000 characters"
        );
    }
}
