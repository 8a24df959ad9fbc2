use crate::domain::ticket::TicketStatus;
use crate::error::ValidationError;

pub const TITLE_MAX_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub title: String,
    pub status: TicketStatus,
    pub description: Option<String>,
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Checks run in a fixed order and the first failure is reported:
/// title emptiness, title length, status membership, description length.
pub fn validate(
    title: &str,
    status: &str,
    description: &str,
) -> Result<ValidatedFields, ValidationError> {
    let title = normalize_title(title);
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }

    let status = TicketStatus::from_str(status).ok_or(ValidationError::InvalidStatus)?;

    let description = description.trim();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }

    Ok(ValidatedFields {
        title,
        status,
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize_title("  Fix \t login\n\n bug  "), "Fix login bug");
        assert_eq!(normalize_title("   "), "");
    }

    #[test]
    fn accepts_and_normalizes_valid_input() {
        let fields = validate("  Ship   v1 ", "in_progress", "  notes  ").unwrap();
        assert_eq!(fields.title, "Ship v1");
        assert_eq!(fields.status, TicketStatus::InProgress);
        assert_eq!(fields.description.as_deref(), Some("notes"));
    }

    #[test]
    fn blank_description_becomes_absent() {
        let fields = validate("Ship v1", "open", " \n ").unwrap();
        assert_eq!(fields.description, None);
    }

    #[test]
    fn rejects_blank_title() {
        assert_eq!(validate(" \t ", "open", ""), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn title_limit_counts_characters() {
        let at_limit = "é".repeat(TITLE_MAX_CHARS);
        assert!(validate(&at_limit, "open", "").is_ok());

        let over = "a".repeat(TITLE_MAX_CHARS + 1);
        assert_eq!(validate(&over, "open", ""), Err(ValidationError::TitleTooLong));
    }

    #[test]
    fn title_limit_applies_after_normalization() {
        let padded = format!("   {}   ", "a".repeat(TITLE_MAX_CHARS));
        assert!(validate(&padded, "open", "").is_ok());
    }

    #[test]
    fn rejects_unknown_status() {
        assert_eq!(
            validate("Ship v1", "done", ""),
            Err(ValidationError::InvalidStatus)
        );
    }

    #[test]
    fn description_limit_applies_after_trim() {
        let padded = format!("  {}  ", "x".repeat(DESCRIPTION_MAX_CHARS));
        assert!(validate("Ship v1", "open", &padded).is_ok());

        let over = "x".repeat(DESCRIPTION_MAX_CHARS + 1);
        assert_eq!(
            validate("Ship v1", "open", &over),
            Err(ValidationError::DescriptionTooLong)
        );
    }

    #[test]
    fn reports_first_failing_check() {
        let long_title = "a".repeat(TITLE_MAX_CHARS + 1);
        let long_description = "x".repeat(DESCRIPTION_MAX_CHARS + 1);

        assert_eq!(
            validate("", "bogus", &long_description),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            validate(&long_title, "bogus", &long_description),
            Err(ValidationError::TitleTooLong)
        );
        assert_eq!(
            validate("ok", "bogus", &long_description),
            Err(ValidationError::InvalidStatus)
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let first = validate(" a  b ", "closed", " c ");
        let second = validate(" a  b ", "closed", " c ");
        assert_eq!(first, second);
    }
}
