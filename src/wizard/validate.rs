use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").unwrap());

/// Shape check only: `1/2/2024` and `13/40/2024` both pass.
pub fn validate_date(input: &str) -> Result<String, ValidationError> {
	let trimmed = input.trim();
	if DATE_PATTERN.is_match(trimmed) {
		Ok(trimmed.to_string())
	} else {
		Err(ValidationError::BadDate(input.to_string()))
	}
}

/// Yes/No/empty, case-insensitive. Empty or absent means no.
pub fn resolve_flag(input: Option<&str>) -> Result<bool, ValidationError> {
	let trimmed = input.unwrap_or_default().trim();
	if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("no") {
		Ok(false)
	} else if trimmed.eq_ignore_ascii_case("yes") {
		Ok(true)
	} else {
		Err(ValidationError::BadFlag(trimmed.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;

	#[test]
	fn accepts_one_or_two_digit_day_and_month() {
		for date in ["01/02/2024", "1/2/2024", "12/31/1999", "9/30/2025", " 03/04/2024 "] {
			assert_eq!(validate_date(date).unwrap(), date.trim(), "{}", date);
		}
	}

	#[test]
	fn rejects_everything_else() {
		for date in ["", "2024-01-02", "01-02-2024", "1/2/24", "001/02/2024", "ab/cd/efgh", "01/02/2024x", "١/٢/٢٠٢٤"] {
			assert_matches!(validate_date(date), Err(ValidationError::BadDate(_)), "{}", date);
		}
	}

	#[test]
	fn flag_yes_family_is_true() {
		for input in ["yes", "Yes", "YES", " yEs "] {
			assert_eq!(resolve_flag(Some(input)), Ok(true));
		}
	}

	#[test]
	fn flag_no_family_and_blank_are_false() {
		for input in [Some("no"), Some("No"), Some("NO"), Some(""), Some("   "), None] {
			assert_eq!(resolve_flag(input), Ok(false));
		}
	}

	#[test]
	fn flag_other_literals_reject() {
		for input in ["y", "true", "maybe", "1"] {
			assert_matches!(resolve_flag(Some(input)), Err(ValidationError::BadFlag(_)));
		}
	}
}
