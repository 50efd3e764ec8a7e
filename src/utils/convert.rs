use chrono::{Duration, Local, NaiveDate};
use serenity::all::User;

/// Date format used in every sheet column the bot writes.
pub const SHEET_DATE_FORMAT: &str = "%m/%d/%Y";

pub fn format_discord_username(user: &User) -> String {
	format!(
		"{}{}",
		user.name,
		match user.discriminator {
			None => String::new(),
			Some(n) => format!("#{:04}", n),
		}
	)
}

pub fn sheet_date(date: NaiveDate) -> String {
	date.format(SHEET_DATE_FORMAT).to_string()
}

pub fn today() -> String {
	sheet_date(Local::now().date_naive())
}

pub fn yesterday() -> String {
	sheet_date(Local::now().date_naive() - Duration::days(1))
}

/// Clips text for embed fields, which Discord caps at 1024 characters.
pub fn clip(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		return text.to_string();
	}
	let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
	clipped.push('…');
	clipped
}

/// Embed field value for a possibly empty cell.
pub fn or_dash(value: &str) -> String {
	if value.trim().is_empty() {
		"-".to_string()
	} else {
		clip(value, 1024)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dates_are_zero_padded_month_first() {
		let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
		assert_eq!(sheet_date(date), "03/07/2024");
	}

	#[test]
	fn yesterday_is_one_day_before_today() {
		let today = NaiveDate::parse_from_str(&today(), SHEET_DATE_FORMAT).unwrap();
		let yesterday = NaiveDate::parse_from_str(&yesterday(), SHEET_DATE_FORMAT).unwrap();
		assert_eq!(today - yesterday, Duration::days(1));
	}

	#[test]
	fn clip_keeps_short_text() {
		assert_eq!(clip("short", 10), "short");
		assert_eq!(clip("abcdefghij", 5), "abcd…");
	}

	#[test]
	fn blank_cells_show_as_dash() {
		assert_eq!(or_dash("  "), "-");
		assert_eq!(or_dash("Oakwood"), "Oakwood");
	}
}
