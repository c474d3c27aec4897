//! Helpers shared by the resource clients: date normalization, payload
//! field stripping and attachment capability URLs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

/// Timestamp the backend uses to mean "no date set".
pub const ZERO_DATE: &str = "0001-01-01T00:00:00Z";

#[derive(thiserror::Error, Debug)]
#[error("invalid date format: {0}")]
pub struct DateError(String);

/// Sentinel for unset dates. Year 1 marks "no date".
pub fn zero_date() -> DateTime<Utc> {
	NaiveDate::from_ymd_opt(1, 1, 1)
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|datetime| Utc.from_utc_datetime(&datetime))
		.expect("year one is representable")
}

/// Parses a backend date value.
///
/// Empty and zero-date values resolve to the [`zero_date`] sentinel.
/// Values with a time component parse as RFC 3339 timestamps. Bare
/// `YYYY-MM-DD` values are built from their components at UTC midnight,
/// so the calendar day can never shift across a timezone boundary.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, DateError> {
	if raw.is_empty() || raw.starts_with(ZERO_DATE) {
		return Ok(zero_date());
	}

	if raw.contains('T') {
		return DateTime::parse_from_rfc3339(raw)
			.map(|datetime| datetime.with_timezone(&Utc))
			.map_err(|_| DateError(raw.to_string()));
	}

	let mut parts = raw.splitn(3, '-');
	let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
		return Err(DateError(raw.to_string()));
	};
	let (Ok(year), Ok(month), Ok(day)) = (year.parse(), month.parse(), day.parse()) else {
		return Err(DateError(raw.to_string()));
	};

	NaiveDate::from_ymd_opt(year, month, day)
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|datetime| Utc.from_utc_datetime(&datetime))
		.ok_or_else(|| DateError(raw.to_string()))
}

/// Serde adapter for backend date fields.
pub mod date_serde {
	use chrono::{DateTime, SecondsFormat, Utc};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::parse_date;

	pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		date.to_rfc3339_opts(SecondsFormat::Secs, true)
			.serialize(serializer)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		parse_date(&raw).map_err(serde::de::Error::custom)
	}

	/// Variant for fields the backend may zero out. The zero-date wire
	/// value maps to `None` and `None` serializes back as the sentinel.
	pub mod option {
		use chrono::{DateTime, SecondsFormat, Utc};
		use serde::{Deserialize, Deserializer, Serialize, Serializer};

		use crate::base::{parse_date, zero_date, ZERO_DATE};

		pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			match date {
				Some(date) => date
					.to_rfc3339_opts(SecondsFormat::Secs, true)
					.serialize(serializer),
				None => ZERO_DATE.serialize(serializer),
			}
		}

		pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
		where
			D: Deserializer<'de>,
		{
			let Some(raw) = Option::<String>::deserialize(deserializer)? else {
				return Ok(None);
			};

			let date = parse_date(&raw).map_err(serde::de::Error::custom)?;
			if date == zero_date() {
				return Ok(None);
			}

			Ok(Some(date))
		}
	}
}

/// Returns a copy of a JSON object with `createdAt`, `updatedAt` and any
/// extra keys removed. Update payloads built from fetched objects go
/// through this so server-owned fields are never echoed back.
pub fn drop_fields(value: &Value, extra_keys: &[&str]) -> Value {
	let mut result = value.clone();

	if let Value::Object(map) = &mut result {
		map.remove("createdAt");
		map.remove("updatedAt");
		for key in extra_keys {
			map.remove(*key);
		}
	}

	result
}

/// Appends the attachment capability token as an `access_token` query
/// parameter, allowing header-less resource downloads.
///
/// This is a plain string append. A `url` that already carries a query
/// string would be corrupted, so callers must pass one without.
pub fn auth_url(url: &str, attachment_token: Option<&str>) -> String {
	match attachment_token {
		Some(token) if !token.is_empty() => format!("{url}?access_token={token}"),
		_ => url.to_string(),
	}
}
