//! Access token issued by an authorization-code exchange.

// self
use crate::{_prelude::*, auth::token::secret::Secret};

/// Access token plus the full decoded token endpoint payload.
///
/// The record is immutable once built. Every field of the provider response is kept in
/// [`raw_response`](Self::raw_response) so callers can reach `id_token`, `expires_in`, or any
/// provider-specific extension without this crate knowing about them.
#[derive(Clone, PartialEq)]
pub struct AccessToken {
	token: Secret,
	raw_response: JsonMap<String, JsonValue>,
	issued_at: OffsetDateTime,
}
impl AccessToken {
	/// Creates a token stamped with the current UTC instant.
	pub fn new(token: impl Into<String>, raw_response: JsonMap<String, JsonValue>) -> Self {
		Self::issued_at(token, raw_response, OffsetDateTime::now_utc())
	}

	/// Creates a token with an explicit issued-at instant.
	pub fn issued_at(
		token: impl Into<String>,
		raw_response: JsonMap<String, JsonValue>,
		issued_at: OffsetDateTime,
	) -> Self {
		Self { token: Secret::new(token), raw_response, issued_at }
	}

	/// Token secret; callers must avoid logging the exposed value.
	pub fn secret(&self) -> &Secret {
		&self.token
	}

	/// Shorthand for `self.secret().expose()`.
	pub fn token_value(&self) -> &str {
		self.token.expose()
	}

	/// Full decoded response payload.
	pub fn raw_response(&self) -> &JsonMap<String, JsonValue> {
		&self.raw_response
	}

	/// Looks up an arbitrary response field.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.raw_response.get(key)
	}

	/// Instant the token was received.
	pub fn issued(&self) -> OffsetDateTime {
		self.issued_at
	}

	/// `token_type` field, when present.
	pub fn token_type(&self) -> Option<&str> {
		self.str_field("token_type")
	}

	/// `refresh_token` field, when present.
	pub fn refresh_token(&self) -> Option<&str> {
		self.str_field("refresh_token")
	}

	/// OpenID Connect `id_token` field, when present.
	pub fn id_token(&self) -> Option<&str> {
		self.str_field("id_token")
	}

	/// Granted `scope` field, when present.
	pub fn scope(&self) -> Option<&str> {
		self.str_field("scope")
	}

	/// Relative lifetime from `expires_in`.
	///
	/// Accepts either a JSON number or a numeric string; negative values yield `None`.
	pub fn expires_in(&self) -> Option<Duration> {
		let secs = match self.raw_response.get("expires_in")? {
			JsonValue::Number(n) => n.as_i64()?,
			JsonValue::String(s) => s.trim().parse::<i64>().ok()?,
			_ => return None,
		};

		if secs < 0 {
			return None;
		}

		Some(Duration::seconds(secs))
	}

	/// Absolute expiry derived from `issued_at + expires_in`.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_in().and_then(|delta| self.issued_at.checked_add(delta))
	}

	/// Returns `true` when the token carries an expiry that lies at or before `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|expiry| instant >= expiry)
	}

	fn str_field(&self, key: &str) -> Option<&str> {
		self.raw_response.get(key).and_then(JsonValue::as_str)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let fields = self.raw_response.keys().collect::<Vec<_>>();

		f.debug_struct("AccessToken")
			.field("token", &self.token)
			.field("fields", &fields)
			.field("issued_at", &self.issued_at)
			.finish()
	}
}
