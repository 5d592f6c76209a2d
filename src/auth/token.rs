//! Access tokens issued by the token endpoint.

// self
use crate::{_prelude::*, error::ResponseError, provider::Claims};

// `expires` values after the OAuth 2.0 publication date (2012-10-01) are absolute Unix
// timestamps; anything smaller is a lifetime in seconds.
const EXPIRY_TIMESTAMP_THRESHOLD: i64 = 1_349_067_600;
const RESERVED_FIELDS: [&str; 5] =
	["access_token", "resource_owner_id", "refresh_token", "expires_in", "expires"];

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSecret(<redacted>)")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Access token plus the metadata returned alongside it.
#[derive(Clone, PartialEq)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Expiry instant, when the provider reported one.
	pub expires: Option<OffsetDateTime>,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Resource owner identifier extracted from the token response, if configured.
	pub resource_owner_id: Option<String>,
	/// Every other field of the token response (`token_type`, `scope`, `id_token`, ...).
	pub values: Claims,
}
impl AccessToken {
	/// Creates a bare token with no expiry or metadata.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			expires: None,
			refresh_token: None,
			resource_owner_id: None,
			values: Claims::new(),
		}
	}

	/// Builds a token from a parsed token endpoint response using the current clock.
	///
	/// `resource_owner_id_key` names the response field (dot-separated for nested objects)
	/// holding the resource owner identifier; without it the literal `resource_owner_id`
	/// field is used when present.
	pub fn from_response(
		response: Claims,
		resource_owner_id_key: Option<&str>,
	) -> Result<Self, ResponseError> {
		Self::from_response_at(response, resource_owner_id_key, OffsetDateTime::now_utc())
	}

	/// Same as [`AccessToken::from_response`] with an explicit reference instant.
	pub fn from_response_at(
		mut response: Claims,
		resource_owner_id_key: Option<&str>,
		now: OffsetDateTime,
	) -> Result<Self, ResponseError> {
		let access_token = match response.get("access_token") {
			Some(Value::String(token)) if !token.is_empty() => TokenSecret::new(token.as_str()),
			_ => return Err(ResponseError::MissingAccessToken),
		};
		let resource_owner_id = match resource_owner_id_key {
			Some(key) => lookup_path(&response, key).and_then(scalar_to_string),
			None => response.get("resource_owner_id").and_then(scalar_to_string),
		};
		let refresh_token = response
			.get("refresh_token")
			.and_then(Value::as_str)
			.filter(|token| !token.is_empty())
			.map(TokenSecret::new);
		let expires = resolve_expiry(&response, now)?;

		for field in RESERVED_FIELDS {
			response.shift_remove(field);
		}

		Ok(Self { access_token, expires, refresh_token, resource_owner_id, values: response })
	}

	/// Returns the access token value. Callers must avoid logging this string.
	pub fn token(&self) -> &str {
		self.access_token.expose()
	}

	/// Expiry instant, if known.
	pub fn expires(&self) -> Option<OffsetDateTime> {
		self.expires
	}

	/// Refresh token value, if issued.
	pub fn refresh_token(&self) -> Option<&str> {
		self.refresh_token.as_ref().map(TokenSecret::expose)
	}

	/// Resource owner identifier, if the provider reports one with the token.
	pub fn resource_owner_id(&self) -> Option<&str> {
		self.resource_owner_id.as_deref()
	}

	/// Additional response fields not modeled explicitly.
	pub fn values(&self) -> &Claims {
		&self.values
	}

	/// Returns whether the token expired at `instant`; `None` when no expiry is known.
	pub fn has_expired_at(&self, instant: OffsetDateTime) -> Option<bool> {
		self.expires.map(|expires| expires <= instant)
	}

	/// Returns whether the token has expired; `None` when no expiry is known.
	pub fn has_expired(&self) -> Option<bool> {
		self.has_expired_at(OffsetDateTime::now_utc())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &self.access_token)
			.field("expires", &self.expires)
			.field("refresh_token", &self.refresh_token)
			.field("resource_owner_id", &self.resource_owner_id)
			.field("values", &self.values)
			.finish()
	}
}

fn resolve_expiry(
	response: &Claims,
	now: OffsetDateTime,
) -> Result<Option<OffsetDateTime>, ResponseError> {
	if let Some(value) = present(response, "expires_in") {
		let secs = as_integer(value).ok_or(ResponseError::InvalidExpiry { field: "expires_in" })?;

		return Ok(Some(now.saturating_add(Duration::seconds(secs))));
	}

	let Some(value) = present(response, "expires") else {
		return Ok(None);
	};
	let secs = as_integer(value).ok_or(ResponseError::InvalidExpiry { field: "expires" })?;

	if secs > EXPIRY_TIMESTAMP_THRESHOLD {
		return OffsetDateTime::from_unix_timestamp(secs)
			.map(Some)
			.map_err(|_| ResponseError::InvalidExpiry { field: "expires" });
	}

	Ok(Some(now.saturating_add(Duration::seconds(secs))))
}

// Null, `false`, zero, `"0"`, and empty strings or collections count as absent.
fn present<'a>(response: &'a Claims, key: &str) -> Option<&'a Value> {
	response.get(key).filter(|value| match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
		Value::String(text) => !text.is_empty() && text != "0",
		Value::Array(items) => !items.is_empty(),
		Value::Object(fields) => !fields.is_empty(),
	})
}

fn as_integer(value: &Value) -> Option<i64> {
	match value {
		Value::Number(number) =>
			number.as_i64().or_else(|| number.as_f64().map(|float| float.trunc() as i64)),
		Value::String(text) => text.trim().parse::<i64>().ok(),
		_ => None,
	}
}

fn lookup_path<'a>(response: &'a Claims, path: &str) -> Option<&'a Value> {
	let mut segments = path.split('.');
	let mut current = response.get(segments.next()?)?;

	for segment in segments {
		current = current.get(segment)?;
	}

	Some(current)
}

fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}
