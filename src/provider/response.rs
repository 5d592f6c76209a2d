//! Received provider responses and body parsing.

// crates.io
use oauth2::{HttpResponse, http::header::CONTENT_TYPE};
// self
use crate::{_prelude::*, error::ResponseError, provider::Claims};

/// Snapshot of an HTTP response received from the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderResponse {
	/// HTTP status code.
	pub status: u16,
	/// `Content-Type` header value, if any.
	pub content_type: Option<String>,
	/// Raw body, decoded lossily as UTF-8.
	pub body: String,
}
impl ProviderResponse {
	/// Creates a response snapshot without a content type.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, content_type: None, body: body.into() }
	}

	/// Sets the `Content-Type` header value.
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());

		self
	}

	/// Captures status, content type, and body from a transport response.
	pub fn from_http(response: HttpResponse) -> Self {
		let (parts, body) = response.into_parts();
		let content_type = parts
			.headers
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);

		Self {
			status: parts.status.as_u16(),
			content_type,
			body: String::from_utf8_lossy(&body).into_owned(),
		}
	}

	/// Canonical reason phrase for the status code.
	pub fn reason_phrase(&self) -> &'static str {
		oauth2::http::StatusCode::from_u16(self.status)
			.ok()
			.and_then(|status| status.canonical_reason())
			.unwrap_or("Unknown Status")
	}

	/// Parses the body according to its content type.
	///
	/// Form-encoded bodies become an object of strings. Anything else is tried as JSON; a
	/// body that is not JSON fails only when it claims to be JSON or arrives with HTTP 500,
	/// otherwise it is returned as a JSON string holding the raw text.
	pub fn parse(&self) -> Result<Value, ResponseError> {
		let content_type = self.content_type.as_deref().unwrap_or_default().to_ascii_lowercase();

		if content_type.contains("urlencoded") {
			return Ok(Value::Object(parse_form(&self.body)));
		}

		let mut de = serde_json::Deserializer::from_str(&self.body);
		let failure = match serde_path_to_error::deserialize::<_, Value>(&mut de) {
			Ok(value) => match de.end() {
				Ok(()) => return Ok(value),
				Err(source) => (String::from("."), source),
			},
			Err(err) => (err.path().to_string(), err.into_inner()),
		};

		if content_type.contains("json") {
			let (path, source) = failure;

			return Err(ResponseError::InvalidJson { status: self.status, path, source });
		}
		if self.status == 500 {
			return Err(ResponseError::ServerErrorWithoutJson { status: self.status });
		}

		Ok(Value::String(self.body.clone()))
	}
}

/// Short label naming the JSON kind of `value`.
pub fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

fn parse_form(body: &str) -> Claims {
	url::form_urlencoded::parse(body.as_bytes())
		.into_owned()
		.map(|(key, value)| (key, Value::String(value)))
		.collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn form_bodies_become_string_objects() {
		let response = ProviderResponse::new(200, "access_token=abc&expires=86400")
			.with_content_type("application/x-www-form-urlencoded");
		let parsed = response.parse().expect("Form body should parse.");

		assert_eq!(parsed, serde_json::json!({ "access_token": "abc", "expires": "86400" }));
	}

	#[test]
	fn json_bodies_keep_key_order() {
		let response = ProviderResponse::new(200, r#"{"sub":"U1","name":"Alice","email":"a@example.com"}"#)
			.with_content_type("application/json");
		let parsed = response.parse().expect("JSON body should parse.");
		let keys = parsed
			.as_object()
			.expect("Parsed body should be an object.")
			.keys()
			.cloned()
			.collect::<Vec<_>>();

		assert_eq!(keys, ["sub", "name", "email"]);
	}

	#[test]
	fn non_json_bodies_follow_content_type_and_status() {
		let declared_json = ProviderResponse::new(200, "{not json").with_content_type("json");

		assert!(matches!(
			declared_json.parse(),
			Err(ResponseError::InvalidJson { status: 200, .. })
		));

		let trailing = ProviderResponse::new(200, "{} trailing").with_content_type("application/json");

		assert!(matches!(trailing.parse(), Err(ResponseError::InvalidJson { .. })));

		let server_error = ProviderResponse::new(500, "<html>oops</html>");

		assert!(matches!(
			server_error.parse(),
			Err(ResponseError::ServerErrorWithoutJson { status: 500 })
		));

		let text = ProviderResponse::new(502, "Bad gateway").with_content_type("text/plain");

		assert_eq!(text.parse().expect("Plain text should pass through."), Value::from("Bad gateway"));
	}

	#[test]
	fn reason_phrase_falls_back_for_unknown_codes() {
		assert_eq!(ProviderResponse::new(404, "").reason_phrase(), "Not Found");
		assert_eq!(ProviderResponse::new(599, "").reason_phrase(), "Unknown Status");
		assert_eq!(json_kind(&serde_json::json!([1, 2])), "array");
	}
}
