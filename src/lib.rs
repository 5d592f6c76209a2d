//! PrivacyPortal OAuth 2.0 / OpenID Connect provider adapter plus the transport-agnostic
//! authorization-code client that drives it.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		flows::{ClientOptions, ProviderClient},
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		provider::PrivacyPortal,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient =
		ProviderClient<PrivacyPortal, ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a PrivacyPortal adapter whose web and API domains both point at `base_url`.
	pub fn mock_privacy_portal(base_url: &str) -> PrivacyPortal {
		PrivacyPortal::default().with_domain(base_url).with_api_domain(base_url)
	}

	/// Constructs a [`ProviderClient`] for the provided adapter, using the reqwest transport
	/// shared across integration tests.
	pub fn build_reqwest_test_client(
		provider: PrivacyPortal,
		client_id: &str,
		client_secret: &str,
	) -> ReqwestTestClient {
		let options = ClientOptions::new(client_id)
			.with_client_secret(client_secret)
			.with_redirect_uri(
				Url::parse("https://app.example.com/callback")
					.expect("Test redirect URI should parse successfully."),
			);

		ProviderClient::with_http_client(
			provider,
			options,
			test_reqwest_http_client(),
			ReqwestTransportErrorMapper,
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
