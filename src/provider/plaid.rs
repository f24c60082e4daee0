//! Reqwest-backed [`Provider`] talking to the Plaid REST API.

// crates.io
use reqwest::{StatusCode, redirect::Policy};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, ProviderError},
	provider::{
		LinkTokenCreateRequest, LinkTokenCreateResponse, PlaidEnvironment, PlaidErrorBody,
		Provider, ProviderFuture, PublicTokenExchangeRequest, PublicTokenExchangeResponse,
		TransactionsGetRequest, UnknownEnvironment,
	},
};

const CLIENT_ID_HEADER: &str = "PLAID-CLIENT-ID";
const SECRET_HEADER: &str = "PLAID-SECRET";

/// Provider paths called by the relay.
pub mod endpoint {
	/// Link token creation.
	pub const LINK_TOKEN_CREATE: &str = "/link/token/create";
	/// Public token exchange.
	pub const PUBLIC_TOKEN_EXCHANGE: &str = "/item/public_token/exchange";
	/// Transaction listing.
	pub const TRANSACTIONS_GET: &str = "/transactions/get";
}

/// Plaid API client.
///
/// Missing credentials and an unknown environment are not rejected at construction; every call
/// then fails with [`ProviderError::MissingCredentials`] or [`ProviderError::Environment`] before
/// touching the network. Redirects are never followed and no timeout is applied.
#[derive(Clone)]
pub struct PlaidClient {
	http: ReqwestClient,
	target: Target,
	client_id: Option<String>,
	secret: Option<TokenSecret>,
}
impl PlaidClient {
	/// Builds a client for the given base URL with a default reqwest transport.
	pub fn new(base_url: &Url) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(default_http_client()?, base_url))
	}

	/// Builds a client for one of the provider's hosted environments.
	pub fn for_environment(env: PlaidEnvironment) -> Result<Self, ConfigError> {
		let base_url = Url::parse(env.base_url()).map_err(|e| ConfigError::HttpClientBuild {
			source: Box::new(e),
		})?;

		Self::new(&base_url)
	}

	/// Builds a client for a configured environment name that may not resolve.
	///
	/// An unknown name yields a client whose every call fails with
	/// [`ProviderError::Environment`].
	pub fn for_environment_name(name: &str) -> Result<Self, ConfigError> {
		match name.parse::<PlaidEnvironment>() {
			Ok(env) => Self::for_environment(env),
			Err(unknown) => Ok(Self {
				http: default_http_client()?,
				target: Target::Unresolved(unknown),
				client_id: None,
				secret: None,
			}),
		}
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_http_client(http: ReqwestClient, base_url: &Url) -> Self {
		Self {
			http,
			target: Target::Resolved(base_url.as_str().trim_end_matches('/').to_owned()),
			client_id: None,
			secret: None,
		}
	}

	/// Attaches whichever credentials are configured.
	pub fn with_credentials(
		mut self,
		client_id: Option<String>,
		secret: Option<TokenSecret>,
	) -> Self {
		self.client_id = client_id;
		self.secret = secret;

		self
	}

	/// Base URL every endpoint path is appended to, if the environment resolved.
	pub fn base_url(&self) -> Option<&str> {
		match &self.target {
			Target::Resolved(url) => Some(url),
			Target::Unresolved(_) => None,
		}
	}

	async fn post<B, T>(&self, endpoint: &'static str, body: &B) -> Result<T, ProviderError>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let base_url = match &self.target {
			Target::Resolved(url) => url,
			Target::Unresolved(unknown) => return Err(unknown.clone().into()),
		};
		let (Some(client_id), Some(secret)) = (self.client_id.as_deref(), self.secret.as_ref())
		else {
			return Err(ProviderError::MissingCredentials);
		};
		let response = self
			.http
			.post(format!("{base_url}{endpoint}"))
			.header(CLIENT_ID_HEADER, client_id)
			.header(SECRET_HEADER, secret.expose())
			.json(body)
			.send()
			.await
			.map_err(|e| ProviderError::network(endpoint, e))?;
		let status = response.status();
		let bytes = response.bytes().await.map_err(|e| ProviderError::network(endpoint, e))?;

		tracing::debug!(endpoint, status = status.as_u16(), "Provider responded.");

		if !status.is_success() {
			return Err(ProviderError::Api {
				endpoint,
				status: status.as_u16(),
				error: serde_json::from_slice::<PlaidErrorBody>(&bytes).ok(),
			});
		}

		decode(endpoint, status, &bytes)
	}
}
impl Provider for PlaidClient {
	fn create_link_token<'a>(
		&'a self,
		request: &'a LinkTokenCreateRequest,
	) -> ProviderFuture<'a, LinkTokenCreateResponse> {
		Box::pin(self.post(endpoint::LINK_TOKEN_CREATE, request))
	}

	fn exchange_public_token<'a>(
		&'a self,
		request: &'a PublicTokenExchangeRequest,
	) -> ProviderFuture<'a, PublicTokenExchangeResponse> {
		Box::pin(self.post(endpoint::PUBLIC_TOKEN_EXCHANGE, request))
	}

	fn get_transactions<'a>(
		&'a self,
		request: &'a TransactionsGetRequest,
	) -> ProviderFuture<'a, serde_json::Value> {
		Box::pin(self.post(endpoint::TRANSACTIONS_GET, request))
	}
}
impl Debug for PlaidClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PlaidClient")
			.field("target", &self.target)
			.field("client_id_set", &self.client_id.is_some())
			.field("secret_set", &self.secret.is_some())
			.finish()
	}
}

#[derive(Clone, Debug)]
enum Target {
	Resolved(String),
	Unresolved(UnknownEnvironment),
}

fn default_http_client() -> Result<ReqwestClient, ConfigError> {
	Ok(ReqwestClient::builder()
		.redirect(Policy::none())
		.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
		.build()?)
}

fn decode<T>(endpoint: &'static str, status: StatusCode, bytes: &[u8]) -> Result<T, ProviderError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut de).map_err(|source| ProviderError::Decode {
		endpoint,
		status: status.as_u16(),
		source,
	})
}
