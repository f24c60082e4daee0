//! Request and response bodies for the provider endpoints the relay calls.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, UserId},
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Client name shown in the provider's linking UI.
pub const CLIENT_NAME: &str = "Blue Budget";
/// Page size requested from the transaction listing endpoint.
pub const TRANSACTIONS_PAGE_SIZE: u32 = 250;

/// Provider product enabled on created link tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
	/// Transaction history.
	Transactions,
}

/// Country filter applied to institutions offered during linking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountryCode {
	/// United States.
	#[serde(rename = "US")]
	Us,
}

/// End user the link token is minted for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkUser {
	/// Caller-chosen stable user identifier.
	pub client_user_id: UserId,
}

/// Body of `/link/token/create`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkTokenCreateRequest {
	/// Application name displayed to the user.
	pub client_name: String,
	/// End user the token belongs to.
	pub user: LinkUser,
	/// Products to initialize.
	pub products: Vec<Product>,
	/// Institution country filter.
	pub country_codes: Vec<CountryCode>,
	/// UI language.
	pub language: String,
}
impl LinkTokenCreateRequest {
	/// Builds the fixed transactions/US/English request for `user`.
	pub fn for_user(user: UserId) -> Self {
		Self {
			client_name: CLIENT_NAME.into(),
			user: LinkUser { client_user_id: user },
			products: vec![Product::Transactions],
			country_codes: vec![CountryCode::Us],
			language: "en".into(),
		}
	}
}

/// Successful `/link/token/create` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LinkTokenCreateResponse {
	/// Token used to open the linking flow.
	pub link_token: String,
	/// Expiry timestamp as reported by the provider.
	#[serde(default)]
	pub expiration: Option<String>,
	/// Provider request identifier.
	#[serde(default)]
	pub request_id: Option<String>,
}

/// Body of `/item/public_token/exchange`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PublicTokenExchangeRequest {
	/// Public token handed back by the linking flow.
	pub public_token: String,
}

/// Successful `/item/public_token/exchange` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PublicTokenExchangeResponse {
	/// Durable access token.
	pub access_token: TokenSecret,
	/// Item the token grants access to.
	#[serde(default)]
	pub item_id: Option<String>,
	/// Provider request identifier.
	#[serde(default)]
	pub request_id: Option<String>,
}

/// Paging options for `/transactions/get`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionsGetOptions {
	/// Maximum number of transactions returned.
	pub count: u32,
}
impl Default for TransactionsGetOptions {
	fn default() -> Self {
		Self { count: TRANSACTIONS_PAGE_SIZE }
	}
}

/// Body of `/transactions/get`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionsGetRequest {
	/// Credential obtained from a public-token exchange.
	pub access_token: TokenSecret,
	/// Inclusive window start (`YYYY-MM-DD`).
	#[serde(with = "iso_date")]
	pub start_date: Date,
	/// Inclusive window end (`YYYY-MM-DD`).
	#[serde(with = "iso_date")]
	pub end_date: Date,
	/// Paging options.
	pub options: TransactionsGetOptions,
}

/// Error envelope the provider returns alongside non-success statuses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaidErrorBody {
	/// Broad error category (e.g. `INVALID_INPUT`).
	pub error_type: String,
	/// Specific error code (e.g. `INVALID_PUBLIC_TOKEN`).
	pub error_code: String,
	/// Developer-facing message.
	pub error_message: String,
	/// End-user-facing message, if any.
	#[serde(default)]
	pub display_message: Option<String>,
	/// Provider request identifier.
	#[serde(default)]
	pub request_id: Option<String>,
}
