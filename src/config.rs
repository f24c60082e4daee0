//! Startup configuration merged from defaults, the environment, and CLI flags.
//!
//! Precedence (lowest to highest): built-in defaults, `PLAID_ENV` / `PLAID_CLIENT_ID` /
//! `PLAID_SECRET` / `PLAID_BASE_URL` / `HOST` / `PORT`, then [`RelayArgs`]. The result is fixed
//! for the process lifetime. Missing credentials and an unknown `PLAID_ENV` are not errors here;
//! they surface on the first provider call. An empty `PLAID_ENV` selects the sandbox.

// crates.io
use figment::{
	Figment,
	providers::{Env, Serialized},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ConfigError,
	provider::{PlaidClient, PlaidEnvironment, UnknownEnvironment},
};

/// Environment variables read by [`RelayConfig::load`].
pub const ENV_KEYS: [&str; 6] =
	["PLAID_ENV", "PLAID_CLIENT_ID", "PLAID_SECRET", "PLAID_BASE_URL", "HOST", "PORT"];

fn default_port() -> u16 {
	8080
}
fn default_env() -> String {
	PlaidEnvironment::default().as_str().into()
}
fn default_host() -> String {
	"0.0.0.0".into()
}

/// Command-line overrides for the relay binary.
#[derive(Clone, Debug, Default, clap::Parser)]
#[command(name = "plaid-relay", version, about = "Thin HTTP relay for Plaid Link.")]
pub struct RelayArgs {
	/// Provider environment (overrides `PLAID_ENV`).
	#[arg(long, value_enum)]
	pub plaid_env: Option<PlaidEnvironment>,
	/// Provider base URL (overrides `PLAID_BASE_URL` and the environment's URL).
	#[arg(long, value_name = "URL")]
	pub plaid_base_url: Option<Url>,
	/// Listen address (overrides `HOST`).
	#[arg(long)]
	pub host: Option<String>,
	/// Listen port (overrides `PORT`).
	#[arg(short, long)]
	pub port: Option<u16>,
}

/// Relay configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct RelayConfig {
	/// Provider environment name, resolved with [`RelayConfig::environment`].
	#[serde(default = "default_env")]
	pub plaid_env: String,
	/// Provider client identifier.
	#[serde(default)]
	pub plaid_client_id: Option<String>,
	/// Provider client secret.
	#[serde(default)]
	pub plaid_secret: Option<TokenSecret>,
	/// Explicit provider base URL, replacing the environment's URL.
	#[serde(default)]
	pub plaid_base_url: Option<Url>,
	/// Listen address.
	#[serde(default = "default_host")]
	pub host: String,
	/// Listen port.
	#[serde(default = "default_port")]
	pub port: u16,
}
impl RelayConfig {
	/// Loads defaults merged with the process environment and `args`.
	pub fn load(args: &RelayArgs) -> Result<Self, ConfigError> {
		Self::from_figment(Self::figment().merge(Env::raw().only(&ENV_KEYS)), args)
	}

	/// Base figment holding the built-in defaults.
	pub fn figment() -> Figment {
		Figment::from(Serialized::defaults(Self::default()))
	}

	/// Extracts a configuration from `figment`, then applies `args`.
	pub fn from_figment(figment: Figment, args: &RelayArgs) -> Result<Self, ConfigError> {
		let mut config: Self = figment.extract()?;

		if let Some(env) = args.plaid_env {
			config.plaid_env = env.as_str().into();
		}
		if let Some(url) = &args.plaid_base_url {
			config.plaid_base_url = Some(url.clone());
		}
		if let Some(host) = &args.host {
			config.host = host.clone();
		}
		if let Some(port) = args.port {
			config.port = port;
		}

		Ok(config)
	}

	/// `host:port` string to bind.
	pub fn listen_addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}

	/// Resolves the configured environment name.
	pub fn environment(&self) -> Result<PlaidEnvironment, UnknownEnvironment> {
		self.plaid_env.parse()
	}

	/// Returns `true` when both provider credentials are present.
	pub fn has_credentials(&self) -> bool {
		self.plaid_client_id.is_some() && self.plaid_secret.is_some()
	}

	/// Builds the provider client described by this configuration.
	///
	/// An explicit base URL wins over the environment name.
	pub fn plaid_client(&self) -> Result<PlaidClient, ConfigError> {
		let client = match &self.plaid_base_url {
			Some(url) => PlaidClient::new(url)?,
			None => PlaidClient::for_environment_name(&self.plaid_env)?,
		};

		Ok(client.with_credentials(self.plaid_client_id.clone(), self.plaid_secret.clone()))
	}
}
impl Default for RelayConfig {
	fn default() -> Self {
		Self {
			plaid_env: default_env(),
			plaid_client_id: None,
			plaid_secret: None,
			plaid_base_url: None,
			host: default_host(),
			port: default_port(),
		}
	}
}
impl Debug for RelayConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RelayConfig")
			.field("plaid_env", &self.plaid_env)
			.field("plaid_client_id_set", &self.plaid_client_id.is_some())
			.field("plaid_secret", &self.plaid_secret)
			.field("plaid_base_url", &self.plaid_base_url)
			.field("host", &self.host)
			.field("port", &self.port)
			.finish()
	}
}
