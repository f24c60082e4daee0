//! Provider environment selector.
//!
//! An empty name selects [`PlaidEnvironment::Sandbox`]. Any other name must match one of the
//! lowercase labels exactly.

// self
use crate::_prelude::*;

/// Configured environment name that matches no known deployment.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown Plaid environment `{name}`.")]
pub struct UnknownEnvironment {
	/// Name as configured.
	pub name: String,
}

/// Plaid deployment the relay talks to.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlaidEnvironment {
	/// Test deployment with fake institutions.
	#[default]
	Sandbox,
	/// Limited live deployment.
	Development,
	/// Live deployment.
	Production,
}
impl PlaidEnvironment {
	/// Returns a stable label suitable for logs and configuration.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Sandbox => "sandbox",
			Self::Development => "development",
			Self::Production => "production",
		}
	}

	/// Base URL of the environment's REST API.
	pub const fn base_url(self) -> &'static str {
		match self {
			Self::Sandbox => "https://sandbox.plaid.com",
			Self::Development => "https://development.plaid.com",
			Self::Production => "https://production.plaid.com",
		}
	}
}
impl FromStr for PlaidEnvironment {
	type Err = UnknownEnvironment;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"" | "sandbox" => Ok(Self::Sandbox),
			"development" => Ok(Self::Development),
			"production" => Ok(Self::Production),
			other => Err(UnknownEnvironment { name: other.to_owned() }),
		}
	}
}
impl Display for PlaidEnvironment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
