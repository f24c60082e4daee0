// std
use std::sync::Arc;
// crates.io
use clap::Parser;
use color_eyre::Result;
use tokio::net::TcpListener;
// self
use plaid_relay::{
	config::{RelayArgs, RelayConfig},
	obs,
	relay::Relay,
	server,
	store::MemoryStore,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	obs::init_tracing();

	let args = RelayArgs::parse();
	let config = RelayConfig::load(&args)?;

	tracing::info!(?config, "Configuration loaded.");

	if let (Err(e), None) = (config.environment(), &config.plaid_base_url) {
		tracing::warn!(
			error = %e,
			"Provider calls will fail until PLAID_ENV names a known environment."
		);
	}
	if !config.has_credentials() {
		tracing::warn!("PLAID_CLIENT_ID or PLAID_SECRET is unset; provider calls will fail.");
	}

	tracing::warn!(
		"Access tokens are echoed in /exchange_public_token responses; keep this relay to demo use."
	);

	let relay = Relay::new(
		Arc::new(config.plaid_client()?),
		Arc::new(MemoryStore::default()),
	);
	let addr = config.listen_addr();
	let listener = TcpListener::bind(&addr).await?;

	tracing::info!(%addr, env = %config.plaid_env, "Plaid relay listening.");

	server::serve(listener, server::router(relay), server::shutdown_signal()).await?;

	Ok(())
}
