//! Personaliz Backend Server

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use personaliz_groq::GroqClient;
use personaliz_server::{http, AppState, Config};

/// Personaliz backend: settings, chat relay and speech-to-text.
#[derive(Parser, Debug)]
#[command(name = "personaliz-server", about = "Personaliz HTTP backend", version)]
struct Args {
    /// HTTP server address
    #[arg(long, env = "PERSONALIZ_BIND", default_value = "127.0.0.1:8000")]
    bind: String,

    /// Base URL of the Groq API
    #[arg(long, env = "GROQ_API_BASE", default_value = personaliz_groq::GROQ_API_BASE)]
    groq_api_base: String,

    /// Groq API key used until one is saved in settings
    #[arg(long, env = "GROQ_API_KEY", default_value = "", hide_env_values = true)]
    groq_api_key: String,

    /// Chat model used until one is saved in settings
    #[arg(long, env = "GROQ_MODEL", default_value = personaliz_core::DEFAULT_MODEL)]
    groq_model: String,

    /// Ceiling for blocking completions and transcriptions, in seconds
    #[arg(long, default_value = "60")]
    complete_timeout_secs: u64,

    /// Ceiling for streamed completions, in seconds
    #[arg(long, default_value = "120")]
    stream_timeout_secs: u64,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            http_bind_addr: args.bind,
            groq_api_base: args.groq_api_base,
            groq_api_key: args.groq_api_key,
            default_model: args.groq_model,
            complete_timeout_secs: args.complete_timeout_secs,
            stream_timeout_secs: args.stream_timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("personaliz_server=info,personaliz_groq=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    // Load config
    let config = Config::from(Args::parse());
    let http_addr: SocketAddr = config.http_bind_addr.parse()?;

    let groq = GroqClient::with_base_url(&config.groq_api_base)?
        .with_timeouts(config.complete_timeout(), config.stream_timeout());
    let state = AppState::new(&config, groq);

    info!(
        http_addr = %http_addr,
        groq_api_base = %config.groq_api_base,
        env_key = !config.groq_api_key.trim().is_empty(),
        "Starting Personaliz backend"
    );

    let router = http::create_router(state);
    let listener = TcpListener::bind(http_addr).await?;
    info!("HTTP server listening on {}", http_addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!(error = %e, "HTTP server error");
        return Err(e.into());
    }

    Ok(())
}
