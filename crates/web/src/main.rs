use std::io::BufRead;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use registry_client::RegistryApi;
use registry_web::auth::directory::UserDirectory;
use registry_web::auth::password::hash_password;
use registry_web::config::ServerConfig;
use registry_web::router::build_app_router;
use registry_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `registry-web hash-password` reads a password from stdin and prints the
    // hash to paste into REGISTRY_USERS.
    if std::env::args().nth(1).as_deref() == Some("hash-password") {
        return print_password_hash();
    }

    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "registry_web=debug,registry_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    match &config.registry_api_url {
        Some(url) => tracing::info!(%url, "Registry API base URL fixed by configuration"),
        None => tracing::warn!("REGISTRY_API_URL unset; registry calls target the request host"),
    }

    // --- Login directory ---
    let directory = UserDirectory::parse(&config.users).context("Invalid REGISTRY_USERS")?;
    if directory.is_empty() {
        tracing::warn!("REGISTRY_USERS is empty; nobody can log in");
    } else {
        tracing::info!(users = directory.len(), "Login directory loaded");
    }

    // --- Registry client ---
    let registry = RegistryApi::new(Duration::from_secs(config.registry_api_timeout_secs))
        .context("Failed to build registry HTTP client")?;

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        registry: Arc::new(registry),
        authenticator: Arc::new(directory),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn print_password_hash() -> anyhow::Result<()> {
    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .context("Failed to read password from stdin")?;
    let password = password.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("Empty password");
    }

    let hash = hash_password(password).map_err(|e| anyhow::anyhow!("Hashing failed: {e}"))?;
    println!("{hash}");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
