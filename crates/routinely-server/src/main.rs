//! Routinely HTTP server.
//!
//! Exposes the single server-side piece of the assistant: a pass-through
//! chat endpoint that routes the latest user message to a system prompt
//! and forwards it to the text-generation service.

mod routes;

use std::sync::Arc;

use routinely_core::gateway::OpenAiGateway;
use routinely_core::{Config, PromptRouter};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let gateway = match OpenAiGateway::from_config(&config.gateway) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(routes::AppState {
        router: PromptRouter::new(),
        gateway: Arc::new(gateway),
    });
    let app = routes::app(state);

    tracing::info!(bind = %config.server.bind, "starting server");
    let listener = match tokio::net::TcpListener::bind(&config.server.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("error: cannot bind {}: {e}", config.server.bind);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
