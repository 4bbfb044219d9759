// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use referral_login_server::{
    api::router, blockchain::ChainClient, config::Config, state::AppState, storage::UserDatabase,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::from_env();

    let db = UserDatabase::open(&config.user_db_path()).expect("Failed to open user database");
    tracing::info!(
        path = %config.user_db_path().display(),
        has_balance_column = db.has_balance_column(),
        "User database opened"
    );

    let chain =
        ChainClient::new(config.network.clone()).expect("Failed to build chain client");
    tracing::info!(
        network = chain.network().name,
        chain_id = chain.network().chain_id,
        token = config.token_address.as_deref().unwrap_or("<unset>"),
        "Chain client ready"
    );
    if config.token_address.is_none() {
        tracing::warn!("TOKEN_ADDRESS not set; balance-based invite eligibility is disabled");
    }

    let state = AppState::new(Arc::new(db), Arc::new(chain), config.token_address.clone());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Referral login server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received");
}
