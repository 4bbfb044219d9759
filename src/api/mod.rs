// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{LoginData, LoginRequest, LoginResponse},
    state::AppState,
};

pub mod health;
pub mod login;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(login::login))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(login::login, health::health, health::liveness),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            LoginData,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Login", description = "Wallet-signature login and referral bookkeeping"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
