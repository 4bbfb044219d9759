// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// User database availability.
    pub database: String,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Check that the user database answers a cheap read.
fn check_database(state: &AppState) -> String {
    match state.db.count_invitees("") {
        Ok(_) => "ok".to_string(),
        Err(_) => "unavailable".to_string(),
    }
}

/// Health check endpoint handler.
///
/// Returns 200 if all checks pass, 503 if any check fails.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ReadyResponse),
        (status = 503, description = "Service is unhealthy", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let database = check_database(&state);
    let all_ok = database == "ok";

    let response = ReadyResponse {
        status: if all_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            database,
        },
    };

    let status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
/// Does not check dependencies - use /health for that.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{BalanceReader, ChainClientError};
    use crate::storage::UserDatabase;
    use alloy::primitives::U256;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct NoChain;

    #[async_trait]
    impl BalanceReader for NoChain {
        async fn token_balance(&self, _: &str, _: &str) -> Result<U256, ChainClientError> {
            Ok(U256::ZERO)
        }
    }

    #[tokio::test]
    async fn health_reports_ok_with_working_database() {
        let dir = TempDir::new().unwrap();
        let db = UserDatabase::open(&dir.path().join("users.redb")).unwrap();
        let state = AppState::new(Arc::new(db), Arc::new(NoChain), None);

        let (status, Json(resp)) = health(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.checks.database, "ok");
    }

    #[tokio::test]
    async fn liveness_always_ok() {
        let Json(resp) = liveness().await;
        assert_eq!(resp.status, "ok");
    }
}
