//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::Resolution;
use crate::state::AppState;

/// Path resolved by the self-test, the same worked example error pages show.
const SELF_TEST_PATH: &str = "/13/wall";

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Resolver**: Resolves a known-good path and reports the rule count
/// 2. **Heartbeat Queue**: Checks if the channel is open and reports capacity
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "resolver": {
///       "status": "ok",
///       "message": "2 version rules loaded"
///     },
///     "heartbeat_queue": {
///       "status": "ok",
///       "message": "Heartbeat disabled, capacity: 64"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let resolver_check = check_resolver(&state);

    let queue_check = check_heartbeat_queue(&state);

    let all_healthy = resolver_check.status == "ok" && queue_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            resolver: resolver_check,
            heartbeat_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that the resolver produces a redirect for the worked example.
fn check_resolver(state: &AppState) -> CheckStatus {
    match state.resolver.resolve(SELF_TEST_PATH) {
        Ok(Resolution::Redirect(_)) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "{} version rules loaded",
                state.resolver.rules().len()
            )),
        },
        Ok(Resolution::Home) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{SELF_TEST_PATH} resolved to the home page")),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{SELF_TEST_PATH} failed to resolve: {}", e.kind())),
        },
    }
}

/// Checks if the heartbeat queue is operational.
fn check_heartbeat_queue(state: &AppState) -> CheckStatus {
    if state.heartbeat_sender.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Heartbeat queue is closed".to_string()),
        }
    } else {
        let mode = if state.heartbeat_enabled {
            "enabled"
        } else {
            "disabled"
        };

        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "Heartbeat {}, capacity: {}",
                mode,
                state.heartbeat_sender.capacity()
            )),
        }
    }
}
