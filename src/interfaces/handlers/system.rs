use actix_web::{get, web, HttpResponse, Responder};
use humantime::format_duration;
use std::time::Duration;
use serde::Serialize;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize, Clone, Default)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    store: String,
    store_backend: String,
    version: String,
}

async fn build_health_response(state: &web::Data<AppState>) -> (bool, HealthCheckResponse) {
    let now_utc = chrono::Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let (store_ok, store_status) = match state.store.check_connection().await {
        Ok(_) => (true, "OK".to_string()),
        Err(e) => {
            tracing::warn!("Health check store probe failed: {}", e);
            (false, "Unavailable".to_string())
        }
    };

    let response = HealthCheckResponse {
        status: if store_ok { "healthy" } else { "degraded" }.to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        store: store_status,
        store_backend: format!("{:?}", state.config.store_backend).to_lowercase(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (store_ok, response)
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    match build_health_response(&state).await {
        (true, response) => HttpResponse::Ok().json(response),
        (false, response) => HttpResponse::ServiceUnavailable().json(response),
    }
}
