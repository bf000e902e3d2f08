use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub uptime_seconds: i64,
}

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    let response = HealthResponse {
        status: "UP",
        version: env!("CARGO_PKG_VERSION"),
        environment: service.get_config().app.environment.clone(),
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
}
