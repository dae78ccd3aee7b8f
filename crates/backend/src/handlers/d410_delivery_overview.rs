use axum::{http::StatusCode, Json};
use contracts::dashboards::d410_delivery_overview::OverviewResponse;

use crate::dashboards::d410_delivery_overview::service;

/// GET /api/d410/overview
pub async fn get_overview() -> Result<Json<OverviewResponse>, StatusCode> {
    match service::get_overview().await {
        Ok(response) => {
            tracing::info!(
                "D410 Dashboard: Returning {} KPI cards and {} charts",
                response.kpis.len(),
                response.charts.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D410 Dashboard: Failed to build overview: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
