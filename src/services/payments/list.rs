use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::ApiResponse;
use crate::models::payments::requests::PaymentListQuery;
use crate::utils::month::resolve_month;

pub async fn list_payments(
    service: &PaymentService,
    request: &HttpRequest,
    mut query: PaymentListQuery,
) -> ActixResult<HttpResponse> {
    // 只在显式给出月份时过滤
    if query.month.as_deref().is_some_and(|m| !m.trim().is_empty()) {
        query.month = Some(resolve_month(query.month.as_deref())?);
    } else {
        query.month = None;
    }

    let storage = service.get_storage(request);
    let payments = storage.list_payments(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        payments,
        "Payments retrieved successfully",
    )))
}
