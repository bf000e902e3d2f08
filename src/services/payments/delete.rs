use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PaymentService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if storage.delete_payment(payment_id).await? {
        info!("Payment {} deleted", payment_id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PaymentNotFound,
            format!("Payment not found with id: {payment_id}"),
        )))
    }
}
