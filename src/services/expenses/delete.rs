use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExpenseService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_expense(
    service: &ExpenseService,
    request: &HttpRequest,
    expense_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if storage.delete_expense(expense_id).await? {
        info!("Expense {} deleted", expense_id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExpenseNotFound,
            format!("Expense not found with id: {expense_id}"),
        )))
    }
}
