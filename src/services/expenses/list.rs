use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExpenseService;
use crate::models::ApiResponse;
use crate::models::expenses::requests::ExpenseListQuery;
use crate::utils::month::resolve_month;

pub async fn list_expenses(
    service: &ExpenseService,
    request: &HttpRequest,
    mut query: ExpenseListQuery,
) -> ActixResult<HttpResponse> {
    if query.month.as_deref().is_some_and(|m| !m.trim().is_empty()) {
        query.month = Some(resolve_month(query.month.as_deref())?);
    } else {
        query.month = None;
    }

    let storage = service.get_storage(request);
    let expenses = storage.list_expenses(query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        expenses,
        "Expenses retrieved successfully",
    )))
}
