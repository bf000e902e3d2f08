use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExpenseService;
use crate::models::ApiResponse;
use crate::models::expenses::requests::{CreateExpenseRequest, NewExpense};
use crate::services::teachers::get::teacher_not_found;
use crate::utils::month::{month_of_date, today};

pub async fn create_expense(
    service: &ExpenseService,
    request: &HttpRequest,
    expense: CreateExpenseRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = expense.validate() {
        return Ok(e.into_response());
    }

    let storage = service.get_storage(request);

    // 关联教师时冗余保存教师姓名
    let teacher_name = match expense.teacher_id {
        Some(teacher_id) => match storage.get_teacher_by_id(teacher_id).await? {
            Some(teacher) => Some(teacher.name),
            None => return Ok(teacher_not_found(teacher_id)),
        },
        None => None,
    };

    let expense_date = expense
        .expense_date
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(today);
    let expense_month = match expense.expense_month.filter(|m| !m.trim().is_empty()) {
        Some(month) => month,
        None => month_of_date(&expense_date)?,
    };

    let new_expense = NewExpense {
        name: expense.name,
        amount: expense.amount.unwrap_or_default(),
        expense_date,
        expense_month,
        category: expense.category.unwrap_or_default(),
        teacher_id: expense.teacher_id,
        teacher_name,
        description: expense.description,
    };

    let created = storage.create_expense(new_expense).await?;
    info!(
        "Expense {} recorded: {} {} for {}",
        created.id, created.category, created.amount, created.expense_month
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Expense recorded successfully",
    )))
}
