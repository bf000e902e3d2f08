use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::MonthQuery;
use crate::models::expenses::requests::{CreateExpenseRequest, ExpenseListQuery};
use crate::models::users::entities::UserRole;
use crate::services::ExpenseService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ExpenseService 实例
static EXPENSE_SERVICE: Lazy<ExpenseService> = Lazy::new(ExpenseService::new_lazy);

pub async fn list_expenses(
    req: HttpRequest,
    query: web::Query<ExpenseListQuery>,
) -> ActixResult<HttpResponse> {
    EXPENSE_SERVICE.list_expenses(&req, query.into_inner()).await
}

pub async fn create_expense(
    req: HttpRequest,
    expense_data: web::Json<CreateExpenseRequest>,
) -> ActixResult<HttpResponse> {
    EXPENSE_SERVICE
        .create_expense(&req, expense_data.into_inner())
        .await
}

pub async fn delete_expense(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXPENSE_SERVICE.delete_expense(&req, id.0).await
}

pub async fn get_total(
    req: HttpRequest,
    query: web::Query<MonthQuery>,
) -> ActixResult<HttpResponse> {
    EXPENSE_SERVICE.get_total(&req, query.into_inner().month).await
}

pub async fn get_teacher_salaries(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXPENSE_SERVICE.get_teacher_salaries(&req).await
}

pub async fn get_potential_revenue(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXPENSE_SERVICE.get_potential_revenue(&req).await
}

// 配置路由（仅管理员）
pub fn configure_expense_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/expenses")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_expenses))
                    .route(web::post().to(create_expense)),
            )
            // 固定路径需先于 /{id} 注册
            .route("/total", web::get().to(get_total))
            .route("/teachers", web::get().to(get_teacher_salaries))
            .route("/revenue", web::get().to(get_potential_revenue))
            .route("/{id}", web::delete().to(delete_expense)),
    );
}
