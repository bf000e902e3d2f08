use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::teachers::TEACHER_SERVICE;
use crate::middlewares;
use crate::models::MonthQuery;
use crate::models::finance::requests::SalaryPaymentRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::users::entities::UserRole;
use crate::services::FinanceService;
use crate::utils::{SafeCourseIdI64, SafeTeacherIdI64};

// 懒加载的全局 FinanceService 实例
static FINANCE_SERVICE: Lazy<FinanceService> = Lazy::new(FinanceService::new_lazy);

pub async fn financial_summary(
    req: HttpRequest,
    query: web::Query<MonthQuery>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .financial_summary(&req, query.into_inner().month)
        .await
}

pub async fn pay_teacher(
    req: HttpRequest,
    payment_data: web::Json<SalaryPaymentRequest>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .pay_teacher(&req, payment_data.into_inner())
        .await
}

pub async fn unpaid_teachers(
    req: HttpRequest,
    query: web::Query<MonthQuery>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .unpaid_teachers(&req, query.into_inner().month)
        .await
}

pub async fn salary_history(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE.salary_history(&req, teacher_id.0).await
}

pub async fn course_unpaid_students(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    query: web::Query<MonthQuery>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .course_unpaid_students(&req, course_id.0, query.into_inner().month)
        .await
}

pub async fn all_unpaid_students(
    req: HttpRequest,
    query: web::Query<MonthQuery>,
) -> ActixResult<HttpResponse> {
    FINANCE_SERVICE
        .all_unpaid_students(&req, query.into_inner().month)
        .await
}

// 创建教师账号与档案
pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_teacher(&req, teacher_data.into_inner())
        .await
}

// 配置路由（仅管理员）
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/financial-summary", web::get().to(financial_summary))
            .route("/pay-teacher", web::post().to(pay_teacher))
            .route("/unpaid-teachers", web::get().to(unpaid_teachers))
            .route("/unpaid-students", web::get().to(all_unpaid_students))
            .route(
                "/courses/{course_id}/unpaid-students",
                web::get().to(course_unpaid_students),
            )
            .route(
                "/teachers/{teacher_id}/salary-history",
                web::get().to(salary_history),
            )
            .route("/create-teacher", web::post().to(create_teacher)),
    );
}
