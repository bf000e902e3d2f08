use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::MonthQuery;
use crate::models::teachers::requests::{CreateTeacherRequest, UpdateTeacherRequest};
use crate::models::users::entities::UserRole;
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TeacherService 实例
pub(crate) static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(&req).await
}

pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_teacher(&req, teacher_data.into_inner())
        .await
}

pub async fn get_teacher(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(&req, id.0).await
}

pub async fn update_teacher(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_teacher(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(&req, id.0).await
}

pub async fn get_me(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_me(&req).await
}

pub async fn get_my_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_my_courses(&req).await
}

pub async fn get_my_salary_payments(
    req: HttpRequest,
    query: web::Query<MonthQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .get_my_salary_payments(&req, query.into_inner().month)
        .await
}

pub async fn get_my_course_payments(
    req: HttpRequest,
    query: web::Query<MonthQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .get_my_course_payments(&req, query.into_inner().month)
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    // 管理员维护教师档案
    cfg.service(
        web::scope("/teachers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(create_teacher)),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_teacher)
                            // 教师只能查看自己，由服务层校验
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::put()
                            .to(update_teacher)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_teacher)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );

    // 教师查看本人数据
    cfg.service(
        web::scope("/api/teachers/me")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_me))
            .route("/courses", web::get().to(get_my_courses))
            .route("/salary-payments", web::get().to(get_my_salary_payments))
            .route("/course-payments", web::get().to(get_my_course_payments)),
    );
}
