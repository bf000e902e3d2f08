pub mod admin;

pub mod auth;

pub mod courses;

pub mod expenses;

pub mod payments;

pub mod students;

pub mod system;

pub mod teachers;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use expenses::configure_expense_routes;
pub use payments::configure_payment_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;

use actix_web::web;

/// 注册全部路由
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_student_routes)
        .configure(configure_course_routes)
        .configure(configure_teacher_routes)
        .configure(configure_payment_routes)
        .configure(configure_expense_routes)
        .configure(configure_admin_routes)
        .configure(configure_system_routes);
}
