use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let teachers = storage.list_teachers().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        teachers,
        "Teachers retrieved successfully",
    )))
}

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        )));
    };

    // 教师只能查看自己的档案
    if !user.is_admin() && user.id != teacher_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only view your own teacher profile",
        )));
    }

    let storage = service.get_storage(request);
    match storage.get_teacher_by_id(teacher_id).await? {
        Some(teacher) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher retrieved successfully",
        ))),
        None => Ok(teacher_not_found(teacher_id)),
    }
}

pub(crate) fn teacher_not_found(teacher_id: i64) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::TeacherNotFound,
        format!("Teacher not found with id: {teacher_id}"),
    ))
}
