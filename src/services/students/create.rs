use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = student.validate() {
        return Ok(e.into_response());
    }

    let storage = service.get_storage(request);

    // 邮箱唯一
    if storage
        .get_student_by_email(student.email.trim())
        .await?
        .is_some()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EmailTaken,
            format!("Email already in use: {}", student.email.trim()),
        )));
    }

    // 不存在的课程 ID 由存储层以校验错误返回
    let created = storage.create_student(student).await?;
    info!("Student {} created with id {}", created.name, created.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Student created successfully",
    )))
}
