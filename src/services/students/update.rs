use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = update.validate() {
        return Ok(e.into_response());
    }

    let storage = service.get_storage(request);

    // 修改邮箱时不能与其他学生冲突
    if let Some(email) = update.email.as_deref().map(str::trim)
        && let Some(existing) = storage.get_student_by_email(email).await?
        && existing.id != student_id
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EmailTaken,
            format!("Email already in use: {email}"),
        )));
    }

    match storage.update_student(student_id, update).await? {
        Some(student) => {
            info!("Student {} updated", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            format!("Student not found with id: {student_id}"),
        ))),
    }
}
