use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};

/// 选课，重复选课不报错
pub async fn enroll(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 学生或课程不存在时存储层返回 NotFound
    if storage.enroll_student(student_id, course_id).await? {
        info!("Student {} enrolled in course {}", student_id, course_id);
    }

    student_response(service, request, student_id, "Student enrolled successfully").await
}

pub async fn unenroll(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if !storage.unenroll_student(student_id, course_id).await? {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            format!("Student {student_id} is not enrolled in course {course_id}"),
        )));
    }

    info!("Student {} unenrolled from course {}", student_id, course_id);
    student_response(service, request, student_id, "Student unenrolled successfully").await
}

// 返回最新的学生信息（含课程）
async fn student_response(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    message: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_student_by_id(student_id).await? {
        Some(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(student, message))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            format!("Student not found with id: {student_id}"),
        ))),
    }
}
