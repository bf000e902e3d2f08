use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let courses = storage.list_courses().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        courses,
        "Courses retrieved successfully",
    )))
}

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(course_id).await? {
        Some(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course retrieved successfully",
        ))),
        None => Ok(course_not_found(course_id)),
    }
}

pub async fn list_course_students(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if storage.get_course_by_id(course_id).await?.is_none() {
        return Ok(course_not_found(course_id));
    }

    let students = storage.list_course_students(course_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        students,
        "Course students retrieved successfully",
    )))
}

pub(super) fn course_not_found(course_id: i64) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        format!("Course not found with id: {course_id}"),
    ))
}
