use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FinanceService;
use crate::models::finance::responses::{AllUnpaidStudentsResponse, UnpaidStudentsResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::month::resolve_month;

/// 某课程某月未缴费的选课学生
pub async fn course_unpaid_students(
    service: &FinanceService,
    request: &HttpRequest,
    course_id: i64,
    month: Option<String>,
) -> ActixResult<HttpResponse> {
    let month = resolve_month(month.as_deref())?;
    let storage = service.get_storage(request);

    let Some(course) = storage.get_course_by_id(course_id).await? else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            format!("Course not found with id: {course_id}"),
        )));
    };

    let students = storage.list_unpaid_students(course_id, &month).await?;
    let response = UnpaidStudentsResponse {
        course_id: course.id,
        course_name: course.name,
        month,
        count: students.len(),
        students,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Unpaid students retrieved successfully",
    )))
}

/// 所有课程的未缴费学生
pub async fn all_unpaid_students(
    service: &FinanceService,
    request: &HttpRequest,
    month: Option<String>,
) -> ActixResult<HttpResponse> {
    let month = resolve_month(month.as_deref())?;
    let storage = service.get_storage(request);

    let mut courses = Vec::new();
    for course in storage.list_courses().await? {
        let students = storage.list_unpaid_students(course.id, &month).await?;
        courses.push(UnpaidStudentsResponse {
            course_id: course.id,
            course_name: course.name,
            month: month.clone(),
            count: students.len(),
            students,
        });
    }

    let response = AllUnpaidStudentsResponse {
        total_count: courses.iter().map(|c| c.count).sum(),
        month,
        courses,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Unpaid students retrieved successfully",
    )))
}
