//! 教师自助查询：只返回当前登录教师自己的数据

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use super::get::teacher_not_found;
use crate::middlewares::RequireJWT;
use crate::models::expenses::{entities::ExpenseCategory, requests::ExpenseListQuery};
use crate::models::teachers::responses::{
    TeacherCoursePaymentsResponse, TeacherSalaryPaymentsResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::money::sum_amounts;
use crate::utils::month::resolve_month;

fn current_teacher_id(request: &HttpRequest) -> Result<i64, HttpResponse> {
    RequireJWT::extract_user_id(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user id",
        ))
    })
}

pub async fn get_me(service: &TeacherService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.get_teacher_by_id(teacher_id).await? {
        Some(teacher) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher profile retrieved successfully",
        ))),
        None => Ok(teacher_not_found(teacher_id)),
    }
}

pub async fn get_my_courses(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let courses = storage.list_teacher_courses(teacher_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        courses,
        "Teacher courses retrieved successfully",
    )))
}

pub async fn get_my_salary_payments(
    service: &TeacherService,
    request: &HttpRequest,
    month: Option<String>,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let month = resolve_month(month.as_deref())?;

    let storage = service.get_storage(request);
    let items = storage
        .list_expenses(ExpenseListQuery {
            month: Some(month.clone()),
            category: Some(ExpenseCategory::Salary),
            teacher_id: Some(teacher_id),
        })
        .await?;

    let response = TeacherSalaryPaymentsResponse {
        month,
        total: sum_amounts(items.iter().map(|e| e.amount)),
        items,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Salary payments retrieved successfully",
    )))
}

pub async fn get_my_course_payments(
    service: &TeacherService,
    request: &HttpRequest,
    month: Option<String>,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let month = resolve_month(month.as_deref())?;

    let storage = service.get_storage(request);
    let items = storage
        .list_teacher_course_payments(teacher_id, &month)
        .await?;

    let response = TeacherCoursePaymentsResponse {
        month,
        total: sum_amounts(items.iter().map(|p| p.amount)),
        items,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Course payments retrieved successfully",
    )))
}
