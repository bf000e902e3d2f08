use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::teachers::requests::{CreateTeacherRequest, NewTeacher};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = teacher.validate() {
        return Ok(e.into_response());
    }

    let storage = service.get_storage(request);
    let username = teacher.username.trim().to_string();

    if storage.get_user_by_username(&username).await?.is_some() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UsernameTaken,
            format!("Username already exists: {username}"),
        )));
    }

    let new_teacher = NewTeacher {
        username,
        password_hash: hash_password(&teacher.password)?,
        name: teacher.name.trim().to_string(),
        email: teacher
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty()),
        phone: teacher.phone.trim().to_string(),
        // validate 已保证存在
        salary: teacher.salary.unwrap_or_default(),
    };

    let created = storage.create_teacher(new_teacher).await?;
    info!(
        "Teacher {} created with login {}",
        created.name, created.username
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Teacher created successfully",
    )))
}
