use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use super::get::teacher_not_found;
use crate::models::ApiResponse;
use crate::models::teachers::requests::{TeacherChanges, UpdateTeacherRequest};
use crate::utils::password::hash_password;

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    update: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = update.validate() {
        return Ok(e.into_response());
    }

    let password_hash = match update.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let changes = TeacherChanges {
        name: update.name.map(|n| n.trim().to_string()),
        email: update.email.map(|e| e.trim().to_string()),
        phone: update.phone.map(|p| p.trim().to_string()),
        salary: update.salary,
        password_hash,
    };

    let storage = service.get_storage(request);
    match storage.update_teacher(teacher_id, changes).await? {
        Some(teacher) => {
            info!("Teacher {} updated", teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            )))
        }
        None => Ok(teacher_not_found(teacher_id)),
    }
}
