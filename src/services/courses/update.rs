use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use super::get::course_not_found;
use crate::models::ApiResponse;
use crate::models::courses::requests::UpdateCourseRequest;

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    update: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = update.validate() {
        return Ok(e.into_response());
    }

    let storage = service.get_storage(request);

    match storage.update_course(course_id, update).await? {
        Some(course) => {
            info!("Course {} updated", course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                course,
                "Course updated successfully",
            )))
        }
        None => Ok(course_not_found(course_id)),
    }
}
