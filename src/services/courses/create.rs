use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::requests::CreateCourseRequest;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = course.validate() {
        return Ok(e.into_response());
    }

    let storage = service.get_storage(request);
    let created = storage.create_course(course).await?;
    info!("Course {} created with id {}", created.name, created.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Course created successfully",
    )))
}
