use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use super::get::course_not_found;

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 同时清除选课与授课关联
    if storage.delete_course(course_id).await? {
        info!("Course {} deleted", course_id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(course_not_found(course_id))
    }
}
