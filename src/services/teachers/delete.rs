use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use super::get::teacher_not_found;

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 登录账号在同一事务中删除
    if storage.delete_teacher(teacher_id).await? {
        info!("Teacher {} and its user account deleted", teacher_id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(teacher_not_found(teacher_id))
    }
}
