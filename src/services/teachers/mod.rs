pub mod create;
pub mod delete;
pub mod get;
pub mod me;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{CreateTeacherRequest, UpdateTeacherRequest};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_teachers(self, request).await
    }

    // 管理员或教师本人可查看
    pub async fn get_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_teacher(self, request, teacher_id).await
    }

    // 创建教师档案与登录账号
    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        teacher: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, request, teacher).await
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, request, teacher_id, update).await
    }

    pub async fn delete_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, request, teacher_id).await
    }

    /// 当前登录教师的档案
    pub async fn get_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_me(self, request).await
    }

    pub async fn get_my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_my_courses(self, request).await
    }

    pub async fn get_my_salary_payments(
        &self,
        request: &HttpRequest,
        month: Option<String>,
    ) -> ActixResult<HttpResponse> {
        me::get_my_salary_payments(self, request, month).await
    }

    pub async fn get_my_course_payments(
        &self,
        request: &HttpRequest,
        month: Option<String>,
    ) -> ActixResult<HttpResponse> {
        me::get_my_course_payments(self, request, month).await
    }
}
