pub mod create;
pub mod delete;
pub mod enrollment;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 学生列表，支持按姓名/邮箱搜索与按课程过滤
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        get::list_students(self, request, query).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }

    // 选课
    pub async fn enroll(
        &self,
        request: &HttpRequest,
        student_id: i64,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        enrollment::enroll(self, request, student_id, course_id).await
    }

    // 退课
    pub async fn unenroll(
        &self,
        request: &HttpRequest,
        student_id: i64,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        enrollment::unenroll(self, request, student_id, course_id).await
    }
}
