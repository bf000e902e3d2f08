pub mod salary;
pub mod summary;
pub mod unpaid;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::finance::requests::SalaryPaymentRequest;
use crate::storage::Storage;

/// 管理员财务功能：月度汇总、工资发放、欠费查询
pub struct FinanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl FinanceService {
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

    pub async fn financial_summary(
        &self,
        request: &HttpRequest,
        month: Option<String>,
    ) -> ActixResult<HttpResponse> {
        summary::financial_summary(self, request, month).await
    }

    pub async fn pay_teacher(
        &self,
        request: &HttpRequest,
        payment: SalaryPaymentRequest,
    ) -> ActixResult<HttpResponse> {
        salary::pay_teacher(self, request, payment).await
    }

    pub async fn unpaid_teachers(
        &self,
        request: &HttpRequest,
        month: Option<String>,
    ) -> ActixResult<HttpResponse> {
        salary::unpaid_teachers(self, request, month).await
    }

    pub async fn salary_history(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        salary::salary_history(self, request, teacher_id).await
    }

    pub async fn course_unpaid_students(
        &self,
        request: &HttpRequest,
        course_id: i64,
        month: Option<String>,
    ) -> ActixResult<HttpResponse> {
        unpaid::course_unpaid_students(self, request, course_id, month).await
    }

    pub async fn all_unpaid_students(
        &self,
        request: &HttpRequest,
        month: Option<String>,
    ) -> ActixResult<HttpResponse> {
        unpaid::all_unpaid_students(self, request, month).await
    }
}
