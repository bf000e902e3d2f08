pub mod create;
pub mod delete;
pub mod list;
pub mod reports;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::expenses::requests::{CreateExpenseRequest, ExpenseListQuery};
use crate::storage::Storage;

pub struct ExpenseService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExpenseService {
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

    pub async fn list_expenses(
        &self,
        request: &HttpRequest,
        query: ExpenseListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_expenses(self, request, query).await
    }

    pub async fn create_expense(
        &self,
        request: &HttpRequest,
        expense: CreateExpenseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_expense(self, request, expense).await
    }

    pub async fn delete_expense(
        &self,
        request: &HttpRequest,
        expense_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_expense(self, request, expense_id).await
    }

    // 某月支出合计及分类汇总
    pub async fn get_total(
        &self,
        request: &HttpRequest,
        month: Option<String>,
    ) -> ActixResult<HttpResponse> {
        reports::get_total(self, request, month).await
    }

    // 教师名义工资合计
    pub async fn get_teacher_salaries(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        reports::get_teacher_salaries(self, request).await
    }

    // 潜在收入
    pub async fn get_potential_revenue(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        reports::get_potential_revenue(self, request).await
    }
}
