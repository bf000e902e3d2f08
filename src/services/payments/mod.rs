pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::payments::requests::{CreatePaymentRequest, PaymentListQuery};
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
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

    // 缴费列表，可按月份、学生、课程过滤
    pub async fn list_payments(
        &self,
        request: &HttpRequest,
        query: PaymentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, request, query).await
    }

    pub async fn create_payment(
        &self,
        request: &HttpRequest,
        payment: CreatePaymentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_payment(self, request, payment).await
    }

    pub async fn delete_payment(
        &self,
        request: &HttpRequest,
        payment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_payment(self, request, payment_id).await
    }
}
