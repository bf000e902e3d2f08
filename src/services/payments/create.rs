use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PaymentService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::payments::requests::{CreatePaymentRequest, NewPayment};
use crate::utils::month::{month_of_date, today};

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 补全缴费日期与账期：日期缺省为当天，账期缺省取日期所在月
pub(crate) fn prepare_payment(req: CreatePaymentRequest) -> Result<NewPayment> {
    let payment_date = non_empty(req.payment_date).unwrap_or_else(today);
    let payment_month = match non_empty(req.payment_month) {
        Some(month) => month,
        None => month_of_date(&payment_date)?,
    };

    Ok(NewPayment {
        student_id: req.student_id.unwrap_or_default(),
        course_id: req.course_id.unwrap_or_default(),
        amount: req.amount.unwrap_or_default(),
        payment_date,
        payment_month,
        student_name: non_empty(req.student_name),
        course_name: non_empty(req.course_name),
    })
}

pub async fn create_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment: CreatePaymentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = payment.validate() {
        return Ok(e.into_response());
    }

    let storage = service.get_storage(request);
    let new_payment = prepare_payment(payment)?;

    // 学生/课程不存在返回 404，同月重复缴费返回 400
    let created = storage.create_payment(new_payment).await?;
    info!(
        "Payment {} recorded: student {} course {} month {:?} amount {}",
        created.id, created.student_id, created.course_id, created.payment_month, created.amount
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Payment recorded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: Option<&str>, month: Option<&str>) -> CreatePaymentRequest {
        CreatePaymentRequest {
            student_id: Some(1),
            course_id: Some(2),
            amount: Some(500.0),
            payment_date: date.map(str::to_string),
            payment_month: month.map(str::to_string),
            student_name: Some("  ".to_string()),
            course_name: None,
        }
    }

    #[test]
    fn test_month_derived_from_date() {
        let payment = prepare_payment(request(Some("2025-08-14"), None)).unwrap();
        assert_eq!(payment.payment_date, "2025-08-14");
        assert_eq!(payment.payment_month, "2025-08");
        assert_eq!(payment.student_name, None);
    }

    #[test]
    fn test_explicit_month_wins() {
        let payment = prepare_payment(request(Some("2025-08-31"), Some("2025-09"))).unwrap();
        assert_eq!(payment.payment_month, "2025-09");
    }

    #[test]
    fn test_defaults_to_today() {
        let payment = prepare_payment(request(None, Some(""))).unwrap();
        assert_eq!(payment.payment_date, today());
        assert_eq!(payment.payment_month, &today()[..7]);
    }
}
