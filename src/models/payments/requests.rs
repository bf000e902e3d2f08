use serde::Deserialize;

use crate::utils::month::{is_valid_month, parse_date};
use crate::utils::validate::FieldErrors;

// 创建缴费请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub amount: Option<f64>,
    // 缺省为当天
    pub payment_date: Option<String>,
    // 缺省取缴费日期所在月
    pub payment_month: Option<String>,
    pub student_name: Option<String>,
    pub course_name: Option<String>,
}

impl CreatePaymentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            self.student_id.is_some(),
            "studentId",
            "Student ID is required!",
        );
        errors.check(self.course_id.is_some(), "courseId", "Course ID is required!");
        match self.amount {
            Some(amount) => errors.check(
                amount.is_finite() && amount > 0.0,
                "amount",
                "Amount must be positive!",
            ),
            None => errors.add("amount", "Amount is required!"),
        }
        if let Some(date) = self.payment_date.as_deref().filter(|d| !d.is_empty())
            && parse_date(date).is_err()
        {
            errors.add("paymentDate", "Payment date must be in YYYY-MM-DD format");
        }
        if let Some(month) = self.payment_month.as_deref().filter(|m| !m.is_empty()) {
            errors.check(
                is_valid_month(month),
                "paymentMonth",
                "Payment month must be in YYYY-MM format",
            );
        }
        errors.finish()
    }
}

// 存储层使用：日期与账期已补全
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub student_id: i64,
    pub course_id: i64,
    pub amount: f64,
    pub payment_date: String,
    pub payment_month: String,
    // 为空时由存储层从学生、课程记录补全
    pub student_name: Option<String>,
    pub course_name: Option<String>,
}

// 缴费列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListQuery {
    pub month: Option<String>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payment_validation() {
        let req: CreatePaymentRequest =
            serde_json::from_str(r#"{"courseId":1,"amount":0,"paymentMonth":"2025-8"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("studentId"), Some("Student ID is required!"));
        assert_eq!(errors.get("amount"), Some("Amount must be positive!"));
        assert!(errors.get("paymentMonth").is_some());
        assert!(errors.get("courseId").is_none());
    }

    #[test]
    fn test_create_payment_minimal() {
        let req: CreatePaymentRequest =
            serde_json::from_str(r#"{"studentId":1,"courseId":2,"amount":500}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
