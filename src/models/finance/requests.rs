use serde::{Deserialize, Serialize};

use crate::utils::month::parse_date;
use crate::utils::validate::FieldErrors;

// 工资发放类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalaryPaymentType {
    #[default]
    FullSalary,
    PartialSalary,
    Bonus,
    Advance,
}

impl SalaryPaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryPaymentType::FullSalary => "FULL_SALARY",
            SalaryPaymentType::PartialSalary => "PARTIAL_SALARY",
            SalaryPaymentType::Bonus => "BONUS",
            SalaryPaymentType::Advance => "ADVANCE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SalaryPaymentType::FullSalary => "Full Salary",
            SalaryPaymentType::PartialSalary => "Partial Salary",
            SalaryPaymentType::Bonus => "Bonus",
            SalaryPaymentType::Advance => "Advance",
        }
    }

    /// 支出记录名称
    pub fn expense_name(&self, teacher_name: &str) -> String {
        let prefix = match self {
            SalaryPaymentType::FullSalary => "Salary",
            other => other.display_name(),
        };
        format!("{prefix} - {teacher_name}")
    }

    /// 默认备注
    pub fn default_description(&self, month: &str) -> String {
        format!("{} for {month}", self.display_name())
    }
}

// 发放工资请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPaymentRequest {
    pub teacher_id: Option<i64>,
    // 缺省为当前月
    pub month: Option<String>,
    // 缺省为教师月薪
    pub amount: Option<f64>,
    // 缺省为当天
    pub payment_date: Option<String>,
    pub description: Option<String>,
    pub payment_type: Option<SalaryPaymentType>,
}

impl SalaryPaymentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            self.teacher_id.is_some(),
            "teacherId",
            "Teacher ID is required",
        );
        if let Some(amount) = self.amount {
            errors.check(
                amount.is_finite() && amount > 0.0,
                "amount",
                "Amount must be positive if provided",
            );
        }
        if let Some(date) = self.payment_date.as_deref().filter(|d| !d.is_empty())
            && parse_date(date).is_err()
        {
            errors.add("paymentDate", "Payment date must be in YYYY-MM-DD format");
        }
        errors.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_type_names() {
        assert_eq!(
            SalaryPaymentType::FullSalary.expense_name("Ram"),
            "Salary - Ram"
        );
        assert_eq!(
            SalaryPaymentType::PartialSalary.expense_name("Ram"),
            "Partial Salary - Ram"
        );
        assert_eq!(SalaryPaymentType::Bonus.expense_name("Ram"), "Bonus - Ram");
        assert_eq!(
            SalaryPaymentType::Advance.expense_name("Ram"),
            "Advance - Ram"
        );
        assert_eq!(
            SalaryPaymentType::FullSalary.default_description("2025-08"),
            "Full Salary for 2025-08"
        );
    }

    #[test]
    fn test_salary_request_defaults() {
        let req: SalaryPaymentRequest = serde_json::from_str(r#"{"teacherId":4}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.payment_type.unwrap_or_default(), SalaryPaymentType::FullSalary);

        let req: SalaryPaymentRequest =
            serde_json::from_str(r#"{"amount":-1,"paymentType":"BONUS"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("teacherId"), Some("Teacher ID is required"));
        assert_eq!(errors.get("amount"), Some("Amount must be positive if provided"));
        assert_eq!(req.payment_type, Some(SalaryPaymentType::Bonus));
    }
}
