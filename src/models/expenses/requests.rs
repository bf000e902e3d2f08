use serde::Deserialize;

use super::entities::ExpenseCategory;
use crate::utils::month::{is_valid_month, parse_date};
use crate::utils::validate::FieldErrors;

// 创建支出请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub name: String,
    pub amount: Option<f64>,
    // 缺省为当天
    pub expense_date: Option<String>,
    // 缺省取支出日期所在月
    pub expense_month: Option<String>,
    // 缺省 UTILITY
    pub category: Option<ExpenseCategory>,
    pub teacher_id: Option<i64>,
    pub description: Option<String>,
}

impl CreateExpenseRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text(&self.name, "name", "Expense name is required!");
        match self.amount {
            Some(amount) => errors.check(
                amount.is_finite() && amount > 0.0,
                "amount",
                "Amount must be positive!",
            ),
            None => errors.add("amount", "Amount is required!"),
        }
        if let Some(date) = self.expense_date.as_deref().filter(|d| !d.is_empty())
            && parse_date(date).is_err()
        {
            errors.add("expenseDate", "Expense date must be in YYYY-MM-DD format");
        }
        if let Some(month) = self.expense_month.as_deref().filter(|m| !m.is_empty()) {
            errors.check(
                is_valid_month(month),
                "expenseMonth",
                "Expense month must be in YYYY-MM format",
            );
        }
        errors.finish()
    }
}

// 存储层使用：默认值已补全
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub name: String,
    pub amount: f64,
    pub expense_date: String,
    pub expense_month: String,
    pub category: ExpenseCategory,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub description: Option<String>,
}

// 支出列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    pub month: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub teacher_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_expense_validation() {
        let req: CreateExpenseRequest =
            serde_json::from_str(r#"{"name":" ","expenseDate":"01/08/2025"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Expense name is required!"));
        assert_eq!(errors.get("amount"), Some("Amount is required!"));
        assert!(errors.get("expenseDate").is_some());
    }

    #[test]
    fn test_create_expense_category() {
        let req: CreateExpenseRequest =
            serde_json::from_str(r#"{"name":"Rent","amount":200,"category":"RENT"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.category, Some(ExpenseCategory::Rent));

        assert!(
            serde_json::from_str::<CreateExpenseRequest>(
                r#"{"name":"x","amount":1,"category":"FOOD"}"#
            )
            .is_err()
        );
    }
}
