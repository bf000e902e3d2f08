//! 月度财务汇总
//!
//! 收入为当月缴费之和，支出只计当月已记录的支出（包括已发放的工资）。
//! 教师名义工资仅作参考展示，不从利润中扣除。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};

use super::FinanceService;
use crate::errors::Result;
use crate::models::expenses::{
    entities::{Expense, ExpenseCategory},
    requests::ExpenseListQuery,
};
use crate::models::finance::responses::FinancialSummaryResponse;
use crate::models::payments::{entities::Payment, requests::PaymentListQuery};
use crate::models::teachers::entities::Teacher;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::expenses::reports::category_breakdown;
use crate::utils::money::{round2, sum_amounts};
use crate::utils::month::resolve_month;

pub fn compute_summary(
    month: &str,
    payments: &[Payment],
    expenses: &[Expense],
    teachers: &[Teacher],
) -> FinancialSummaryResponse {
    let revenue = sum_amounts(payments.iter().map(|p| p.amount));
    let recorded_expenses = sum_amounts(expenses.iter().map(|e| e.amount));
    let net_profit = round2(revenue - recorded_expenses);
    let profit_margin = if revenue > 0.0 {
        round2(net_profit / revenue * 100.0)
    } else {
        0.0
    };

    FinancialSummaryResponse {
        month: month.to_string(),
        revenue,
        recorded_expenses,
        net_profit,
        profit_margin,
        payment_count: payments.len(),
        expense_count: expenses.len(),
        salary_expenses: sum_amounts(
            expenses
                .iter()
                .filter(|e| e.category == ExpenseCategory::Salary)
                .map(|e| e.amount),
        ),
        expense_breakdown: category_breakdown(expenses),
        teacher_count: teachers.len(),
        total_teacher_salary: sum_amounts(teachers.iter().map(|t| t.salary)),
    }
}

async fn load_summary(
    service: &FinanceService,
    request: &HttpRequest,
    month: &str,
) -> Result<FinancialSummaryResponse> {
    let storage = service.get_storage(request);

    let payments = storage
        .list_payments(PaymentListQuery {
            month: Some(month.to_string()),
            ..Default::default()
        })
        .await?;
    let expenses = storage
        .list_expenses(ExpenseListQuery {
            month: Some(month.to_string()),
            ..Default::default()
        })
        .await?;
    let teachers = storage.list_teachers().await?;

    Ok(compute_summary(month, &payments, &expenses, &teachers))
}

pub async fn financial_summary(
    service: &FinanceService,
    request: &HttpRequest,
    month: Option<String>,
) -> ActixResult<HttpResponse> {
    let month = match resolve_month(month.as_deref()) {
        Ok(month) => month,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidMonth, e.message())));
        }
    };

    match load_summary(service, request, &month).await {
        Ok(summary) => {
            debug!(
                "Financial summary for {}: revenue {} expenses {} profit {}",
                summary.month, summary.revenue, summary.recorded_expenses, summary.net_profit
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                summary,
                "Financial summary retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to build financial summary for {}: {}", month, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to build financial summary for {month}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::expenses::reports::tests::expense;
    use chrono::Utc;

    fn payment(amount: f64) -> Payment {
        Payment {
            id: 0,
            student_id: 1,
            course_id: 1,
            amount,
            payment_date: "2025-08-05".to_string(),
            payment_month: Some("2025-08".to_string()),
            student_name: None,
            course_name: None,
            created_at: Utc::now(),
        }
    }

    fn teacher(salary: f64) -> Teacher {
        Teacher {
            id: 1,
            username: "teacher".to_string(),
            name: "Teacher".to_string(),
            email: None,
            phone: "9800000000".to_string(),
            salary,
            courses: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_revenue_minus_recorded_expenses() {
        let summary = compute_summary(
            "2025-08",
            &[payment(500.0), payment(700.0)],
            &[expense(200.0, ExpenseCategory::Rent)],
            &[teacher(30000.0)],
        );
        assert_eq!(summary.revenue, 1200.0);
        assert_eq!(summary.recorded_expenses, 200.0);
        assert_eq!(summary.net_profit, 1000.0);
        assert_eq!(summary.profit_margin, 83.33);
        assert_eq!(summary.payment_count, 2);
        assert_eq!(summary.expense_count, 1);
        // 名义工资不计入利润
        assert_eq!(summary.total_teacher_salary, 30000.0);
        assert_eq!(summary.teacher_count, 1);
    }

    #[test]
    fn test_zero_revenue_margin() {
        let summary = compute_summary("2025-08", &[], &[expense(50.0, ExpenseCategory::Other)], &[]);
        assert_eq!(summary.revenue, 0.0);
        assert_eq!(summary.net_profit, -50.0);
        assert_eq!(summary.profit_margin, 0.0);
    }

    #[test]
    fn test_salary_expenses_and_rounding() {
        let summary = compute_summary(
            "2025-08",
            &[payment(0.1), payment(0.2)],
            &[
                expense(0.05, ExpenseCategory::Salary),
                expense(0.1, ExpenseCategory::Utility),
            ],
            &[],
        );
        assert_eq!(summary.revenue, 0.3);
        assert_eq!(summary.recorded_expenses, 0.15);
        assert_eq!(summary.net_profit, 0.15);
        assert_eq!(summary.salary_expenses, 0.05);
        assert_eq!(summary.expense_breakdown.len(), 2);
    }
}
