use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::FinanceService;
use crate::errors::LmsError;
use crate::models::ApiResponse;
use crate::models::expenses::{
    entities::ExpenseCategory,
    requests::{ExpenseListQuery, NewExpense},
};
use crate::models::finance::{
    requests::{SalaryPaymentRequest, SalaryPaymentType},
    responses::{
        SalaryHistoryResponse, SalaryPaymentInfo, SalaryPaymentResponse, SalaryTeacherInfo,
        UnpaidTeachersResponse,
    },
};
use crate::models::teachers::entities::Teacher;
use crate::services::teachers::get::teacher_not_found;
use crate::utils::money::sum_amounts;
use crate::utils::month::{resolve_month, today};

impl From<&Teacher> for SalaryTeacherInfo {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name.clone(),
            salary: teacher.salary,
        }
    }
}

/// 按请求与教师档案补全工资支出记录
pub(crate) fn build_salary_expense(
    teacher: &Teacher,
    payment_type: SalaryPaymentType,
    month: String,
    req: &SalaryPaymentRequest,
) -> NewExpense {
    let description = req
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| payment_type.default_description(&month));

    NewExpense {
        name: payment_type.expense_name(&teacher.name),
        amount: req.amount.unwrap_or(teacher.salary),
        expense_date: req
            .payment_date
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(today),
        expense_month: month,
        category: ExpenseCategory::Salary,
        teacher_id: Some(teacher.id),
        teacher_name: Some(teacher.name.clone()),
        description: Some(description),
    }
}

pub async fn pay_teacher(
    service: &FinanceService,
    request: &HttpRequest,
    payment: SalaryPaymentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = payment.validate() {
        return Ok(e.into_response());
    }

    let teacher_id = payment.teacher_id.unwrap_or_default();
    let storage = service.get_storage(request);

    let Some(teacher) = storage.get_teacher_by_id(teacher_id).await? else {
        return Ok(teacher_not_found(teacher_id));
    };

    let month = resolve_month(payment.month.as_deref())?;
    let payment_type = payment.payment_type.unwrap_or_default();
    let expense = build_salary_expense(&teacher, payment_type, month, &payment);

    // 全额工资每月只能发放一次，检查与写入在同一事务中
    let reject_if_paid = payment_type == SalaryPaymentType::FullSalary;
    let recorded = match storage.record_salary_payment(expense, reject_if_paid).await {
        Ok(expense) => expense,
        Err(e @ LmsError::BusinessRule(_)) => {
            warn!("Salary payment rejected: {}", e);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "Paid {} {} to teacher {} for {}",
        payment_type.as_str(),
        recorded.amount,
        teacher.id,
        recorded.expense_month
    );

    let response = SalaryPaymentResponse {
        teacher: SalaryTeacherInfo::from(&teacher),
        payment: SalaryPaymentInfo {
            expense_id: recorded.id,
            amount: recorded.amount,
            month: recorded.expense_month,
            payment_date: recorded.expense_date,
            payment_type,
            description: recorded.description.unwrap_or_default(),
        },
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(
        response,
        "Salary payment recorded successfully",
    )))
}

pub async fn unpaid_teachers(
    service: &FinanceService,
    request: &HttpRequest,
    month: Option<String>,
) -> ActixResult<HttpResponse> {
    let month = resolve_month(month.as_deref())?;
    let storage = service.get_storage(request);

    let teachers: Vec<SalaryTeacherInfo> = storage
        .list_unpaid_teachers(&month)
        .await?
        .iter()
        .map(SalaryTeacherInfo::from)
        .collect();

    let response = UnpaidTeachersResponse {
        month,
        count: teachers.len(),
        teachers,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Unpaid teachers retrieved successfully",
    )))
}

pub async fn salary_history(
    service: &FinanceService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(teacher) = storage.get_teacher_by_id(teacher_id).await? else {
        return Ok(teacher_not_found(teacher_id));
    };

    let payments = storage
        .list_expenses(ExpenseListQuery {
            category: Some(ExpenseCategory::Salary),
            teacher_id: Some(teacher_id),
            ..Default::default()
        })
        .await?;

    let response = SalaryHistoryResponse {
        teacher: SalaryTeacherInfo::from(&teacher),
        total_paid: sum_amounts(payments.iter().map(|e| e.amount)),
        payments,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Salary history retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn teacher() -> Teacher {
        Teacher {
            id: 3,
            username: "sita".to_string(),
            name: "Sita Sharma".to_string(),
            email: None,
            phone: "9800000001".to_string(),
            salary: 25000.0,
            courses: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_salary_defaults() {
        let req: SalaryPaymentRequest =
            serde_json::from_str(r#"{"teacherId":3,"paymentDate":"2025-08-30"}"#).unwrap();
        let expense = build_salary_expense(
            &teacher(),
            SalaryPaymentType::FullSalary,
            "2025-08".to_string(),
            &req,
        );
        assert_eq!(expense.name, "Salary - Sita Sharma");
        assert_eq!(expense.amount, 25000.0);
        assert_eq!(expense.expense_date, "2025-08-30");
        assert_eq!(expense.expense_month, "2025-08");
        assert_eq!(expense.category, ExpenseCategory::Salary);
        assert_eq!(expense.teacher_id, Some(3));
        assert_eq!(
            expense.description.as_deref(),
            Some("Full Salary for 2025-08")
        );
    }

    #[test]
    fn test_bonus_with_amount_and_description() {
        let req: SalaryPaymentRequest = serde_json::from_str(
            r#"{"teacherId":3,"amount":1500,"paymentType":"BONUS","description":"Festival"}"#,
        )
        .unwrap();
        let expense = build_salary_expense(
            &teacher(),
            SalaryPaymentType::Bonus,
            "2025-10".to_string(),
            &req,
        );
        assert_eq!(expense.name, "Bonus - Sita Sharma");
        assert_eq!(expense.amount, 1500.0);
        assert_eq!(expense.expense_date, today());
        assert_eq!(expense.description.as_deref(), Some("Festival"));
    }
}
