use serde::Serialize;

use super::requests::SalaryPaymentType;
use crate::models::expenses::entities::Expense;
use crate::models::expenses::responses::CategoryTotal;
use crate::models::students::entities::Student;

// 月度财务汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummaryResponse {
    pub month: String,
    pub revenue: f64,
    pub recorded_expenses: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
    pub payment_count: usize,
    pub expense_count: usize,
    // 本月已记录的 SALARY 支出（已包含在 recorded_expenses 中）
    pub salary_expenses: f64,
    pub expense_breakdown: Vec<CategoryTotal>,
    // 以下仅供参考，不参与利润计算
    pub teacher_count: usize,
    pub total_teacher_salary: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryTeacherInfo {
    pub id: i64,
    pub name: String,
    pub salary: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPaymentInfo {
    pub expense_id: i64,
    pub amount: f64,
    pub month: String,
    pub payment_date: String,
    pub payment_type: SalaryPaymentType,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPaymentResponse {
    pub teacher: SalaryTeacherInfo,
    pub payment: SalaryPaymentInfo,
}

// 某课程某月未缴费学生
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpaidStudentsResponse {
    pub course_id: i64,
    pub course_name: String,
    pub month: String,
    pub count: usize,
    pub students: Vec<Student>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllUnpaidStudentsResponse {
    pub month: String,
    pub total_count: usize,
    pub courses: Vec<UnpaidStudentsResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpaidTeachersResponse {
    pub month: String,
    pub count: usize,
    pub teachers: Vec<SalaryTeacherInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryHistoryResponse {
    pub teacher: SalaryTeacherInfo,
    pub total_paid: f64,
    pub payments: Vec<Expense>,
}
