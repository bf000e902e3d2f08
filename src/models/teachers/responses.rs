use serde::Serialize;

use crate::models::expenses::entities::Expense;
use crate::models::payments::entities::Payment;

// 教师查看本人某月的工资记录
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSalaryPaymentsResponse {
    pub month: String,
    pub total: f64,
    pub items: Vec<Expense>,
}

// 教师查看本人所授课程某月的缴费记录
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherCoursePaymentsResponse {
    pub month: String,
    pub total: f64,
    pub items: Vec<Payment>,
}
