use serde::Serialize;

use super::entities::ExpenseCategory;

// 按类别汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub display_name: String,
    pub total: f64,
    pub count: usize,
}

// 某月支出合计
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTotalResponse {
    pub month: String,
    pub total: f64,
    pub count: usize,
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSalary {
    pub id: i64,
    pub name: String,
    pub salary: f64,
}

// 教师名义工资合计（仅供参考，不计入支出）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSalariesResponse {
    pub teachers: Vec<TeacherSalary>,
    pub total_salary: f64,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRevenue {
    pub course_id: i64,
    pub course_name: String,
    pub fee: f64,
    pub student_count: u64,
    pub potential_revenue: f64,
}

// 潜在收入：所有选课按学费求和
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialRevenueResponse {
    pub total_potential_revenue: f64,
    pub courses: Vec<CourseRevenue>,
}
