//! 支出报表：月度合计、教师名义工资、潜在收入

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExpenseService;
use crate::models::ApiResponse;
use crate::models::courses::entities::Course;
use crate::models::expenses::{
    entities::{Expense, ExpenseCategory},
    requests::ExpenseListQuery,
    responses::{
        CategoryTotal, CourseRevenue, ExpenseTotalResponse, PotentialRevenueResponse,
        TeacherSalariesResponse, TeacherSalary,
    },
};
use crate::models::teachers::entities::Teacher;
use crate::utils::money::{round2, sum_amounts};
use crate::utils::month::resolve_month;

/// 按类别汇总，只保留有记录的类别，顺序固定
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    ExpenseCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let amounts: Vec<f64> = expenses
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.amount)
                .collect();
            if amounts.is_empty() {
                return None;
            }
            Some(CategoryTotal {
                category,
                display_name: category.display_name().to_string(),
                count: amounts.len(),
                total: sum_amounts(amounts),
            })
        })
        .collect()
}

pub fn teacher_salaries(teachers: &[Teacher]) -> TeacherSalariesResponse {
    TeacherSalariesResponse {
        teachers: teachers
            .iter()
            .map(|t| TeacherSalary {
                id: t.id,
                name: t.name.clone(),
                salary: t.salary,
            })
            .collect(),
        total_salary: sum_amounts(teachers.iter().map(|t| t.salary)),
        count: teachers.len(),
    }
}

/// 潜在收入 = Σ 学费 × 选课人数
pub fn potential_revenue(
    courses: &[Course],
    enrollments: &[(i64, u64)],
) -> PotentialRevenueResponse {
    let counts: HashMap<i64, u64> = enrollments.iter().copied().collect();

    let courses: Vec<CourseRevenue> = courses
        .iter()
        .map(|course| {
            let student_count = counts.get(&course.id).copied().unwrap_or(0);
            CourseRevenue {
                course_id: course.id,
                course_name: course.name.clone(),
                fee: course.fee,
                student_count,
                potential_revenue: round2(course.fee * student_count as f64),
            }
        })
        .collect();

    PotentialRevenueResponse {
        total_potential_revenue: sum_amounts(courses.iter().map(|c| c.potential_revenue)),
        courses,
    }
}

pub async fn get_total(
    service: &ExpenseService,
    request: &HttpRequest,
    month: Option<String>,
) -> ActixResult<HttpResponse> {
    let month = resolve_month(month.as_deref())?;
    let storage = service.get_storage(request);

    let expenses = storage
        .list_expenses(ExpenseListQuery {
            month: Some(month.clone()),
            ..Default::default()
        })
        .await?;

    let response = ExpenseTotalResponse {
        total: sum_amounts(expenses.iter().map(|e| e.amount)),
        count: expenses.len(),
        by_category: category_breakdown(&expenses),
        month,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Expense total retrieved successfully",
    )))
}

pub async fn get_teacher_salaries(
    service: &ExpenseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let teachers = storage.list_teachers().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        teacher_salaries(&teachers),
        "Teacher salaries retrieved successfully",
    )))
}

pub async fn get_potential_revenue(
    service: &ExpenseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let courses = storage.list_courses().await?;
    let enrollments = storage.count_course_enrollments().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        potential_revenue(&courses, &enrollments),
        "Potential revenue retrieved successfully",
    )))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;

    pub(crate) fn expense(amount: f64, category: ExpenseCategory) -> Expense {
        Expense {
            id: 0,
            name: "test".to_string(),
            amount,
            expense_date: "2025-08-01".to_string(),
            expense_month: "2025-08".to_string(),
            category,
            category_display_name: category.display_name().to_string(),
            teacher_id: None,
            teacher_name: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn course(id: i64, fee: f64) -> Course {
        Course {
            id,
            name: format!("Course {id}"),
            description: None,
            fee,
            teachers: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_breakdown() {
        let expenses = vec![
            expense(100.0, ExpenseCategory::Rent),
            expense(50.5, ExpenseCategory::Utility),
            expense(49.5, ExpenseCategory::Utility),
        ];
        let breakdown = category_breakdown(&expenses);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, ExpenseCategory::Utility);
        assert_eq!(breakdown[0].total, 100.0);
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[1].category, ExpenseCategory::Rent);
        assert_eq!(breakdown[1].display_name, "Office Rent");
    }

    #[test]
    fn test_potential_revenue() {
        let courses = vec![course(1, 1500.0), course(2, 999.99)];
        let result = potential_revenue(&courses, &[(1, 3), (2, 2)]);
        assert_eq!(result.courses[0].potential_revenue, 4500.0);
        assert_eq!(result.courses[1].potential_revenue, 1999.98);
        assert_eq!(result.total_potential_revenue, 6499.98);

        let empty = potential_revenue(&courses, &[]);
        assert_eq!(empty.total_potential_revenue, 0.0);
        assert_eq!(empty.courses[0].student_count, 0);
    }
}
