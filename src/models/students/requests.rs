use serde::Deserialize;

use crate::utils::month::parse_date;
use crate::utils::validate::{FieldErrors, validate_email};

fn check_email(errors: &mut FieldErrors, email: &str) {
    errors.require_text(email, "email", "Student email is required!");
    if let Err(msg) = validate_email(email.trim()) {
        errors.add("email", msg);
    }
}

fn check_enrollment_date(errors: &mut FieldErrors, date: &str) {
    if parse_date(date).is_err() {
        errors.add("enrollmentDate", "Enrollment date must be in YYYY-MM-DD format");
    }
}

// 创建学生请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    // 缺省为当天
    pub enrollment_date: Option<String>,
    pub course_ids: Option<Vec<i64>>,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text(&self.name, "name", "Student name is required!");
        check_email(&mut errors, &self.email);
        errors.require_text(&self.phone, "phone", "Student phone number is required!");
        if let Some(date) = &self.enrollment_date {
            check_enrollment_date(&mut errors, date);
        }
        errors.finish()
    }
}

// 更新学生请求，courseIds 存在时整体替换选课
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub enrollment_date: Option<String>,
    pub course_ids: Option<Vec<i64>>,
}

impl UpdateStudentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            errors.require_text(name, "name", "Student name is required!");
        }
        if let Some(email) = &self.email {
            check_email(&mut errors, email);
        }
        if let Some(phone) = &self.phone {
            errors.require_text(phone, "phone", "Student phone number is required!");
        }
        if let Some(date) = &self.enrollment_date {
            check_enrollment_date(&mut errors, date);
        }
        errors.finish()
    }
}

// 学生列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListQuery {
    // 按姓名 / 邮箱模糊搜索
    pub search: Option<String>,
    pub course_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_validation() {
        let req: CreateStudentRequest = serde_json::from_str(
            r#"{"name":"","email":"not-an-email","phone":"9800000000","enrollmentDate":"2025-13-01"}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Student name is required!"));
        assert_eq!(errors.get("email"), Some("Email format is invalid"));
        assert!(errors.get("enrollmentDate").is_some());
        assert!(errors.get("phone").is_none());
    }

    #[test]
    fn test_create_student_ok() {
        let req: CreateStudentRequest = serde_json::from_str(
            r#"{"name":"Asha","email":"asha@example.com","phone":"9800000000","courseIds":[1,2]}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.course_ids, Some(vec![1, 2]));
        assert!(req.enrollment_date.is_none());
    }

    #[test]
    fn test_list_query_camel_case() {
        let q: StudentListQuery = serde_json::from_str(r#"{"courseId":3}"#).unwrap();
        assert_eq!(q.course_id, Some(3));
    }
}
