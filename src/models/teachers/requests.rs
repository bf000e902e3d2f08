use serde::Deserialize;

use crate::utils::validate::{FieldErrors, validate_email, validate_password, validate_username};

fn check_salary(errors: &mut FieldErrors, salary: f64) {
    errors.check(
        salary.is_finite() && salary > 0.0,
        "salary",
        "Salary must be positive!",
    );
}

fn check_optional_email(errors: &mut FieldErrors, email: &Option<String>) {
    if let Some(email) = email.as_deref().filter(|e| !e.trim().is_empty())
        && let Err(msg) = validate_email(email.trim())
    {
        errors.add("email", msg);
    }
}

// 创建教师（同时创建登录账号）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    pub salary: Option<f64>,
}

impl CreateTeacherRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require_text(&self.username, "username", "Username is required!");
        if let Err(msg) = validate_username(self.username.trim()) {
            errors.add("username", msg);
        }
        errors.require_text(&self.password, "password", "Password is required!");
        if let Err(msg) = validate_password(&self.password) {
            errors.add("password", msg);
        }
        errors.require_text(&self.name, "name", "Teacher name is required!");
        check_optional_email(&mut errors, &self.email);
        errors.require_text(&self.phone, "phone", "Teacher phone number is required!");
        match self.salary {
            Some(salary) => check_salary(&mut errors, salary),
            None => errors.add("salary", "Salary is required!"),
        }
        errors.finish()
    }
}

// 更新教师档案
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<f64>,
    // 重置登录密码
    pub password: Option<String>,
}

impl UpdateTeacherRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            errors.require_text(name, "name", "Teacher name is required!");
        }
        check_optional_email(&mut errors, &self.email);
        if let Some(phone) = &self.phone {
            errors.require_text(phone, "phone", "Teacher phone number is required!");
        }
        if let Some(salary) = self.salary {
            check_salary(&mut errors, salary);
        }
        if let Some(password) = &self.password
            && let Err(msg) = validate_password(password)
        {
            errors.add("password", msg);
        }
        errors.finish()
    }
}

// 存储层使用：密码已哈希
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub salary: f64,
}

// 存储层使用：password_hash 为新哈希（如有）
#[derive(Debug, Clone, Default)]
pub struct TeacherChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<f64>,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_teacher_validation() {
        let req: CreateTeacherRequest = serde_json::from_str(
            r#"{"username":"jd","password":"","name":"John","phone":"","salary":-1}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.get("username").is_some());
        assert_eq!(errors.get("password"), Some("Password is required!"));
        assert_eq!(errors.get("phone"), Some("Teacher phone number is required!"));
        assert_eq!(errors.get("salary"), Some("Salary must be positive!"));
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_create_teacher_ok() {
        let req: CreateTeacherRequest = serde_json::from_str(
            r#"{"username":"john","password":"secret1","name":"John","email":"john@example.com","phone":"98","salary":30000}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_teacher_blank_email_ignored() {
        let req = UpdateTeacherRequest {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
