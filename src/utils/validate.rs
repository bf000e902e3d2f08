use std::collections::BTreeMap;

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::{ApiResponse, ErrorCode};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    // 只能包含字母、数字、点、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略：至少 6 个字符，且不能全为空白
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.trim().is_empty() {
        return Err("Password is required!");
    }
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long");
    }
    Ok(())
}

/// 请求体字段级校验错误，序列化为 `{ field: message }`
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录字段错误，同一字段只保留第一条
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn require_text(&mut self, value: &str, field: &str, message: &str) {
        self.check(!value.trim().is_empty(), field, message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            self,
            "Validation failed",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+c@school.edu.np").is_ok());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("jane.doe").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("      ").is_err());
        assert!(validate_password("abc").is_err());
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.require_text(" ", "name", "Student name is required!");
        errors.add("name", "ignored");
        errors.check(true, "email", "never");
        assert_eq!(errors.get("name"), Some("Student name is required!"));
        assert!(errors.get("email").is_none());
        assert!(errors.finish().is_err());
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::new();
        errors.add("fee", "Course fee must be positive!");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["fee"], "Course fee must be positive!");
    }
}
