//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称，
//! 并通过 `ResponseError` 映射为 HTTP 状态码。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_lms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LmsError {
            $($variant(String),)*
        }

        impl LmsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LmsError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl LmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lms_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    BusinessRule("E007", "Business Rule Violation"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    Internal("E012", "Internal Error"),
}

impl LmsError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对外暴露的错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            LmsError::Validation(_) | LmsError::DateParse(_) => ErrorCode::ValidationFailed,
            LmsError::NotFound(_) => ErrorCode::NotFound,
            LmsError::BusinessRule(_) => ErrorCode::BusinessRuleViolation,
            LmsError::Authentication(_) => ErrorCode::Unauthorized,
            LmsError::Authorization(_) => ErrorCode::Forbidden,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 服务端错误只返回通用信息，详情写入日志
    fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl fmt::Display for LmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LmsError {}

impl ResponseError for LmsError {
    fn status_code(&self) -> StatusCode {
        match self {
            LmsError::Validation(_) | LmsError::DateParse(_) | LmsError::BusinessRule(_) => {
                StatusCode::BAD_REQUEST
            }
            LmsError::NotFound(_) => StatusCode::NOT_FOUND,
            LmsError::Authentication(_) => StatusCode::UNAUTHORIZED,
            LmsError::Authorization(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_server_error() {
            error!("{} {}", self.code(), self.format_simple());
            "Something went wrong, please try again later".to_string()
        } else {
            self.message().to_string()
        };

        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.error_code(), message))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        LmsError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LmsError {
    fn from(err: std::io::Error) -> Self {
        LmsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LmsError {
    fn from(err: serde_json::Error) -> Self {
        LmsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LmsError {
    fn from(err: chrono::ParseError) -> Self {
        LmsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LmsError::database_config("test").code(), "E001");
        assert_eq!(LmsError::validation("test").code(), "E005");
        assert_eq!(LmsError::not_found("test").code(), "E006");
        assert_eq!(LmsError::authentication("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            LmsError::business_rule("dup").error_type(),
            "Business Rule Violation"
        );
        assert_eq!(LmsError::validation("test").error_type(), "Validation Error");
    }

    #[test]
    fn test_format_simple() {
        let err = LmsError::validation("Invalid month");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid month"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            LmsError::not_found("Course not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LmsError::business_rule("already paid").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LmsError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LmsError::authentication("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            LmsError::authorization("not yours").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            LmsError::from(sea_orm::DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_error_hides_detail() {
        let resp = LmsError::database_operation("secret table name").error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
