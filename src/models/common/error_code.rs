use serde::Serialize;

/// 业务错误码，随响应体中的 `code` 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用请求错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    InvalidMonth = 1002,
    InvalidDate = 1003,

    // 认证授权 2xxx
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2003,
    RateLimitExceeded = 2029,

    // 资源不存在 3xxx
    NotFound = 3000,
    StudentNotFound = 3001,
    CourseNotFound = 3002,
    TeacherNotFound = 3003,
    PaymentNotFound = 3004,
    ExpenseNotFound = 3005,
    EnrollmentNotFound = 3006,

    // 业务规则 4xxx
    BusinessRuleViolation = 4000,
    DuplicatePayment = 4001,
    DuplicateSalaryPayment = 4002,
    UsernameTaken = 4003,
    EmailTaken = 4004,

    // 服务端 5xxx
    InternalServerError = 5000,
}
