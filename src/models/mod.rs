pub mod auth;
pub mod common;
pub mod courses;
pub mod expenses;
pub mod finance;
pub mod payments;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, ErrorCode, MonthQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
