pub mod error_code;
pub mod response;

pub use error_code::ErrorCode;
pub use response::ApiResponse;

use serde::Deserialize;

// 按月份过滤的查询参数，month 格式 YYYY-MM，缺省为当前月份
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}
