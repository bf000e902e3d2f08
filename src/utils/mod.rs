pub mod extractor;
pub mod jwt;
pub mod money;
pub mod month;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use extractor::{SafeCourseIdI64, SafeIDI64, SafeTeacherIdI64};
pub use money::round2;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
