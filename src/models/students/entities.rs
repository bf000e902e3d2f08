use serde::{Deserialize, Serialize};

use crate::models::courses::entities::CourseSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    // 入学日期 YYYY-MM-DD
    pub enrollment_date: String,
    // 已选课程
    pub courses: Vec<CourseSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
