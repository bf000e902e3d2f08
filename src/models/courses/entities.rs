use serde::{Deserialize, Serialize};

use crate::models::teachers::entities::TeacherSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程名称
    pub name: String,
    // 课程描述
    pub description: Option<String>,
    // 月学费
    pub fee: f64,
    // 授课教师
    pub teachers: Vec<TeacherSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 嵌入学生、教师信息时使用的课程摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: i64,
    pub name: String,
    pub fee: f64,
}
