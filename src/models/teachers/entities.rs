use serde::{Deserialize, Serialize};

use crate::models::courses::entities::CourseSummary;

// 教师档案，id 与登录用户共享
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    // 名义月薪
    pub salary: f64,
    // 所授课程
    pub courses: Vec<CourseSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Teacher {
    pub fn summary(&self) -> TeacherSummary {
        TeacherSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSummary {
    pub id: i64,
    pub name: String,
}
