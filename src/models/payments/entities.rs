use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub amount: f64,
    // 缴费日期 YYYY-MM-DD
    pub payment_date: String,
    // 账期 YYYY-MM，旧数据可能为空
    pub payment_month: Option<String>,
    // 冗余的学生、课程名称
    pub student_name: Option<String>,
    pub course_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Payment {
    /// 实际归属账期：payment_month 为空时按日期推断
    pub fn effective_month(&self) -> Option<&str> {
        match self.payment_month.as_deref() {
            Some(m) if !m.is_empty() => Some(m),
            _ => self.payment_date.get(..7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(month: Option<&str>, date: &str) -> Payment {
        Payment {
            id: 1,
            student_id: 1,
            course_id: 1,
            amount: 10.0,
            payment_date: date.to_string(),
            payment_month: month.map(str::to_string),
            student_name: None,
            course_name: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_effective_month() {
        assert_eq!(
            payment(Some("2025-08"), "2025-09-01").effective_month(),
            Some("2025-08")
        );
        assert_eq!(payment(None, "2025-07-31").effective_month(), Some("2025-07"));
        assert_eq!(payment(Some(""), "2025-07-31").effective_month(), Some("2025-07"));
    }
}
