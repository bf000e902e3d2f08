use serde::{Deserialize, Serialize};

// 支出类别
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    #[default]
    Utility,
    Salary,
    Rent,
    Supplies,
    Marketing,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Utility,
        ExpenseCategory::Salary,
        ExpenseCategory::Rent,
        ExpenseCategory::Supplies,
        ExpenseCategory::Marketing,
        ExpenseCategory::Other,
    ];

    /// 数据库中保存的值
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Utility => "UTILITY",
            ExpenseCategory::Salary => "SALARY",
            ExpenseCategory::Rent => "RENT",
            ExpenseCategory::Supplies => "SUPPLIES",
            ExpenseCategory::Marketing => "MARKETING",
            ExpenseCategory::Other => "OTHER",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExpenseCategory::Utility => "Utility Bills",
            ExpenseCategory::Salary => "Teacher Salary",
            ExpenseCategory::Rent => "Office Rent",
            ExpenseCategory::Supplies => "Office Supplies",
            ExpenseCategory::Marketing => "Marketing & Advertising",
            ExpenseCategory::Other => "Other Expenses",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid expense category: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    // 支出日期 YYYY-MM-DD
    pub expense_date: String,
    // 账期 YYYY-MM
    pub expense_month: String,
    pub category: ExpenseCategory,
    pub category_display_name: String,
    // 仅 SALARY 类别使用
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("salary".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Salary));
        assert_eq!("RENT".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Rent));
        assert!("FOOD".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_category_serde_and_display() {
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::Marketing).unwrap(),
            "\"MARKETING\""
        );
        assert_eq!(ExpenseCategory::default(), ExpenseCategory::Utility);
        assert_eq!(ExpenseCategory::Salary.display_name(), "Teacher Salary");
        assert_eq!(ExpenseCategory::Other.to_string(), "OTHER");
    }
}
