//! 支出实体

use sea_orm::entity::prelude::*;

use crate::models::expenses::entities::{Expense, ExpenseCategory};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub expense_date: String,
    pub expense_month: String,
    pub category: String,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_expense(self) -> Expense {
        let category = self
            .category
            .parse::<ExpenseCategory>()
            .unwrap_or(ExpenseCategory::Other);
        Expense {
            id: self.id,
            name: self.name,
            amount: self.amount,
            expense_date: self.expense_date,
            expense_month: self.expense_month,
            category,
            category_display_name: category.display_name().to_string(),
            teacher_id: self.teacher_id,
            teacher_name: self.teacher_name,
            description: self.description,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
