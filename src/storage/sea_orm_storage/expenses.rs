use super::SeaOrmStorage;
use super::teachers::build_teachers;
use crate::entity::expenses::{ActiveModel, Column, Entity as Expenses};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::errors::{LmsError, Result};
use crate::models::{
    expenses::{
        entities::{Expense, ExpenseCategory},
        requests::{ExpenseListQuery, NewExpense},
    },
    teachers::entities::Teacher,
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

fn salary_condition(month: &str) -> Condition {
    Condition::all()
        .add(Column::Category.eq(ExpenseCategory::Salary.as_str()))
        .add(Column::ExpenseMonth.eq(month))
}

async fn insert_expense<C: ConnectionTrait>(db: &C, req: NewExpense) -> Result<Expense> {
    let model = ActiveModel {
        name: Set(req.name.trim().to_string()),
        amount: Set(req.amount),
        expense_date: Set(req.expense_date),
        expense_month: Set(req.expense_month),
        category: Set(req.category.as_str().to_string()),
        teacher_id: Set(req.teacher_id),
        teacher_name: Set(req.teacher_name),
        description: Set(req.description),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| LmsError::database_operation(format!("Failed to create expense: {e}")))?;

    Ok(model.into_expense())
}

async fn count_salary_payments<C: ConnectionTrait>(
    db: &C,
    teacher_id: i64,
    month: &str,
) -> Result<u64> {
    Ok(Expenses::find()
        .filter(salary_condition(month))
        .filter(Column::TeacherId.eq(teacher_id))
        .count(db)
        .await?)
}

impl SeaOrmStorage {
    pub async fn create_expense_impl(&self, req: NewExpense) -> Result<Expense> {
        insert_expense(&self.db, req).await
    }

    /// 记录工资支出，检查与写入在同一事务中
    pub async fn record_salary_payment_impl(
        &self,
        req: NewExpense,
        reject_if_paid: bool,
    ) -> Result<Expense> {
        let teacher_id = req
            .teacher_id
            .ok_or_else(|| LmsError::validation("Salary payment requires a teacher"))?;

        let txn = self.db.begin().await?;
        if reject_if_paid && count_salary_payments(&txn, teacher_id, &req.expense_month).await? > 0
        {
            return Err(LmsError::business_rule(format!(
                "Teacher {} has already been paid salary for {}",
                req.teacher_name.as_deref().unwrap_or("unknown"),
                req.expense_month
            )));
        }

        let expense = insert_expense(&txn, req).await?;
        txn.commit().await?;
        Ok(expense)
    }

    /// 列出支出
    pub async fn list_expenses_impl(&self, query: ExpenseListQuery) -> Result<Vec<Expense>> {
        let mut select = Expenses::find();

        if let Some(ref month) = query.month {
            select = select.filter(Column::ExpenseMonth.eq(month.as_str()));
        }
        if let Some(category) = query.category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let models = select
            .order_by_desc(Column::ExpenseDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list expenses: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_expense()).collect())
    }

    pub async fn delete_expense_impl(&self, id: i64) -> Result<bool> {
        let result = Expenses::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn has_salary_payment_impl(&self, teacher_id: i64, month: &str) -> Result<bool> {
        Ok(count_salary_payments(&self.db, teacher_id, month).await? > 0)
    }

    /// 某月没有任何工资支出的教师
    pub async fn list_unpaid_teachers_impl(&self, month: &str) -> Result<Vec<Teacher>> {
        let paid = Query::select()
            .column(Column::TeacherId)
            .from(Expenses)
            .cond_where(salary_condition(month).add(Column::TeacherId.is_not_null()))
            .to_owned();

        let models = Teachers::find()
            .filter(TeacherColumn::Id.not_in_subquery(paid))
            .order_by_asc(TeacherColumn::Id)
            .all(&self.db)
            .await?;

        build_teachers(&self.db, models).await
    }
}
