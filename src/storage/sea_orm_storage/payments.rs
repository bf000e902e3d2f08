use super::SeaOrmStorage;
use super::students::build_students;
use crate::entity::course_teachers::{Column as CourseTeacherColumn, Entity as CourseTeachers};
use crate::entity::courses::Entity as Courses;
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::entity::student_courses::{Column as StudentCourseColumn, Entity as StudentCourses};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{LmsError, Result};
use crate::models::{
    payments::{
        entities::Payment,
        requests::{NewPayment, PaymentListQuery},
    },
    students::entities::Student,
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 账期匹配条件：payment_month 相等，或旧数据 payment_month 为空时按日期前缀匹配
pub(super) fn month_condition(month: &str) -> Condition {
    Condition::any().add(Column::PaymentMonth.eq(month)).add(
        Condition::all()
            .add(
                Condition::any()
                    .add(Column::PaymentMonth.is_null())
                    .add(Column::PaymentMonth.eq("")),
            )
            .add(Column::PaymentDate.starts_with(month)),
    )
}

impl SeaOrmStorage {
    /// 创建缴费记录，补全冗余名称并检查同月重复
    pub async fn create_payment_impl(&self, req: NewPayment) -> Result<Payment> {
        let txn = self.db.begin().await?;

        let student = Students::find_by_id(req.student_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                LmsError::not_found(format!("Student not found with id: {}", req.student_id))
            })?;
        let course = Courses::find_by_id(req.course_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                LmsError::not_found(format!("Course not found with id: {}", req.course_id))
            })?;

        let existing = Payments::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::CourseId.eq(req.course_id))
            .filter(month_condition(&req.payment_month))
            .count(&txn)
            .await?;
        if existing > 0 {
            return Err(LmsError::business_rule(format!(
                "Payment already recorded for student {} in course {} for {}",
                student.name, course.name, req.payment_month
            )));
        }

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            amount: Set(req.amount),
            payment_date: Set(req.payment_date),
            payment_month: Set(Some(req.payment_month)),
            student_name: Set(Some(
                req.student_name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or(student.name),
            )),
            course_name: Set(Some(
                req.course_name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or(course.name),
            )),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| LmsError::database_operation(format!("Failed to create payment: {e}")))?;

        txn.commit().await?;
        Ok(model.into_payment())
    }

    /// 列出缴费记录
    pub async fn list_payments_impl(&self, query: PaymentListQuery) -> Result<Vec<Payment>> {
        let mut select = Payments::find();

        if let Some(ref month) = query.month {
            select = select.filter(month_condition(month));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let models = select
            .order_by_desc(Column::PaymentDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list payments: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_payment()).collect())
    }

    pub async fn delete_payment_impl(&self, id: i64) -> Result<bool> {
        let result = Payments::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// 教师所授课程在某月的缴费
    pub async fn list_teacher_course_payments_impl(
        &self,
        teacher_id: i64,
        month: &str,
    ) -> Result<Vec<Payment>> {
        let taught = Query::select()
            .column(CourseTeacherColumn::CourseId)
            .from(CourseTeachers)
            .and_where(CourseTeacherColumn::TeacherId.eq(teacher_id))
            .to_owned();

        let models = Payments::find()
            .filter(Column::CourseId.in_subquery(taught))
            .filter(month_condition(month))
            .order_by_desc(Column::PaymentDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into_payment()).collect())
    }

    /// 选了课程但该月没有该课程缴费的学生（IN + NOT IN 子查询）
    pub async fn list_unpaid_students_impl(
        &self,
        course_id: i64,
        month: &str,
    ) -> Result<Vec<Student>> {
        let enrolled = Query::select()
            .column(StudentCourseColumn::StudentId)
            .from(StudentCourses)
            .and_where(StudentCourseColumn::CourseId.eq(course_id))
            .to_owned();

        let paid = Query::select()
            .column(Column::StudentId)
            .from(Payments)
            .cond_where(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(month_condition(month)),
            )
            .to_owned();

        let models = Students::find()
            .filter(StudentColumn::Id.in_subquery(enrolled))
            .filter(StudentColumn::Id.not_in_subquery(paid))
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!("Failed to query unpaid students: {e}"))
            })?;

        build_students(&self.db, models).await
    }
}
