//! 缴费实体

use sea_orm::entity::prelude::*;

use crate::models::payments::entities::Payment;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub payment_date: String,
    pub payment_month: Option<String>,
    pub student_name: Option<String>,
    pub course_name: Option<String>,
    pub created_at: i64,
}

// 学生、课程删除后缴费记录保留，不建外键关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment(self) -> Payment {
        Payment {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            amount: self.amount,
            payment_date: self.payment_date,
            payment_month: self.payment_month,
            student_name: self.student_name,
            course_name: self.course_name,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
