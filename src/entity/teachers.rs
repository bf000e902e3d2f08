//! 教师实体，主键即用户 ID

use sea_orm::entity::prelude::*;

use crate::models::courses::entities::CourseSummary;
use crate::models::teachers::entities::{Teacher, TeacherSummary};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    #[sea_orm(column_type = "Double")]
    pub salary: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Id",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::course_teachers::Entity")]
    CourseTeachers,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTeachers.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_teachers::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_teachers::Relation::Teacher.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self, username: String, courses: Vec<CourseSummary>) -> Teacher {
        Teacher {
            id: self.id,
            username,
            name: self.name,
            email: self.email,
            phone: self.phone,
            salary: self.salary,
            courses,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }

    pub fn to_summary(&self) -> TeacherSummary {
        TeacherSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}
