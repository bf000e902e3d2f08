//! 学生实体

use sea_orm::entity::prelude::*;

use crate::models::courses::entities::CourseSummary;
use crate::models::students::entities::Student;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub enrollment_date: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_courses::Entity")]
    StudentCourses,
}

impl Related<super::student_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentCourses.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::student_courses::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::student_courses::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self, courses: Vec<CourseSummary>) -> Student {
        Student {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            enrollment_date: self.enrollment_date,
            courses,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
