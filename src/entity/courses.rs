//! 课程实体

use sea_orm::entity::prelude::*;

use crate::models::courses::entities::{Course, CourseSummary};
use crate::models::teachers::entities::TeacherSummary;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub fee: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_teachers::Entity")]
    CourseTeachers,
    #[sea_orm(has_many = "super::student_courses::Entity")]
    StudentCourses,
}

impl Related<super::course_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTeachers.def()
    }
}

impl Related<super::student_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentCourses.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_teachers::Relation::Teacher.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_teachers::Relation::Course.def().rev())
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::student_courses::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::student_courses::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self, teachers: Vec<TeacherSummary>) -> Course {
        Course {
            id: self.id,
            name: self.name,
            description: self.description,
            fee: self.fee,
            teachers,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }

    pub fn to_summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id,
            name: self.name.clone(),
            fee: self.fee,
        }
    }
}
