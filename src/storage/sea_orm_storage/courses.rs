use std::collections::{BTreeSet, HashMap};

use super::SeaOrmStorage;
use super::students::build_students;
use crate::entity::course_teachers::{
    ActiveModel as CourseTeacherActiveModel, Column as CourseTeacherColumn,
    Entity as CourseTeachers,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses, Model as CourseModel};
use crate::entity::student_courses::{Column as StudentCourseColumn, Entity as StudentCourses};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::errors::{LmsError, Result};
use crate::models::{
    courses::{
        entities::Course,
        requests::{CreateCourseRequest, UpdateCourseRequest},
    },
    students::entities::Student,
    teachers::entities::TeacherSummary,
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// 去重并保持原有顺序
pub(super) fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = BTreeSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn missing_ids(requested: &[i64], found: &[i64]) -> Vec<i64> {
    let found: BTreeSet<i64> = found.iter().copied().collect();
    requested
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect()
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 校验课程都存在，否则返回指明缺失 id 的校验错误
pub(super) async fn ensure_courses_exist<C: ConnectionTrait>(db: &C, ids: &[i64]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: Vec<i64> = Courses::find()
        .select_only()
        .column(Column::Id)
        .filter(Column::Id.is_in(ids.iter().copied()))
        .into_tuple()
        .all(db)
        .await?;

    let missing = missing_ids(ids, &found);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LmsError::validation(format!(
            "Course not found with id: {}",
            join_ids(&missing)
        )))
    }
}

/// 校验教师都存在
pub(super) async fn ensure_teachers_exist<C: ConnectionTrait>(db: &C, ids: &[i64]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: Vec<i64> = Teachers::find()
        .select_only()
        .column(TeacherColumn::Id)
        .filter(TeacherColumn::Id.is_in(ids.iter().copied()))
        .into_tuple()
        .all(db)
        .await?;

    let missing = missing_ids(ids, &found);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LmsError::validation(format!(
            "Teacher not found with id: {}",
            join_ids(&missing)
        )))
    }
}

/// 批量查询课程的授课教师
pub(super) async fn load_course_teachers<C: ConnectionTrait>(
    db: &C,
    course_ids: &[i64],
) -> Result<HashMap<i64, Vec<TeacherSummary>>> {
    let mut map: HashMap<i64, Vec<TeacherSummary>> = HashMap::new();
    if course_ids.is_empty() {
        return Ok(map);
    }

    let rows = CourseTeachers::find()
        .filter(CourseTeacherColumn::CourseId.is_in(course_ids.iter().copied()))
        .order_by_asc(CourseTeacherColumn::TeacherId)
        .find_also_related(Teachers)
        .all(db)
        .await?;

    for (link, teacher) in rows {
        if let Some(teacher) = teacher {
            map.entry(link.course_id)
                .or_default()
                .push(teacher.to_summary());
        }
    }
    Ok(map)
}

/// 整体替换课程的授课教师
async fn replace_course_teachers<C: ConnectionTrait>(
    db: &C,
    course_id: i64,
    teacher_ids: &[i64],
) -> Result<()> {
    CourseTeachers::delete_many()
        .filter(CourseTeacherColumn::CourseId.eq(course_id))
        .exec(db)
        .await?;

    for teacher_id in teacher_ids {
        CourseTeachers::insert(CourseTeacherActiveModel {
            course_id: Set(course_id),
            teacher_id: Set(*teacher_id),
        })
        .exec_without_returning(db)
        .await?;
    }
    Ok(())
}

impl SeaOrmStorage {
    async fn build_courses(&self, models: Vec<CourseModel>) -> Result<Vec<Course>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut teachers = load_course_teachers(&self.db, &ids).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let t = teachers.remove(&m.id).unwrap_or_default();
                m.into_course(t)
            })
            .collect())
    }

    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let teacher_ids = dedup_ids(req.teacher_ids.as_deref().unwrap_or_default());

        let txn = self.db.begin().await?;
        ensure_teachers_exist(&txn, &teacher_ids).await?;

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            fee: Set(req.fee.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| LmsError::database_operation(format!("Failed to create course: {e}")))?;

        replace_course_teachers(&txn, model.id, &teacher_ids).await?;
        let teachers = load_course_teachers(&txn, &[model.id]).await?;
        txn.commit().await?;

        let t = teachers.into_values().next().unwrap_or_default();
        Ok(model.into_course(t))
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let Some(model) = Courses::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.build_courses(vec![model]).await?.pop())
    }

    /// 列出全部课程
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let models = Courses::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list courses: {e}")))?;
        self.build_courses(models).await
    }

    /// 更新课程，teacher_ids 存在时整体替换
    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let txn = self.db.begin().await?;
        let Some(existing) = Courses::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(fee) = update.fee {
            model.fee = Set(fee);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());
        let model = model.update(&txn).await?;

        if let Some(teacher_ids) = update.teacher_ids {
            let teacher_ids = dedup_ids(&teacher_ids);
            ensure_teachers_exist(&txn, &teacher_ids).await?;
            replace_course_teachers(&txn, id, &teacher_ids).await?;
        }

        let teachers = load_course_teachers(&txn, &[id]).await?;
        txn.commit().await?;

        let t = teachers.into_values().next().unwrap_or_default();
        Ok(Some(model.into_course(t)))
    }

    /// 删除课程，同时清理两张关联表
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        StudentCourses::delete_many()
            .filter(StudentCourseColumn::CourseId.eq(id))
            .exec(&txn)
            .await?;
        CourseTeachers::delete_many()
            .filter(CourseTeacherColumn::CourseId.eq(id))
            .exec(&txn)
            .await?;
        let result = Courses::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// 课程的选课学生
    pub async fn list_course_students_impl(&self, course_id: i64) -> Result<Vec<Student>> {
        let enrolled = Query::select()
            .column(StudentCourseColumn::StudentId)
            .from(StudentCourses)
            .and_where(StudentCourseColumn::CourseId.eq(course_id))
            .to_owned();

        let models = Students::find()
            .filter(StudentColumn::Id.in_subquery(enrolled))
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await?;

        build_students(&self.db, models).await
    }

    /// 教师所授课程
    pub async fn list_teacher_courses_impl(&self, teacher_id: i64) -> Result<Vec<Course>> {
        let taught = Query::select()
            .column(CourseTeacherColumn::CourseId)
            .from(CourseTeachers)
            .and_where(CourseTeacherColumn::TeacherId.eq(teacher_id))
            .to_owned();

        let models = Courses::find()
            .filter(Column::Id.in_subquery(taught))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        self.build_courses(models).await
    }

    /// 每门课程的选课人数
    pub async fn count_course_enrollments_impl(&self) -> Result<Vec<(i64, u64)>> {
        let rows = StudentCourses::find().all(&self.db).await?;

        let mut counts: HashMap<i64, u64> = HashMap::new();
        for row in rows {
            *counts.entry(row.course_id).or_default() += 1;
        }
        let mut counts: Vec<(i64, u64)> = counts.into_iter().collect();
        counts.sort_unstable();
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ids_keeps_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn test_missing_ids() {
        assert_eq!(missing_ids(&[1, 2, 5], &[1, 5]), vec![2]);
        assert!(missing_ids(&[1], &[1]).is_empty());
        assert_eq!(join_ids(&[2, 7]), "2, 7");
    }
}
