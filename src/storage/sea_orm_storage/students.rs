use std::collections::HashMap;

use super::SeaOrmStorage;
use super::courses::{dedup_ids, ensure_courses_exist};
use crate::entity::courses::Entity as Courses;
use crate::entity::student_courses::{
    ActiveModel as StudentCourseActiveModel, Column as StudentCourseColumn,
    Entity as StudentCourses,
};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model as StudentModel};
use crate::errors::{LmsError, Result};
use crate::models::{
    courses::entities::CourseSummary,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
};
use crate::utils::{escape_like_pattern, month::today};
use sea_orm::sea_query::{LikeExpr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 批量查询学生的已选课程
pub(super) async fn load_student_courses<C: ConnectionTrait>(
    db: &C,
    student_ids: &[i64],
) -> Result<HashMap<i64, Vec<CourseSummary>>> {
    let mut map: HashMap<i64, Vec<CourseSummary>> = HashMap::new();
    if student_ids.is_empty() {
        return Ok(map);
    }

    let rows = StudentCourses::find()
        .filter(StudentCourseColumn::StudentId.is_in(student_ids.iter().copied()))
        .order_by_asc(StudentCourseColumn::CourseId)
        .find_also_related(Courses)
        .all(db)
        .await?;

    for (link, course) in rows {
        if let Some(course) = course {
            map.entry(link.student_id)
                .or_default()
                .push(course.to_summary());
        }
    }
    Ok(map)
}

/// 把学生实体批量转换为业务模型
pub(super) async fn build_students<C: ConnectionTrait>(
    db: &C,
    models: Vec<StudentModel>,
) -> Result<Vec<Student>> {
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let mut courses = load_student_courses(db, &ids).await?;
    Ok(models
        .into_iter()
        .map(|m| {
            let c = courses.remove(&m.id).unwrap_or_default();
            m.into_student(c)
        })
        .collect())
}

/// 整体替换学生的选课
async fn replace_student_courses<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    course_ids: &[i64],
) -> Result<()> {
    StudentCourses::delete_many()
        .filter(StudentCourseColumn::StudentId.eq(student_id))
        .exec(db)
        .await?;

    for course_id in course_ids {
        StudentCourses::insert(StudentCourseActiveModel {
            student_id: Set(student_id),
            course_id: Set(*course_id),
        })
        .exec_without_returning(db)
        .await?;
    }
    Ok(())
}

async fn is_enrolled<C: ConnectionTrait>(db: &C, student_id: i64, course_id: i64) -> Result<bool> {
    let count = StudentCourses::find()
        .filter(StudentCourseColumn::StudentId.eq(student_id))
        .filter(StudentCourseColumn::CourseId.eq(course_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

impl SeaOrmStorage {
    async fn build_one(&self, model: Option<StudentModel>) -> Result<Option<Student>> {
        match model {
            Some(model) => Ok(build_students(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 创建学生，课程必须全部存在
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();
        let course_ids = dedup_ids(req.course_ids.as_deref().unwrap_or_default());

        let txn = self.db.begin().await?;
        ensure_courses_exist(&txn, &course_ids).await?;

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_string()),
            phone: Set(req.phone.trim().to_string()),
            enrollment_date: Set(req.enrollment_date.unwrap_or_else(today)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| LmsError::database_operation(format!("Failed to create student: {e}")))?;

        replace_student_courses(&txn, model.id, &course_ids).await?;
        let student = build_students(&txn, vec![model]).await?.pop();
        txn.commit().await?;

        student.ok_or_else(|| LmsError::internal("Created student vanished"))
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let model = Students::find_by_id(id).one(&self.db).await?;
        self.build_one(model).await
    }

    /// 通过邮箱获取学生
    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let model = Students::find()
            .filter(Column::Email.eq(email.trim()))
            .one(&self.db)
            .await?;
        self.build_one(model).await
    }

    /// 列出学生，可按姓名/邮箱搜索、按课程过滤
    pub async fn list_students_impl(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        let mut select = Students::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(Column::Email.like(LikeExpr::new(pattern).escape('\\'))),
            );
        }

        if let Some(course_id) = query.course_id {
            let enrolled = Query::select()
                .column(StudentCourseColumn::StudentId)
                .from(StudentCourses)
                .and_where(StudentCourseColumn::CourseId.eq(course_id))
                .to_owned();
            select = select.filter(Column::Id.in_subquery(enrolled));
        }

        let models = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list students: {e}")))?;

        build_students(&self.db, models).await
    }

    /// 更新学生，course_ids 存在时整体替换选课
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let txn = self.db.begin().await?;
        let Some(existing) = Students::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(email) = update.email {
            model.email = Set(email.trim().to_string());
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone.trim().to_string());
        }
        if let Some(date) = update.enrollment_date {
            model.enrollment_date = Set(date);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());
        let model = model.update(&txn).await?;

        if let Some(course_ids) = update.course_ids {
            let course_ids = dedup_ids(&course_ids);
            ensure_courses_exist(&txn, &course_ids).await?;
            replace_student_courses(&txn, id, &course_ids).await?;
        }

        let student = build_students(&txn, vec![model]).await?.pop();
        txn.commit().await?;
        Ok(student)
    }

    /// 删除学生及其选课记录，缴费记录保留
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        StudentCourses::delete_many()
            .filter(StudentCourseColumn::StudentId.eq(id))
            .exec(&txn)
            .await?;
        let result = Students::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// 选课（幂等）
    pub async fn enroll_student_impl(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        if Students::find_by_id(student_id).one(&txn).await?.is_none() {
            return Err(LmsError::not_found(format!(
                "Student not found with id: {student_id}"
            )));
        }
        if Courses::find_by_id(course_id).one(&txn).await?.is_none() {
            return Err(LmsError::not_found(format!(
                "Course not found with id: {course_id}"
            )));
        }
        if is_enrolled(&txn, student_id, course_id).await? {
            return Ok(false);
        }

        StudentCourses::insert(StudentCourseActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
        })
        .exec_without_returning(&txn)
        .await?;
        txn.commit().await?;
        Ok(true)
    }

    /// 退课
    pub async fn unenroll_student_impl(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let result = StudentCourses::delete_many()
            .filter(StudentCourseColumn::StudentId.eq(student_id))
            .filter(StudentCourseColumn::CourseId.eq(course_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
