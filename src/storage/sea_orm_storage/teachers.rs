use std::collections::HashMap;

use super::SeaOrmStorage;
use super::users::insert_user;
use crate::entity::course_teachers::{Column as CourseTeacherColumn, Entity as CourseTeachers};
use crate::entity::courses::Entity as Courses;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers, Model as TeacherModel};
use crate::entity::user_roles::{Column as UserRoleColumn, Entity as UserRoles};
use crate::entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as Users,
};
use crate::errors::{LmsError, Result};
use crate::models::{
    courses::entities::CourseSummary,
    teachers::{
        entities::Teacher,
        requests::{NewTeacher, TeacherChanges},
    },
    users::{entities::UserRole, requests::CreateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 批量查询教师所授课程
async fn load_teacher_courses<C: ConnectionTrait>(
    db: &C,
    teacher_ids: &[i64],
) -> Result<HashMap<i64, Vec<CourseSummary>>> {
    let mut map: HashMap<i64, Vec<CourseSummary>> = HashMap::new();
    if teacher_ids.is_empty() {
        return Ok(map);
    }

    let rows = CourseTeachers::find()
        .filter(CourseTeacherColumn::TeacherId.is_in(teacher_ids.iter().copied()))
        .order_by_asc(CourseTeacherColumn::CourseId)
        .find_also_related(Courses)
        .all(db)
        .await?;

    for (link, course) in rows {
        if let Some(course) = course {
            map.entry(link.teacher_id)
                .or_default()
                .push(course.to_summary());
        }
    }
    Ok(map)
}

/// 把教师实体批量转换为业务模型（附带登录名与课程）
pub(super) async fn build_teachers<C: ConnectionTrait>(
    db: &C,
    models: Vec<TeacherModel>,
) -> Result<Vec<Teacher>> {
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let mut courses = load_teacher_courses(db, &ids).await?;
    let mut usernames: HashMap<i64, String> = if ids.is_empty() {
        HashMap::new()
    } else {
        Users::find()
            .filter(UserColumn::Id.is_in(ids.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect()
    };

    Ok(models
        .into_iter()
        .map(|m| {
            let username = usernames.remove(&m.id).unwrap_or_default();
            let c = courses.remove(&m.id).unwrap_or_default();
            m.into_teacher(username, c)
        })
        .collect())
}

impl SeaOrmStorage {
    /// 创建教师：先建登录账号（TEACHER 角色），再以同一 id 建教师档案
    pub async fn create_teacher_impl(&self, req: NewTeacher) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let user = insert_user(
            &txn,
            CreateUserRequest {
                username: req.username.trim().to_string(),
                password: req.password_hash,
                roles: vec![UserRole::Teacher],
            },
        )
        .await?;

        let model = ActiveModel {
            id: Set(user.id),
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.filter(|e| !e.trim().is_empty())),
            phone: Set(req.phone.trim().to_string()),
            salary: Set(req.salary),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| LmsError::database_operation(format!("Failed to create teacher: {e}")))?;

        txn.commit().await?;
        Ok(model.into_teacher(user.username, Vec::new()))
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let Some(model) = Teachers::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(build_teachers(&self.db, vec![model]).await?.pop())
    }

    /// 列出全部教师
    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let models = Teachers::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list teachers: {e}")))?;
        build_teachers(&self.db, models).await
    }

    /// 更新教师档案，可同时重置登录密码
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        changes: TeacherChanges,
    ) -> Result<Option<Teacher>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;
        let Some(existing) = Teachers::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(email) = changes.email {
            model.email = Set(Some(email).filter(|e| !e.trim().is_empty()));
        }
        if let Some(phone) = changes.phone {
            model.phone = Set(phone.trim().to_string());
        }
        if let Some(salary) = changes.salary {
            model.salary = Set(salary);
        }
        model.updated_at = Set(now);
        let model = model.update(&txn).await?;

        if let Some(password_hash) = changes.password_hash {
            UserActiveModel {
                id: Set(id),
                password_hash: Set(password_hash),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }

        let teacher = build_teachers(&txn, vec![model]).await?.pop();
        txn.commit().await?;
        Ok(teacher)
    }

    /// 删除教师及其登录账号
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        if Teachers::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }

        CourseTeachers::delete_many()
            .filter(CourseTeacherColumn::TeacherId.eq(id))
            .exec(&txn)
            .await?;
        Teachers::delete_by_id(id).exec(&txn).await?;
        UserRoles::delete_many()
            .filter(UserRoleColumn::UserId.eq(id))
            .exec(&txn)
            .await?;
        Users::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(true)
    }
}
