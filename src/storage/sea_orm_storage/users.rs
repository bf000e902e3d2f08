use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::roles::{Column as RoleColumn, Entity as Roles};
use crate::entity::user_roles::{
    ActiveModel as UserRoleActiveModel, Column as UserRoleColumn, Entity as UserRoles,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel};
use crate::errors::{LmsError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

/// 批量查询用户角色
pub(super) async fn load_user_roles<C: ConnectionTrait>(
    db: &C,
    user_ids: &[i64],
) -> Result<HashMap<i64, Vec<UserRole>>> {
    let mut map: HashMap<i64, Vec<UserRole>> = HashMap::new();
    if user_ids.is_empty() {
        return Ok(map);
    }

    let rows = UserRoles::find()
        .filter(UserRoleColumn::UserId.is_in(user_ids.iter().copied()))
        .find_also_related(Roles)
        .all(db)
        .await
        .map_err(|e| LmsError::database_operation(format!("Failed to load user roles: {e}")))?;

    for (link, role) in rows {
        if let Some(role) = role.and_then(|r| r.name.parse::<UserRole>().ok()) {
            map.entry(link.user_id).or_default().push(role);
        }
    }
    Ok(map)
}

/// 为用户绑定角色，角色必须已在 roles 表中
pub(super) async fn assign_roles<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    roles: &[UserRole],
) -> Result<()> {
    for role in roles {
        let role_row = Roles::find()
            .filter(RoleColumn::Name.eq(role.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| LmsError::database_operation(format!("Role {role} is not seeded")))?;

        UserRoles::insert(UserRoleActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_row.id),
        })
        .exec_without_returning(db)
        .await?;
    }
    Ok(())
}

/// 插入用户及其角色
pub(super) async fn insert_user<C: ConnectionTrait>(
    db: &C,
    req: CreateUserRequest,
) -> Result<UserModel> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        username: Set(req.username),
        password_hash: Set(req.password),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| LmsError::database_operation(format!("Failed to create user: {e}")))?;

    assign_roles(db, model.id, &req.roles).await?;
    Ok(model)
}

impl SeaOrmStorage {
    async fn with_roles(&self, model: Option<UserModel>) -> Result<Option<User>> {
        let Some(model) = model else {
            return Ok(None);
        };
        let mut roles = load_user_roles(&self.db, &[model.id]).await?;
        let roles = roles.remove(&model.id).unwrap_or_default();
        Ok(Some(model.into_user(roles)))
    }

    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let roles = req.roles.clone();
        let txn = self.db.begin().await?;
        let model = insert_user(&txn, req).await?;
        txn.commit().await?;

        Ok(model.into_user(roles))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query user: {e}")))?;

        self.with_roles(result).await
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query user: {e}")))?;

        self.with_roles(result).await
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Ok(Users::find().count(&self.db).await?)
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                LmsError::database_operation(format!("Failed to update last login: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
