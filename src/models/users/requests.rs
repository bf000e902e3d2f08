use super::entities::UserRole;

// 创建用户（内部使用，password 为哈希后的值）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub roles: Vec<UserRole>,
}
