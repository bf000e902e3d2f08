use crate::errors::Result;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::{SeaOrmStorage, Storage};
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
///
/// 只有在 users 表为空时才创建，返回新建的管理员。
pub async fn seed_admin(storage: &Arc<dyn Storage>, password: &str) -> Result<Option<User>> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!(
            "Database already has {} user(s), skipping admin seed",
            count
        );
        return Ok(None);
    }

    info!("No users found in database, creating default admin account...");
    let admin_request = CreateUserRequest {
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        password: hash_password(password)?,
        roles: vec![UserRole::Admin],
    };

    let user = storage.create_user(admin_request).await?;
    info!(
        "Default admin account created successfully (ID: {}, username: {})",
        user.id, user.username
    );
    Ok(Some(user))
}

/// 管理员初始密码：优先从环境变量，否则生成随机密码并打印一次
fn admin_password() -> String {
    std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let pwd = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            pwd
        })
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::new_async()
            .await
            .expect("Failed to create storage backend"),
    );
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    match storage.count_users().await {
        Ok(0) => {
            if let Err(e) = seed_admin(&storage, &admin_password()).await {
                warn!("Failed to create admin account: {}", e);
            }
        }
        Ok(_) => debug!("Users present, admin seed not needed"),
        Err(e) => warn!("Failed to count users: {}, skipping admin seed", e),
    }

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert_ne!(pwd, generate_random_password(16));
    }

    #[tokio::test]
    async fn test_seed_admin_only_once() {
        let storage: Arc<dyn Storage> =
            Arc::new(SeaOrmStorage::connect_memory().await.unwrap());

        let admin = seed_admin(&storage, "admin-secret").await.unwrap().unwrap();
        assert_eq!(admin.username, DEFAULT_ADMIN_USERNAME);
        assert!(admin.is_admin());

        assert!(seed_admin(&storage, "other").await.unwrap().is_none());
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }
}
