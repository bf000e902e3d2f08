use serde::{Deserialize, Serialize};

/// LMS 后端的全部配置，对应 `config.toml` 的各个表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub argon2: Argon2Config,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// 启动日志与健康检查中显示的名称
    pub system_name: String,
    /// development / production，决定日志格式和密钥检查
    pub environment: String,
    /// `EnvFilter` 语法，例如 `info,sea_orm=warn`
    pub log_level: String,
}

/// HTTP 监听与 worker 设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 非空时改为监听 Unix 套接字
    pub unix_socket_path: String,
    /// 0 表示按 CPU 数量，上限 `max_workers`
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 毫秒；keep_alive 为秒
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// JSON 请求体上限（字节）
    pub max_payload_size: usize,
}

/// 管理员与教师登录令牌
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)]
    pub secret: String,
    /// 分钟
    pub access_token_expiry: i64,
    /// 天
    pub refresh_token_expiry: i64,
}

/// 用户密码的 argon2id 参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 不带 scheme 的路径按 SQLite 文件处理
    pub pool_size: u32,
    pub timeout: u64,   // 秒
}

/// 前端来源白名单，空列表表示允许任意来源
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}
