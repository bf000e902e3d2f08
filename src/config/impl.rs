use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// `config.toml` 自带的开发密钥，生产环境必须覆盖
pub const DEVELOPMENT_JWT_SECRET: &str = "lms-development-secret-change-me";

impl AppConfig {
    /// `config.toml` → `config.{APP_ENV}.toml` → `LMS__*` → 常用环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            .add_source(
                Environment::with_prefix("LMS")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// 拒绝会让登录或数据库无法工作的组合
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Message(msg.to_string()));

        if self.jwt.secret.is_empty() {
            return fail("jwt.secret is empty, set JWT_SECRET or jwt.secret in config.toml");
        }
        if self.is_production() && self.jwt.secret == DEVELOPMENT_JWT_SECRET {
            return fail("jwt.secret still uses the development default in production");
        }
        if self.jwt.access_token_expiry <= 0 || self.jwt.refresh_token_expiry <= 0 {
            return fail("jwt token expiry must be positive");
        }
        if self.database.pool_size == 0 {
            return fail("database.pool_size must be at least 1");
        }
        Ok(())
    }

    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时调用一次，之后通过 `get` 读取
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config_file() {
        let config = AppConfig::load().expect("config.toml should load");
        assert!(config.server.workers > 0);
        assert!(config.jwt.access_token_expiry > 0);
        assert!(!config.database.url.is_empty());
    }

    #[test]
    fn test_production_rejects_development_secret() {
        let mut config = AppConfig::load().expect("config.toml should load");
        config.jwt.secret = DEVELOPMENT_JWT_SECRET.to_string();
        config.app.environment = "development".to_string();
        assert!(config.validate().is_ok());

        config.app.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.jwt.secret = "a-real-production-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let base = AppConfig::load().expect("config.toml should load");

        let mut config = base.clone();
        config.jwt.secret.clear();
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.jwt.access_token_expiry = 0;
        assert!(config.validate().is_err());

        let mut config = base;
        config.database.pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::get();
        assert_eq!(
            config.server_bind_address(),
            format!("{}:{}", config.server.host, config.server.port)
        );
    }
}
