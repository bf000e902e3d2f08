use crate::models::users::entities::User;
use serde::Serialize;

pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// 登录 / 刷新令牌响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtAuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// access token 有效期（秒）
    pub expires_in: i64,
}

impl JwtAuthResponse {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
}
