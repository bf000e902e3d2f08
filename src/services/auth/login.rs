use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{JwtAuthResponse, LoginRequest},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

const BAD_CREDENTIALS: &str = "Username or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if login_request.username.trim().is_empty() || login_request.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Username and password are required",
        )));
    }

    // 1. 根据用户名获取用户信息
    let user = match storage.get_user_by_username(login_request.username.trim()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Login failed: unknown user {}", login_request.username);
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::AuthFailed, BAD_CREDENTIALS)));
        }
        Err(e) => {
            error!("Login failed while loading user: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, please try again later",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        info!("Login failed: wrong password for {}", user.username);
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::AuthFailed, BAD_CREDENTIALS)));
    }

    // 3. 更新最后登录时间，失败不影响登录
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for {}: {}", user.id, e);
    }

    // 4. 生成令牌对
    match user.generate_token_pair() {
        Ok(token_pair) => {
            info!("User {} logged in successfully", user.username);
            let response = JwtAuthResponse::bearer(
                token_pair.access_token,
                token_pair.refresh_token,
                JwtUtils::access_token_ttl_secs(),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
