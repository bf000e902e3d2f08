use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::auth::{JwtAuthResponse, RefreshTokenRequest, UserInfoResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

// 用 refresh token 换新的 access token，refresh token 原样返回
pub async fn handle_refresh_token(
    refresh_request: RefreshTokenRequest,
) -> ActixResult<HttpResponse> {
    match JwtUtils::refresh_access_token(&refresh_request.refresh_token) {
        Ok(access_token) => {
            let response = JwtAuthResponse::bearer(
                access_token,
                refresh_request.refresh_token,
                JwtUtils::access_token_ttl_secs(),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid refresh token",
            )))
        }
    }
}

pub async fn handle_get_user(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))),
    }
}
