//! 路径参数安全提取器
//!
//! 路径中的 id 无法解析为正整数时直接返回 400，而不是交给 actix 默认的 404。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter '{name}': {raw}"),
            ));
            Err(InternalError::from_response(format!("invalid {name}"), response).into())
        }
    }
}

macro_rules! define_safe_id_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_path_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeIDI64 => "id",
    SafeCourseIdI64 => "course_id",
    SafeTeacherIdI64 => "teacher_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn echo(id: SafeIDI64, course_id: SafeCourseIdI64) -> HttpResponse {
        HttpResponse::Ok().body(format!("{}:{}", id.0, course_id.0))
    }

    #[actix_web::test]
    async fn test_valid_ids() {
        let app = test::init_service(
            App::new().route("/s/{id}/c/{course_id}", web::get().to(echo)),
        )
        .await;
        let req = test::TestRequest::get().uri("/s/4/c/9").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "4:9");
    }

    #[actix_web::test]
    async fn test_invalid_id_is_bad_request() {
        let app = test::init_service(
            App::new().route("/s/{id}/c/{course_id}", web::get().to(echo)),
        )
        .await;
        for uri in ["/s/abc/c/1", "/s/0/c/1", "/s/1/c/-3"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        }
    }
}
