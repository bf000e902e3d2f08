/*!
 * 认证端点的限流中间件
 *
 * 按客户端 IP 做固定窗口计数：窗口从该 IP 的第一次请求开始，
 * 持续 `window_secs` 秒，窗口内超过 `max_hits` 次返回 429。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 *
 * 客户端 IP 取自 `ConnectionInfo::realip_remote_addr`（Forwarded / X-Forwarded-For / 对端地址），
 * 部署在反向代理之后时需要由代理覆盖这些头。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::{Expiry, future::Cache};
use once_cell::sync::Lazy;
use std::net::{IpAddr, SocketAddr};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

// 某个 IP 在某个端点上的当前窗口
#[derive(Clone, Copy)]
struct Window {
    hits: u32,
    opened_at: Instant,
    length: Duration,
}

impl Window {
    fn open(length: Duration) -> Self {
        Self {
            hits: 1,
            opened_at: Instant::now(),
            length,
        }
    }

    // 距窗口结束的秒数，向上取整，至少 1
    fn retry_after_secs(&self) -> u64 {
        let left = self.length.saturating_sub(self.opened_at.elapsed());
        (left.as_millis().div_ceil(1000) as u64).max(1)
    }
}

// 条目在创建时按各自的窗口长度过期，更新不续期
struct WindowExpiry;

impl Expiry<String, Window> for WindowExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        window: &Window,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(window.length)
    }
}

/// 键: `端点:ip`
static WINDOWS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .expire_after(WindowExpiry)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_hits: u32,
    window: Duration,
    endpoint: &'static str,
}

impl RateLimit {
    pub fn new(endpoint: &'static str, max_hits: u32, window_secs: u64) -> Self {
        Self {
            max_hits,
            window: Duration::from_secs(window_secs),
            endpoint,
        }
    }

    /// 登录：每 IP 每分钟 5 次
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 刷新令牌：每 IP 每分钟 10 次
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }
}

fn client_ip(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    let Some(addr) = info.realip_remote_addr() else {
        return "unknown".to_string();
    };
    // 对端地址带端口，转发头通常不带
    addr.parse::<SocketAddr>()
        .map(|s| s.ip())
        .or_else(|_| addr.parse::<IpAddr>())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|_| addr.to_string())
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = format!("{}:{}", limit.endpoint, client_ip(&req));

            // 计数与读取在同一次 upsert 中完成
            let window = WINDOWS
                .entry(key.clone())
                .and_upsert_with(|current| {
                    let next = match current {
                        Some(entry) => {
                            let mut window = entry.into_value();
                            window.hits = window.hits.saturating_add(1);
                            window
                        }
                        None => Window::open(limit.window),
                    };
                    ready(next)
                })
                .await
                .into_value();

            if window.hits > limit.max_hits {
                warn!(
                    "Rate limit exceeded for {} ({}/{} in {}s)",
                    key,
                    window.hits,
                    limit.max_hits,
                    limit.window.as_secs()
                );
                let response = too_many_requests(window.retry_after_secs());
                return Ok(req.into_response(response.map_into_right_body()));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};

    #[::core::prelude::v1::test]
    fn test_auth_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_hits, 5);
        assert_eq!(login.window, Duration::from_secs(60));
        assert_eq!(login.endpoint, "login");

        let refresh = RateLimit::refresh_token();
        assert_eq!(refresh.max_hits, 10);
        assert_eq!(refresh.endpoint, "refresh");
    }

    #[::core::prelude::v1::test]
    fn test_retry_after_rounds_up() {
        let window = Window::open(Duration::from_secs(60));
        let secs = window.retry_after_secs();
        assert!((59..=60).contains(&secs));

        let closed = Window {
            hits: 3,
            opened_at: Instant::now(),
            length: Duration::ZERO,
        };
        assert_eq!(closed.retry_after_secs(), 1);
    }

    #[actix_web::test]
    async fn test_rejects_after_limit_per_ip() {
        let app = test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new("unit-limit", 2, 60))
                    .route(web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let request = |ip: &str| {
            test::TestRequest::get()
                .uri("/limited")
                .insert_header(("X-Forwarded-For", ip.to_string()))
                .to_request()
        };

        for _ in 0..2 {
            let resp = test::call_service(&app, request("10.9.9.9")).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = test::call_service(&app, request("10.9.9.9")).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = resp
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap();
        assert!((1..=60).contains(&retry_after));

        // 其他 IP 不受影响
        let resp = test::call_service(&app, request("10.9.9.10")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_window_length_follows_limiter() {
        let app = test::init_service(
            App::new().service(
                web::resource("/short")
                    .wrap(RateLimit::new("unit-short", 1, 1))
                    .route(web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let request = || {
            test::TestRequest::get()
                .uri("/short")
                .insert_header(("X-Forwarded-For", "10.8.8.8"))
                .to_request()
        };

        let resp = test::call_service(&app, request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        // 1 秒窗口结束后重新计数
        std::thread::sleep(Duration::from_millis(1200));
        let resp = test::call_service(&app, request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
