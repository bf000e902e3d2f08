//! 端到端流程：内存 SQLite + 完整路由

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use lms_backend::routes;
use lms_backend::runtime::lifetime::startup::seed_admin;
use lms_backend::storage::{SeaOrmStorage, Storage};
use lms_backend::utils::{json_error_handler, query_error_handler};

const ADMIN_PASSWORD: &str = "admin-secret";

async fn storage() -> Arc<dyn Storage> {
    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::connect_memory()
            .await
            .expect("in-memory storage"),
    );
    seed_admin(&storage, ADMIN_PASSWORD)
        .await
        .expect("seed admin");
    storage
}

macro_rules! app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .configure(routes::configure_all_routes),
        )
        .await
    };
}

async fn call_json<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

// 每个测试使用不同的客户端 IP，避免共享登录限流计数
fn login_req(ip: &str, username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("X-Forwarded-For", ip.to_string()))
        .set_json(json!({ "username": username, "password": password }))
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

fn access_token(body: &Value) -> String {
    body["data"]["accessToken"]
        .as_str()
        .expect("access token")
        .to_string()
}

#[actix_web::test]
async fn test_payments_feed_financial_summary() {
    let storage = storage().await;
    let app = app!(storage);

    let (status, _) = call_json(
        &app,
        login_req("10.0.0.1", "admin", "wrong-password").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call_json(
        &app,
        login_req("10.0.0.1", "admin", ADMIN_PASSWORD).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tokenType"], "Bearer");
    let token = access_token(&body);

    // 未携带令牌
    let req = test::TestRequest::get().uri("/students").to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/courses")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Mathematics", "fee": 1500 }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let course_id = body["data"]["id"].as_i64().unwrap();

    // 不存在的课程 ID 被拒绝
    let req = test::TestRequest::post()
        .uri("/students")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Asha Rai",
            "email": "asha@example.com",
            "phone": "9800000010",
            "courseIds": [course_id, 9999]
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Course not found with id: 9999")
    );

    let mut student_ids = Vec::new();
    for (name, email) in [("Asha Rai", "asha@example.com"), ("Bikash Lama", "bikash@example.com")] {
        let req = test::TestRequest::post()
            .uri("/students")
            .insert_header(bearer(&token))
            .set_json(json!({
                "name": name,
                "email": email,
                "phone": "9800000010",
                "courseIds": [course_id]
            }))
            .to_request();
        let (status, body) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["courses"][0]["id"], course_id);
        student_ids.push(body["data"]["id"].as_i64().unwrap());
    }

    for (student_id, amount) in [(student_ids[0], 500), (student_ids[1], 700)] {
        let req = test::TestRequest::post()
            .uri("/payments")
            .insert_header(bearer(&token))
            .set_json(json!({
                "studentId": student_id,
                "courseId": course_id,
                "amount": amount,
                "paymentDate": "2025-08-05"
            }))
            .to_request();
        let (status, body) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["paymentMonth"], "2025-08");
        assert_eq!(body["data"]["courseName"], "Mathematics");
    }

    // 同月重复缴费
    let req = test::TestRequest::post()
        .uri("/payments")
        .insert_header(bearer(&token))
        .set_json(json!({
            "studentId": student_ids[0],
            "courseId": course_id,
            "amount": 500,
            "paymentDate": "2025-08-20"
        }))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/expenses")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Office rent",
            "amount": 200,
            "expenseDate": "2025-08-10",
            "category": "RENT"
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["categoryDisplayName"], "Office Rent");

    let req = test::TestRequest::get()
        .uri("/api/admin/financial-summary?month=2025-08")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["revenue"], 1200.0);
    assert_eq!(body["data"]["recordedExpenses"], 200.0);
    assert_eq!(body["data"]["netProfit"], 1000.0);
    assert_eq!(body["data"]["paymentCount"], 2);

    let req = test::TestRequest::get()
        .uri("/api/admin/financial-summary?month=2025-13")
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 非 ASCII 数字的月份（URL 编码的 "٢٠٢٥-٠٨"）
    for uri in [
        "/api/admin/financial-summary?month=%D9%A2%D9%A0%D9%A2%D9%A5-%D9%A0%D9%A8",
        "/api/expenses/total?month=%D9%A2%D9%A0%D9%A2%D9%A5-%D9%A0%D9%A8",
        "/payments?month=%D9%A2%D9%A0%D9%A2%D9%A5-%D9%A0%D9%A8",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&token))
            .to_request();
        let (status, _) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }

    let req = test::TestRequest::post()
        .uri("/payments")
        .insert_header(bearer(&token))
        .set_json(json!({
            "studentId": student_ids[1],
            "courseId": course_id,
            "amount": 700,
            "paymentMonth": "٢٠٢٥-٠٩"
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["paymentMonth"], "Payment month must be in YYYY-MM format");

    // 八月都已缴费，九月都未缴费
    for (month, expected) in [("2025-08", 0), ("2025-09", 2)] {
        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/admin/courses/{course_id}/unpaid-students?month={month}"
            ))
            .insert_header(bearer(&token))
            .to_request();
        let (status, body) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["count"], expected);
    }

    let req = test::TestRequest::get()
        .uri("/api/admin/courses/4242/unpaid-students")
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 退课后双方视图一致
    let req = test::TestRequest::delete()
        .uri(&format!("/students/{}/courses/{course_id}", student_ids[1]))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["courses"], json!([]));

    let req = test::TestRequest::get()
        .uri(&format!("/courses/{course_id}/students"))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/students/{}", student_ids[1]))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn test_teacher_salary_and_self_service() {
    let storage = storage().await;
    let app = app!(storage);

    let (_, body) = call_json(
        &app,
        login_req("10.0.0.2", "admin", ADMIN_PASSWORD).to_request(),
    )
    .await;
    let admin_token = access_token(&body);

    let req = test::TestRequest::post()
        .uri("/api/admin/create-teacher")
        .insert_header(bearer(&admin_token))
        .set_json(json!({
            "username": "sita",
            "password": "secret1",
            "name": "Sita Sharma",
            "phone": "9800000001",
            "salary": 25000
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let teacher_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call_json(
        &app,
        login_req("10.0.0.2", "sita", "secret1").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let teacher_token = access_token(&body);

    // 教师不能访问管理员接口
    let req = test::TestRequest::get()
        .uri("/payments")
        .insert_header(bearer(&teacher_token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/teachers/me")
        .insert_header(bearer(&teacher_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "sita");

    let pay = |payment_type: &str| {
        test::TestRequest::post()
            .uri("/api/admin/pay-teacher")
            .insert_header(bearer(&admin_token))
            .set_json(json!({
                "teacherId": teacher_id,
                "month": "2025-08",
                "paymentType": payment_type
            }))
            .to_request()
    };

    let (status, body) = call_json(&app, pay("FULL_SALARY")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["payment"]["amount"], 25000.0);
    assert_eq!(body["data"]["payment"]["description"], "Full Salary for 2025-08");

    // 同月第二次全额工资被拒绝
    let (status, body) = call_json(&app, pay("FULL_SALARY")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("already been paid"));

    let (status, _) = call_json(&app, pay("BONUS")).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/teachers/me/salary-payments?month=2025-08")
        .insert_header(bearer(&teacher_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 50000.0);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/admin/unpaid-teachers?month=2025-09")
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);

    // 删除教师后其账号随之删除，旧令牌失效
    let req = test::TestRequest::delete()
        .uri(&format!("/teachers/{teacher_id}"))
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(storage.get_user_by_id(teacher_id).await.unwrap().is_none());

    let req = test::TestRequest::get()
        .uri("/api/teachers/me")
        .insert_header(bearer(&teacher_token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_and_validation_errors() {
    let storage = storage().await;
    let app = app!(storage);

    let (_, body) = call_json(
        &app,
        login_req("10.0.0.3", "admin", ADMIN_PASSWORD).to_request(),
    )
    .await;
    let token = access_token(&body);
    let refresh = body["data"]["refreshToken"].as_str().unwrap().to_string();

    // access token 不能用于刷新
    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("X-Forwarded-For", "10.0.0.3"))
        .set_json(json!({ "refreshToken": token }))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("X-Forwarded-For", "10.0.0.3"))
        .set_json(json!({ "refreshToken": refresh }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["refreshToken"], refresh.as_str());
    let refreshed = access_token(&body);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&refreshed))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "admin");
    assert_eq!(body["data"]["user"]["roles"], json!(["ADMIN"]));

    // 字段级校验错误
    let req = test::TestRequest::post()
        .uri("/courses")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "AB", "fee": -5 }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["name"],
        "Course name must be between 3 and 100 characters!"
    );
    assert_eq!(body["data"]["fee"], "Course fee must be positive!");

    // 非法路径参数
    let req = test::TestRequest::get()
        .uri("/students/abc")
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "UP");
}
