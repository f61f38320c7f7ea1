use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use rust_classwork::cache::{NoOpCache, ObjectCache};
use rust_classwork::config::{DatabaseConfig, JwtConfig};
use rust_classwork::models::users::entities::UserRole;
use rust_classwork::routes;
use rust_classwork::runtime::lifetime::startup::AppServices;
use rust_classwork::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use rust_classwork::utils::jwt::JwtUtils;

const SECRET: &str = "integration-secret";
const TEACHER: i64 = 1;
const STUDENT: i64 = 2;

fn bearer(user_id: i64, role: UserRole) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user_id, role, SECRET, 30).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

async fn services() -> AppServices {
    let storage = SeaOrmStorage::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    })
    .await
    .unwrap();
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let cache: Arc<dyn ObjectCache> = Arc::new(NoOpCache);
    AppServices::new(storage, cache)
}

macro_rules! init_app {
    ($services:expr) => {{
        let services = $services;
        test::init_service(
            App::new()
                .app_data(web::Data::new(JwtConfig {
                    secret: SECRET.to_string(),
                    access_token_expiry: 30,
                }))
                .configure(|cfg| services.register(cfg))
                .configure(routes::configure_routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_requires_token() {
    let app = init_app!(services().await);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/1")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_role_prefilter() {
    let app = init_app!(services().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(bearer(STUDENT, UserRole::Student))
        .set_json(json!({ "class_name": "学生不能建班" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .set_json(json!({ "assignment_id": 1, "answers": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_assignment_round_trip_over_http() {
    let app = init_app!(services().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .set_json(json!({ "class_name": "系统编程" }))
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    let class_id = resp["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .set_json(json!({
            "class_id": class_id,
            "title": "生命周期练习",
            "deadline": (Utc::now() + Duration::days(3)).to_rfc3339(),
            "questions": [
                {
                    "type": "choice",
                    "content": "哪个关键字声明可变绑定？",
                    "score": 5,
                    "order": 1,
                    "options": [
                        { "key": "A", "value": "let" },
                        { "key": "B", "value": "let mut" }
                    ],
                    "correct_answer": "B"
                },
                {
                    "type": "essay",
                    "content": "解释借用规则",
                    "score": 10,
                    "order": 2
                }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let assignment_id = body["data"]["assignment"]["id"].as_i64().unwrap();
    let choice_id = body["data"]["questions"][0]["id"].as_i64().unwrap();

    // 草稿对学生不可见
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/assignments/{assignment_id}"))
        .insert_header(bearer(STUDENT, UserRole::Student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/assignments/{assignment_id}/publish"))
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/assignments/{assignment_id}/questions"))
        .insert_header(bearer(STUDENT, UserRole::Student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let questions = body["data"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert!(questions.iter().all(|q| q["answer_key"].is_null()));

    let req = test::TestRequest::post()
        .uri("/api/v1/submissions")
        .insert_header(bearer(STUDENT, UserRole::Student))
        .set_json(json!({
            "assignment_id": assignment_id,
            "answers": [{ "question_id": choice_id, "content": "B" }],
            "status": "submitted"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["submission"]["score"], 5);

    // 已有提交后不能修改题目
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/assignments/{assignment_id}/questions"))
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .set_json(json!({ "type": "essay", "content": "追加题", "score": 5, "order": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/assignments/{assignment_id}/grading-progress"))
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_submissions"], 1);
    assert_eq!(body["data"]["graded_count"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/assignments/{assignment_id}/statistics"))
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["submitted_count"], 1);
    assert_eq!(body["data"]["submission_rate"], 100.0);
    assert!(body["data"]["score_stats"].is_null());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/assignments/{assignment_id}/statistics"))
        .insert_header(bearer(STUDENT, UserRole::Student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/assignments/{assignment_id}/submission"))
        .insert_header(bearer(STUDENT, UserRole::Student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "submitted");
    assert!(body["data"]["score"].is_null());
}

#[actix_web::test]
async fn test_domain_errors_map_to_status() {
    let app = init_app!(services().await);

    let req = test::TestRequest::get()
        .uri("/api/v1/assignments/404")
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1004);

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(bearer(TEACHER, UserRole::Teacher))
        .set_json(json!({ "class_name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
