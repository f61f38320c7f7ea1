use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{current_user, error_response};
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::ApiResponse;
use crate::models::questions::requests::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::models::users::entities::UserRole;
use crate::services::QuestionService;

// 列出作业题目
// GET /assignments/{id}/questions
pub async fn list_questions(
    req: HttpRequest,
    service: web::Data<QuestionService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.list_questions(path.into_inner(), user).await {
        Ok(questions) => Ok(HttpResponse::Ok().json(ApiResponse::success(questions, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 添加题目
// POST /assignments/{id}/questions
pub async fn create_question(
    req: HttpRequest,
    service: web::Data<QuestionService>,
    path: web::Path<i64>,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service
        .create_question(path.into_inner(), user.id, body.into_inner())
        .await
    {
        Ok(question) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(question, "题目创建成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 修改题目
pub async fn update_question(
    req: HttpRequest,
    service: web::Data<QuestionService>,
    path: web::Path<i64>,
    body: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service
        .update_question(path.into_inner(), user.id, body.into_inner())
        .await
    {
        Ok(question) => Ok(HttpResponse::Ok().json(ApiResponse::success(question, "题目更新成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 删除题目
pub async fn delete_question(
    req: HttpRequest,
    service: web::Data<QuestionService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.delete_question(path.into_inner(), user.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题目删除成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_questions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(RequireJWT)
            .route("/{id}", web::put().to(update_question))
            .route("/{id}", web::delete().to(delete_question)),
    );
}
