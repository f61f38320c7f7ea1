use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{current_user, error_response};
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::ApiResponse;
use crate::models::submissions::requests::SaveSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;

// 保存草稿或提交作业
pub async fn save_submission(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    body: web::Json<SaveSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service
        .create_or_update_submission(user.id, body.into_inner())
        .await
    {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "保存成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 提交已保存的草稿
// POST /assignments/{id}/submit
pub async fn submit_submission(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.submit_submission(path.into_inner(), user.id).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取我的提交
// GET /assignments/{id}/submission
pub async fn get_my_submission(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.get_my_submission(path.into_inner(), user.id).await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(view, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(RequireRole::new_any(UserRole::student_roles()))
            .wrap(RequireJWT)
            .route("", web::post().to(save_submission)),
    );
}
