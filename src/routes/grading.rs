use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{current_user, error_response};
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::ApiResponse;
use crate::models::grading::requests::{BatchGradeRequest, GradeSubmissionRequest};
use crate::models::users::entities::UserRole;
use crate::services::GradingService;

// 获取批改详情
pub async fn get_grading_detail(
    req: HttpRequest,
    service: web::Data<GradingService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.grading_detail(path.into_inner(), user.id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 批改提交
pub async fn grade_submission(
    req: HttpRequest,
    service: web::Data<GradingService>,
    path: web::Path<i64>,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service
        .grade_submission(path.into_inner(), body.into_inner(), user.id)
        .await
    {
        Ok(graded) => Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "批改成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 批量批改
pub async fn batch_grade(
    req: HttpRequest,
    service: web::Data<GradingService>,
    body: web::Json<BatchGradeRequest>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.batch_grade(body.into_inner(), user.id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "批量批改完成"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 发布成绩
// POST /assignments/{id}/grades/publish
pub async fn publish_grades(
    req: HttpRequest,
    service: web::Data<GradingService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.publish_grades(path.into_inner(), user.id).await {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "成绩发布成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 批改进度
// GET /assignments/{id}/grading-progress
pub async fn grading_progress(
    req: HttpRequest,
    service: web::Data<GradingService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.grading_progress(path.into_inner(), user.id).await {
        Ok(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(progress, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 作业统计
// GET /assignments/{id}/statistics
pub async fn assignment_statistics(
    req: HttpRequest,
    service: web::Data<GradingService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.assignment_statistics(path.into_inner(), user.id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_grading_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grading")
            .wrap(RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(RequireJWT)
            .route("/batch", web::post().to(batch_grade))
            .route("/submissions/{id}", web::get().to(get_grading_detail))
            .route("/submissions/{id}", web::post().to(grade_submission)),
    );
}
