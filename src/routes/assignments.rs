use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{current_user, error_response, grading, questions, submissions};
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::ApiResponse;
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.create_assignment(user.id, body.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Created().json(ApiResponse::success(detail, "作业创建成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取作业详情
pub async fn get_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.get_assignment_detail(path.into_inner(), user).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service
        .update_assignment(path.into_inner(), user.id, body.into_inner())
        .await
    {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业更新成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 删除作业
pub async fn delete_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.delete_assignment(path.into_inner(), user.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业删除成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 发布作业
pub async fn publish_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.publish_assignment(path.into_inner(), user.id).await {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业发布成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 撤回发布
pub async fn unpublish_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.unpublish_assignment(path.into_inner(), user.id).await {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业已撤回")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 关闭作业
pub async fn close_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.close_assignment(path.into_inner(), user.id).await {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业已关闭")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
//
// 作业下的题目、提交和成绩路由也注册在这里，避免同前缀的 scope 互相遮挡。
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    let teacher_only = || RequireRole::new_any(UserRole::teacher_roles());
    let student_only = || RequireRole::new_any(UserRole::student_roles());

    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(teacher_only())
                    .route(web::post().to(create_assignment)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assignment))
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(teacher_only()),
                    )
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(teacher_only()),
                    ),
            )
            .service(
                web::resource("/{id}/publish")
                    .wrap(teacher_only())
                    .route(web::post().to(publish_assignment)),
            )
            .service(
                web::resource("/{id}/unpublish")
                    .wrap(teacher_only())
                    .route(web::post().to(unpublish_assignment)),
            )
            .service(
                web::resource("/{id}/close")
                    .wrap(teacher_only())
                    .route(web::post().to(close_assignment)),
            )
            .service(
                web::resource("/{id}/questions")
                    .route(web::get().to(questions::list_questions))
                    .route(
                        web::post()
                            .to(questions::create_question)
                            .wrap(teacher_only()),
                    ),
            )
            .service(
                web::resource("/{id}/submit")
                    .wrap(student_only())
                    .route(web::post().to(submissions::submit_submission)),
            )
            .service(
                web::resource("/{id}/submission")
                    .wrap(student_only())
                    .route(web::get().to(submissions::get_my_submission)),
            )
            .service(
                web::resource("/{id}/grades/publish")
                    .wrap(teacher_only())
                    .route(web::post().to(grading::publish_grades)),
            )
            .service(
                web::resource("/{id}/grading-progress")
                    .wrap(teacher_only())
                    .route(web::get().to(grading::grading_progress)),
            )
            .service(
                web::resource("/{id}/statistics")
                    .wrap(teacher_only())
                    .route(web::get().to(grading::assignment_statistics)),
            ),
    );
}
