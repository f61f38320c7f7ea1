use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::{current_user, error_response};
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::ApiResponse;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::UserRole;
use crate::services::ClassService;

// 创建班级
pub async fn create_class(
    req: HttpRequest,
    service: web::Data<ClassService>,
    body: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.create_class(user.id, body.into_inner()).await {
        Ok(class) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "班级创建成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取班级信息
pub async fn get_class(
    req: HttpRequest,
    service: web::Data<ClassService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match service.get_class(path.into_inner(), user.id).await {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(class, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(RequireJWT)
            .route("", web::post().to(create_class))
            .route("/{id}", web::get().to(get_class)),
    );
}
