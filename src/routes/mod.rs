pub mod assignments;

pub mod classes;

pub mod grading;

pub mod questions;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use classes::configure_classes_routes;
pub use grading::configure_grading_routes;
pub use questions::configure_questions_routes;
pub use submissions::configure_submissions_routes;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use tracing::error;

use crate::errors::ClassworkError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::CurrentUser;
use crate::models::{ApiResponse, ErrorCode};

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    configure_classes_routes(cfg);
    configure_assignments_routes(cfg);
    configure_questions_routes(cfg);
    configure_submissions_routes(cfg);
    configure_grading_routes(cfg);
}

/// 按错误类型映射 HTTP 状态码，不依赖错误消息文本
pub fn status_for(err: &ClassworkError) -> StatusCode {
    match err {
        ClassworkError::Validation(_)
        | ClassworkError::InvalidState(_)
        | ClassworkError::DeadlineExceeded(_) => StatusCode::BAD_REQUEST,
        ClassworkError::NotFound(_) => StatusCode::NOT_FOUND,
        ClassworkError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        ClassworkError::Conflict(_) => StatusCode::CONFLICT,
        ClassworkError::Authentication(_) => StatusCode::UNAUTHORIZED,
        ClassworkError::CachePluginNotFound(_)
        | ClassworkError::DatabaseConfig(_)
        | ClassworkError::DatabaseConnection(_)
        | ClassworkError::DatabaseOperation(_)
        | ClassworkError::FileOperation(_)
        | ClassworkError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 业务错误转为统一响应，基础设施错误只记录日志不向调用方暴露细节
pub fn error_response(err: &ClassworkError) -> HttpResponse {
    let status = status_for(err);
    let message = if err.is_domain() || status == StatusCode::UNAUTHORIZED {
        err.message().to_string()
    } else {
        error!("Internal error: {}", err);
        "服务器内部错误".to_string()
    };

    HttpResponse::build(status).json(ApiResponse::error_empty(ErrorCode::from(err), message))
}

/// 取出 JWT 中间件解析的调用者
pub(crate) fn current_user(req: &HttpRequest) -> Result<CurrentUser, HttpResponse> {
    RequireJWT::extract_current_user(req).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ClassworkError::not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ClassworkError::permission_denied("x")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&ClassworkError::deadline_exceeded("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ClassworkError::conflict("x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&ClassworkError::database_operation("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
