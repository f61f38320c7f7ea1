//! 请求参数解析错误处理
//!
//! 将 actix-web 的 JSON、查询参数和路径参数解析失败统一包装为 `ApiResponse`。

use actix_web::error::{
    InternalError, JsonPayloadError, PathError, QueryPayloadError,
};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message))
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON payload error on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "请求体必须为 application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "请求体过大".to_string()
        }
        JsonPayloadError::Deserialize(e) => format!("请求体格式错误: {e}"),
        other => format!("请求体解析失败: {other}"),
    };
    InternalError::from_response(err, bad_request(message)).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query payload error on {}: {}", req.path(), err);
    let message = format!("查询参数错误: {err}");
    InternalError::from_response(err, bad_request(message)).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    debug!("Path parameter error on {}: {}", req.path(), err);
    let message = format!("路径参数错误: {err}");
    InternalError::from_response(err, bad_request(message)).into()
}
