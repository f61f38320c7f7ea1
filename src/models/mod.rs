//! 数据模型定义
//!
//! 业务实体、请求与响应结构。与 `entity` 模块中的数据库实体分离，
//! 由 storage 层负责二者之间的转换。

pub mod answers;
pub mod assignments;
pub mod classes;
pub mod common;
pub mod grading;
pub mod questions;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
