use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求，教师 ID 取自当前登录用户
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub class_name: String,
    pub description: Option<String>,
}
