use serde::Deserialize;
use ts_rs::TS;

use crate::models::questions::requests::CreateQuestionRequest;

// 创建作业请求，可同时附带题目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub class_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: chrono::DateTime<chrono::Utc>,
    pub total_score: Option<i32>,
    #[serde(default)]
    pub questions: Vec<CreateQuestionRequest>,
}

// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub total_score: Option<i32>,
}
