use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;

// 单题答案
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct AnswerRequest {
    pub question_id: i64,
    pub content: String,
}

// 保存（草稿或提交）作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SaveSubmissionRequest {
    pub assignment_id: i64,
    #[serde(default)]
    pub answers: Vec<AnswerRequest>,
    #[serde(default)]
    pub status: SubmissionStatus,
}
