use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单题答案。content 的格式取决于题型：纯文本、单个选项 key 或 key 的 JSON 数组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "answer.ts")]
pub struct Answer {
    pub id: i64,
    pub submission_id: i64,
    pub question_id: i64,
    pub content: String,
    pub score: i32,
    // 仅客观题自动判分或人工批改后有值
    pub is_correct: Option<bool>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub feedback: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
