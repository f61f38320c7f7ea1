use serde::Deserialize;
use ts_rs::TS;

use super::entities::{QuestionOption, QuestionType};

// 创建题目请求
//
// correct_answer 为原始文本：单选题为选项 key，多选题为 key 的 JSON 数组，
// 判断题接受 true/false/对/错 等写法，填空题为标准答案文本。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct CreateQuestionRequest {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub content: String,
    pub score: i32,
    pub order: i32,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub is_multiple: bool,
    pub reference: Option<String>,
    pub explanation: Option<String>,
}

// 更新题目请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct UpdateQuestionRequest {
    pub content: Option<String>,
    pub score: Option<i32>,
    pub order: Option<i32>,
    pub options: Option<Vec<QuestionOption>>,
    pub correct_answer: Option<String>,
    pub is_multiple: Option<bool>,
    pub reference: Option<String>,
    pub explanation: Option<String>,
}
