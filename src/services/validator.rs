//! 客观题判分
//!
//! 纯函数，不访问存储。答对得满分，答错得 0 分，不给部分分。

use std::collections::BTreeSet;

use crate::errors::{ClassworkError, Result};
use crate::models::questions::entities::{AnswerKey, Question, QuestionType};

/// 单题判分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    pub score: i32,
}

impl Verdict {
    fn judge(question: &Question, is_correct: bool) -> Self {
        Self {
            is_correct,
            score: if is_correct { question.score } else { 0 },
        }
    }

    fn ungraded() -> Self {
        Self {
            is_correct: false,
            score: 0,
        }
    }
}

/// 判断题答案归一化，无法识别的写法原样返回
pub fn normalize_boolean(raw: &str) -> &str {
    match raw {
        "true" | "True" | "TRUE" | "1" | "对" | "正确" | "是" => "true",
        "false" | "False" | "FALSE" | "0" | "错" | "错误" | "否" => "false",
        other => other,
    }
}

/// 判定学生答案是否正确
///
/// 简答题总是返回未判分结果；客观题缺少标准答案时返回校验错误。
pub fn validate_answer(question: &Question, content: &str) -> Result<Verdict> {
    if question.question_type == QuestionType::Essay {
        return Ok(Verdict::ungraded());
    }

    let key = question
        .answer_key
        .as_ref()
        .ok_or_else(|| ClassworkError::validation("question has no correct answer"))?;

    let is_correct = match (question.question_type, key) {
        (QuestionType::Choice, AnswerKey::KeySet(expected)) => {
            let submitted: Vec<String> = serde_json::from_str(content).map_err(|e| {
                ClassworkError::validation(format!("parse student answer failed: {e}"))
            })?;
            let unique: BTreeSet<String> = submitted.iter().cloned().collect();
            submitted.len() == expected.len() && unique == *expected
        }
        (QuestionType::TrueFalse, AnswerKey::SingleKey(expected)) => {
            normalize_boolean(content) == normalize_boolean(expected)
        }
        (_, AnswerKey::SingleKey(expected)) | (_, AnswerKey::FreeText(expected)) => {
            content == expected
        }
        (_, AnswerKey::KeySet(_)) => {
            return Err(ClassworkError::validation(format!(
                "answer key set is not valid for {} question",
                question.question_type
            )));
        }
    };

    Ok(Verdict::judge(question, is_correct))
}
