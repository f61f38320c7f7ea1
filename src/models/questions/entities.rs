use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ClassworkError, Result};

// 题目类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "question.ts")]
pub enum QuestionType {
    Choice,    // 选择题（单选或多选）
    FillBlank, // 填空题
    TrueFalse, // 判断题
    Essay,     // 简答题，需人工批改
}

impl QuestionType {
    pub const CHOICE: &'static str = "choice";
    pub const FILL_BLANK: &'static str = "fill_blank";
    pub const TRUE_FALSE: &'static str = "true_false";
    pub const ESSAY: &'static str = "essay";

    /// 客观题可以自动判分
    pub fn is_objective(&self) -> bool {
        !matches!(self, QuestionType::Essay)
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的题目类型: '{s}'. 支持的类型: choice, fill_blank, true_false, essay"
            ))
        })
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Choice => write!(f, "{}", QuestionType::CHOICE),
            QuestionType::FillBlank => write!(f, "{}", QuestionType::FILL_BLANK),
            QuestionType::TrueFalse => write!(f, "{}", QuestionType::TRUE_FALSE),
            QuestionType::Essay => write!(f, "{}", QuestionType::ESSAY),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            QuestionType::CHOICE => Ok(QuestionType::Choice),
            QuestionType::FILL_BLANK => Ok(QuestionType::FillBlank),
            QuestionType::TRUE_FALSE => Ok(QuestionType::TrueFalse),
            QuestionType::ESSAY => Ok(QuestionType::Essay),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

/// 选择题选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct QuestionOption {
    pub key: String,
    pub value: String,
}

/// 标准答案
///
/// 数据库中以文本列保存：`KeySet` 编码为 JSON 数组，其余为原始文本。
/// 编解码只发生在 storage 层。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export, export_to = "question.ts")]
pub enum AnswerKey {
    /// 单选题、判断题
    SingleKey(String),
    /// 多选题
    KeySet(BTreeSet<String>),
    /// 填空题
    FreeText(String),
}

impl AnswerKey {
    /// 编码为数据库文本
    pub fn encode(&self) -> Result<String> {
        match self {
            AnswerKey::SingleKey(key) => Ok(key.clone()),
            AnswerKey::FreeText(text) => Ok(text.clone()),
            AnswerKey::KeySet(keys) => Ok(serde_json::to_string(keys)?),
        }
    }

    /// 从数据库文本解码，空文本表示未设置标准答案
    pub fn decode(question_type: QuestionType, raw: Option<&str>) -> Result<Option<AnswerKey>> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let key = match question_type {
            QuestionType::Essay => return Ok(None),
            QuestionType::Choice if raw.starts_with('[') => {
                let keys: Vec<String> = serde_json::from_str(raw).map_err(|e| {
                    ClassworkError::serialization(format!("解析多选题标准答案失败: {e}"))
                })?;
                AnswerKey::KeySet(keys.into_iter().collect())
            }
            QuestionType::Choice | QuestionType::TrueFalse => AnswerKey::SingleKey(raw.to_string()),
            QuestionType::FillBlank => AnswerKey::FreeText(raw.to_string()),
        };

        Ok(Some(key))
    }

    /// 由请求中的原始答案构建标准答案
    ///
    /// 多选题可以用 `is_multiple` 标记，也可以直接传 JSON 数组。
    pub fn from_request(
        question_type: QuestionType,
        raw: Option<&str>,
        is_multiple: bool,
    ) -> Result<Option<AnswerKey>> {
        let raw = match raw.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let key = match question_type {
            QuestionType::Essay => return Ok(None),
            QuestionType::Choice if is_multiple || raw.starts_with('[') => {
                let keys: Vec<String> = serde_json::from_str(raw).map_err(|_| {
                    ClassworkError::validation(
                        "multiple choice answer must be a JSON array of option keys",
                    )
                })?;
                if keys.is_empty() {
                    return Err(ClassworkError::validation(
                        "multiple choice answer must contain at least one key",
                    ));
                }
                AnswerKey::KeySet(keys.into_iter().collect())
            }
            QuestionType::Choice => AnswerKey::SingleKey(raw.to_string()),
            QuestionType::TrueFalse => {
                let normalized = crate::services::validator::normalize_boolean(raw);
                if normalized != "true" && normalized != "false" {
                    return Err(ClassworkError::validation(format!(
                        "invalid true/false answer: {raw}"
                    )));
                }
                AnswerKey::SingleKey(raw.to_string())
            }
            QuestionType::FillBlank => AnswerKey::FreeText(raw.to_string()),
        };

        Ok(Some(key))
    }

    /// 标准答案引用的选项 key
    pub fn option_keys(&self) -> Vec<&str> {
        match self {
            AnswerKey::SingleKey(key) => vec![key.as_str()],
            AnswerKey::KeySet(keys) => keys.iter().map(String::as_str).collect(),
            AnswerKey::FreeText(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct Question {
    pub id: i64,
    pub assignment_id: i64,
    pub question_type: QuestionType,
    pub content: String,
    pub score: i32,
    // 显示顺序，作业内唯一
    pub order: i32,
    pub options: Vec<QuestionOption>,
    pub answer_key: Option<AnswerKey>,
    pub reference: Option<String>,
    pub explanation: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Question {
    /// 去掉标准答案、参考答案和解析，用于学生视图
    pub fn without_key(mut self) -> Self {
        self.answer_key = None;
        self.reference = None;
        self.explanation = None;
        self
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self.answer_key, Some(AnswerKey::KeySet(_)))
    }
}

/// 待写入的新题目
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_type: QuestionType,
    pub content: String,
    pub score: i32,
    pub order: i32,
    pub options: Vec<QuestionOption>,
    pub answer_key: Option<AnswerKey>,
    pub reference: Option<String>,
    pub explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_and_multi_choice() {
        assert_eq!(
            AnswerKey::decode(QuestionType::Choice, Some("B")).unwrap(),
            Some(AnswerKey::SingleKey("B".into()))
        );
        let multi = AnswerKey::decode(QuestionType::Choice, Some(r#"["C","A"]"#))
            .unwrap()
            .unwrap();
        assert_eq!(
            multi,
            AnswerKey::KeySet(["A".to_string(), "C".to_string()].into_iter().collect())
        );
        assert_eq!(multi.encode().unwrap(), r#"["A","C"]"#);
    }

    #[test]
    fn test_decode_empty_and_essay() {
        assert_eq!(AnswerKey::decode(QuestionType::Choice, None).unwrap(), None);
        assert_eq!(AnswerKey::decode(QuestionType::FillBlank, Some("")).unwrap(), None);
        assert_eq!(
            AnswerKey::decode(QuestionType::Essay, Some("anything")).unwrap(),
            None
        );
    }

    #[test]
    fn test_decode_fill_blank_keeps_brackets() {
        assert_eq!(
            AnswerKey::decode(QuestionType::FillBlank, Some("[x]")).unwrap(),
            Some(AnswerKey::FreeText("[x]".into()))
        );
    }

    #[test]
    fn test_from_request() {
        let key = AnswerKey::from_request(QuestionType::Choice, Some(r#"["A","B"]"#), true)
            .unwrap()
            .unwrap();
        assert_eq!(key.option_keys(), vec!["A", "B"]);

        assert!(AnswerKey::from_request(QuestionType::Choice, Some("A"), true).is_err());
        assert!(AnswerKey::from_request(QuestionType::Choice, Some("[]"), true).is_err());
        assert!(AnswerKey::from_request(QuestionType::TrueFalse, Some("maybe"), false).is_err());
        assert_eq!(
            AnswerKey::from_request(QuestionType::TrueFalse, Some("对"), false).unwrap(),
            Some(AnswerKey::SingleKey("对".into()))
        );
        assert_eq!(
            AnswerKey::from_request(QuestionType::Essay, Some("ref"), false).unwrap(),
            None
        );
    }
}
