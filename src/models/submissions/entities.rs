use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ClassworkError, Result};

// 提交状态
//
// draft → submitted → graded，不允许从 submitted 回到 draft。
// graded 只能由批改流程设置。
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "submission.ts")]
pub enum SubmissionStatus {
    #[default]
    Draft,     // 草稿
    Submitted, // 已提交，等待批改
    Graded,    // 已批改
}

impl SubmissionStatus {
    pub const DRAFT: &'static str = "draft";
    pub const SUBMITTED: &'static str = "submitted";
    pub const GRADED: &'static str = "graded";

    /// 学生保存时请求的状态只能是 draft 或 submitted
    pub fn ensure_requestable(&self) -> Result<()> {
        match self {
            SubmissionStatus::Draft | SubmissionStatus::Submitted => Ok(()),
            SubmissionStatus::Graded => Err(ClassworkError::validation(
                "status must be draft or submitted",
            )),
        }
    }

    /// 学生保存路径上的状态迁移
    pub fn resave_as(&self, requested: SubmissionStatus) -> Result<SubmissionStatus> {
        requested.ensure_requestable()?;
        match (self, requested) {
            (SubmissionStatus::Draft, next) => Ok(next),
            (SubmissionStatus::Submitted, SubmissionStatus::Draft) => Err(
                ClassworkError::invalid_state("cannot change submitted assignment back to draft"),
            ),
            (SubmissionStatus::Submitted, _) => Ok(SubmissionStatus::Submitted),
            (SubmissionStatus::Graded, _) => Err(ClassworkError::invalid_state(
                "submission has already been graded",
            )),
        }
    }

    /// 显式提交路径：只有草稿可以提交
    pub fn submit(&self) -> Result<SubmissionStatus> {
        match self {
            SubmissionStatus::Draft => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::Submitted | SubmissionStatus::Graded => Err(
                ClassworkError::invalid_state("assignment already submitted"),
            ),
        }
    }

    /// 只有已提交的作业可以批改，已批改的不允许重新批改
    pub fn ensure_gradable(&self) -> Result<()> {
        match self {
            SubmissionStatus::Submitted => Ok(()),
            SubmissionStatus::Draft => Err(ClassworkError::invalid_state(
                "submission is not submitted yet",
            )),
            SubmissionStatus::Graded => Err(ClassworkError::invalid_state(
                "submission has already been graded",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: draft, submitted, graded"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Draft => write!(f, "{}", SubmissionStatus::DRAFT),
            SubmissionStatus::Submitted => write!(f, "{}", SubmissionStatus::SUBMITTED),
            SubmissionStatus::Graded => write!(f, "{}", SubmissionStatus::GRADED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            SubmissionStatus::DRAFT => Ok(SubmissionStatus::Draft),
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    // 各题得分之和
    pub score: i32,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_by: Option<i64>,
    pub feedback: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubmissionStatus::*;

    #[test]
    fn test_resave_from_draft() {
        assert_eq!(Draft.resave_as(Draft), Ok(Draft));
        assert_eq!(Draft.resave_as(Submitted), Ok(Submitted));
    }

    #[test]
    fn test_no_revert_to_draft() {
        let err = Submitted.resave_as(Draft).unwrap_err();
        assert_eq!(
            err,
            ClassworkError::invalid_state("cannot change submitted assignment back to draft")
        );
    }

    #[test]
    fn test_resave_submitted_keeps_status() {
        assert_eq!(Submitted.resave_as(Submitted), Ok(Submitted));
    }

    #[test]
    fn test_graded_is_terminal_for_students() {
        assert!(matches!(
            Graded.resave_as(Submitted),
            Err(ClassworkError::InvalidState(_))
        ));
        assert!(matches!(
            Draft.resave_as(Graded),
            Err(ClassworkError::Validation(_))
        ));
    }

    #[test]
    fn test_explicit_submit() {
        assert_eq!(Draft.submit(), Ok(Submitted));
        assert_eq!(
            Submitted.submit().unwrap_err().message(),
            "assignment already submitted"
        );
        assert!(Graded.submit().is_err());
    }

    #[test]
    fn test_gradable() {
        assert!(Submitted.ensure_gradable().is_ok());
        assert!(Draft.ensure_gradable().is_err());
        assert!(Graded.ensure_gradable().is_err());
    }
}
