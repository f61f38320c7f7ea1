use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ClassworkError, Result};

// 作业状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum AssignmentStatus {
    Draft,     // 草稿，可编辑题目
    Published, // 已发布，学生可作答
    Closed,    // 已关闭
}

impl AssignmentStatus {
    pub const DRAFT: &'static str = "draft";
    pub const PUBLISHED: &'static str = "published";
    pub const CLOSED: &'static str = "closed";

    /// 题目只能在草稿状态下增删改
    pub fn ensure_questions_editable(&self) -> Result<()> {
        match self {
            AssignmentStatus::Draft => Ok(()),
            _ => Err(ClassworkError::invalid_state(
                "cannot modify question in published assignment",
            )),
        }
    }

    pub fn publish(&self) -> Result<AssignmentStatus> {
        match self {
            AssignmentStatus::Draft => Ok(AssignmentStatus::Published),
            AssignmentStatus::Published => Err(ClassworkError::invalid_state(
                "assignment is already published",
            )),
            AssignmentStatus::Closed => Err(ClassworkError::invalid_state(
                "cannot publish closed assignment",
            )),
        }
    }

    pub fn unpublish(&self) -> Result<AssignmentStatus> {
        match self {
            AssignmentStatus::Published => Ok(AssignmentStatus::Draft),
            _ => Err(ClassworkError::invalid_state("assignment is not published")),
        }
    }

    pub fn close(&self) -> Result<AssignmentStatus> {
        match self {
            AssignmentStatus::Published => Ok(AssignmentStatus::Closed),
            _ => Err(ClassworkError::invalid_state(
                "only published assignment can be closed",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的作业状态: '{s}'. 支持的状态: draft, published, closed"
            ))
        })
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "{}", AssignmentStatus::DRAFT),
            AssignmentStatus::Published => write!(f, "{}", AssignmentStatus::PUBLISHED),
            AssignmentStatus::Closed => write!(f, "{}", AssignmentStatus::CLOSED),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            AssignmentStatus::DRAFT => Ok(AssignmentStatus::Draft),
            AssignmentStatus::PUBLISHED => Ok(AssignmentStatus::Published),
            AssignmentStatus::CLOSED => Ok(AssignmentStatus::Closed),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub class_id: i64,
    // 创建作业的教师，唯一有权修改和批改的人
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: chrono::DateTime<chrono::Utc>,
    pub total_score: i32,
    pub status: AssignmentStatus,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub grades_published: bool,
    pub grades_published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    pub fn is_owned_by(&self, teacher_id: i64) -> bool {
        self.teacher_id == teacher_id
    }

    pub fn ensure_owner(&self, teacher_id: i64) -> Result<()> {
        if self.is_owned_by(teacher_id) {
            Ok(())
        } else {
            Err(ClassworkError::permission_denied(
                "teacher has no permission on this assignment",
            ))
        }
    }

    pub fn is_past_deadline(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now > self.deadline
    }
}

/// 待写入的新作业
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub class_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: chrono::DateTime<chrono::Utc>,
    pub total_score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert_eq!(
            AssignmentStatus::Draft.publish(),
            Ok(AssignmentStatus::Published)
        );
        assert!(AssignmentStatus::Published.publish().is_err());
        assert_eq!(
            AssignmentStatus::Published.unpublish(),
            Ok(AssignmentStatus::Draft)
        );
        assert!(AssignmentStatus::Draft.close().is_err());
        assert_eq!(
            AssignmentStatus::Published.close(),
            Ok(AssignmentStatus::Closed)
        );
    }

    #[test]
    fn test_question_lock() {
        assert!(AssignmentStatus::Draft.ensure_questions_editable().is_ok());
        let err = AssignmentStatus::Published
            .ensure_questions_editable()
            .unwrap_err();
        assert!(matches!(err, ClassworkError::InvalidState(_)));
        assert!(AssignmentStatus::Closed.ensure_questions_editable().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "published".parse::<AssignmentStatus>(),
            Ok(AssignmentStatus::Published)
        );
        assert!("archived".parse::<AssignmentStatus>().is_err());
    }
}
