use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::questions::entities::Question;

/// 作业下各状态的提交数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmissionCounts {
    pub draft: i64,
    pub submitted: i64,
    pub graded: i64,
}

impl SubmissionCounts {
    /// 已提交或已批改的数量（草稿不计入）
    pub fn handed_in(&self) -> i64 {
        self.submitted + self.graded
    }
}

/// 作业详情。非作业所属教师看不到标准答案
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentDetail {
    pub assignment: Assignment,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_counts: Option<SubmissionCounts>,
}
