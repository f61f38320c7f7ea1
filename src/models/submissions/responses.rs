use serde::Serialize;
use ts_rs::TS;

use super::entities::{Submission, SubmissionStatus};
use crate::models::answers::entities::Answer;

/// 提交及其全部答案
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionWithAnswers {
    pub submission: Submission,
    pub answers: Vec<Answer>,
}

/// 学生视角的答案，成绩发布前不显示得分
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct StudentAnswerView {
    pub question_id: i64,
    pub content: String,
    pub score: Option<i32>,
    pub is_correct: Option<bool>,
    pub feedback: Option<String>,
}

/// 学生视角的提交
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct StudentSubmissionView {
    pub id: i64,
    pub assignment_id: i64,
    pub status: SubmissionStatus,
    pub score: Option<i32>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub feedback: Option<String>,
    pub grades_published: bool,
    pub answers: Vec<StudentAnswerView>,
}

impl StudentSubmissionView {
    pub fn new(full: SubmissionWithAnswers, grades_published: bool) -> Self {
        let SubmissionWithAnswers {
            submission,
            answers,
        } = full;

        let answers = answers
            .into_iter()
            .map(|answer| StudentAnswerView {
                question_id: answer.question_id,
                content: answer.content,
                score: grades_published.then_some(answer.score),
                is_correct: if grades_published {
                    answer.is_correct
                } else {
                    None
                },
                feedback: if grades_published {
                    answer.feedback
                } else {
                    None
                },
            })
            .collect();

        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            status: submission.status,
            score: grades_published.then_some(submission.score),
            submitted_at: submission.submitted_at,
            graded_at: if grades_published {
                submission.graded_at
            } else {
                None
            },
            feedback: if grades_published {
                submission.feedback
            } else {
                None
            },
            grades_published,
            answers,
        }
    }
}
