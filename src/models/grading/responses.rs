use serde::Serialize;
use ts_rs::TS;

use crate::models::answers::entities::Answer;
use crate::models::assignments::responses::SubmissionCounts;
use crate::models::questions::entities::Question;
use crate::models::submissions::entities::Submission;

/// 批量批改单项结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct BatchGradeResult {
    pub submission_id: i64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 批量批改汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct BatchGradeResponse {
    pub results: Vec<BatchGradeResult>,
    pub success_count: usize,
    pub failed_count: usize,
}

/// 批改进度
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradingProgress {
    pub assignment_id: i64,
    // 已提交与已批改之和，不含草稿
    pub total_submissions: i64,
    pub graded_count: i64,
    pub ungraded_count: i64,
    pub grading_progress: f64,
    pub grades_published: bool,
}

impl GradingProgress {
    pub fn new(assignment_id: i64, submitted: i64, graded: i64, grades_published: bool) -> Self {
        let total = submitted + graded;
        let grading_progress = if total == 0 {
            0.0
        } else {
            graded as f64 / total as f64 * 100.0
        };

        Self {
            assignment_id,
            total_submissions: total,
            graded_count: graded,
            ungraded_count: submitted,
            grading_progress,
            grades_published,
        }
    }
}

/// 已批改提交的分数统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct ScoreStats {
    pub average: f64,
    pub max: i32,
    pub min: i32,
}

impl ScoreStats {
    /// 没有已批改的提交时返回 None
    pub fn from_scores(scores: &[i32]) -> Option<Self> {
        let max = *scores.iter().max()?;
        let min = *scores.iter().min()?;
        let sum: i64 = scores.iter().map(|&s| s as i64).sum();
        let average = sum as f64 / scores.len() as f64;

        Some(Self {
            average: round2(average),
            max,
            min,
        })
    }
}

/// 作业统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct AssignmentStatistics {
    pub assignment_id: i64,
    // 含草稿在内的全部提交
    pub total_submissions: i64,
    // 已提交与已批改之和
    pub submitted_count: i64,
    pub graded_count: i64,
    // 已交卷占全部提交的百分比
    pub submission_rate: f64,
    pub score_stats: Option<ScoreStats>,
}

impl AssignmentStatistics {
    pub fn new(assignment_id: i64, counts: &SubmissionCounts, graded_scores: &[i32]) -> Self {
        let total = counts.draft + counts.handed_in();
        let submission_rate = if total == 0 {
            0.0
        } else {
            round2(counts.handed_in() as f64 / total as f64 * 100.0)
        };

        Self {
            assignment_id,
            total_submissions: total,
            submitted_count: counts.handed_in(),
            graded_count: counts.graded,
            submission_rate,
            score_stats: ScoreStats::from_scores(graded_scores),
        }
    }
}

// 保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 题目与学生答案
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct QuestionWithAnswer {
    pub question: Question,
    pub answer: Option<Answer>,
}

/// 批改详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradingDetail {
    pub submission: Submission,
    pub questions: Vec<QuestionWithAnswer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_math() {
        let progress = GradingProgress::new(1, 6, 4, false);
        assert_eq!(progress.total_submissions, 10);
        assert_eq!(progress.ungraded_count, 6);
        assert!((progress.grading_progress - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_statistics_math() {
        let counts = SubmissionCounts {
            draft: 1,
            submitted: 1,
            graded: 2,
        };
        let stats = AssignmentStatistics::new(3, &counts, &[40, 35]);
        assert_eq!(stats.total_submissions, 4);
        assert_eq!(stats.submitted_count, 3);
        assert_eq!(stats.graded_count, 2);
        assert!((stats.submission_rate - 75.0).abs() < f64::EPSILON);
        assert_eq!(
            stats.score_stats,
            Some(ScoreStats {
                average: 37.5,
                max: 40,
                min: 35,
            })
        );
    }

    #[test]
    fn test_statistics_without_grades() {
        let counts = SubmissionCounts {
            draft: 0,
            submitted: 0,
            graded: 0,
        };
        let stats = AssignmentStatistics::new(3, &counts, &[]);
        assert_eq!(stats.submission_rate, 0.0);
        assert!(stats.score_stats.is_none());
    }

    #[test]
    fn test_average_rounds_to_two_places() {
        let stats = ScoreStats::from_scores(&[10, 10, 11]).unwrap();
        assert_eq!(stats.average, 10.33);
    }

    #[test]
    fn test_progress_empty() {
        let progress = GradingProgress::new(1, 0, 0, true);
        assert_eq!(progress.total_submissions, 0);
        assert_eq!(progress.grading_progress, 0.0);
        assert!(progress.grades_published);
    }
}
